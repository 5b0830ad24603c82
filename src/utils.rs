use hmac::{Hmac, Mac};
use num::{
    bigint::{BigInt, Sign},
    traits::Euclid,
    Integer, One, Signed, Zero,
};
use sha2::{Digest, Sha256};

use crate::error::{EcdsaError, Result};

type HmacSha256 = Hmac<Sha256>;

pub fn new_bigint(i: i64) -> BigInt {
    BigInt::from(i)
}

/// Euclidean modulo: the result always lies in `[0, |modulus|)`, also for a
/// negative `value`. `modulus` must be non-zero.
pub fn modulo(value: &BigInt, modulus: &BigInt) -> BigInt {
    value.rem_euclid(modulus)
}

// 向负无穷取整
pub fn floor_div(a: &BigInt, b: &BigInt) -> BigInt {
    a.div_floor(b)
}

/// Returns the `x` in `[0, modulus)` with `value * x ≡ 1 (mod modulus)`, found
/// with the extended Euclidean algorithm.
///
/// Fails with [`EcdsaError::NoModularInverse`] when `gcd(value, modulus) != 1`.
/// Under a prime modulus that only happens for `value ≡ 0`, so the curve and
/// protocol code never hit it with valid inputs; a zero `s` taken from an
/// untrusted signature is the realistic way to get here.
pub fn mod_inverse(value: &BigInt, modulus: &BigInt) -> Result<BigInt> {
    let m = modulus.abs();
    if m.is_zero() {
        return Err(EcdsaError::NoModularInverse {
            value: value.clone(),
            modulus: modulus.clone(),
        });
    }

    let egcd = modulo(value, &m).extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return Err(EcdsaError::NoModularInverse {
            value: value.clone(),
            modulus: modulus.clone(),
        });
    }
    Ok(modulo(&egcd.x, &m))
}

// 以大端方式编码为固定长度，不足的在前面补0
pub fn bigint_to_bytes(input: &BigInt, len: usize) -> Vec<u8> {
    let (_, data_part) = input.to_bytes_be();
    if data_part.len() >= len {
        return data_part[data_part.len() - len..].to_vec();
    }
    let mut result: Vec<u8> = vec![0; len - data_part.len()];
    result.extend_from_slice(&data_part);
    result
}

pub fn bigint_from_bytes(bytes: &[u8]) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, bytes)
}

pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
