use hex_literal::hex;
use num::{BigInt, Zero};

use crate::utils::{bigint_from_bytes, modulo, new_bigint};

// secp256k1 参数
// P = 2**256 - 2**32 - 977
const P: [u8; 32] = hex!("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
const N: [u8; 32] = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");
const GX: [u8; 32] = hex!("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
const GY: [u8; 32] = hex!("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8");

/// Short Weierstrass curve `y^2 = x^3 + ax + b` over the prime field `F_p`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CurveParams {
    pub a: BigInt,
    pub b: BigInt,
    pub p: BigInt,
}

impl CurveParams {
    pub fn new(a: BigInt, b: BigInt, p: BigInt) -> Self {
        CurveParams { a, b, p }
    }

    pub fn secp256k1() -> Self {
        CurveParams {
            a: new_bigint(0),
            b: new_bigint(7),
            p: bigint_from_bytes(&P),
        }
    }

    // (x^3 + ax + b - y^2) mod p == 0
    pub fn contains(&self, x: &BigInt, y: &BigInt) -> bool {
        let rhs = x.pow(3) + &self.a * x + &self.b;
        modulo(&(rhs - y.pow(2)), &self.p).is_zero()
    }
}

/// Base point coordinates plus the order `n` of the subgroup it generates.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GeneratorParams {
    pub x: BigInt,
    pub y: BigInt,
    pub order: BigInt,
}

impl GeneratorParams {
    pub fn secp256k1() -> Self {
        GeneratorParams {
            x: bigint_from_bytes(&GX),
            y: bigint_from_bytes(&GY),
            order: bigint_from_bytes(&N),
        }
    }
}
