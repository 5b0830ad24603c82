use num::{bigint::RandBigInt, BigInt, One};
use rand::{rngs::ThreadRng, Rng};

use crate::utils::{bigint_from_bytes, bigint_to_bytes, hmac_sha256, modulo};

/// Supplies the per-signature secret `k`.
///
/// Implementations should return values in `[1, order-1]`; the signer rejects
/// anything else.
pub trait NonceSource {
    fn next_nonce(&mut self, order: &BigInt) -> BigInt;
}

// 密码学安全的随机数，在 [1, n-1] 内均匀分布
pub struct RandomNonce<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomNonce<R> {
    pub fn new(rng: R) -> Self {
        RandomNonce { rng }
    }
}

impl RandomNonce<ThreadRng> {
    pub fn thread_rng() -> Self {
        RandomNonce::new(rand::thread_rng())
    }
}

impl<R: Rng> NonceSource for RandomNonce<R> {
    fn next_nonce(&mut self, order: &BigInt) -> BigInt {
        self.rng.gen_bigint_range(&BigInt::one(), order)
    }
}

/// RFC 6979 style nonce: for every pair (secret, z), the sequence of `k`
/// values is fixed. Redraws continue the HMAC-SHA256 chain.
pub struct DeterministicNonce {
    k: Vec<u8>,
    v: Vec<u8>,
    drawn: bool,
}

impl DeterministicNonce {
    pub fn new(secret: &BigInt, z: &BigInt, order: &BigInt) -> Self {
        let mut k: Vec<u8> = vec![0; 32];
        let mut v: Vec<u8> = vec![1; 32];

        let reduced_z = modulo(z, order);
        let z_bytes = bigint_to_bytes(&reduced_z, 32);
        let secret_bytes = bigint_to_bytes(secret, 32);

        for separator in [0u8, 1] {
            let mut data: Vec<u8> = v.clone();
            data.push(separator);
            data.extend_from_slice(&secret_bytes);
            data.extend_from_slice(&z_bytes);
            k = hmac_sha256(&k, &data);
            v = hmac_sha256(&k, &v);
        }

        DeterministicNonce { k, v, drawn: false }
    }

    // K = HMAC(K, V || 0x00), V = HMAC(K, V)
    fn rekey(&mut self) {
        let mut data: Vec<u8> = self.v.clone();
        data.push(0);
        self.k = hmac_sha256(&self.k, &data);
        self.v = hmac_sha256(&self.k, &self.v);
    }
}

impl NonceSource for DeterministicNonce {
    fn next_nonce(&mut self, order: &BigInt) -> BigInt {
        loop {
            if self.drawn {
                self.rekey();
            }
            self.drawn = true;

            self.v = hmac_sha256(&self.k, &self.v);
            let candidate = bigint_from_bytes(&self.v);
            if candidate >= BigInt::one() && &candidate < order {
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use num::Zero;
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::group::FiniteCyclicGroup;
    use crate::utils::new_bigint;

    #[test]
    pub fn test_deterministic_k() {
        let n = FiniteCyclicGroup::from_secp256k1().n;

        let k = DeterministicNonce::new(&new_bigint(100), &new_bigint(10012), &n).next_nonce(&n);
        let target =
            "42695049216645585062640330142435867217220364746155645266231669475379433942288";
        assert!(k == BigInt::from_str(target).unwrap());

        let secret = BigInt::from_str(
            "61487454132488076575180963038085065582507398223936223029494779138210615773559",
        )
        .unwrap();
        let z = BigInt::from_str(
            "35224773764014901550789983228161827426520721227593273774884622297661387815467",
        )
        .unwrap();
        let k = DeterministicNonce::new(&secret, &z, &n).next_nonce(&n);
        let target =
            "82201750424828010361691422018693420038273380306457468260098575684456174963810";
        assert!(k == BigInt::from_str(target).unwrap());
    }

    #[test]
    fn deterministic_redraws_differ() {
        let n = FiniteCyclicGroup::from_secp256k1().n;
        let mut nonces = DeterministicNonce::new(&new_bigint(7), &new_bigint(42), &n);
        let first = nonces.next_nonce(&n);
        let second = nonces.next_nonce(&n);
        assert_ne!(first, second);

        let again = DeterministicNonce::new(&new_bigint(7), &new_bigint(42), &n).next_nonce(&n);
        assert_eq!(first, again);
    }

    #[test]
    fn deterministic_reduces_z_mod_n() {
        let n = FiniteCyclicGroup::from_secp256k1().n;
        let secret = new_bigint(7);
        let first = |z: &BigInt| DeterministicNonce::new(&secret, z, &n).next_nonce(&n);

        let z = new_bigint(42);
        assert_eq!(first(&(&z + &n)), first(&z));
        assert_eq!(first(&(&z + &n + &n)), first(&z));
        assert_eq!(first(&n), first(&BigInt::zero()));
    }

    #[test]
    fn random_in_range() {
        let order = new_bigint(11);
        let mut nonces = RandomNonce::new(StdRng::seed_from_u64(7));
        for _ in 0..200 {
            let k = nonces.next_nonce(&order);
            assert!(k >= BigInt::one() && k < order);
        }
    }
}
