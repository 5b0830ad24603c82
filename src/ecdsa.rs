use num::{bigint::RandBigInt, BigInt, One, Zero};
use rand::Rng;
use tracing::debug;

use crate::error::{EcdsaError, Result};
use crate::group::FiniteCyclicGroup;
use crate::nonce::{NonceSource, RandomNonce};
use crate::point::CurvePoint;
use crate::utils::{mod_inverse, modulo};

pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Signature {
    pub r: BigInt,
    pub s: BigInt,
}

impl Signature {
    pub fn new(r: BigInt, s: BigInt) -> Self {
        Signature { r, s }
    }
}

/// ECDSA over an explicit cyclic group.
#[derive(Debug, Clone)]
pub struct Ecdsa {
    group: FiniteCyclicGroup,
    max_attempts: usize,
}

impl Ecdsa {
    pub fn new(group: FiniteCyclicGroup) -> Self {
        Ecdsa {
            group,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn secp256k1() -> Self {
        Ecdsa::new(FiniteCyclicGroup::from_secp256k1())
    }

    /// Upper bound on nonce draws per signature. Zero is raised to one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn group(&self) -> &FiniteCyclicGroup {
        &self.group
    }

    // 随机生成私钥, [1, n-1]
    pub fn random_private_key<R: Rng>(&self, rng: &mut R) -> BigInt {
        rng.gen_bigint_range(&BigInt::one(), &self.group.n)
    }

    /// Public key `d·G`. The private scalar must lie in `[1, n-1]`.
    pub fn derive_public_key(&self, secret: &BigInt) -> Result<CurvePoint> {
        self.group.check_scalar("private key", secret)?;
        self.group.generate(secret)
    }

    pub fn sign(&self, z: &BigInt, secret: &BigInt) -> Result<Signature> {
        self.sign_with(z, secret, &mut RandomNonce::thread_rng())
    }

    /// Signs digest `z` with `secret`, drawing nonces from `nonces`.
    ///
    /// A nonce that yields `r == 0` or `s == 0` is discarded and a new one is
    /// drawn, at most `max_attempts` times in total.
    pub fn sign_with<N: NonceSource>(
        &self,
        z: &BigInt,
        secret: &BigInt,
        nonces: &mut N,
    ) -> Result<Signature> {
        let n = &self.group.n;
        self.group.check_scalar("private key", secret)?;

        for attempt in 1..=self.max_attempts {
            let k = nonces.next_nonce(n);
            self.group.check_scalar("nonce", &k)?;

            // r is the x coordinate of kG
            let r = match self.group.generate(&k)?.x() {
                Some(x) => modulo(x, n),
                None => BigInt::zero(),
            };
            if r.is_zero() {
                debug!(attempt, "r == 0, drawing a new nonce");
                continue;
            }

            // s = (z + r·d) / k
            let k_inv = mod_inverse(&k, n)?;
            let s = modulo(&(k_inv * (z + &r * secret)), n);
            if s.is_zero() {
                debug!(attempt, "s == 0, drawing a new nonce");
                continue;
            }

            return Ok(Signature { r, s });
        }

        Err(EcdsaError::RetriesExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Checks `sig` over digest `z` against `public_key`.
    ///
    /// Malformed signatures and keys are reported as `false`, never as errors.
    pub fn verify(&self, z: &BigInt, sig: &Signature, public_key: &CurvePoint) -> bool {
        match self.check(z, sig, public_key) {
            Ok(valid) => valid,
            Err(e) => {
                debug!(error = %e, "signature rejected");
                false
            }
        }
    }

    fn check(&self, z: &BigInt, sig: &Signature, public_key: &CurvePoint) -> Result<bool> {
        let n = &self.group.n;

        if public_key.is_infinity() || public_key.curve() != &self.group.curve {
            debug!("public key is not a usable point of this group");
            return Ok(false);
        }

        // uG + vP = kG
        // u = z/s, v = r/s
        let s_inv = mod_inverse(&sig.s, n)?;
        let u = modulo(&(z * &s_inv), n);
        let v = modulo(&(&sig.r * &s_inv), n);
        let c = self.group.generate(&u)?.add(&public_key.multiply(&v)?)?;

        match c.x() {
            Some(x) => Ok(modulo(&(&sig.r - x), n).is_zero()),
            None => Ok(false),
        }
    }
}
