use num::BigInt;

use crate::{
    ecdsa::{Ecdsa, Signature},
    error::Result,
    nonce::DeterministicNonce,
    point::CurvePoint,
};

#[derive(Debug, Clone)]
pub struct PrivateKey {
    pub secret: BigInt,
    pub point: CurvePoint,
    ecdsa: Ecdsa,
}

impl PrivateKey {
    // secret 必须在 [1, n-1] 内
    pub fn new(secret: BigInt, ecdsa: &Ecdsa) -> Result<PrivateKey> {
        let point = ecdsa.derive_public_key(&secret)?;
        Ok(PrivateKey {
            secret,
            point,
            ecdsa: ecdsa.clone(),
        })
    }

    pub fn sign(&self, z: &BigInt) -> Result<Signature> {
        self.ecdsa.sign(z, &self.secret)
    }

    // 对于每一对(z, secret), 签名是确定唯一的
    pub fn sign_deterministic(&self, z: &BigInt) -> Result<Signature> {
        let mut nonces = DeterministicNonce::new(&self.secret, z, &self.ecdsa.group().n);
        self.ecdsa.sign_with(z, &self.secret, &mut nonces)
    }

    pub fn verify(&self, z: &BigInt, sig: &Signature) -> bool {
        self.ecdsa.verify(z, sig, &self.point)
    }

    pub fn hex(&self) -> String {
        format!("0x{:x}", self.secret)
    }
}
