use num::{BigInt, One};

use crate::curve::{CurveParams, GeneratorParams};
use crate::error::{EcdsaError, Result};
use crate::point::CurvePoint;

// 由生成点 G 生成的有限循环群，阶为 n
#[derive(Debug, PartialEq, Clone)]
pub struct FiniteCyclicGroup {
    pub curve: CurveParams,
    pub g: CurvePoint,
    pub n: BigInt,
}

impl FiniteCyclicGroup {
    pub fn new(curve: CurveParams, generator: GeneratorParams) -> Result<Self> {
        let g = CurvePoint::new(generator.x, generator.y, curve.clone())?;
        Ok(FiniteCyclicGroup {
            curve,
            g,
            n: generator.order,
        })
    }

    pub fn from_secp256k1() -> Self {
        let curve = CurveParams::secp256k1();
        let generator = GeneratorParams::secp256k1();
        let g = CurvePoint::new(generator.x, generator.y, curve.clone())
            .expect("secp256k1 generator lies on its curve");
        FiniteCyclicGroup {
            curve,
            g,
            n: generator.order,
        }
    }

    // k * G
    pub fn generate(&self, k: &BigInt) -> Result<CurvePoint> {
        self.g.multiply(k)
    }

    // k * (x, y)，点需要先验证是否在曲线上
    pub fn generate_from_point(&self, k: &BigInt, x: &BigInt, y: &BigInt) -> Result<CurvePoint> {
        CurvePoint::new(x.clone(), y.clone(), self.curve.clone())?.multiply(k)
    }

    pub fn in_scalar_range(&self, k: &BigInt) -> bool {
        k >= &BigInt::one() && k < &self.n
    }

    /// Checks that `k` lies in `[1, n-1]`.
    pub fn check_scalar(&self, what: &'static str, k: &BigInt) -> Result<()> {
        if self.in_scalar_range(k) {
            return Ok(());
        }
        Err(EcdsaError::OutOfRange {
            what,
            value: k.clone(),
            upper: &self.n - BigInt::one(),
        })
    }
}
