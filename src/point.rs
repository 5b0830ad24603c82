use std::fmt;
use std::ops;

use num::{BigInt, Signed, Zero};
use tracing::trace;

use crate::curve::CurveParams;
use crate::error::{EcdsaError, Result};
use crate::utils::{mod_inverse, modulo};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Coordinates {
    // 无穷远点，群的单位元
    Infinity,
    Finite { x: BigInt, y: BigInt },
}

/// A point of the group `E(F_p)`: either an affine pair that satisfies the
/// curve equation, or the point at infinity.
///
/// Points are values. Every operation returns a new point, and every finite
/// result is checked against the curve equation again.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CurvePoint {
    coords: Coordinates,
    curve: CurveParams,
}

impl CurvePoint {
    /// Builds a finite point. Coordinates are reduced into `[0, p)`; the
    /// curve equation must hold or the call fails with `PointNotOnCurve`.
    pub fn new(x: BigInt, y: BigInt, curve: CurveParams) -> Result<Self> {
        let x = modulo(&x, &curve.p);
        let y = modulo(&y, &curve.p);
        if !curve.contains(&x, &y) {
            return Err(EcdsaError::PointNotOnCurve { x, y });
        }

        Ok(CurvePoint {
            coords: Coordinates::Finite { x, y },
            curve,
        })
    }

    pub fn infinity(curve: CurveParams) -> Self {
        CurvePoint {
            coords: Coordinates::Infinity,
            curve,
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.coords == Coordinates::Infinity
    }

    pub fn coords(&self) -> &Coordinates {
        &self.coords
    }

    pub fn curve(&self) -> &CurveParams {
        &self.curve
    }

    pub fn x(&self) -> Option<&BigInt> {
        match &self.coords {
            Coordinates::Finite { x, .. } => Some(x),
            Coordinates::Infinity => None,
        }
    }

    pub fn y(&self) -> Option<&BigInt> {
        match &self.coords {
            Coordinates::Finite { y, .. } => Some(y),
            Coordinates::Infinity => None,
        }
    }

    // 坐标相同即相等，曲线是固定的
    pub fn is_equal(&self, other: &CurvePoint) -> bool {
        self.coords == other.coords
    }

    /// Mirror image across the x axis: `(x, -y)`.
    pub fn negate(&self) -> CurvePoint {
        match &self.coords {
            Coordinates::Infinity => self.clone(),
            Coordinates::Finite { x, y } => CurvePoint {
                coords: Coordinates::Finite {
                    x: x.clone(),
                    y: modulo(&-y, &self.curve.p),
                },
                curve: self.curve.clone(),
            },
        }
    }

    /// Group law. Handles the identity, inverse points and doubling.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &CurvePoint) -> Result<CurvePoint> {
        if self.curve != other.curve {
            return Err(EcdsaError::CurveMismatch);
        }

        let (x1, y1, x2, y2) = match (&self.coords, &other.coords) {
            // case 1: 任何点加上无穷远点都等于自身
            (Coordinates::Infinity, _) => return Ok(other.clone()),
            (_, Coordinates::Infinity) => return Ok(self.clone()),
            (Coordinates::Finite { x: x1, y: y1 }, Coordinates::Finite { x: x2, y: y2 }) => {
                (x1, y1, x2, y2)
            }
        };

        let p = &self.curve.p;

        // case 2: 关于x轴对称的两个点相加等于无穷远点
        // 切线垂直 (y = 0) 的倍点也一样
        if x1 == x2 && (y1 != y2 || y1.is_zero()) {
            return Ok(CurvePoint::infinity(self.curve.clone()));
        }

        let alpha = if x1 == x2 {
            // case 3: 倍点, α = (3x^2 + a) / 2y
            let numerator = x1.pow(2) * 3 + &self.curve.a;
            modulo(&(numerator * mod_inverse(&(y1 + y1), p)?), p)
        } else {
            // case 4: α = (y2 - y1) / (x2 - x1)
            modulo(&((y2 - y1) * mod_inverse(&(x2 - x1), p)?), p)
        };

        // x3 = α^2 - x1 - x2
        // y3 = α(x1 - x3) - y1
        let x3 = modulo(&(alpha.pow(2) - x1 - x2), p);
        let y3 = modulo(&(&alpha * (x1 - &x3) - y1), p);
        CurvePoint::new(x3, y3, self.curve.clone())
    }

    /// Scalar multiplication `t·P` for any integer `t`.
    ///
    /// Doubles while the doubled multiple still fits into `t`. Past that point
    /// it adds the largest partial multiple recorded so far that fits and
    /// whose x differs from the accumulator, falling back to `1·P`.
    pub fn multiply(&self, t: &BigInt) -> Result<CurvePoint> {
        if t.is_zero() {
            return Ok(CurvePoint::infinity(self.curve.clone()));
        }

        let (times, base) = if t.is_negative() {
            (-t, self.negate())
        } else {
            (t.clone(), self.clone())
        };

        let mut n = BigInt::from(1);
        let mut current = base;
        // (倍数, 点)，倍数严格递增
        let mut used: Vec<(BigInt, CurvePoint)> = vec![];

        while n < times {
            used.push((n.clone(), current.clone()));
            let doubled = &n + &n;
            if doubled <= times {
                current = current.add(&current)?;
                n = doubled;
            } else {
                let (step, partial) = used
                    .iter()
                    .rev()
                    .find(|(m, point)| &n + m <= times && point.x() != current.x())
                    .unwrap_or(&used[0]);
                n += step;
                current = current.add(partial)?;
            }
        }

        trace!(steps = used.len(), "scalar multiplication");
        Ok(current)
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.coords {
            Coordinates::Infinity => write!(f, "Point(infinity)"),
            Coordinates::Finite { x, y } => write!(f, "Point({}, {})", x, y),
        }
    }
}

impl ops::Neg for &CurvePoint {
    type Output = CurvePoint;

    fn neg(self) -> CurvePoint {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::curve::GeneratorParams;
    use crate::utils::{bigint_from_bytes, new_bigint};

    fn f223() -> CurveParams {
        CurveParams::new(new_bigint(0), new_bigint(7), new_bigint(223))
    }

    fn point223(x: i64, y: i64) -> CurvePoint {
        CurvePoint::new(new_bigint(x), new_bigint(y), f223()).unwrap()
    }

    fn generator() -> CurvePoint {
        let g = GeneratorParams::secp256k1();
        CurvePoint::new(g.x, g.y, CurveParams::secp256k1()).unwrap()
    }

    fn secp_point(x: [u8; 32], y: [u8; 32]) -> CurvePoint {
        CurvePoint::new(
            bigint_from_bytes(&x),
            bigint_from_bytes(&y),
            CurveParams::secp256k1(),
        )
        .unwrap()
    }

    #[test]
    pub fn ecc_test() {
        assert!(CurvePoint::new(new_bigint(192), new_bigint(105), f223()).is_ok());
        assert!(CurvePoint::new(new_bigint(17), new_bigint(56), f223()).is_ok());
        assert!(matches!(
            CurvePoint::new(new_bigint(200), new_bigint(119), f223()),
            Err(EcdsaError::PointNotOnCurve { .. })
        ));
        assert!(CurvePoint::new(new_bigint(42), new_bigint(99), f223()).is_err());
    }

    #[test]
    pub fn ecc_test_add() {
        // (170, 142) + (60, 139) = (220, 181)
        let sum = point223(170, 142).add(&point223(60, 139)).unwrap();
        assert_eq!(sum, point223(220, 181));

        // (47, 71) + (17, 56) = (215, 68)
        let sum = point223(47, 71).add(&point223(17, 56)).unwrap();
        assert_eq!(sum, point223(215, 68));

        // (143, 98) + (76, 66) = (47, 71)
        let sum = point223(143, 98).add(&point223(76, 66)).unwrap();
        assert_eq!(sum, point223(47, 71));
    }

    #[test]
    pub fn ecc_test_mul() {
        // 7 * (15, 86) = 无穷远点
        let p = point223(15, 86);
        assert!(p.multiply(&new_bigint(7)).unwrap().is_infinity());
        assert_eq!(p.multiply(&new_bigint(8)).unwrap(), p);

        let p = point223(47, 71);
        assert_eq!(p.multiply(&new_bigint(2)).unwrap(), point223(36, 111));
        assert_eq!(p.multiply(&new_bigint(4)).unwrap(), point223(194, 51));
        assert_eq!(p.multiply(&new_bigint(8)).unwrap(), point223(116, 55));
        assert!(p.multiply(&new_bigint(21)).unwrap().is_infinity());
    }

    #[test]
    fn identity_and_inverse() {
        let p = point223(47, 71);
        let inf = CurvePoint::infinity(f223());
        assert_eq!(p.add(&inf).unwrap(), p);
        assert_eq!(inf.add(&p).unwrap(), p);
        assert!(p.add(&p.negate()).unwrap().is_infinity());
        assert!((-&inf).is_infinity());
        assert!(p.multiply(&new_bigint(0)).unwrap().is_infinity());
    }

    #[test]
    fn negative_scalar() {
        let p = point223(47, 71);
        assert_eq!(p.multiply(&new_bigint(-1)).unwrap(), point223(47, 223 - 71));
        assert_eq!(
            p.multiply(&new_bigint(-5)).unwrap(),
            p.multiply(&new_bigint(5)).unwrap().negate()
        );
    }

    #[test]
    fn curve_mismatch() {
        let g = generator();
        assert_eq!(g.add(&point223(47, 71)), Err(EcdsaError::CurveMismatch));
    }

    #[test]
    fn generator_multiples() {
        let g = generator();
        assert!(g.multiply(&new_bigint(1)).unwrap().is_equal(&g));
        assert_eq!(g.multiply(&new_bigint(2)).unwrap(), g.add(&g).unwrap());

        let two_g = secp_point(
            hex!("c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"),
            hex!("1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"),
        );
        let three_g = secp_point(
            hex!("f9308a019258c31049344f85f89d5229b531c845836f99b08601f113bce036f9"),
            hex!("388f7b0f632de8140fe337e62a37f3566500a99934c2231b6cb9fd7584b8e672"),
        );
        let seven_g = secp_point(
            hex!("5cbdf0646e5db4eaa398f365f2ea7a0e3d419b7e0330e39ce92bddedcac4f9bc"),
            hex!("6aebca40ba255960a3178d6d861a54dba813d0b813fde7b5a5082628087264da"),
        );
        assert_eq!(g.multiply(&new_bigint(2)).unwrap(), two_g);
        assert_eq!(g.multiply(&new_bigint(3)).unwrap(), three_g);
        assert_eq!(two_g.add(&g).unwrap(), three_g);
        assert_eq!(g.multiply(&new_bigint(7)).unwrap(), seven_g);
    }

    #[test]
    fn generator_order() {
        let g = generator();
        let n = GeneratorParams::secp256k1().order;
        assert!(g.multiply(&n).unwrap().is_infinity());
        assert_eq!(g.multiply(&(&n + 1)).unwrap(), g);
        assert_eq!(g.multiply(&(&n - 1)).unwrap(), g.negate());
    }

    #[test]
    fn multiply_is_additive() {
        let g = generator();
        let t1 = new_bigint(0x1234_5678_9abc);
        let t2 = new_bigint(987_654_321);
        let lhs = g.multiply(&(&t1 + &t2)).unwrap();
        let rhs = g
            .multiply(&t1)
            .unwrap()
            .add(&g.multiply(&t2).unwrap())
            .unwrap();
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn display() {
        assert_eq!(point223(47, 71).to_string(), "Point(47, 71)");
        assert_eq!(CurvePoint::infinity(f223()).to_string(), "Point(infinity)");
    }
}
