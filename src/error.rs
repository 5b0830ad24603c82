use num::BigInt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EcdsaError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EcdsaError {
    /// 坐标不满足 y^2 = x^3 + ax + b (mod p)
    #[error("点({x}, {y})不在曲线上！")]
    PointNotOnCurve { x: BigInt, y: BigInt },

    /// gcd(value, modulus) != 1
    #[error("{value} 在模 {modulus} 下不存在逆元！")]
    NoModularInverse { value: BigInt, modulus: BigInt },

    /// UI 边界上无法解析的输入
    #[error("无效输入：{0}")]
    MalformedInput(String),

    #[error("{what} {value} 不在范围[1, {upper}]内！")]
    OutOfRange {
        what: &'static str,
        value: BigInt,
        upper: BigInt,
    },

    #[error("尝试 {attempts} 次后仍未得到可用的 nonce")]
    RetriesExhausted { attempts: usize },

    #[error("不同曲线的点不能相加！")]
    CurveMismatch,
}

impl EcdsaError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        EcdsaError::MalformedInput(msg.into())
    }
}
