use num::BigInt;

use crate::error::{EcdsaError, Result};
use crate::format::parse_bigint;
use crate::utils::{bigint_from_bytes, sha256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageMode {
    // 对文本做 sha256
    #[default]
    Hashed,
    // 文本本身就是要签名的整数
    Integer,
}

/// SHA-256 of the UTF-8 message, read as a big-endian integer.
pub fn digest(message: &str) -> BigInt {
    bigint_from_bytes(&sha256(message.as_bytes()))
}

pub fn message_digest(message: &str, mode: MessageMode) -> Result<BigInt> {
    if message.is_empty() {
        return Err(EcdsaError::malformed("消息不能为空"));
    }
    match mode {
        MessageMode::Hashed => Ok(digest(message)),
        MessageMode::Integer => parse_bigint(message),
    }
}
