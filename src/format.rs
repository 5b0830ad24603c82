//! Text boundary: integers, public keys and signatures as the user types them,
//! and their JSON rendering.
//!
//! Every parse failure comes back as [`EcdsaError::MalformedInput`], which a
//! caller can treat as "input not ready yet".

use num::BigInt;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::curve::CurveParams;
use crate::ecdsa::Signature;
use crate::error::{EcdsaError, Result};
use crate::point::CurvePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayFormat {
    #[default]
    Decimal,
    Hex,
}

/// Parses a decimal or `0x`-prefixed hexadecimal integer, with an optional
/// leading `-`. Surrounding whitespace is ignored.
pub fn parse_bigint(input: &str) -> Result<BigInt> {
    let s = input.trim();
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (radix, digits) = match body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        Some(hex) => (16, hex),
        None => (10, body),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(EcdsaError::malformed(format!("无法解析整数 {:?}", input)));
    }
    let value = BigInt::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| EcdsaError::malformed(format!("无法解析整数 {:?}", input)))?;

    Ok(if negative { -value } else { value })
}

pub fn format_bigint(value: &BigInt, format: DisplayFormat) -> String {
    match format {
        DisplayFormat::Decimal => value.to_string(),
        DisplayFormat::Hex => format!("{:#x}", value),
    }
}

#[derive(Deserialize)]
struct PointFields {
    x: Value,
    y: Value,
}

#[derive(Deserialize)]
struct SignatureFields {
    r: Value,
    s: Value,
}

// 字段可以是字符串(十进制或0x十六进制)，也可以是JSON整数
fn integer_field(name: &str, value: &Value) -> Result<BigInt> {
    match value {
        Value::String(s) => parse_bigint(s),
        Value::Number(n) if n.is_i64() || n.is_u64() => parse_bigint(&n.to_string()),
        _ => Err(EcdsaError::malformed(format!(
            "字段 {} 必须是整数或整数字符串",
            name
        ))),
    }
}

/// Parses `{"x": .., "y": ..}` into a point of `curve`. A point that misses the
/// curve is reported as malformed input as well.
pub fn parse_public_key(input: &str, curve: &CurveParams) -> Result<CurvePoint> {
    let fields: PointFields = serde_json::from_str(input)
        .map_err(|e| EcdsaError::malformed(format!("公钥 JSON 无效: {}", e)))?;
    let x = integer_field("x", &fields.x)?;
    let y = integer_field("y", &fields.y)?;
    CurvePoint::new(x, y, curve.clone()).map_err(|e| EcdsaError::malformed(e.to_string()))
}

pub fn parse_signature(input: &str) -> Result<Signature> {
    let fields: SignatureFields = serde_json::from_str(input)
        .map_err(|e| EcdsaError::malformed(format!("签名 JSON 无效: {}", e)))?;
    Ok(Signature::new(
        integer_field("r", &fields.r)?,
        integer_field("s", &fields.s)?,
    ))
}

pub fn render_point(point: &CurvePoint, format: DisplayFormat) -> String {
    let value = json!({
        "x": point.x().map(|x| format_bigint(x, format)),
        "y": point.y().map(|y| format_bigint(y, format)),
    });
    format!("{:#}", value)
}

pub fn render_signature(sig: &Signature, format: DisplayFormat) -> String {
    let value = json!({
        "r": format_bigint(&sig.r, format),
        "s": format_bigint(&sig.s, format),
    });
    format!("{:#}", value)
}
