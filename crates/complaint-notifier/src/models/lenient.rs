//! 宽松的标量反序列化
//!
//! 上游表单提交的数字字段可能是 JSON 数字，也可能是数字字符串，
//! 这里统一转换为强类型值。空字符串与 null 视为缺失。

use serde::{Deserialize, Deserializer, de};

use super::request::Identifier;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Text(String),
}

/// 数字或数字字符串 -> `Option<i64>`
pub(crate) fn id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(value)) => Ok(Some(value)),
        Some(Scalar::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("无效的数字字段: {raw}")))
        }
    }
}

/// 数字或数字字符串 -> `Option<Identifier>`，保留原始文本
pub(crate) fn identifier<'de, D>(deserializer: D) -> Result<Option<Identifier>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(value)) => Ok(Some(Identifier::from(value))),
        Some(Scalar::Text(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            let value = trimmed
                .parse()
                .map_err(|_| de::Error::custom(format!("无效的数字字段: {raw}")))?;
            Ok(Some(Identifier::parsed(value, raw)))
        }
    }
}

/// 字符串或数字 -> `Option<String>`
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => None,
        Some(Scalar::Int(value)) => Some(value.to_string()),
        Some(Scalar::Text(raw)) => Some(raw),
    })
}
