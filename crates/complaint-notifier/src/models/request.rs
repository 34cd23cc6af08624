//! 通知请求
//!
//! 上游提交的单个业务事件：投诉/消费记录的新增或状态变更。

use std::fmt;

use serde::{Deserialize, Deserializer, de};

use super::lenient;
use crate::error::{NotificationError, Result};

/// 通知类型
///
/// 上游以整数编码传入：1 = 新增，2 = 状态变更
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    New,
    Change,
}

impl NotificationType {
    pub fn code(self) -> i64 {
        match self {
            Self::New => 1,
            Self::Change => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Change => "CHANGE",
        }
    }
}

impl TryFrom<i64> for NotificationType {
    type Error = String;

    fn try_from(code: i64) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::New),
            2 => Ok(Self::Change),
            other => Err(format!("未知的通知类型: {other}")),
        }
    }
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 0 与缺失等价，其余编码必须是已定义的类型
fn notification_type<'de, D>(deserializer: D) -> std::result::Result<Option<NotificationType>, D::Error>
where
    D: Deserializer<'de>,
{
    match lenient::id(deserializer)? {
        None | Some(0) => Ok(None),
        Some(code) => NotificationType::try_from(code)
            .map(Some)
            .map_err(de::Error::custom),
    }
}

/// 状态变更记录：from/to 为状态码
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Differences {
    #[serde(default, deserialize_with = "lenient::id")]
    pub from: Option<i64>,
    #[serde(default, deserialize_with = "lenient::id")]
    pub to: Option<i64>,
}

impl Differences {
    pub fn new(from: i64, to: i64) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// 两端状态码都存在时返回 (from, to)，否则视为空记录
    pub fn codes(&self) -> Option<(i64, i64)> {
        self.from.zip(self.to)
    }

    pub fn is_empty(&self) -> bool {
        self.codes().is_none()
    }
}

/// 上游传入的数字标识
///
/// 解析出的数值用于查询与校验，原始文本原样透传到模板。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    value: i64,
    raw: String,
}

impl Identifier {
    pub(super) fn parsed(value: i64, raw: String) -> Self {
        Self { value, raw }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self {
            value,
            raw: value.to_string(),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// 通知请求
///
/// 除 differences 外的所有字段都必须存在且非空。
/// 空值规则对所有字段一致：缺失、空字符串、"0" 或数字 0 都视为空。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    #[serde(default, deserialize_with = "lenient::id")]
    pub reseller_id: Option<i64>,
    #[serde(default, deserialize_with = "notification_type")]
    pub notification_type: Option<NotificationType>,
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub client_id: Option<Identifier>,
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub creator_id: Option<Identifier>,
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub expert_id: Option<Identifier>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub complaint_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub complaint_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub consumption_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub consumption_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub agreement_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(default)]
    pub differences: Option<Differences>,
}

/// 通过校验的必填字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFields {
    pub reseller_id: i64,
    pub notification_type: NotificationType,
    pub client_id: i64,
    pub creator_id: i64,
    pub expert_id: i64,
}

fn is_blank(text: &str) -> bool {
    text.is_empty() || text == "0"
}

fn present_id(value: Option<i64>) -> Option<i64> {
    value.filter(|id| *id > 0)
}

fn present_identifier(value: &Option<Identifier>) -> Option<i64> {
    value
        .as_ref()
        .filter(|id| !is_blank(id.as_str()))
        .and_then(|id| present_id(Some(id.value())))
}

fn present_text(value: Option<&str>) -> Option<String> {
    value.filter(|text| !is_blank(text)).map(str::to_string)
}

impl NotificationRequest {
    /// 校验必填字段，按 resellerId、notificationType、clientId、creatorId、expertId
    /// 的顺序返回第一个缺失的字段
    pub fn validate(&self) -> Result<RequiredFields> {
        let missing = |field| NotificationError::Validation { field };

        let reseller_id = present_id(self.reseller_id).ok_or_else(|| missing("resellerId"))?;
        let notification_type = self
            .notification_type
            .ok_or_else(|| missing("notificationType"))?;
        let client_id = present_identifier(&self.client_id).ok_or_else(|| missing("clientId"))?;
        let creator_id =
            present_identifier(&self.creator_id).ok_or_else(|| missing("creatorId"))?;
        let expert_id = present_identifier(&self.expert_id).ok_or_else(|| missing("expertId"))?;

        Ok(RequiredFields {
            reseller_id,
            notification_type,
            client_id,
            creator_id,
            expert_id,
        })
    }

    /// 需要透传到模板的字段，按固定顺序返回 (源字段名, 原始值)
    ///
    /// 空值以 None 表示，由模板组装阶段决定如何处理
    pub fn passthrough_fields(&self) -> [(&'static str, Option<String>); 9] {
        let id = |value: &Option<Identifier>| present_text(value.as_ref().map(Identifier::as_str));
        let text = |value: &Option<String>| present_text(value.as_deref());

        [
            ("complaintId", text(&self.complaint_id)),
            ("complaintNumber", text(&self.complaint_number)),
            ("creatorId", id(&self.creator_id)),
            ("expertId", id(&self.expert_id)),
            ("clientId", id(&self.client_id)),
            ("consumptionId", text(&self.consumption_id)),
            ("consumptionNumber", text(&self.consumption_number)),
            ("agreementNumber", text(&self.agreement_number)),
            ("date", text(&self.date)),
        ]
    }
}
