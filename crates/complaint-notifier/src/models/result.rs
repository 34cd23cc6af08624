//! 分发结果
//!
//! 每个渠道恰好一个结果项，未使用的渠道保持"未发送"。

use serde::{Deserialize, Serialize};

/// 短信渠道结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsOutcome {
    pub is_sent: bool,
    pub message: String,
}

impl SmsOutcome {
    pub fn new(is_sent: bool, message: impl Into<String>) -> Self {
        Self {
            is_sent,
            message: message.into(),
        }
    }
}

/// 各渠道发送结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResult {
    pub notification_employee_by_email: bool,
    pub notification_client_by_email: bool,
    pub notification_client_by_sms: SmsOutcome,
}

impl DispatchResult {
    /// 所有渠道均为未发送的初始结果
    pub fn not_sent() -> Self {
        Self::default()
    }

    /// 成功发送的渠道数
    pub fn sent_count(&self) -> usize {
        [
            self.notification_employee_by_email,
            self.notification_client_by_email,
            self.notification_client_by_sms.is_sent,
        ]
        .into_iter()
        .filter(|sent| *sent)
        .count()
    }
}
