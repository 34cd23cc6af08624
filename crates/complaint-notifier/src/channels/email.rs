//! 邮件渠道
//!
//! 当前为模拟实现（仅记录日志），生产环境替换为 SMTP 或邮件服务商的 API 调用。

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use super::{EMAIL, EmailChannel};
use crate::error::ChannelError;

/// 模拟邮件发送器
#[derive(Debug, Default)]
pub struct LogEmailChannel;

impl LogEmailChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailChannel for LogEmailChannel {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<bool, ChannelError> {
        if address.trim().is_empty() {
            warn!(channel = EMAIL, "收件地址为空，拒绝发送");
            return Ok(false);
        }

        let message_id = Uuid::now_v7().to_string();

        info!(
            channel = EMAIL,
            message_id = %message_id,
            address = %address,
            subject = %subject,
            body_length = body.len(),
            "模拟发送邮件通知"
        );

        Ok(true)
    }
}
