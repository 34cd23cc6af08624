//! 短信渠道
//!
//! 当前为模拟实现，生产环境需要接入真实的短信服务。

use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use super::{SMS, SmsChannel};
use crate::error::ChannelError;

/// 模拟短信发送器
///
/// 短信有字数限制，超长内容在日志中标记但不截断，由服务商决定拆分方式。
#[derive(Debug)]
pub struct LogSmsChannel {
    max_content_length: usize,
}

impl Default for LogSmsChannel {
    fn default() -> Self {
        Self {
            max_content_length: 160,
        }
    }
}

impl LogSmsChannel {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SmsChannel for LogSmsChannel {
    async fn send(&self, number: &str, message: &str) -> Result<bool, ChannelError> {
        if number.trim().is_empty() {
            warn!(channel = SMS, "用户未绑定手机号，拒绝发送");
            return Ok(false);
        }

        let message_id = Uuid::now_v7().to_string();
        let length = message.chars().count();

        info!(
            channel = SMS,
            message_id = %message_id,
            number = %number,
            length,
            multipart = length > self.max_content_length,
            "模拟发送短信通知"
        );

        Ok(true)
    }
}
