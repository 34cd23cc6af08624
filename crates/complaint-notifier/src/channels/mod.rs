//! 通知渠道
//!
//! 定义邮件与短信渠道 trait，并提供仅记录日志的默认实现。
//!
//! ## 约定
//!
//! - 返回 `Ok(true)` 表示渠道已接受消息
//! - 返回 `Ok(false)` 表示渠道拒绝（如地址无效）
//! - 传输层故障返回 `Err`，由分发器归一化为"未发送"

mod email;
mod sms;

pub use email::LogEmailChannel;
pub use sms::LogSmsChannel;

use async_trait::async_trait;

use crate::error::ChannelError;

pub const EMAIL: &str = "EMAIL";
pub const SMS: &str = "SMS";

/// 邮件渠道
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailChannel: Send + Sync {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<bool, ChannelError>;
}

/// 短信渠道
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsChannel: Send + Sync {
    async fn send(&self, number: &str, message: &str) -> Result<bool, ChannelError>;
}
