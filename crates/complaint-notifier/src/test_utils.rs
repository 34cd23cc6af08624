//! 测试辅助工具
//!
//! 提供标准测试数据和可记录调用的渠道实现，供单元测试与集成测试共用。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::channels::{EMAIL, EmailChannel, SMS, SmsChannel};
use crate::directory::InMemoryDirectory;
use crate::error::ChannelError;
use crate::models::{Contact, Differences, Identifier, NotificationRequest, NotificationType};

pub const RESELLER_ID: i64 = 1;
pub const CLIENT_ID: i64 = 10;
pub const CREATOR_ID: i64 = 20;
pub const EXPERT_ID: i64 = 30;

pub const CLIENT_EMAIL: &str = "client@example.com";
pub const CLIENT_MOBILE: &str = "+15550100";

pub fn client() -> Contact {
    Contact::contractor(CLIENT_ID, "Acme Ltd", RESELLER_ID)
        .with_email(CLIENT_EMAIL)
        .with_mobile(CLIENT_MOBILE)
}

pub fn creator() -> Contact {
    Contact::employee(CREATOR_ID, "Jane Roe").with_email("jane.roe@example.com")
}

pub fn expert() -> Contact {
    Contact::employee(EXPERT_ID, "John Doe").with_email("john.doe@example.com")
}

/// 包含标准客户、创建人、专家的目录
pub fn seeded_directory() -> InMemoryDirectory {
    InMemoryDirectory::with_contacts([client(), creator(), expert()])
}

/// 全部字段齐全的状态变更请求，状态从 from 变为 to
pub fn change_request(from: i64, to: i64) -> NotificationRequest {
    NotificationRequest {
        differences: Some(Differences::new(from, to)),
        ..base_request(NotificationType::Change)
    }
}

/// 全部字段齐全的新增请求，不携带状态变更
pub fn new_position_request() -> NotificationRequest {
    base_request(NotificationType::New)
}

fn base_request(notification_type: NotificationType) -> NotificationRequest {
    NotificationRequest {
        reseller_id: Some(RESELLER_ID),
        notification_type: Some(notification_type),
        client_id: Some(Identifier::from(CLIENT_ID)),
        creator_id: Some(Identifier::from(CREATOR_ID)),
        expert_id: Some(Identifier::from(EXPERT_ID)),
        complaint_id: Some("500".to_string()),
        complaint_number: Some("CMP-500".to_string()),
        consumption_id: Some("600".to_string()),
        consumption_number: Some("CNS-600".to_string()),
        agreement_number: Some("AG-77".to_string()),
        date: Some("2024-03-01".to_string()),
        differences: None,
    }
}

/// 渠道的预设行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelBehavior {
    /// 接受消息
    Accept,
    /// 拒绝消息（返回 false）
    Reject,
    /// 传输层故障
    Fail,
    /// 延迟后接受，用于验证超时
    Delay(Duration),
    /// 渠道实现 panic
    Panic,
}

impl ChannelBehavior {
    async fn apply(self, channel: &'static str) -> Result<bool, ChannelError> {
        match self {
            Self::Accept => Ok(true),
            Self::Reject => Ok(false),
            Self::Fail => Err(ChannelError::transport(channel, "模拟传输故障")),
            Self::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(true)
            }
            Self::Panic => panic!("{channel} 渠道实现崩溃"),
        }
    }
}

/// 已记录的邮件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub address: String,
    pub subject: String,
    pub body: String,
}

/// 记录所有调用的邮件渠道
pub struct RecordingEmailChannel {
    behavior: ChannelBehavior,
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingEmailChannel {
    pub fn new(behavior: ChannelBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn accepting() -> Arc<Self> {
        Self::new(ChannelBehavior::Accept)
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl EmailChannel for RecordingEmailChannel {
    async fn send(&self, address: &str, subject: &str, body: &str) -> Result<bool, ChannelError> {
        self.sent.lock().push(SentEmail {
            address: address.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        self.behavior.apply(EMAIL).await
    }
}

/// 已记录的短信
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub number: String,
    pub message: String,
}

/// 记录所有调用的短信渠道
pub struct RecordingSmsChannel {
    behavior: ChannelBehavior,
    sent: Mutex<Vec<SentSms>>,
}

impl RecordingSmsChannel {
    pub fn new(behavior: ChannelBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn accepting() -> Arc<Self> {
        Self::new(ChannelBehavior::Accept)
    }

    pub fn sent(&self) -> Vec<SentSms> {
        self.sent.lock().clone()
    }

    pub fn calls(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl SmsChannel for RecordingSmsChannel {
    async fn send(&self, number: &str, message: &str) -> Result<bool, ChannelError> {
        self.sent.lock().push(SentSms {
            number: number.to_string(),
            message: message.to_string(),
        });
        self.behavior.apply(SMS).await
    }
}
