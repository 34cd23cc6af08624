//! 通知分发
//!
//! 将模板数据发送到适用的渠道并汇总各渠道结果。
//! 各渠道并行发送、互相独立；传输故障和超时都记为"未发送"，不会中断管道。

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use complaint_shared::config::{ChannelSettings, ChannelsConfig};
use complaint_shared::observability::metrics;
use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::channels::{self, EmailChannel, SmsChannel};
use crate::error::ChannelError;
use crate::models::{Contact, DispatchResult, NotificationType, SmsOutcome, TemplatePayload};

/// 状态变更邮件主题
pub const STATUS_CHANGE_SUBJECT: &str = "Status Change Notification";

/// 状态变更短信内容
pub const STATUS_CHANGE_SMS: &str = "Your status has changed.";

pub struct NotificationDispatcher {
    email: Arc<dyn EmailChannel>,
    sms: Arc<dyn SmsChannel>,
    settings: ChannelsConfig,
}

impl NotificationDispatcher {
    pub fn new(email: Arc<dyn EmailChannel>, sms: Arc<dyn SmsChannel>) -> Self {
        Self {
            email,
            sms,
            settings: ChannelsConfig::default(),
        }
    }

    pub fn with_settings(mut self, settings: ChannelsConfig) -> Self {
        self.settings = settings;
        self
    }

    /// 分发通知
    ///
    /// 只有 CHANGE 类型会触发渠道发送：邮件和短信各一次，发往客户。
    /// NEW 类型不调用任何渠道，结果保持全部未发送。
    pub async fn dispatch(
        &self,
        payload: &TemplatePayload,
        reseller_id: i64,
        client: &Contact,
        notification_type: NotificationType,
    ) -> DispatchResult {
        let mut result = DispatchResult::not_sent();

        match notification_type {
            NotificationType::Change => {
                let (email_sent, sms_sent) = futures::join!(
                    self.send_email(&client.email, STATUS_CHANGE_SUBJECT, payload.differences()),
                    self.send_sms(&client.mobile, STATUS_CHANGE_SMS),
                );

                result.notification_client_by_email = email_sent;
                result.notification_client_by_sms = SmsOutcome::new(sms_sent, STATUS_CHANGE_SMS);
            }
            NotificationType::New => {
                debug!(reseller_id, client_id = client.id, "NEW 类型通知不触发渠道发送");
            }
        }

        info!(
            reseller_id,
            client_id = client.id,
            notification_type = %notification_type,
            sent_count = result.sent_count(),
            "通知分发完成"
        );

        result
    }

    async fn send_email(&self, address: &str, subject: &str, body: &str) -> bool {
        self.guarded(
            channels::EMAIL,
            &self.settings.email,
            async { self.email.send(address, subject, body).await },
        )
        .await
    }

    async fn send_sms(&self, number: &str, message: &str) -> bool {
        self.guarded(
            channels::SMS,
            &self.settings.sms,
            async { self.sms.send(number, message).await },
        )
        .await
    }

    /// 单渠道故障边界：禁用、超时、传输错误以及渠道实现 panic 都归一化为 false
    async fn guarded<F>(&self, channel: &'static str, settings: &ChannelSettings, send: F) -> bool
    where
        F: Future<Output = Result<bool, ChannelError>>,
    {
        if !settings.enabled {
            debug!(channel, "渠道已禁用，跳过发送");
            return false;
        }

        let send = AssertUnwindSafe(send).catch_unwind();
        let sent = match with_timeout(settings.timeout(), send).await {
            Ok(Ok(Ok(sent))) => sent,
            Ok(Ok(Err(e))) => {
                warn!(channel, error = %e, "渠道发送异常");
                false
            }
            Ok(Err(_)) => {
                warn!(channel, "渠道实现发生 panic");
                false
            }
            Err(limit) => {
                warn!(channel, timeout_ms = limit.as_millis() as u64, "渠道发送超时");
                false
            }
        };

        debug!(channel, sent, "渠道发送结束");
        metrics::record_channel_outcome(channel, sent);
        sent
    }
}

/// 超时返回 `Err(limit)`；未设置超时则等待完成
async fn with_timeout<F: Future>(limit: Option<Duration>, future: F) -> Result<F::Output, Duration> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, future)
            .await
            .map_err(|_| limit),
        None => Ok(future.await),
    }
}
