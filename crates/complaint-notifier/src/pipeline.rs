//! 通知管道
//!
//! 唯一的公共入口：校验 -> 解析联系人 -> 生成变更描述 -> 组装模板 -> 分发。
//! 任一阶段出错立即终止并返回该错误，不会返回部分结果。

use std::sync::Arc;

use complaint_shared::config::{AppConfig, ChannelsConfig};
use complaint_shared::observability::metrics;
use config::ConfigError;
use tracing::{info, instrument, warn};

use crate::channels::{EmailChannel, LogEmailChannel, LogSmsChannel, SmsChannel};
use crate::difference::DifferenceDescriber;
use crate::directory::{ContactDirectory, EntityResolver};
use crate::dispatcher::NotificationDispatcher;
use crate::error::Result;
use crate::models::{DispatchResult, EntityKind, Identifier, NotificationRequest};
use crate::status::{StatusCatalog, StatusNameLookup};
use crate::template::TemplateAssembler;

pub struct NotificationPipeline {
    resolver: EntityResolver,
    describer: DifferenceDescriber,
    dispatcher: NotificationDispatcher,
}

impl NotificationPipeline {
    pub fn new(
        directory: Arc<dyn ContactDirectory>,
        statuses: Arc<dyn StatusNameLookup>,
        email: Arc<dyn EmailChannel>,
        sms: Arc<dyn SmsChannel>,
    ) -> Self {
        Self {
            resolver: EntityResolver::new(directory),
            describer: DifferenceDescriber::new(statuses),
            dispatcher: NotificationDispatcher::new(email, sms),
        }
    }

    /// 按配置组装管道：状态表来自配置，渠道使用日志实现
    pub fn from_config(
        config: &AppConfig,
        directory: Arc<dyn ContactDirectory>,
    ) -> std::result::Result<Self, ConfigError> {
        let statuses = StatusCatalog::from(config.status_names()?);
        if statuses.is_empty() {
            warn!("状态表为空，CHANGE 通知将无法生成变更描述");
        }

        Ok(Self::new(
            directory,
            Arc::new(statuses),
            Arc::new(LogEmailChannel::new()),
            Arc::new(LogSmsChannel::new()),
        )
        .with_channel_settings(config.channels.clone()))
    }

    pub fn with_channel_settings(mut self, settings: ChannelsConfig) -> Self {
        self.dispatcher = self.dispatcher.with_settings(settings);
        self
    }

    /// 处理单个通知请求
    #[instrument(
        skip(self, request),
        fields(
            reseller_id = ?request.reseller_id,
            notification_type = ?request.notification_type,
            client_id = ?request.client_id.as_ref().map(Identifier::value)
        )
    )]
    pub async fn run(&self, request: &NotificationRequest) -> Result<DispatchResult> {
        let outcome = self.execute(request).await;

        let notification_type = request
            .notification_type
            .map(|t| t.as_str())
            .unwrap_or("UNKNOWN");
        match &outcome {
            Ok(result) => {
                metrics::record_pipeline_run(notification_type, "ok");
                info!(sent_count = result.sent_count(), "通知请求处理完成");
            }
            Err(e) => {
                metrics::record_pipeline_run(notification_type, e.code());
                warn!(error = %e, code = e.code(), "通知请求处理失败");
            }
        }

        outcome
    }

    async fn execute(&self, request: &NotificationRequest) -> Result<DispatchResult> {
        let required = request.validate()?;

        // 三次查询互相独立，按 客户、创建人、专家 的顺序轮询
        let (client, creator, expert) = futures::try_join!(
            self.resolver.resolve(
                EntityKind::Contractor,
                required.client_id,
                Some(required.reseller_id)
            ),
            self.resolver
                .resolve(EntityKind::Employee, required.creator_id, None),
            self.resolver
                .resolve(EntityKind::Employee, required.expert_id, None),
        )?;

        let difference = self
            .describer
            .describe(required.notification_type, request.differences.as_ref())?;

        let payload =
            TemplateAssembler::assemble(request, &client, &creator, &expert, &difference)?;

        Ok(self
            .dispatcher
            .dispatch(
                &payload,
                required.reseller_id,
                &client,
                required.notification_type,
            )
            .await)
    }
}
