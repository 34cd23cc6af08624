//! 通知管道错误类型
//!
//! 管道内任一阶段的错误都是终止性的，原样返回给调用方。
//! 渠道发送失败不属于此类错误，由分发器转换为结果数据。

use thiserror::Error;

use crate::models::EntityKind;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("请求字段缺失或为空: {field}")]
    Validation { field: &'static str },

    #[error("实体不存在: {kind} id={id}")]
    NotFound { kind: EntityKind, id: i64 },

    #[error("客户不属于当前经销商: client_id={id}, expected={expected}, actual={actual:?}")]
    TenantMismatch {
        id: i64,
        expected: i64,
        actual: Option<i64>,
    },

    #[error("模板数据为空: {field} ({key})")]
    MissingField { field: &'static str, key: String },

    #[error("未知的状态码: {0}")]
    UnknownStatus(i64),

    #[error("联系人目录查询失败: {0}")]
    Directory(String),
}

pub type Result<T> = std::result::Result<T, NotificationError>;

impl NotificationError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::TenantMismatch { .. } => "TENANT_MISMATCH",
            Self::MissingField { .. } => "MISSING_FIELD",
            Self::UnknownStatus(_) => "UNKNOWN_STATUS",
            Self::Directory(_) => "DIRECTORY_ERROR",
        }
    }
}

/// 渠道传输层错误
///
/// 只在渠道实现与分发器之间传递，分发器负责将其归一化为"未发送"。
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("通知发送失败: 渠道={channel}, 原因={reason}")]
    Transport {
        channel: &'static str,
        reason: String,
    },
}

impl ChannelError {
    pub fn transport(channel: &'static str, reason: impl Into<String>) -> Self {
        Self::Transport {
            channel,
            reason: reason.into(),
        }
    }
}
