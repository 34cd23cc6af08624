//! 投诉/消费记录通知服务
//!
//! 接收上游的通知请求，解析相关联系人，生成状态变更描述和模板数据，
//! 然后按通知类型向客户发送邮件和短信。
//!
//! 管道各阶段的错误直接返回调用方；渠道发送失败只体现在 [`DispatchResult`] 中。

pub mod channels;
pub mod difference;
pub mod directory;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod status;
pub mod template;
pub mod test_utils;

pub use error::{ChannelError, NotificationError, Result};
pub use models::{DispatchResult, NotificationRequest, NotificationType, SmsOutcome};
pub use pipeline::NotificationPipeline;
