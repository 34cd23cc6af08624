//! 领域模型

mod contact;
mod lenient;
mod payload;
mod request;
mod result;

pub use contact::{Contact, EntityKind};
pub use payload::{TemplatePayload, keys};
pub use request::{
    Differences, Identifier, NotificationRequest, NotificationType, RequiredFields,
};
pub use result::{DispatchResult, SmsOutcome};
