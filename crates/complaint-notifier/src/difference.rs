//! 变更描述
//!
//! 根据通知类型生成可读的变更说明，写入模板的 DIFFERENCES 字段。

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Differences, NotificationType};
use crate::status::StatusNameLookup;

/// 新增通知的固定描述
pub const NEW_POSITION_DESCRIPTION: &str = "New position added";

pub struct DifferenceDescriber {
    statuses: Arc<dyn StatusNameLookup>,
}

impl DifferenceDescriber {
    pub fn new(statuses: Arc<dyn StatusNameLookup>) -> Self {
        Self { statuses }
    }

    /// 生成变更描述
    ///
    /// - NEW：固定描述，忽略变更记录
    /// - CHANGE 且有完整变更记录：通过状态名称查询生成描述
    /// - CHANGE 但变更记录缺失或不完整：返回空字符串，不视为错误
    pub fn describe(
        &self,
        notification_type: NotificationType,
        differences: Option<&Differences>,
    ) -> Result<String> {
        match notification_type {
            NotificationType::New => Ok(NEW_POSITION_DESCRIPTION.to_string()),
            NotificationType::Change => {
                let Some((from, to)) = differences.and_then(Differences::codes) else {
                    return Ok(String::new());
                };

                Ok(format!(
                    "Position status has changed from {} to {}",
                    self.statuses.name_of(from)?,
                    self.statuses.name_of(to)?
                ))
            }
        }
    }
}
