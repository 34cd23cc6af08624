//! 状态名称查询

use std::collections::{BTreeMap, HashMap};

use crate::error::{NotificationError, Result};

/// 状态码 -> 展示名称
///
/// 对合法状态码应当是全函数，非法状态码返回 [`NotificationError::UnknownStatus`]。
#[cfg_attr(test, mockall::automock)]
pub trait StatusNameLookup: Send + Sync {
    fn name_of(&self, code: i64) -> Result<String>;
}

/// 基于内存的状态目录
#[derive(Debug, Clone, Default)]
pub struct StatusCatalog {
    names: HashMap<i64, String>,
}

impl StatusCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 默认状态表：0 已完成，1 待处理，2 已拒绝
    pub fn with_defaults() -> Self {
        Self::new()
            .with_status(0, "Completed")
            .with_status(1, "Pending")
            .with_status(2, "Rejected")
    }

    pub fn with_status(mut self, code: i64, name: impl Into<String>) -> Self {
        self.names.insert(code, name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<BTreeMap<i64, String>> for StatusCatalog {
    fn from(names: BTreeMap<i64, String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }
}

impl StatusNameLookup for StatusCatalog {
    fn name_of(&self, code: i64) -> Result<String> {
        self.names
            .get(&code)
            .cloned()
            .ok_or(NotificationError::UnknownStatus(code))
    }
}
