//! 联系人模型
//!
//! 客户（承包方）与员工共用一个结构，通过 [`EntityKind`] 区分。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 联系人类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// 面向客户的承包方记录，通知的收件人
    Contractor,
    /// 内部员工（创建人、专家）
    Employee,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contractor => "contractor",
            Self::Employee => "employee",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 已解析的联系人
///
/// 每次请求从目录中重新获取，不缓存也不修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub kind: EntityKind,
    pub full_name: String,
    pub email: String,
    pub mobile: String,
    /// 所属经销商，仅客户有值
    pub seller_id: Option<i64>,
}

impl Contact {
    /// 创建客户联系人
    pub fn contractor(id: i64, full_name: impl Into<String>, seller_id: i64) -> Self {
        Self {
            id,
            kind: EntityKind::Contractor,
            full_name: full_name.into(),
            email: String::new(),
            mobile: String::new(),
            seller_id: Some(seller_id),
        }
    }

    /// 创建员工联系人
    pub fn employee(id: i64, full_name: impl Into<String>) -> Self {
        Self {
            id,
            kind: EntityKind::Employee,
            full_name: full_name.into(),
            email: String::new(),
            mobile: String::new(),
            seller_id: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = mobile.into();
        self
    }
}
