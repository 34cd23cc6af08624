//! 联系人解析
//!
//! 通过 [`ContactDirectory`] 查询客户与员工，并对客户做经销商归属校验。

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use crate::error::{NotificationError, Result};
use crate::models::{Contact, EntityKind};

/// 联系人目录接口
///
/// 实现方负责实际存储访问；查询不到返回 `Ok(None)`，基础设施故障返回
/// [`NotificationError::Directory`]。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn find_by_id(&self, kind: EntityKind, id: i64) -> Result<Option<Contact>>;
}

/// 联系人解析器
pub struct EntityResolver {
    directory: Arc<dyn ContactDirectory>,
}

impl EntityResolver {
    pub fn new(directory: Arc<dyn ContactDirectory>) -> Self {
        Self { directory }
    }

    /// 按类别和 ID 解析联系人
    ///
    /// 传入 `expected_tenant` 时（仅客户查询），联系人所属经销商必须与之一致，
    /// 没有经销商的联系人同样视为不一致。
    pub async fn resolve(
        &self,
        kind: EntityKind,
        id: i64,
        expected_tenant: Option<i64>,
    ) -> Result<Contact> {
        let contact = self
            .directory
            .find_by_id(kind, id)
            .await?
            .ok_or(NotificationError::NotFound { kind, id })?;

        if let Some(expected) = expected_tenant {
            if contact.seller_id != Some(expected) {
                return Err(NotificationError::TenantMismatch {
                    id,
                    expected,
                    actual: contact.seller_id,
                });
            }
        }

        debug!(kind = %kind, id, "联系人解析完成");
        Ok(contact)
    }
}

/// 基于内存的联系人目录
///
/// 用于本地运行和测试，生产环境替换为数据库实现。
#[derive(Default)]
pub struct InMemoryDirectory {
    contacts: DashMap<(EntityKind, i64), Contact>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let directory = Self::new();
        for contact in contacts {
            directory.insert(contact);
        }
        directory
    }

    pub fn insert(&self, contact: Contact) {
        self.contacts.insert((contact.kind, contact.id), contact);
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

#[async_trait]
impl ContactDirectory for InMemoryDirectory {
    async fn find_by_id(&self, kind: EntityKind, id: i64) -> Result<Option<Contact>> {
        Ok(self
            .contacts
            .get(&(kind, id))
            .map(|entry| entry.value().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn client() -> Contact {
        Contact::contractor(10, "Acme Ltd", 1).with_email("client@example.com")
    }

    #[tokio::test]
    async fn test_resolve_client_with_matching_tenant() {
        let mut directory = MockContactDirectory::new();
        directory
            .expect_find_by_id()
            .with(eq(EntityKind::Contractor), eq(10))
            .times(1)
            .returning(|_, _| Ok(Some(client())));

        let resolver = EntityResolver::new(Arc::new(directory));
        let contact = resolver
            .resolve(EntityKind::Contractor, 10, Some(1))
            .await
            .unwrap();

        assert_eq!(contact, client());
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let mut directory = MockContactDirectory::new();
        directory.expect_find_by_id().returning(|_, _| Ok(None));

        let resolver = EntityResolver::new(Arc::new(directory));
        let err = resolver
            .resolve(EntityKind::Employee, 99, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            NotificationError::NotFound {
                kind: EntityKind::Employee,
                id: 99
            }
        ));
    }

    #[tokio::test]
    async fn test_resolve_tenant_mismatch() {
        let mut directory = MockContactDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|_, _| Ok(Some(client())));

        let resolver = EntityResolver::new(Arc::new(directory));
        let err = resolver
            .resolve(EntityKind::Contractor, 10, Some(2))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            NotificationError::TenantMismatch {
                id: 10,
                expected: 2,
                actual: Some(1)
            }
        ));
    }

    #[tokio::test]
    async fn test_resolve_contact_without_seller_is_mismatch() {
        let mut directory = MockContactDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|_, id| Ok(Some(Contact::employee(id, "No Seller"))));

        let resolver = EntityResolver::new(Arc::new(directory));
        let err = resolver
            .resolve(EntityKind::Contractor, 10, Some(1))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "TENANT_MISMATCH");
    }

    #[tokio::test]
    async fn test_employee_lookup_ignores_tenant() {
        let mut directory = MockContactDirectory::new();
        directory
            .expect_find_by_id()
            .with(eq(EntityKind::Employee), eq(20))
            .returning(|_, id| Ok(Some(Contact::employee(id, "Jane Roe"))));

        let resolver = EntityResolver::new(Arc::new(directory));
        let contact = resolver
            .resolve(EntityKind::Employee, 20, None)
            .await
            .unwrap();

        assert_eq!(contact.full_name, "Jane Roe");
    }

    #[tokio::test]
    async fn test_directory_failure_propagates() {
        let mut directory = MockContactDirectory::new();
        directory
            .expect_find_by_id()
            .returning(|_, _| Err(NotificationError::Directory("连接超时".to_string())));

        let resolver = EntityResolver::new(Arc::new(directory));
        let err = resolver
            .resolve(EntityKind::Employee, 20, None)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "DIRECTORY_ERROR");
    }

    #[tokio::test]
    async fn test_in_memory_directory_keys_by_kind() {
        let directory = InMemoryDirectory::with_contacts([
            Contact::contractor(10, "Acme Ltd", 1),
            Contact::employee(10, "Same Id Employee"),
        ]);

        assert_eq!(directory.len(), 2);

        let client = directory
            .find_by_id(EntityKind::Contractor, 10)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(client.full_name, "Acme Ltd");

        let employee = directory
            .find_by_id(EntityKind::Employee, 10)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(employee.full_name, "Same Id Employee");

        assert!(
            directory
                .find_by_id(EntityKind::Employee, 11)
                .await
                .unwrap()
                .is_none()
        );
    }
}
