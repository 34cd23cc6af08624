//! 模板数据
//!
//! 下游模板渲染依赖这里的键名，键名与顺序都是稳定契约。

use serde::ser::{Serialize, SerializeMap, Serializer};

pub mod keys {
    pub const CLIENT_NAME: &str = "CLIENT_NAME";
    pub const CREATOR_NAME: &str = "CREATOR_NAME";
    pub const EXPERT_NAME: &str = "EXPERT_NAME";
    pub const DIFFERENCES: &str = "DIFFERENCES";
}

/// 有序的 大写键 -> 字符串值 映射
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplatePayload {
    entries: Vec<(String, String)>,
}

impl TemplatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入键值；键已存在时原位覆盖，保持首次插入的顺序
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// 变更描述，缺失时为空字符串
    pub fn differences(&self) -> &str {
        self.get(keys::DIFFERENCES).unwrap_or_default()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for TemplatePayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
