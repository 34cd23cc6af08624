//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::observability::ObservabilityConfig;

/// 单个通知渠道的配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChannelSettings {
    pub enabled: bool,
    /// 单次发送的超时时间，0 表示不限制
    pub timeout_ms: u64,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout_ms: 5000,
        }
    }
}

impl ChannelSettings {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

/// 邮件与短信渠道配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChannelsConfig {
    pub email: ChannelSettings,
    pub sms: ChannelSettings,
}

/// 应用配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub observability: ObservabilityConfig,
    pub channels: ChannelsConfig,
    /// 状态码到展示名称的映射，键为状态码的字符串形式
    pub statuses: BTreeMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service_name: "complaint-notifier".to_string(),
            environment: "development".to_string(),
            observability: ObservabilityConfig::default(),
            channels: ChannelsConfig::default(),
            statuses: default_statuses(),
        }
    }
}

fn default_statuses() -> BTreeMap<String, String> {
    [("0", "Completed"), ("1", "Pending"), ("2", "Rejected")]
        .into_iter()
        .map(|(code, name)| (code.to_string(), name.to_string()))
        .collect()
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. config/default.toml（默认配置）
    /// 2. config/{environment}.toml（环境特定配置）
    /// 3. config/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（NOTIFY_ 前缀，层级用双下划线分隔，如 NOTIFY_CHANNELS__SMS__TIMEOUT_MS）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var("NOTIFY_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        Self::load_from(Path::new(&config_dir), &env, service_name)
    }

    /// 从指定目录加载配置，环境名由调用方给出
    pub fn load_from(
        config_dir: &Path,
        environment: &str,
        service_name: &str,
    ) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", environment)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{environment}.toml"))).required(false))
            .add_source(
                File::from(config_dir.join(format!("{service_name}.toml"))).required(false),
            )
            .add_source(
                Environment::with_prefix("NOTIFY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 将状态码映射解析为数值键
    ///
    /// 配置文件中的键只能是字符串，非数字键视为配置错误。
    pub fn status_names(&self) -> Result<BTreeMap<i64, String>, ConfigError> {
        self.statuses
            .iter()
            .map(|(code, name)| {
                code.trim()
                    .parse::<i64>()
                    .map(|code| (code, name.clone()))
                    .map_err(|_| ConfigError::Message(format!("无效的状态码配置: {code}")))
            })
            .collect()
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.service_name, "complaint-notifier");
        assert!(config.channels.email.enabled);
        assert!(config.channels.sms.enabled);
        assert_eq!(config.channels.sms.timeout_ms, 5000);
        assert!(!config.is_production());
    }

    #[test]
    fn test_default_status_names() {
        let names = AppConfig::default().status_names().unwrap();
        assert_eq!(names.get(&0).map(String::as_str), Some("Completed"));
        assert_eq!(names.get(&1).map(String::as_str), Some("Pending"));
        assert_eq!(names.get(&2).map(String::as_str), Some("Rejected"));
    }

    #[test]
    fn test_invalid_status_code_rejected() {
        let mut config = AppConfig::default();
        config.statuses.insert("closed".to_string(), "Closed".to_string());

        assert!(config.status_names().is_err());
    }

    #[test]
    fn test_channel_timeout() {
        assert_eq!(
            ChannelSettings::default().timeout(),
            Some(Duration::from_millis(5000))
        );
        assert_eq!(ChannelSettings::default().with_timeout(0).timeout(), None);
        assert!(!ChannelSettings::disabled().enabled);
    }

    #[test]
    fn test_load_from_empty_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(dir.path(), "test", "complaint-notifier").unwrap();

        assert_eq!(config.environment, "test");
        assert_eq!(config.service_name, "complaint-notifier");
        assert_eq!(config.status_names().unwrap().len(), 3);
    }

    #[test]
    fn test_load_from_layers_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("default.toml"),
            r#"
[channels.sms]
enabled = false

[statuses]
1 = "New"
2 = "Closed"
"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join("staging.toml"),
            r#"
[channels.email]
timeout_ms = 250
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path(), "staging", "complaint-notifier").unwrap();

        assert!(!config.channels.sms.enabled);
        assert_eq!(config.channels.email.timeout_ms, 250);
        assert!(config.channels.email.enabled);

        let names = config.status_names().unwrap();
        assert_eq!(names.len(), 2);
        assert_eq!(names.get(&2).map(String::as_str), Some("Closed"));
    }
}
