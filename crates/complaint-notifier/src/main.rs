//! 通知服务入口
//!
//! 从标准输入逐行读取 JSON 格式的通知请求，处理结果以 JSON 写到标准输出。
//! 第一个命令行参数可指定联系人文件（JSON 数组），用于初始化内存目录。

use std::sync::Arc;

use anyhow::Context;
use complaint_notifier::NotificationPipeline;
use complaint_notifier::directory::InMemoryDirectory;
use complaint_notifier::models::{Contact, NotificationRequest};
use complaint_shared::config::AppConfig;
use complaint_shared::observability::{self, ObservabilityConfig};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};

const SERVICE_NAME: &str = "complaint-notifier";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = match AppConfig::load(SERVICE_NAME) {
        Ok(config) => config,
        Err(e) => {
            // 配置不可用时按环境变量初始化日志
            observability::init(SERVICE_NAME, &ObservabilityConfig::from_env())?;
            error!(error = %e, "加载配置失败");
            return Err(e).context("加载配置失败");
        }
    };
    observability::init(&config.service_name, &config.observability)?;

    let directory = match std::env::args().nth(1) {
        Some(path) => load_contacts(&path).await?,
        None => {
            warn!("未指定联系人文件，目录为空");
            InMemoryDirectory::new()
        }
    };
    info!(contacts = directory.len(), "联系人目录已加载");

    let pipeline = NotificationPipeline::from_config(&config, Arc::new(directory))?;
    info!(
        service = %config.service_name,
        environment = %config.environment,
        production = config.is_production(),
        "Starting complaint-notifier..."
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let output = match serde_json::from_str::<NotificationRequest>(&line) {
            Ok(request) => match pipeline.run(&request).await {
                Ok(result) => serde_json::to_value(&result)?,
                Err(e) => json!({ "error": e.code(), "message": e.to_string() }),
            },
            Err(e) => {
                error!(error = %e, "请求解析失败");
                json!({ "error": "INVALID_REQUEST", "message": e.to_string() })
            }
        };

        stdout.write_all(output.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("输入结束，服务退出");
    Ok(())
}

async fn load_contacts(path: &str) -> anyhow::Result<InMemoryDirectory> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("读取联系人文件失败: {path}"))?;
    let contacts: Vec<Contact> =
        serde_json::from_str(&raw).with_context(|| format!("联系人文件格式错误: {path}"))?;

    Ok(InMemoryDirectory::with_contacts(contacts))
}
