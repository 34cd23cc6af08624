//! 通知指标
//!
//! 基于 metrics crate 的宏记录指标。本模块只负责描述和记录，
//! 未安装 recorder 时所有记录操作都是空操作。

/// 渠道发送结果计数，标签：channel、outcome
pub const CHANNEL_OUTCOMES_TOTAL: &str = "notification_channel_outcomes_total";

/// 管道执行次数，标签：notification_type、status
pub const PIPELINE_RUNS_TOTAL: &str = "notification_pipeline_runs_total";

/// 注册指标描述
///
/// 这些描述会出现在导出端点的 HELP 注释中
pub fn describe() {
    metrics::describe_counter!(
        CHANNEL_OUTCOMES_TOTAL,
        "Total number of notification channel send outcomes"
    );
    metrics::describe_counter!(
        PIPELINE_RUNS_TOTAL,
        "Total number of notification pipeline runs"
    );
}

/// 记录单个渠道的发送结果
pub fn record_channel_outcome(channel: &'static str, sent: bool) {
    let outcome = if sent { "sent" } else { "not_sent" };
    metrics::counter!(CHANNEL_OUTCOMES_TOTAL, "channel" => channel, "outcome" => outcome)
        .increment(1);
}

/// 记录一次管道执行
pub fn record_pipeline_run(notification_type: &'static str, status: &'static str) {
    metrics::counter!(
        PIPELINE_RUNS_TOTAL,
        "notification_type" => notification_type,
        "status" => status
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_without_recorder_is_noop() {
        describe();
        record_channel_outcome("email", true);
        record_channel_outcome("sms", false);
        record_pipeline_run("CHANGE", "ok");
    }
}
