use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::graph::Node;

/// 执行步骤状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    Running,
    Completed,
    Error,
}

/// 一次运行中单个节点的执行步骤
///
/// 运行开始时按发现顺序逐节点创建；执行服务的进度事件更新它；
/// 作为重试节点的后代时被重置回 pending。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionStep {
    pub id: String,
    pub node_id: String,
    #[serde(default)]
    pub node_name: String,
    pub status: StepStatus,
    #[serde(default)]
    pub input: Option<Value>,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl ExecutionStep {
    /// 创建一个待执行步骤
    pub fn pending(id: &str, node_id: &str, node_name: &str) -> Self {
        ExecutionStep {
            id: id.to_string(),
            node_id: node_id.to_string(),
            node_name: node_name.to_string(),
            status: StepStatus::Pending,
            input: None,
            output: None,
            error: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// 重置回待执行：清空输出、错误与时间戳，保留身份与输入
    pub fn reset(&mut self) {
        self.status = StepStatus::Pending;
        self.output = None;
        self.error = None;
        self.started_at = None;
        self.finished_at = None;
    }
}

/// 按发现顺序为一次运行创建步骤列表（ID 形如 step_0, step_1, …）
pub fn steps_for_run<'a>(nodes: impl IntoIterator<Item = &'a Node>) -> Vec<ExecutionStep> {
    nodes
        .into_iter()
        .enumerate()
        .map(|(i, node)| {
            ExecutionStep::pending(&format!("step_{}", i), &node.id, node.display_name())
        })
        .collect()
}

/// 重放事件 - 与外部执行服务的流式协议同构，两条重放路径对调用方可互换
#[derive(Clone, Debug, Serialize)]
pub enum ExecutionEvent {
    /// 步骤状态变化
    Progress { step: ExecutionStep },

    /// 某步骤报错，本次重放扫描停止
    Error { message: String },

    /// 重放扫描完成
    Complete { output_data: Value },
}

/// 事件发送器
pub type EventSender = mpsc::UnboundedSender<ExecutionEvent>;

/// 事件接收器
pub type EventReceiver = mpsc::UnboundedReceiver<ExecutionEvent>;

/// 创建事件通道
pub fn create_event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
