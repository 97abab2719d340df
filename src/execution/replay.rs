use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use crate::error::GraphError;
use crate::graph::{descendants_from_edges, Edge};

use super::types::{EventSender, ExecutionEvent, ExecutionStep, StepStatus};

/// 重试某步骤时受影响的节点集合：该步骤节点的后代（含自身）
pub fn affected_steps(
    step_id: &str,
    steps: &[ExecutionStep],
    edges: &[Edge],
) -> Result<HashSet<String>, GraphError> {
    let step = steps
        .iter()
        .find(|s| s.id == step_id)
        .ok_or_else(|| GraphError::StepNotFound(step_id.to_string()))?;
    Ok(descendants_from_edges(&step.node_id, edges))
}

/// 只重置受影响的步骤，其余步骤不做任何改动
pub fn reset_affected(steps: &mut [ExecutionStep], affected: &HashSet<String>) {
    for step in steps.iter_mut() {
        if affected.contains(&step.node_id) {
            step.reset();
        }
    }
}

/// 单步执行的接缝 - 本地重放通过它产出每步的输出或错误
#[async_trait]
pub trait StepRunner: Send + Sync {
    async fn run(&self, step: &ExecutionStep) -> Result<Value, String>;
}

/// 模拟执行器：随机延迟后返回伪造输出
pub struct SimulatedRunner {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for SimulatedRunner {
    fn default() -> Self {
        SimulatedRunner {
            min_delay_ms: 200,
            max_delay_ms: 600,
        }
    }
}

#[async_trait]
impl StepRunner for SimulatedRunner {
    async fn run(&self, step: &ExecutionStep) -> Result<Value, String> {
        let delay = {
            let mut rng = rand::thread_rng();
            rng.gen_range(self.min_delay_ms..=self.max_delay_ms)
        };
        tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
        Ok(json!({ "output": format!("simulated output of {}", step.node_id) }))
    }
}

/// 本地重放 - 顺序重放受影响步骤，逐步提交进度
///
/// 步骤始终按原始发现顺序重放（只限受影响子集）；首个报错的步骤
/// 终止本次扫描但不使整个运行失败。取消只是停止调度后续步骤。
pub struct LocalReplay {
    runner: Box<dyn StepRunner>,
    events: EventSender,
    cancel: CancellationToken,
}

impl LocalReplay {
    pub fn new(runner: Box<dyn StepRunner>, events: EventSender) -> Self {
        LocalReplay {
            runner,
            events,
            cancel: CancellationToken::new(),
        }
    }

    /// 取消句柄（可在重放进行中触发）
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn emit(&self, event: ExecutionEvent) {
        let _ = self.events.send(event);
    }

    /// 重试一个步骤：重置其后代步骤并顺序重放
    pub async fn retry(
        &self,
        step_id: &str,
        steps: &mut [ExecutionStep],
        edges: &[Edge],
    ) -> Result<(), GraphError> {
        let affected = affected_steps(step_id, steps, edges)?;
        reset_affected(steps, &affected);

        let indices: Vec<usize> = steps
            .iter()
            .enumerate()
            .filter(|(_, s)| affected.contains(&s.node_id))
            .map(|(i, _)| i)
            .collect();

        let mut last_output = Value::Null;
        for i in indices {
            if self.cancel.is_cancelled() {
                tracing::debug!(step_id = %steps[i].id, "replay cancelled before step");
                return Ok(());
            }

            steps[i].status = StepStatus::Running;
            steps[i].started_at = Some(Utc::now());
            self.emit(ExecutionEvent::Progress {
                step: steps[i].clone(),
            });

            let result = self.runner.run(&steps[i]).await;
            steps[i].finished_at = Some(Utc::now());
            match result {
                Ok(output) => {
                    steps[i].status = StepStatus::Completed;
                    steps[i].output = Some(output.clone());
                    last_output = output;
                    self.emit(ExecutionEvent::Progress {
                        step: steps[i].clone(),
                    });
                }
                Err(message) => {
                    steps[i].status = StepStatus::Error;
                    steps[i].error = Some(message.clone());
                    self.emit(ExecutionEvent::Progress {
                        step: steps[i].clone(),
                    });
                    self.emit(ExecutionEvent::Error { message });
                    return Ok(());
                }
            }
        }

        self.emit(ExecutionEvent::Complete {
            output_data: last_output,
        });
        Ok(())
    }
}

/// 后端委托重放 - 外部服务重算受影响步骤并整体上报
#[async_trait]
pub trait ReplayBackend: Send + Sync {
    async fn replay(
        &self,
        execution_id: &str,
        node_id: &str,
    ) -> Result<Vec<ExecutionStep>, GraphError>;
}

/// 用外部上报的步骤替换受影响步骤（按 node_id 对齐），其余原样保留
pub fn apply_backend_steps(
    steps: &mut [ExecutionStep],
    affected: &HashSet<String>,
    reported: &[ExecutionStep],
) {
    for step in steps.iter_mut() {
        if !affected.contains(&step.node_id) {
            continue;
        }
        if let Some(replacement) = reported.iter().find(|r| r.node_id == step.node_id) {
            *step = replacement.clone();
        }
    }
}

/// 一次完整的后端委托重试
pub async fn retry_via_backend(
    backend: &dyn ReplayBackend,
    execution_id: &str,
    step_id: &str,
    steps: &mut [ExecutionStep],
    edges: &[Edge],
) -> Result<(), GraphError> {
    let affected = affected_steps(step_id, steps, edges)?;
    let node_id = steps
        .iter()
        .find(|s| s.id == step_id)
        .map(|s| s.node_id.clone())
        .ok_or_else(|| GraphError::StepNotFound(step_id.to_string()))?;

    reset_affected(steps, &affected);
    let reported = backend.replay(execution_id, &node_id).await?;
    apply_backend_steps(steps, &affected, &reported);
    Ok(())
}
