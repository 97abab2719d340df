//! 执行依赖跟踪与选择性重放
//!
//! 编辑路径之外唯一的异步组件：某个节点重试时，计算它的后代集合，
//! 只重置并按原始发现顺序重放受影响的步骤，其余步骤原样保留。

mod replay;
mod types;

pub use replay::{
    affected_steps, apply_backend_steps, reset_affected, retry_via_backend, LocalReplay,
    ReplayBackend, SimulatedRunner, StepRunner,
};
pub use types::{
    create_event_channel, steps_for_run, EventReceiver, EventSender, ExecutionEvent,
    ExecutionStep, StepStatus,
};
