//! 对话动作数据模型
//!
//! Action（意图 + inform/request 槽位 + 轮次 + 可选 NL）、DialogStatus（对话结局信号）
//! 与 Speaker（动作来源）。Action 一经产生即视为不可变，展示层只拿派生副本。

pub mod action;
pub mod status;

pub use action::{Action, Speaker, RESULT_SLOT, UNKNOWN_VALUE};
pub use status::DialogStatus;

/// 常用对话意图标签（与用户模拟器/基线 Agent 约定一致）
pub mod intents {
    pub const REQUEST: &str = "request";
    pub const INFORM: &str = "inform";
    pub const TASK_COMPLETE: &str = "taskcomplete";
    pub const THANKS: &str = "thanks";
    pub const DENY: &str = "deny";
    pub const CLOSING: &str = "closing";
}
