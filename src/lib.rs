//! Dialog Gym - Rust 任务型对话模拟环境
//!
//! 模块划分：
//! - **act**: 对话动作数据模型（Action / DialogStatus / Speaker）
//! - **actors**: Agent 与用户模拟器抽象，内置规则用户、基线 Agent 与测试桩
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型
//! - **dialog**: 编排核心（DialogManager 回合协议、奖励策略、展示事件）
//! - **render**: 展示事件渲染器（四档详细程度）
//! - **runner**: episode 驱动循环与运行统计
//! - **state**: 共享状态跟踪器契约与内置实现

pub mod act;
pub mod actors;
pub mod config;
pub mod core;
pub mod dialog;
pub mod render;
pub mod runner;
pub mod state;

pub use act::{Action, DialogStatus, Speaker};
pub use actors::{Agent, Transition, User};
pub use self::core::DialogError;
pub use dialog::{DialogManager, RewardPolicy, TurnEvent};
pub use state::{StateTracker, StateView};
