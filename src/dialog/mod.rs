//! 对话编排核心：回合协议、奖励策略、展示事件

pub mod events;
pub mod manager;
pub mod reward;

pub use events::TurnEvent;
pub use manager::DialogManager;
pub use reward::RewardPolicy;
