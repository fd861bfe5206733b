//! Actor 抽象：Agent 与用户模拟器
//!
//! 两类 Actor 都具备「按输入产生动作 + 按 episode 初始化内部状态」的能力；
//! Agent 额外接收训练经验元组，用户额外给出结局信号与轮次预算。
//! 双方互不触碰对方内部状态，只通过共享状态跟踪器的视图交流。

pub mod mock;
pub mod request_agent;
pub mod rule_user;

use serde::Serialize;

use crate::act::{Action, DialogStatus};
use crate::core::DialogError;
use crate::state::StateView;

pub use request_agent::RequestAgent;
pub use rule_user::{RuleUser, UserGoal};

/// 经验元组：(state, action, reward, next_state, done)，每轮至多产生一条
#[derive(Debug, Clone, Serialize)]
pub struct Transition {
    pub state_before: StateView,
    pub agent_action: Action,
    pub reward: f64,
    pub state_after: StateView,
    pub episode_over: bool,
}

/// 决策 Agent：产生系统侧动作，接收训练经验
pub trait Agent {
    /// 重置 episode 级内部状态（探索游标、经验缓冲等由实现自行决定）
    fn initialize_episode(&mut self);

    /// 由状态视图产生下一条系统动作
    fn state_to_action(&mut self, state: &StateView) -> Result<Action, DialogError>;

    /// 为动作附加自然语言表述；返回增强副本，不修改规范记录
    fn attach_nl(&self, action: Action) -> Action {
        action
    }

    /// 接收一条经验元组（是否持久化由 Agent 自己负责）
    fn record_transition(&mut self, transition: Transition);

    /// 是否希望展示层给出候选值提示（替代按具体类型特判的能力开关）
    fn wants_suggestion_prompts(&self) -> bool {
        false
    }
}

/// 用户模拟器：按合成目标产生用户侧动作与结局信号
pub trait User {
    /// 开启新 episode：抽取新目标并给出开场动作
    fn initialize_episode(&mut self) -> Result<Action, DialogError>;

    /// 对系统动作作出反应：(用户动作, episode_over, 对话状态)
    fn next(&mut self, system_action: &Action) -> Result<(Action, bool, DialogStatus), DialogError>;

    /// 轮次预算；奖励计算每次现读，不做缓存
    fn max_turns(&self) -> usize;
}
