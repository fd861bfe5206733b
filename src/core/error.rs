//! 对话环境错误类型
//!
//! 本核心不做任何重试与恢复：协作方（Agent / 用户模拟器 / 状态跟踪器）抛出的错误
//! 一律向上传播，使当前 episode 失败；重开 episode 的策略由调用方（训练驱动）决定。

use thiserror::Error;

/// 对话环境运行过程中可能出现的错误（前置条件、配置、协作方契约违约）
#[derive(Error, Debug)]
pub enum DialogError {
    /// advance_turn 的前置条件：必须先 initialize_episode
    #[error("Episode not initialized: call initialize_episode() before advance_turn()")]
    EpisodeNotInitialized,

    /// 枚举之外的对话状态取值，在进入奖励计算前拒绝
    #[error("Unknown dialog status: {0}")]
    UnknownStatus(String),

    /// 协作方产出的动作不满足契约（缺字段、轮次历史为空等）
    #[error("Malformed action: {0}")]
    MalformedAction(String),

    /// 用户模拟器内部错误
    #[error("User simulator error: {0}")]
    UserError(String),

    /// Agent 内部错误
    #[error("Agent error: {0}")]
    AgentError(String),

    #[error("Config error: {0}")]
    Config(String),
}
