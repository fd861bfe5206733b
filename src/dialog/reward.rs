//! 奖励策略：结局状态 -> 标量奖励
//!
//! 纯函数，引用透明；max_turns 由调用方每次现读自用户模拟器，本模块不缓存。

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::act::DialogStatus;
use crate::core::DialogError;

/// 奖励塑形方案（显式选择，不做自动探测）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    /// 带塑形：失败 -max_turns、成功 +2*max_turns、进行中每轮 -1（鼓励尽快完成）
    Shaped,
    /// 无塑形：仅成功 +2*max_turns，其余为 0
    Unshaped,
}

impl RewardPolicy {
    /// 结局状态与轮次预算映射为标量奖励
    pub fn reward(self, status: DialogStatus, max_turns: usize) -> f64 {
        let max_turns = max_turns as f64;
        match self {
            RewardPolicy::Shaped => match status {
                DialogStatus::Failure => -max_turns,
                DialogStatus::Success => 2.0 * max_turns,
                DialogStatus::Ongoing => -1.0,
            },
            RewardPolicy::Unshaped => match status {
                DialogStatus::Failure => 0.0,
                DialogStatus::Success => 2.0 * max_turns,
                DialogStatus::Ongoing => 0.0,
            },
        }
    }
}

impl FromStr for RewardPolicy {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shaped" => Ok(RewardPolicy::Shaped),
            "unshaped" => Ok(RewardPolicy::Unshaped),
            other => Err(DialogError::Config(format!("unknown reward policy: {}", other))),
        }
    }
}
