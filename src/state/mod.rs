//! 共享对话状态（State Representation）
//!
//! StateTracker 是编排器消费的协作方契约：双方动作先折叠进跟踪器，
//! 再由跟踪器给出 Agent 视角的只读快照（StateView）与「实际说出口」的系统动作记录。
//! HistoryTracker 是内置实现（轮次历史 + 约束合并 + 内存知识库），mock 提供计数桩。

pub mod history;
pub mod kb;
pub mod mock;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::act::{Action, Speaker};
use crate::core::DialogError;

pub use history::HistoryTracker;
pub use kb::KnowledgeBase;

/// Agent 视角的只读状态快照
#[derive(Debug, Clone, Serialize)]
pub struct StateView {
    /// 已入账的轮次数（下一条动作将被记为此轮次）
    pub turn: usize,
    /// 最近一条系统侧动作
    pub last_agent_action: Option<Action>,
    /// 最近一条用户侧动作
    pub last_user_action: Option<Action>,
    /// 用户已告知的约束（不含 UNK）
    pub constraints: BTreeMap<String, String>,
    /// 满足当前约束的候选条目数
    pub candidate_count: usize,
}

/// 共享状态跟踪器契约：编排器按本接口调用，内部表示与更新逻辑由实现方决定
pub trait StateTracker {
    /// 清空 episode 级状态（轮次历史、约束）
    fn reset(&mut self);

    /// 将一条动作折叠进状态；跟踪器是「实际说了什么」的唯一权威，入账时重盖轮次编号
    fn update(&mut self, action: &Action, speaker: Speaker);

    /// Agent 视角的只读快照
    fn state_for_agent(&self) -> StateView;

    /// 轮次历史中最近一条系统侧动作（入账后的规范记录，而非 Agent 刚产出的原始动作）
    fn latest_system_action(&self) -> Result<Action, DialogError>;

    /// 展示用：请求槽位的候选取值建议
    fn suggestion_values(&self, requested: &BTreeSet<String>) -> BTreeMap<String, Vec<String>>;

    /// 展示用：满足当前约束的候选条目数
    fn candidate_count(&self) -> usize;
}
