//! 计数版状态跟踪器（测试用）
//!
//! 包装 HistoryTracker，按来源统计 update 次数与 reset 次数，
//! 用于断言编排协议（终态轮不折叠用户动作、每轮至多两次更新）。

use std::collections::{BTreeMap, BTreeSet};

use crate::act::{Action, Speaker};
use crate::core::DialogError;
use crate::state::{HistoryTracker, KnowledgeBase, StateTracker, StateView};

/// 记录协作方调用次数的跟踪器桩
#[derive(Debug)]
pub struct CountingTracker {
    inner: HistoryTracker,
    pub reset_calls: usize,
    pub agent_updates: usize,
    pub user_updates: usize,
}

impl CountingTracker {
    pub fn new() -> Self {
        Self {
            inner: HistoryTracker::new(KnowledgeBase::demo()),
            reset_calls: 0,
            agent_updates: 0,
            user_updates: 0,
        }
    }

    pub fn total_updates(&self) -> usize {
        self.agent_updates + self.user_updates
    }
}

impl Default for CountingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StateTracker for CountingTracker {
    fn reset(&mut self) {
        self.reset_calls += 1;
        self.inner.reset();
    }

    fn update(&mut self, action: &Action, speaker: Speaker) {
        match speaker {
            Speaker::Agent => self.agent_updates += 1,
            Speaker::User => self.user_updates += 1,
        }
        self.inner.update(action, speaker);
    }

    fn state_for_agent(&self) -> StateView {
        self.inner.state_for_agent()
    }

    fn latest_system_action(&self) -> Result<Action, DialogError> {
        self.inner.latest_system_action()
    }

    fn suggestion_values(&self, requested: &BTreeSet<String>) -> BTreeMap<String, Vec<String>> {
        self.inner.suggestion_values(requested)
    }

    fn candidate_count(&self) -> usize {
        self.inner.candidate_count()
    }
}
