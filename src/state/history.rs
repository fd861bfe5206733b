//! 内置状态跟踪器：轮次历史 + 约束合并
//!
//! 入账时为动作重盖轮次编号并记录时间戳，因此编排器展示/转发系统动作时
//! 必须回读 latest_system_action()，而不是沿用 Agent 刚产出的原始动作。

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::act::{Action, Speaker, UNKNOWN_VALUE};
use crate::core::DialogError;
use crate::state::{KnowledgeBase, StateTracker, StateView};

/// 单条轮次历史记录
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub speaker: Speaker,
    pub action: Action,
    pub recorded_at: DateTime<Utc>,
}

/// 内置跟踪器：append-only 历史、用户约束合并、知识库候选统计
#[derive(Debug)]
pub struct HistoryTracker {
    kb: KnowledgeBase,
    history: Vec<TurnRecord>,
    /// 用户已告知的约束（UNK 不入账）
    constraints: BTreeMap<String, String>,
    /// 系统已告知的槽位
    agent_informs: BTreeMap<String, String>,
    turn_count: usize,
}

impl HistoryTracker {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self {
            kb,
            history: Vec::new(),
            constraints: BTreeMap::new(),
            agent_informs: BTreeMap::new(),
            turn_count: 0,
        }
    }

    pub fn history(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn agent_informs(&self) -> &BTreeMap<String, String> {
        &self.agent_informs
    }

    fn last_action_of(&self, speaker: Speaker) -> Option<Action> {
        self.history
            .iter()
            .rev()
            .find(|r| r.speaker == speaker)
            .map(|r| r.action.clone())
    }
}

impl StateTracker for HistoryTracker {
    fn reset(&mut self) {
        self.history.clear();
        self.constraints.clear();
        self.agent_informs.clear();
        self.turn_count = 0;
    }

    fn update(&mut self, action: &Action, speaker: Speaker) {
        // 规范化：重盖轮次编号，打时间戳
        let mut normalized = action.clone();
        normalized.turn = self.turn_count;

        match speaker {
            Speaker::User => {
                for (slot, value) in &normalized.inform_slots {
                    if value != UNKNOWN_VALUE {
                        self.constraints.insert(slot.clone(), value.clone());
                    }
                }
            }
            Speaker::Agent => {
                for (slot, value) in &normalized.inform_slots {
                    self.agent_informs.insert(slot.clone(), value.clone());
                }
            }
        }

        self.history.push(TurnRecord {
            speaker,
            action: normalized,
            recorded_at: Utc::now(),
        });
        self.turn_count += 1;
    }

    fn state_for_agent(&self) -> StateView {
        StateView {
            turn: self.turn_count,
            last_agent_action: self.last_action_of(Speaker::Agent),
            last_user_action: self.last_action_of(Speaker::User),
            constraints: self.constraints.clone(),
            candidate_count: self.kb.matching_count(&self.constraints),
        }
    }

    fn latest_system_action(&self) -> Result<Action, DialogError> {
        self.last_action_of(Speaker::Agent).ok_or_else(|| {
            DialogError::MalformedAction("no system action recorded for this turn".to_string())
        })
    }

    fn suggestion_values(&self, requested: &BTreeSet<String>) -> BTreeMap<String, Vec<String>> {
        self.kb.suggestion_values(&self.constraints, requested)
    }

    fn candidate_count(&self) -> usize {
        self.kb.matching_count(&self.constraints)
    }
}
