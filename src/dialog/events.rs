//! 回合展示事件：供外部渲染器消费
//!
//! 编排器在动作定稿后单向推送，发送失败一律忽略；不挂接收端时协议行为完全一致。
//! 事件只携带展示副本，绝不反向影响控制流、奖励或共享状态。

use std::collections::BTreeMap;

use serde::Serialize;

use crate::act::Action;

/// 单轮展示事件（可序列化为 JSON 供前端展示）
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    /// 新 episode 开场：用户的第一条动作
    EpisodeStarted { user_action: Action },
    /// 系统侧动作定稿（已附加 NL 的展示副本）
    AgentTurn { action: Action },
    /// 用户侧动作定稿
    UserTurn { action: Action },
    /// 请求槽位的候选值提示
    Suggestions {
        values: BTreeMap<String, Vec<String>>,
    },
    /// 满足当前约束的候选条目数
    CandidateCount { count: usize },
}
