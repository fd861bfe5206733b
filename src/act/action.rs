//! 结构化对话动作
//!
//! 双方交换的最小通信单元：意图标签、已告知槽位（slot -> value）、请求槽位集合、
//! 轮次编号与可选的自然语言表述。产生后不再原地修改；展示需要过滤时
//! 用 display_requests() 等派生视图，规范记录本身保持不变。

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// 预订结果槽位：用户最终想要的产物（对应票务域的 ticket），展示时从请求集合中隐藏
pub const RESULT_SLOT: &str = "ticket";

/// 用户无法回答某槽位时告知的占位值，状态跟踪器不会将其并入约束
pub const UNKNOWN_VALUE: &str = "UNK";

/// 动作来源：系统侧（Agent）或用户侧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Agent,
    User,
}

/// 结构化对话动作（tagged communicative act）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// 意图标签（request / inform / taskcomplete / thanks / deny / closing）
    pub intent: String,
    /// 已告知槽位：slot -> value
    #[serde(default)]
    pub inform_slots: BTreeMap<String, String>,
    /// 请求槽位集合
    #[serde(default)]
    pub request_slots: BTreeSet<String>,
    /// 轮次编号；状态跟踪器入账时会重盖为实际轮次
    #[serde(default)]
    pub turn: usize,
    /// 自然语言表述，由 Agent 的 attach_nl / 用户模拟器模板附加
    #[serde(default)]
    pub nl: Option<String>,
}

impl Action {
    pub fn new(intent: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            inform_slots: BTreeMap::new(),
            request_slots: BTreeSet::new(),
            turn: 0,
            nl: None,
        }
    }

    pub fn with_inform(mut self, slot: impl Into<String>, value: impl Into<String>) -> Self {
        self.inform_slots.insert(slot.into(), value.into());
        self
    }

    pub fn with_request(mut self, slot: impl Into<String>) -> Self {
        self.request_slots.insert(slot.into());
        self
    }

    pub fn with_turn(mut self, turn: usize) -> Self {
        self.turn = turn;
        self
    }

    pub fn with_nl(mut self, nl: impl Into<String>) -> Self {
        self.nl = Some(nl.into());
        self
    }

    /// 展示用请求槽位：隐藏结果槽位（RESULT_SLOT），不修改动作本身
    pub fn display_requests(&self) -> BTreeSet<String> {
        self.request_slots
            .iter()
            .filter(|s| s.as_str() != RESULT_SLOT)
            .cloned()
            .collect()
    }

    /// NL 表述，缺省时退化为动作标签拼接（调试展示用）
    pub fn nl_or_acts(&self) -> String {
        match &self.nl {
            Some(nl) => nl.clone(),
            None => format!(
                "{}(inform: {:?}, request: {:?})",
                self.intent, self.inform_slots, self.request_slots
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_requests_hides_result_slot() {
        let action = Action::new("request")
            .with_request(RESULT_SLOT)
            .with_request("starttime");

        let shown = action.display_requests();
        assert!(shown.contains("starttime"));
        assert!(!shown.contains(RESULT_SLOT));
        // 规范记录不受展示派生影响
        assert!(action.request_slots.contains(RESULT_SLOT));
        assert_eq!(action.request_slots.len(), 2);
    }

    #[test]
    fn test_action_serde_roundtrip_defaults() {
        let json = r#"{"intent":"request","request_slots":["city"]}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action.intent, "request");
        assert_eq!(action.turn, 0);
        assert!(action.inform_slots.is_empty());
        assert!(action.nl.is_none());
    }
}
