//! 基线 Agent：按固定顺序请求槽位
//!
//! 逐个请求尚未进入约束的基本槽位，问遍后宣告 taskcomplete 并回带全部已知约束。
//! 不学习，仅把经验元组留在内存缓冲（供驱动/测试检视），是打通全流程的最小实现。

use crate::act::{intents, Action, RESULT_SLOT};
use crate::actors::{Agent, Transition};
use crate::core::DialogError;
use crate::state::StateView;

/// 基本槽位的询问顺序
const REQUEST_ORDER: [&str; 5] = ["moviename", "city", "date", "starttime", "numberofpeople"];

/// 请求式基线 Agent
#[derive(Debug, Default)]
pub struct RequestAgent {
    /// 本 episode 已请求过的槽位（UNK 回答不再重问）
    asked: Vec<String>,
    transitions: Vec<Transition>,
    /// 是否请展示层给出候选值提示（命令行人肉 Agent 场景打开）
    suggestion_prompts: bool,
}

impl RequestAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suggestion_prompts(mut self) -> Self {
        self.suggestion_prompts = true;
        self
    }

    /// 内存中的经验缓冲（本基线不持久化）
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}

impl Agent for RequestAgent {
    fn initialize_episode(&mut self) {
        self.asked.clear();
    }

    fn state_to_action(&mut self, state: &StateView) -> Result<Action, DialogError> {
        for slot in REQUEST_ORDER {
            if state.constraints.contains_key(slot) || self.asked.iter().any(|s| s.as_str() == slot) {
                continue;
            }
            self.asked.push(slot.to_string());
            return Ok(Action::new(intents::REQUEST).with_request(slot));
        }

        // 所有基本槽位问毕：宣告完成，回带已知约束与预订结果
        let mut action = Action::new(intents::TASK_COMPLETE).with_inform(RESULT_SLOT, "BOOKED");
        for (slot, value) in &state.constraints {
            action = action.with_inform(slot.clone(), value.clone());
        }
        Ok(action)
    }

    fn attach_nl(&self, action: Action) -> Action {
        let nl = match action.intent.as_str() {
            intents::REQUEST => match action.request_slots.iter().next() {
                Some(slot) => format!("Which {} would you like?", slot),
                None => "Could you tell me more?".to_string(),
            },
            intents::TASK_COMPLETE => "Okay, your booking is confirmed.".to_string(),
            _ => action.nl_or_acts(),
        };
        action.with_nl(nl)
    }

    fn record_transition(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    fn wants_suggestion_prompts(&self) -> bool {
        self.suggestion_prompts
    }
}
