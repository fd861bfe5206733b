//! Actor 测试桩（无需真实策略即可跑通编排协议）
//!
//! ScriptedUser 按预置状态脚本逐轮回放；RecordingAgent 固定请求一个槽位，
//! 把收到的经验元组全部留存，便于断言轮次协议与录制开关。

use crate::act::{intents, Action, DialogStatus};
use crate::actors::{Agent, Transition, User};
use crate::core::DialogError;
use crate::state::StateView;

/// 脚本化用户：第 i 次 next() 返回脚本第 i 项状态（跨 episode 连续回放，不回卷）
#[derive(Debug)]
pub struct ScriptedUser {
    script: Vec<DialogStatus>,
    cursor: usize,
    max_turns: usize,
    pub init_calls: usize,
}

impl ScriptedUser {
    pub fn new(script: Vec<DialogStatus>, max_turns: usize) -> Self {
        Self {
            script,
            cursor: 0,
            max_turns,
            init_calls: 0,
        }
    }

    /// 测试运行期重配轮次预算（奖励应现读新值）
    pub fn set_max_turns(&mut self, max_turns: usize) {
        self.max_turns = max_turns;
    }
}

impl User for ScriptedUser {
    fn initialize_episode(&mut self) -> Result<Action, DialogError> {
        self.init_calls += 1;
        Ok(Action::new(intents::REQUEST).with_request("ticket"))
    }

    fn next(&mut self, _system_action: &Action) -> Result<(Action, bool, DialogStatus), DialogError> {
        let status = self
            .script
            .get(self.cursor)
            .copied()
            .ok_or_else(|| DialogError::UserError("script exhausted".to_string()))?;
        self.cursor += 1;

        let action = match status {
            DialogStatus::Ongoing => Action::new(intents::INFORM).with_inform("city", "seattle"),
            DialogStatus::Success => Action::new(intents::THANKS),
            DialogStatus::Failure => Action::new(intents::CLOSING),
        };
        Ok((action, status.is_terminal(), status))
    }

    fn max_turns(&self) -> usize {
        self.max_turns
    }
}

/// 录制 Agent：动作固定，留存全部经验元组
#[derive(Debug, Default)]
pub struct RecordingAgent {
    pub transitions: Vec<Transition>,
    pub init_calls: usize,
}

impl RecordingAgent {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Agent for RecordingAgent {
    fn initialize_episode(&mut self) {
        self.init_calls += 1;
    }

    fn state_to_action(&mut self, _state: &StateView) -> Result<Action, DialogError> {
        Ok(Action::new(intents::REQUEST).with_request("moviename"))
    }

    fn record_transition(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }
}
