//! 规则用户模拟器
//!
//! 每个 episode 抽取一个合成目标（要告知的约束 + 要请求的槽位），
//! 对系统请求逐槽作答，轮次超出预算判失败，系统 taskcomplete 时校验约束判成败。

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::act::{intents, Action, DialogStatus, RESULT_SLOT, UNKNOWN_VALUE};
use crate::actors::User;
use crate::core::DialogError;

/// 合成用户目标：要告知的约束与想获得的槽位
#[derive(Debug, Clone)]
pub struct UserGoal {
    pub inform_slots: BTreeMap<String, String>,
    pub request_slots: BTreeSet<String>,
}

impl UserGoal {
    pub fn new(informs: &[(&str, &str)], requests: &[&str]) -> Self {
        Self {
            inform_slots: informs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            request_slots: requests.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// 规则用户：目标驱动的脚本化应答策略
#[derive(Debug)]
pub struct RuleUser {
    goals: Vec<UserGoal>,
    rng: StdRng,
    goal: UserGoal,
    /// 用户侧轮次计数（agent 偶数轮、用户奇数轮的约定下按 2 递增）
    turn: usize,
    max_turns: usize,
}

impl RuleUser {
    pub fn new(goals: Vec<UserGoal>, max_turns: usize, seed: u64) -> Self {
        assert!(!goals.is_empty(), "RuleUser requires at least one goal");
        let goal = goals[0].clone();
        Self {
            goals,
            rng: StdRng::seed_from_u64(seed),
            goal,
            turn: 0,
            max_turns,
        }
    }

    /// 与演示知识库配套的目标集
    pub fn demo_goals() -> Vec<UserGoal> {
        vec![
            UserGoal::new(
                &[("moviename", "deadpool"), ("city", "seattle"), ("numberofpeople", "2")],
                &[RESULT_SLOT, "theater", "starttime"],
            ),
            UserGoal::new(
                &[("moviename", "zootopia"), ("city", "portland"), ("date", "friday")],
                &[RESULT_SLOT, "starttime"],
            ),
        ]
    }

    /// 运行期调整轮次预算；下一次奖励计算即生效
    pub fn set_max_turns(&mut self, max_turns: usize) {
        self.max_turns = max_turns;
    }

    pub fn goal(&self) -> &UserGoal {
        &self.goal
    }

    /// 系统 taskcomplete 时校验：目标约束须全部体现在系统告知中
    fn goal_satisfied(&self, system_action: &Action) -> bool {
        self.goal
            .inform_slots
            .iter()
            .all(|(slot, value)| system_action.inform_slots.get(slot) == Some(value))
    }
}

impl User for RuleUser {
    fn initialize_episode(&mut self) -> Result<Action, DialogError> {
        let idx = self.rng.gen_range(0..self.goals.len());
        self.goal = self.goals[idx].clone();
        self.turn = 0;

        // 开场：请求结果槽位，并先行告知一条约束
        let mut action = Action::new(intents::REQUEST).with_request(RESULT_SLOT);
        if let Some((slot, value)) = self.goal.inform_slots.iter().next() {
            action = action.with_inform(slot.clone(), value.clone());
        }
        let nl = format!("I want a {}. Can you help me book it?", RESULT_SLOT);
        Ok(action.with_turn(self.turn).with_nl(nl))
    }

    fn next(&mut self, system_action: &Action) -> Result<(Action, bool, DialogStatus), DialogError> {
        self.turn += 2;

        // 轮次预算用尽：episode 结束，判失败
        if self.turn >= self.max_turns {
            let action = Action::new(intents::CLOSING)
                .with_turn(self.turn)
                .with_nl("This is taking too long, never mind.");
            return Ok((action, true, DialogStatus::Failure));
        }

        // 系统宣告任务完成：按目标约束校验成败
        if system_action.intent == intents::TASK_COMPLETE
            || system_action.inform_slots.contains_key(RESULT_SLOT)
        {
            return if self.goal_satisfied(system_action) {
                let action = Action::new(intents::THANKS)
                    .with_turn(self.turn)
                    .with_nl("Great, thanks!");
                Ok((action, true, DialogStatus::Success))
            } else {
                let action = Action::new(intents::DENY)
                    .with_turn(self.turn)
                    .with_nl("No, that is not what I asked for.");
                Ok((action, true, DialogStatus::Failure))
            };
        }

        // 系统请求槽位：在目标内则作答，不在则告知 UNK
        if let Some(slot) = system_action.request_slots.iter().next() {
            let value = self
                .goal
                .inform_slots
                .get(slot)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_VALUE.to_string());
            let nl = if value == UNKNOWN_VALUE {
                format!("I do not care about the {}.", slot)
            } else {
                format!("The {} is {}.", slot, value)
            };
            let action = Action::new(intents::INFORM)
                .with_inform(slot.clone(), value)
                .with_turn(self.turn)
                .with_nl(nl);
            return Ok((action, false, DialogStatus::Ongoing));
        }

        // 其他情况：重申对结果槽位的请求
        let action = Action::new(intents::REQUEST)
            .with_request(RESULT_SLOT)
            .with_turn(self.turn)
            .with_nl(format!("Could you book the {} for me?", RESULT_SLOT));
        Ok((action, false, DialogStatus::Ongoing))
    }

    fn max_turns(&self) -> usize {
        self.max_turns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_goal_user(max_turns: usize) -> RuleUser {
        let goal = UserGoal::new(&[("moviename", "deadpool")], &[RESULT_SLOT]);
        RuleUser::new(vec![goal], max_turns, 7)
    }

    #[test]
    fn test_opening_move_requests_result_slot() {
        let mut user = single_goal_user(20);
        let action = user.initialize_episode().unwrap();
        assert_eq!(action.intent, intents::REQUEST);
        assert!(action.request_slots.contains(RESULT_SLOT));
        assert_eq!(action.turn, 0);
        assert!(action.nl.is_some());
    }

    #[test]
    fn test_answers_requested_goal_slot() {
        let mut user = single_goal_user(20);
        user.initialize_episode().unwrap();

        let sys = Action::new(intents::REQUEST).with_request("moviename");
        let (action, over, status) = user.next(&sys).unwrap();
        assert!(!over);
        assert_eq!(status, DialogStatus::Ongoing);
        assert_eq!(action.inform_slots.get("moviename").unwrap(), "deadpool");
    }

    #[test]
    fn test_unknown_slot_answered_with_unk() {
        let mut user = single_goal_user(20);
        user.initialize_episode().unwrap();

        let sys = Action::new(intents::REQUEST).with_request("theater");
        let (action, _, _) = user.next(&sys).unwrap();
        assert_eq!(action.inform_slots.get("theater").unwrap(), UNKNOWN_VALUE);
    }

    #[test]
    fn test_budget_exhaustion_fails_episode() {
        let mut user = single_goal_user(2);
        user.initialize_episode().unwrap();

        let sys = Action::new(intents::REQUEST).with_request("moviename");
        let (_, over, status) = user.next(&sys).unwrap();
        assert!(over);
        assert_eq!(status, DialogStatus::Failure);
    }

    #[test]
    fn test_taskcomplete_verified_against_goal() {
        let mut user = single_goal_user(20);
        user.initialize_episode().unwrap();

        let good = Action::new(intents::TASK_COMPLETE)
            .with_inform("moviename", "deadpool")
            .with_inform(RESULT_SLOT, "BOOKED");
        let (_, over, status) = user.next(&good).unwrap();
        assert!(over);
        assert_eq!(status, DialogStatus::Success);

        let mut user = single_goal_user(20);
        user.initialize_episode().unwrap();
        let bad = Action::new(intents::TASK_COMPLETE).with_inform(RESULT_SLOT, "BOOKED");
        let (_, over, status) = user.next(&bad).unwrap();
        assert!(over);
        assert_eq!(status, DialogStatus::Failure);
    }
}
