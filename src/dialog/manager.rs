//! 对话管理器：episode/回合编排
//!
//! 在 Agent、用户模拟器与状态跟踪器之间调停：驱动每轮「agent 先手、用户应答」的
//! 交换协议，计算奖励，判定 episode 结束，并组装经验元组转交 Agent。
//! 回合内完全同步，单实例同一时刻只有一个活跃 episode；并行 episode 各起一套三元组。

use tokio::sync::mpsc;

use crate::act::{Action, Speaker};
use crate::actors::{Agent, Transition, User};
use crate::core::DialogError;
use crate::dialog::{RewardPolicy, TurnEvent};
use crate::state::StateTracker;

/// Episode 编排器：独占持有 Agent / 用户 / 状态跟踪器三元组
pub struct DialogManager<A, U, T> {
    agent: A,
    user: U,
    tracker: T,
    policy: RewardPolicy,
    /// 每轮 agent 动作展示后是否附带候选值提示
    auto_suggest: bool,
    /// 展示事件接收端（可选；不挂接收端时协议行为不变）
    event_tx: Option<mpsc::UnboundedSender<TurnEvent>>,
    reward: f64,
    episode_over: bool,
    initialized: bool,
}

impl<A, U, T> DialogManager<A, U, T>
where
    A: Agent,
    U: User,
    T: StateTracker,
{
    pub fn new(agent: A, user: U, tracker: T, policy: RewardPolicy) -> Self {
        Self {
            agent,
            user,
            tracker,
            policy,
            auto_suggest: false,
            event_tx: None,
            reward: 0.0,
            episode_over: false,
            initialized: false,
        }
    }

    /// 打开候选值提示（展示层行为，不影响协议）
    pub fn with_auto_suggest(mut self) -> Self {
        self.auto_suggest = true;
        self
    }

    /// 挂接展示事件通道
    pub fn with_event_tx(mut self, tx: mpsc::UnboundedSender<TurnEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    pub fn reward(&self) -> f64 {
        self.reward
    }

    pub fn episode_over(&self) -> bool {
        self.episode_over
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }

    pub fn user(&self) -> &U {
        &self.user
    }

    pub fn user_mut(&mut self) -> &mut U {
        &mut self.user
    }

    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    fn send_event(&self, ev: TurnEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(ev);
        }
    }

    /// 开启新 episode：清零奖励与结束标志，重置三方协作者，折叠用户开场动作
    pub fn initialize_episode(&mut self) -> Result<(), DialogError> {
        self.reward = 0.0;
        self.episode_over = false;
        self.tracker.reset();

        let user_action = self.user.initialize_episode()?;
        self.tracker.update(&user_action, Speaker::User);
        self.send_event(TurnEvent::EpisodeStarted { user_action });

        self.agent.initialize_episode();
        self.initialized = true;
        Ok(())
    }

    /// 推进一轮交换（agent 先手），返回 (episode_over, reward)
    ///
    /// 步骤顺序即协议契约，不可调换：
    /// 状态快照 -> agent 动作 -> 折叠 -> 展示 -> 回读系统动作 -> 用户应答 ->
    /// 奖励 -> （未结束时）折叠用户动作 -> 组装经验元组 -> 返回
    pub fn advance_turn(&mut self, record_training_data: bool) -> Result<(bool, f64), DialogError> {
        if !self.initialized {
            return Err(DialogError::EpisodeNotInitialized);
        }

        // 1. agent 视角状态快照（经验元组的 state_before）
        let state = self.tracker.state_for_agent();

        // 2. agent 产生动作
        let agent_action = self.agent.state_to_action(&state)?;

        // 3. 本轮第一次状态更新
        self.tracker.update(&agent_action, Speaker::Agent);

        // 4. 展示：附加 NL 的副本，规范记录不动
        let display_action = self.agent.attach_nl(agent_action.clone());
        self.send_event(TurnEvent::AgentTurn {
            action: display_action.clone(),
        });
        if self.auto_suggest {
            let values = self.tracker.suggestion_values(&display_action.display_requests());
            self.send_event(TurnEvent::Suggestions { values });
        }

        // 5. 以跟踪器入账后的系统动作为准（轮次已重盖）
        let sys_action = self.tracker.latest_system_action()?;

        // 6. 用户应答：下一动作、结束标志、结局状态
        let (user_action, episode_over, status) = self.user.next(&sys_action)?;
        self.episode_over = episode_over;

        // 7. 纯函数奖励；max_turns 现读，预算重配下一次立即生效
        self.reward = self.policy.reward(status, self.user.max_turns());

        // 8. episode 未结束才折叠用户动作（本轮第二次状态更新）
        if !self.episode_over {
            self.tracker.update(&user_action, Speaker::User);
            self.emit_user_turn(&user_action);
        }

        // 9. 经验元组：state_after 现取；episode 刚结束时按约定不含用户最后动作
        if record_training_data {
            self.agent.record_transition(Transition {
                state_before: state,
                agent_action,
                reward: self.reward,
                state_after: self.tracker.state_for_agent(),
                episode_over: self.episode_over,
            });
        }

        Ok((self.episode_over, self.reward))
    }

    /// 用户动作展示；声明了提示能力的 Agent 额外获得候选值/候选数提示
    fn emit_user_turn(&self, user_action: &Action) {
        self.send_event(TurnEvent::UserTurn {
            action: user_action.clone(),
        });

        if self.agent.wants_suggestion_prompts() {
            let requested = user_action.display_requests();
            if requested.is_empty() {
                self.send_event(TurnEvent::CandidateCount {
                    count: self.tracker.candidate_count(),
                });
            } else {
                let values = self.tracker.suggestion_values(&requested);
                self.send_event(TurnEvent::Suggestions { values });
            }
        }
    }
}
