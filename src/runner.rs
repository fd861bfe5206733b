//! Episode 驱动循环
//!
//! 训练/评估驱动：重复「initialize_episode + advance_turn 直到结束」，
//! 汇总成功率、平均奖励与平均轮数。错误不做恢复，带着统计现场向上传播。

use uuid::Uuid;

use crate::actors::{Agent, User};
use crate::core::DialogError;
use crate::dialog::DialogManager;
use crate::state::StateTracker;

/// 一次运行的汇总统计
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub episodes: usize,
    pub successes: usize,
    pub total_reward: f64,
    pub total_turns: usize,
}

impl RunSummary {
    pub fn success_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.successes as f64 / self.episodes as f64
        }
    }

    pub fn avg_reward(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_reward / self.episodes as f64
        }
    }

    pub fn avg_turns(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.episodes as f64
        }
    }
}

/// 驱动 episodes 个完整 episode；终轮奖励为正视为成功
pub fn run_episodes<A, U, T>(
    manager: &mut DialogManager<A, U, T>,
    episodes: usize,
    record_training_data: bool,
) -> Result<RunSummary, DialogError>
where
    A: Agent,
    U: User,
    T: StateTracker,
{
    let mut summary = RunSummary::default();

    for i in 0..episodes {
        let episode_id = Uuid::new_v4();
        tracing::debug!(episode = i, %episode_id, "episode start");

        manager.initialize_episode()?;
        let mut episode_reward = 0.0;
        let mut turns = 0usize;
        let final_reward;

        loop {
            let (over, reward) = manager.advance_turn(record_training_data)?;
            episode_reward += reward;
            turns += 1;
            if over {
                final_reward = reward;
                break;
            }
        }

        let success = final_reward > 0.0;
        summary.episodes += 1;
        summary.total_reward += episode_reward;
        summary.total_turns += turns;
        if success {
            summary.successes += 1;
        }

        tracing::info!(
            episode = i,
            %episode_id,
            success,
            reward = episode_reward,
            turns,
            "episode finished"
        );
    }

    Ok(summary)
}
