//! Dialog Gym - Rust 任务型对话模拟环境
//!
//! 入口：初始化日志与配置，组装规则用户 + 基线 Agent + 状态跟踪器，
//! 启动渲染任务并驱动 episode 循环，最后汇报统计。

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dialog_gym::actors::{RequestAgent, RuleUser};
use dialog_gym::config::load_config;
use dialog_gym::dialog::{DialogManager, RewardPolicy};
use dialog_gym::render::{render_events, RunMode};
use dialog_gym::runner::run_episodes;
use dialog_gym::state::{HistoryTracker, KnowledgeBase};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    let cfg = load_config(None).context("Failed to load config")?;
    let policy: RewardPolicy = cfg.reward.policy.parse()?;
    let run_mode: RunMode = cfg.display.run_mode.parse()?;

    tracing::info!(
        episodes = cfg.app.episodes,
        policy = %cfg.reward.policy,
        max_turns = cfg.user.max_turns,
        "starting dialog simulation"
    );

    let user = RuleUser::new(RuleUser::demo_goals(), cfg.user.max_turns, cfg.app.seed);
    let tracker = HistoryTracker::new(KnowledgeBase::demo());

    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
    let render_task = tokio::spawn(render_events(event_rx, run_mode));

    let mut manager = DialogManager::new(RequestAgent::new(), user, tracker, policy)
        .with_event_tx(event_tx);
    if cfg.display.auto_suggest {
        manager = manager.with_auto_suggest();
    }

    let summary = run_episodes(&mut manager, cfg.app.episodes, cfg.app.record_training_data)?;

    // 发送端随 manager 一起释放，渲染任务随之收尾
    drop(manager);
    render_task.await.context("Render task failed")?;

    tracing::info!(
        episodes = summary.episodes,
        success_rate = summary.success_rate(),
        avg_reward = summary.avg_reward(),
        avg_turns = summary.avg_turns(),
        "simulation finished"
    );

    Ok(())
}
