//! 回合渲染器：消费展示事件
//!
//! 独立于编排核心的尽力而为消费端；按 RunMode 决定打印 NL、动作结构或两者。
//! 渲染器崩了也只会丢展示，不影响协议推进。

use std::str::FromStr;

use tokio::sync::mpsc;

use crate::act::Action;
use crate::core::DialogError;
use crate::dialog::TurnEvent;

/// 展示详细程度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// 不打印任何回合内容
    Silent,
    /// 只打印自然语言
    Nl,
    /// 只打印动作结构（意图 + 槽位）
    Acts,
    /// NL 与动作结构都打印
    Debug,
}

impl FromStr for RunMode {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "silent" => Ok(RunMode::Silent),
            "nl" => Ok(RunMode::Nl),
            "acts" => Ok(RunMode::Acts),
            "debug" => Ok(RunMode::Debug),
            other => Err(DialogError::Config(format!("unknown run mode: {}", other))),
        }
    }
}

fn print_action(mode: RunMode, side: &str, action: &Action) {
    match mode {
        RunMode::Silent => {}
        RunMode::Nl => println!("Turn {} {}: {}", action.turn, side, action.nl_or_acts()),
        RunMode::Acts => println!(
            "Turn {} {}: {}, inform_slots: {:?}, request_slots: {:?}",
            action.turn, side, action.intent, action.inform_slots, action.request_slots
        ),
        RunMode::Debug => {
            println!(
                "Turn {} {}: {}, inform_slots: {:?}, request_slots: {:?}",
                action.turn, side, action.intent, action.inform_slots, action.request_slots
            );
            println!("Turn {} {}: {}", action.turn, side, action.nl_or_acts());
        }
    }
}

/// 事件消费循环：通道关闭（编排器被 drop）即退出
pub async fn render_events(mut rx: mpsc::UnboundedReceiver<TurnEvent>, mode: RunMode) {
    while let Some(event) = rx.recv().await {
        match event {
            TurnEvent::EpisodeStarted { user_action } => {
                if mode != RunMode::Silent {
                    println!("New episode:");
                }
                print_action(mode, "usr", &user_action);
            }
            TurnEvent::AgentTurn { action } => print_action(mode, "sys", &action),
            TurnEvent::UserTurn { action } => print_action(mode, "usr", &action),
            TurnEvent::Suggestions { values } => {
                if mode == RunMode::Silent {
                    continue;
                }
                for (slot, candidates) in values {
                    if candidates.is_empty() {
                        println!("(Suggested values: there is no available {})", slot);
                    } else {
                        println!("(Suggested values: {}: {:?})", slot, candidates);
                    }
                }
            }
            TurnEvent::CandidateCount { count } => {
                if mode != RunMode::Silent {
                    println!("(Candidates matching current constraints: {})", count);
                }
            }
        }
    }
}
