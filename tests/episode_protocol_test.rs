//! 回合协议集成测试
//!
//! 从公开 API 验证编排契约：更新次数序列、奖励时间线、录制开关一致性、
//! 未初始化快速失败，以及终态 state_after 不折叠用户最后动作的钉定行为。

use dialog_gym::act::DialogStatus;
use dialog_gym::actors::mock::{RecordingAgent, ScriptedUser};
use dialog_gym::core::DialogError;
use dialog_gym::dialog::{DialogManager, RewardPolicy};
use dialog_gym::state::mock::CountingTracker;

fn manager(
    script: Vec<DialogStatus>,
    max_turns: usize,
    policy: RewardPolicy,
) -> DialogManager<RecordingAgent, ScriptedUser, CountingTracker> {
    DialogManager::new(
        RecordingAgent::new(),
        ScriptedUser::new(script, max_turns),
        CountingTracker::new(),
        policy,
    )
}

#[test]
fn advance_turn_before_initialize_fails_fast() {
    let mut m = manager(vec![DialogStatus::Ongoing], 10, RewardPolicy::Shaped);
    assert!(matches!(
        m.advance_turn(true),
        Err(DialogError::EpisodeNotInitialized)
    ));
}

#[test]
fn tracker_receives_2n_minus_1_updates() {
    for n in [1usize, 3, 7] {
        let mut script = vec![DialogStatus::Ongoing; n - 1];
        script.push(DialogStatus::Success);
        let mut m = manager(script, 10, RewardPolicy::Shaped);

        m.initialize_episode().unwrap();
        let baseline = m.tracker().total_updates();
        for _ in 0..n {
            m.advance_turn(true).unwrap();
        }
        assert_eq!(
            m.tracker().total_updates() - baseline,
            2 * n - 1,
            "n = {}",
            n
        );
    }
}

#[test]
fn shaped_and_unshaped_timelines() {
    let script = vec![
        DialogStatus::Ongoing,
        DialogStatus::Ongoing,
        DialogStatus::Failure,
    ];

    let mut shaped = manager(script.clone(), 10, RewardPolicy::Shaped);
    shaped.initialize_episode().unwrap();
    let mut rewards = Vec::new();
    let mut overs = Vec::new();
    for _ in 0..3 {
        let (over, r) = shaped.advance_turn(true).unwrap();
        overs.push(over);
        rewards.push(r);
    }
    assert_eq!(rewards, vec![-1.0, -1.0, -10.0]);
    assert_eq!(overs, vec![false, false, true]);

    let mut unshaped = manager(script, 10, RewardPolicy::Unshaped);
    unshaped.initialize_episode().unwrap();
    let mut rewards = Vec::new();
    for _ in 0..3 {
        let (_, r) = unshaped.advance_turn(true).unwrap();
        rewards.push(r);
    }
    assert_eq!(rewards, vec![0.0, 0.0, 0.0]);
}

#[test]
fn record_flag_off_keeps_returns_identical() {
    let script = vec![DialogStatus::Ongoing, DialogStatus::Success];

    let mut recorded = manager(script.clone(), 10, RewardPolicy::Shaped);
    recorded.initialize_episode().unwrap();
    let r1 = (
        recorded.advance_turn(true).unwrap(),
        recorded.advance_turn(true).unwrap(),
    );
    assert_eq!(recorded.agent().transitions.len(), 2);

    let mut unrecorded = manager(script, 10, RewardPolicy::Shaped);
    unrecorded.initialize_episode().unwrap();
    let r2 = (
        unrecorded.advance_turn(false).unwrap(),
        unrecorded.advance_turn(false).unwrap(),
    );
    assert!(unrecorded.agent().transitions.is_empty());

    // 相同协作方行为下，录制与否不改变返回的 (episode_over, reward)
    assert_eq!(r1, r2);
}

#[test]
fn terminal_turn_skips_user_side_update() {
    let mut m = manager(vec![DialogStatus::Success], 10, RewardPolicy::Shaped);
    m.initialize_episode().unwrap();
    let user_updates_after_init = m.tracker().user_updates;

    let (over, reward) = m.advance_turn(true).unwrap();
    assert!(over);
    assert_eq!(reward, 20.0);
    assert_eq!(m.tracker().agent_updates, 1);
    assert_eq!(m.tracker().user_updates, user_updates_after_init);
}

#[test]
fn terminal_transition_next_state_excludes_final_user_action() {
    // 钉定行为：episode 结束的那一轮，经验元组的 state_after 是终止时刻的环境，
    // 用户的最后一条动作没有折叠进去（参见编排器第 9 步的约定）。
    let mut m = manager(
        vec![DialogStatus::Ongoing, DialogStatus::Failure],
        10,
        RewardPolicy::Shaped,
    );
    m.initialize_episode().unwrap();
    m.advance_turn(true).unwrap();
    m.advance_turn(true).unwrap();

    let transitions = &m.agent().transitions;
    assert_eq!(transitions.len(), 2);

    let ongoing = &transitions[0];
    assert_eq!(ongoing.state_after.turn, ongoing.state_before.turn + 2);

    let terminal = &transitions[1];
    assert!(terminal.episode_over);
    assert_eq!(terminal.state_after.turn, terminal.state_before.turn + 1);
}

#[test]
fn initialize_episode_is_idempotent_reset() {
    let mut m = manager(
        vec![DialogStatus::Failure, DialogStatus::Ongoing, DialogStatus::Success],
        10,
        RewardPolicy::Shaped,
    );

    m.initialize_episode().unwrap();
    let (over, _) = m.advance_turn(true).unwrap();
    assert!(over);

    // 失败收场后重开：标志清零、奖励归零，可以继续推进
    m.initialize_episode().unwrap();
    assert!(!m.episode_over());
    assert_eq!(m.reward(), 0.0);
    let (over, reward) = m.advance_turn(true).unwrap();
    assert!(!over);
    assert_eq!(reward, -1.0);
}
