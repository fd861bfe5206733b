//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `DIALOG__*` 覆盖（双下划线表示嵌套，
//! 如 `DIALOG__REWARD__POLICY=unshaped`）。展示详细程度与候选提示均为显式配置值，
//! 不读任何进程级可变全局状态。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub reward: RewardSection,
    #[serde(default)]
    pub display: DisplaySection,
    #[serde(default)]
    pub user: UserSection,
}

/// [app] 段：episode 数量与随机种子
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// 一次运行驱动的 episode 数
    pub episodes: usize,
    /// 用户模拟器目标抽样种子
    pub seed: u64,
    /// 是否录制训练数据（评估运行可关闭）
    pub record_training_data: bool,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            episodes: 10,
            seed: 42,
            record_training_data: true,
        }
    }
}

/// [reward] 段：奖励塑形方案
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RewardSection {
    /// shaped / unshaped
    pub policy: String,
}

impl Default for RewardSection {
    fn default() -> Self {
        Self {
            policy: "shaped".to_string(),
        }
    }
}

/// [display] 段：回合展示详细程度与候选提示
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    /// silent / nl / acts / debug
    pub run_mode: String,
    /// agent 动作展示后是否附带候选值提示
    pub auto_suggest: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            run_mode: "nl".to_string(),
            auto_suggest: false,
        }
    }
}

/// [user] 段：用户模拟器轮次预算
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserSection {
    pub max_turns: usize,
}

impl Default for UserSection {
    fn default() -> Self {
        Self { max_turns: 20 }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app: AppSection::default(),
            reward: RewardSection::default(),
            display: DisplaySection::default(),
            user: UserSection::default(),
        }
    }
}

/// 从 config 目录加载配置，环境变量 DIALOG__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 DIALOG__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("DIALOG")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_any_source() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.app.episodes, 10);
        assert_eq!(cfg.reward.policy, "shaped");
        assert_eq!(cfg.display.run_mode, "nl");
        assert_eq!(cfg.user.max_turns, 20);
        assert!(cfg.app.record_training_data);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "[app]\nepisodes = 3\n\n[reward]\npolicy = \"unshaped\"\n\n[user]\nmax_turns = 8\n"
        )
        .unwrap();

        let cfg = load_config(Some(path)).unwrap();
        assert_eq!(cfg.app.episodes, 3);
        assert_eq!(cfg.reward.policy, "unshaped");
        assert_eq!(cfg.user.max_turns, 8);
        // 未覆盖的段保持默认
        assert_eq!(cfg.display.run_mode, "nl");
    }
}
