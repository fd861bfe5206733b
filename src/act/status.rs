//! 对话结局状态
//!
//! 用户模拟器每轮给出的信号：进行中 / 成功 / 失败。
//! 枚举之外的取值属于配置级错误，解析阶段即拒绝（UnknownStatus），不会进入奖励计算。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::DialogError;

/// 对话状态：驱动 episode_over 标志与奖励计算
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogStatus {
    /// 对话进行中
    Ongoing,
    /// 任务完成（终态）
    Success,
    /// 任务失败或超出轮次预算（终态）
    Failure,
}

impl DialogStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DialogStatus::Success | DialogStatus::Failure)
    }
}

impl fmt::Display for DialogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DialogStatus::Ongoing => "ongoing",
            DialogStatus::Success => "success",
            DialogStatus::Failure => "failure",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DialogStatus {
    type Err = DialogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ongoing" => Ok(DialogStatus::Ongoing),
            "success" => Ok(DialogStatus::Success),
            "failure" | "failed" => Ok(DialogStatus::Failure),
            other => Err(DialogError::UnknownStatus(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!("ongoing".parse::<DialogStatus>().unwrap(), DialogStatus::Ongoing);
        assert_eq!("Success".parse::<DialogStatus>().unwrap(), DialogStatus::Success);
        assert_eq!("failed".parse::<DialogStatus>().unwrap(), DialogStatus::Failure);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = "aborted".parse::<DialogStatus>().unwrap_err();
        assert!(matches!(err, DialogError::UnknownStatus(ref s) if s == "aborted"));
    }

    #[test]
    fn test_terminal_flags() {
        assert!(!DialogStatus::Ongoing.is_terminal());
        assert!(DialogStatus::Success.is_terminal());
        assert!(DialogStatus::Failure.is_terminal());
    }
}
