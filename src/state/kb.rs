//! 内存知识库
//!
//! 候选条目 = slot -> value 的扁平记录。跟踪器用它回答两个展示问题：
//! 当前约束下还剩多少候选、某个请求槽位有哪些可选值。

use std::collections::{BTreeMap, BTreeSet};

use crate::act::{RESULT_SLOT, UNKNOWN_VALUE};

/// 内存知识库：一组候选条目
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    entries: Vec<BTreeMap<String, String>>,
}

impl KnowledgeBase {
    pub fn new(entries: Vec<BTreeMap<String, String>>) -> Self {
        Self { entries }
    }

    /// 演示用票务域小库（与内置用户模拟器目标集配套）
    pub fn demo() -> Self {
        let rows = [
            [
                ("moviename", "deadpool"),
                ("city", "seattle"),
                ("theater", "regal meridian 16"),
                ("starttime", "9:10 pm"),
                ("date", "tomorrow"),
            ],
            [
                ("moviename", "deadpool"),
                ("city", "seattle"),
                ("theater", "amc pacific place 11"),
                ("starttime", "9:30 pm"),
                ("date", "tomorrow"),
            ],
            [
                ("moviename", "zootopia"),
                ("city", "portland"),
                ("theater", "regal fox tower"),
                ("starttime", "6:00 pm"),
                ("date", "friday"),
            ],
            [
                ("moviename", "zootopia"),
                ("city", "seattle"),
                ("theater", "regal meridian 16"),
                ("starttime", "8:00 pm"),
                ("date", "friday"),
            ],
        ];
        let entries = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect()
            })
            .collect();
        Self { entries }
    }

    /// 条目是否满足约束；结果槽位与 UNK 值不参与匹配
    fn matches(entry: &BTreeMap<String, String>, constraints: &BTreeMap<String, String>) -> bool {
        constraints.iter().all(|(slot, value)| {
            if slot == RESULT_SLOT || value == UNKNOWN_VALUE {
                return true;
            }
            match entry.get(slot) {
                Some(v) => v == value,
                // 库中无此槽位的条目不因此出局（如 numberofpeople）
                None => true,
            }
        })
    }

    /// 满足约束的候选条目数
    pub fn matching_count(&self, constraints: &BTreeMap<String, String>) -> usize {
        self.entries
            .iter()
            .filter(|e| Self::matches(e, constraints))
            .count()
    }

    /// 每个请求槽位在满足约束的条目中的去重取值
    pub fn suggestion_values(
        &self,
        constraints: &BTreeMap<String, String>,
        requested: &BTreeSet<String>,
    ) -> BTreeMap<String, Vec<String>> {
        requested
            .iter()
            .map(|slot| {
                let mut values: Vec<String> = Vec::new();
                for entry in self.entries.iter().filter(|e| Self::matches(e, constraints)) {
                    if let Some(v) = entry.get(slot) {
                        if !values.contains(v) {
                            values.push(v.clone());
                        }
                    }
                }
                (slot.clone(), values)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_matching_count_filters_by_constraints() {
        let kb = KnowledgeBase::demo();
        assert_eq!(kb.matching_count(&BTreeMap::new()), 4);
        assert_eq!(kb.matching_count(&constraints(&[("moviename", "deadpool")])), 2);
        assert_eq!(
            kb.matching_count(&constraints(&[("moviename", "zootopia"), ("city", "portland")])),
            1
        );
        assert_eq!(kb.matching_count(&constraints(&[("city", "boston")])), 0);
    }

    #[test]
    fn test_unknown_value_and_result_slot_ignored() {
        let kb = KnowledgeBase::demo();
        let c = constraints(&[("starttime", UNKNOWN_VALUE), (RESULT_SLOT, "BOOKED")]);
        assert_eq!(kb.matching_count(&c), 4);
    }

    #[test]
    fn test_suggestion_values_deduped() {
        let kb = KnowledgeBase::demo();
        let requested: BTreeSet<String> = ["theater".to_string()].into_iter().collect();
        let values = kb.suggestion_values(&constraints(&[("moviename", "deadpool")]), &requested);
        assert_eq!(
            values.get("theater").unwrap(),
            &vec![
                "regal meridian 16".to_string(),
                "amc pacific place 11".to_string()
            ]
        );
    }
}
