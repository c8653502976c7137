//! 并列感知的名次计算（"1224" 竞赛排名）

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 排名范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RankScope {
    /// 全部参与者
    Overall,
    /// 同一班级
    Class,
    /// 同一班级内的同一分流；没有分流的学生在班内归为一组
    Stream,
}

impl RankScope {
    pub const ALL: [RankScope; 3] = [RankScope::Overall, RankScope::Class, RankScope::Stream];
}

/// 分组键：`(class_id, stream_id)`，全局范围两者都为空
pub type ScopeKey = (Option<i64>, Option<i64>);

/// 可排名的对象
pub trait Rankable {
    /// 决定名次的分数，越高越靠前
    fn rank_score(&self) -> f64;

    /// 同分时的组内顺序，不影响名次
    fn tie_breaker(&self) -> f64 {
        0.0
    }

    /// 最终的稳定顺序
    fn identity(&self) -> i64;

    fn class_id(&self) -> Option<i64> {
        None
    }

    fn stream_id(&self) -> Option<i64> {
        None
    }

    fn set_position(&mut self, scope: RankScope, position: Option<i32>);

    /// 返回 None 表示不参与该范围的排名
    fn scope_key(&self, scope: RankScope) -> Option<ScopeKey> {
        match scope {
            RankScope::Overall => Some((None, None)),
            RankScope::Class => self.class_id().map(|c| (Some(c), None)),
            RankScope::Stream => self.class_id().map(|c| (Some(c), self.stream_id())),
        }
    }
}

/// 对已按分数降序排列的分数序列计算竞赛名次
///
/// 只有分数严格小于前一个时才开新名次，新名次等于 1 起的位置序号。
/// `[90, 85, 85, 70]` → `[1, 2, 2, 4]`
pub fn competition_ranks(sorted_scores: &[f64]) -> Vec<i32> {
    let mut ranks = Vec::with_capacity(sorted_scores.len());
    let mut position = 0;
    let mut previous: Option<f64> = None;

    for (index, score) in sorted_scores.iter().enumerate() {
        let actual_position = index as i32 + 1;
        if previous.is_none_or(|prev| *score < prev) {
            position = actual_position;
        }
        ranks.push(position);
        previous = Some(*score);
    }

    ranks
}

fn ranking_order<T: Rankable>(a: &T, b: &T) -> Ordering {
    b.rank_score()
        .total_cmp(&a.rank_score())
        .then_with(|| b.tie_breaker().total_cmp(&a.tie_breaker()))
        .then_with(|| a.identity().cmp(&b.identity()))
}

/// 在一个范围内为所有对象写入名次
///
/// 每个分组独立排序、独立计名次；不属于任何分组的对象名次置空。
pub fn assign_positions<T: Rankable>(items: &mut [T], scope: RankScope) {
    let mut groups: BTreeMap<ScopeKey, Vec<usize>> = BTreeMap::new();
    for (index, item) in items.iter_mut().enumerate() {
        match item.scope_key(scope) {
            Some(key) => groups.entry(key).or_default().push(index),
            None => item.set_position(scope, None),
        }
    }

    for (_, mut indices) in groups {
        indices.sort_by(|&a, &b| ranking_order(&items[a], &items[b]));
        let scores: Vec<f64> = indices.iter().map(|&i| items[i].rank_score()).collect();
        for (&index, rank) in indices.iter().zip(competition_ranks(&scores)) {
            items[index].set_position(scope, Some(rank));
        }
    }
}

/// 依次在全局、班级、分流三个范围排名
pub fn rank_all_scopes<T: Rankable>(items: &mut [T]) {
    for scope in RankScope::ALL {
        assign_positions(items, scope);
    }
}

/// 单科成绩的排名视图，缺考成绩不应进入
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    pub result_id: i64,
    pub student_id: i64,
    pub class_id: Option<i64>,
    pub stream_id: Option<i64>,
    pub score: f64,
    pub position: Option<i32>,
    pub class_position: Option<i32>,
    pub stream_position: Option<i32>,
}

impl RankedResult {
    pub fn new(result_id: i64, student_id: i64, score: f64) -> Self {
        Self {
            result_id,
            student_id,
            class_id: None,
            stream_id: None,
            score,
            position: None,
            class_position: None,
            stream_position: None,
        }
    }

    pub fn in_class(mut self, class_id: Option<i64>, stream_id: Option<i64>) -> Self {
        self.class_id = class_id;
        self.stream_id = stream_id;
        self
    }
}

impl Rankable for RankedResult {
    fn rank_score(&self) -> f64 {
        self.score
    }

    fn identity(&self) -> i64 {
        self.student_id
    }

    fn class_id(&self) -> Option<i64> {
        self.class_id
    }

    fn stream_id(&self) -> Option<i64> {
        self.stream_id
    }

    fn set_position(&mut self, scope: RankScope, position: Option<i32>) {
        match scope {
            RankScope::Overall => self.position = position,
            RankScope::Class => self.class_position = position,
            RankScope::Stream => self.stream_position = position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked(student_id: i64, score: f64) -> RankedResult {
        RankedResult::new(student_id * 10, student_id, score)
    }

    fn overall(items: &[RankedResult]) -> Vec<(i64, Option<i32>)> {
        let mut pairs: Vec<_> = items.iter().map(|r| (r.student_id, r.position)).collect();
        pairs.sort();
        pairs
    }

    #[test]
    fn test_competition_ranks_tie_law() {
        assert_eq!(competition_ranks(&[90.0, 85.0, 85.0, 70.0]), vec![1, 2, 2, 4]);
        assert_eq!(competition_ranks(&[50.0, 50.0, 50.0]), vec![1, 1, 1]);
        assert_eq!(competition_ranks(&[42.0]), vec![1]);
        assert!(competition_ranks(&[]).is_empty());
    }

    #[test]
    fn test_ranks_non_decreasing_with_bounded_gaps() {
        let scores = [99.0, 99.0, 98.5, 80.0, 80.0, 80.0, 75.0, 10.0, 10.0];
        let ranks = competition_ranks(&scores);
        assert_eq!(ranks, vec![1, 1, 3, 4, 4, 4, 7, 8, 8]);
        for pair in ranks.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_assign_positions_sorts_unordered_input() {
        let mut items = vec![ranked(1, 70.0), ranked(2, 85.0), ranked(3, 90.0), ranked(4, 85.0)];
        assign_positions(&mut items, RankScope::Overall);
        assert_eq!(
            overall(&items),
            vec![(1, Some(4)), (2, Some(2)), (3, Some(1)), (4, Some(2))]
        );
    }

    #[test]
    fn test_empty_input_is_noop() {
        let mut items: Vec<RankedResult> = vec![];
        rank_all_scopes(&mut items);
        assert!(items.is_empty());
    }

    #[test]
    fn test_scopes_rank_independently() {
        let mut items = vec![
            ranked(1, 90.0).in_class(Some(1), Some(11)),
            ranked(2, 80.0).in_class(Some(1), Some(12)),
            ranked(3, 70.0).in_class(Some(1), Some(12)),
            ranked(4, 85.0).in_class(Some(2), None),
            ranked(5, 60.0).in_class(Some(2), None),
            ranked(6, 95.0),
        ];
        rank_all_scopes(&mut items);

        let by_student = |id: i64| items.iter().find(|r| r.student_id == id).unwrap();

        assert_eq!(by_student(6).position, Some(1));
        assert_eq!(by_student(1).position, Some(2));
        assert_eq!(by_student(5).position, Some(6));

        assert_eq!(by_student(1).class_position, Some(1));
        assert_eq!(by_student(3).class_position, Some(3));
        assert_eq!(by_student(4).class_position, Some(1));

        // 分流内独立排名
        assert_eq!(by_student(1).stream_position, Some(1));
        assert_eq!(by_student(2).stream_position, Some(1));
        assert_eq!(by_student(3).stream_position, Some(2));
        // 无分流的班级按整班排名
        assert_eq!(by_student(5).stream_position, Some(2));

        // 未分班的学生只有全局名次
        assert_eq!(by_student(6).class_position, None);
        assert_eq!(by_student(6).stream_position, None);
    }

    #[test]
    fn test_rerank_overwrites_stale_positions() {
        let mut items = vec![ranked(1, 50.0), ranked(2, 60.0)];
        assign_positions(&mut items, RankScope::Overall);
        items[0].score = 70.0;
        assign_positions(&mut items, RankScope::Overall);
        assert_eq!(overall(&items), vec![(1, Some(1)), (2, Some(2))]);
    }
}
