//! Rule engine for ready-set selection.
//!
//! Composes selection rules in sequence (later rules only break ties left
//! by earlier ones) and resolves any remaining tie with a fixed policy.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::{RuleScore, SchedulingContext, SelectionRule};
use crate::models::Process;

/// How ties are broken after all rules are exhausted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreaker {
    /// Keep the candidates' given order: the first one encountered wins.
    #[default]
    InputOrder,
    /// Lower process ID wins.
    ById,
}

impl fmt::Display for TieBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreaker::InputOrder => f.write_str("input-order"),
            TieBreaker::ById => f.write_str("by-id"),
        }
    }
}

impl FromStr for TieBreaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "input-order" | "input" => Ok(TieBreaker::InputOrder),
            "by-id" | "id" => Ok(TieBreaker::ById),
            other => Err(format!(
                "unknown tie-breaker '{other}' (expected input-order or by-id)"
            )),
        }
    }
}

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use cpu_schedule::dispatching::{rules, RuleEngine, SchedulingContext, TieBreaker};
/// use cpu_schedule::models::Process;
///
/// let processes = vec![Process::new(7, 0, 3), Process::new(2, 0, 3)];
/// let engine = RuleEngine::new()
///     .with_rule(rules::ShortestRemaining)
///     .with_final_tie_breaker(TieBreaker::ById);
///
/// let ctx = SchedulingContext::at_time(0);
/// assert_eq!(engine.select_best(&processes, &[0, 1], &ctx), Some(1));
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn SelectionRule>>,
    tie_breaker: TieBreaker,
    epsilon: f64,
}

impl RuleEngine {
    /// Creates an empty rule engine.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            tie_breaker: TieBreaker::InputOrder,
            epsilon: 1e-9,
        }
    }

    /// Appends a rule. Rules are consulted in the order they were added.
    pub fn with_rule<R: SelectionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Sets the final tie-breaking strategy.
    pub fn with_final_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Sets the score difference below which two scores count as equal.
    ///
    /// `0.0` compares scores exactly.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// The configured tie-breaking strategy.
    pub fn tie_breaker(&self) -> TieBreaker {
        self.tie_breaker
    }

    /// Sorts candidates by priority (highest priority first).
    ///
    /// `candidates` are indices into `processes`; the sort is stable, so
    /// fully tied candidates keep their given order under
    /// [`TieBreaker::InputOrder`].
    pub fn sort_indices(
        &self,
        processes: &[Process],
        candidates: &[usize],
        context: &SchedulingContext,
    ) -> Vec<usize> {
        let mut indices = candidates.to_vec();
        indices.sort_by(|&a, &b| self.compare(&processes[a], &processes[b], context));
        indices
    }

    /// Returns the index of the highest-priority candidate.
    ///
    /// Single pass; on a full tie the earlier candidate is kept.
    pub fn select_best(
        &self,
        processes: &[Process],
        candidates: &[usize],
        context: &SchedulingContext,
    ) -> Option<usize> {
        let mut best: Option<usize> = None;
        for &idx in candidates {
            best = match best {
                Some(current)
                    if self.compare(&processes[idx], &processes[current], context)
                        != Ordering::Less =>
                {
                    Some(current)
                }
                _ => Some(idx),
            };
        }
        best
    }

    /// Evaluates a single process and returns the score from each rule.
    pub fn evaluate(&self, process: &Process, context: &SchedulingContext) -> Vec<RuleScore> {
        self.rules
            .iter()
            .map(|rule| rule.evaluate(process, context))
            .collect()
    }

    /// Compares two processes: `Less` means `a` should run before `b`.
    pub fn compare(&self, a: &Process, b: &Process, context: &SchedulingContext) -> Ordering {
        for rule in &self.rules {
            let score_a = rule.evaluate(a, context);
            let score_b = rule.evaluate(b, context);

            if (score_a - score_b).abs() > self.epsilon {
                return score_a.partial_cmp(&score_b).unwrap_or(Ordering::Equal);
            }
        }

        match self.tie_breaker {
            TieBreaker::InputOrder => Ordering::Equal,
            TieBreaker::ById => a.id.cmp(&b.id),
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("tie_breaker", &self.tie_breaker)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;

    fn make_process(id: u32, arrival: i64, burst: i64, remaining: i64) -> Process {
        let mut p = Process::new(id, arrival, burst);
        p.time_remaining = remaining;
        p
    }

    #[test]
    fn test_srt_ordering() {
        let processes = vec![
            make_process(1, 0, 5, 4),
            make_process(2, 1, 2, 2),
            make_process(3, 2, 1, 1),
        ];
        let ctx = SchedulingContext::at_time(2);
        let engine = RuleEngine::new().with_rule(rules::ShortestRemaining);

        let indices = engine.sort_indices(&processes, &[0, 1, 2], &ctx);
        assert_eq!(indices, vec![2, 1, 0]);
    }

    #[test]
    fn test_arrival_sort_is_stable() {
        let processes = vec![
            make_process(3, 2, 1, 1),
            make_process(1, 0, 5, 5),
            make_process(2, 0, 2, 2),
        ];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::ArrivalOrder);

        let indices = engine.sort_indices(&processes, &[0, 1, 2], &ctx);
        // 1 and 2 both arrive at 0 -> keep input order
        assert_eq!(indices, vec![1, 2, 0]);
    }

    #[test]
    fn test_select_best_keeps_first_on_tie() {
        let processes = vec![
            make_process(9, 0, 3, 3),
            make_process(4, 0, 3, 3),
            make_process(1, 0, 6, 6),
        ];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::ShortestRemaining);

        assert_eq!(engine.select_best(&processes, &[0, 1, 2], &ctx), Some(0));
        // candidate order decides, not slice order
        assert_eq!(engine.select_best(&processes, &[1, 0, 2], &ctx), Some(1));
    }

    #[test]
    fn test_by_id_tie_breaker() {
        let processes = vec![make_process(9, 0, 3, 3), make_process(4, 0, 3, 3)];
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestRemaining)
            .with_final_tie_breaker(TieBreaker::ById);

        assert_eq!(engine.select_best(&processes, &[0, 1], &ctx), Some(1));
        assert_eq!(engine.sort_indices(&processes, &[0, 1], &ctx), vec![1, 0]);
    }

    #[test]
    fn test_secondary_rule_breaks_tie() {
        // Same remaining time; earlier arrival wins on the second rule.
        let processes = vec![make_process(1, 3, 4, 2), make_process(2, 1, 4, 2)];
        let ctx = SchedulingContext::at_time(5);
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestRemaining)
            .with_rule(rules::ArrivalOrder);

        assert_eq!(engine.select_best(&processes, &[0, 1], &ctx), Some(1));
    }

    #[test]
    fn test_highest_ratio_selected() {
        // t=10: p1 (arr 0, burst 10) -> 2.0; p2 (arr 8, burst 1) -> 3.0
        let processes = vec![make_process(1, 0, 10, 10), make_process(2, 8, 1, 1)];
        let ctx = SchedulingContext::at_time(10);
        let engine = RuleEngine::new().with_rule(rules::HighestResponseRatio);

        assert_eq!(engine.select_best(&processes, &[0, 1], &ctx), Some(1));
    }

    #[test]
    fn test_zero_epsilon_separates_close_ratios() {
        let processes = vec![
            make_process(2, 0, 100_001, 100_001),
            make_process(3, 0, 100_000, 100_000),
        ];
        let ctx = SchedulingContext::at_time(1);

        let loose = RuleEngine::new().with_rule(rules::HighestResponseRatio);
        assert_eq!(loose.select_best(&processes, &[0, 1], &ctx), Some(0));

        let exact = RuleEngine::new()
            .with_rule(rules::HighestResponseRatio)
            .with_epsilon(0.0);
        assert_eq!(exact.select_best(&processes, &[0, 1], &ctx), Some(1));
    }

    #[test]
    fn test_empty_candidates() {
        let ctx = SchedulingContext::at_time(0);
        let engine = RuleEngine::new().with_rule(rules::ShortestRemaining);
        assert!(engine.sort_indices(&[], &[], &ctx).is_empty());
        assert!(engine.select_best(&[], &[], &ctx).is_none());
    }

    #[test]
    fn test_evaluate_scores() {
        let p = make_process(1, 2, 4, 3);
        let ctx = SchedulingContext::at_time(6);
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestRemaining)
            .with_rule(rules::ArrivalOrder);

        let scores = engine.evaluate(&p, &ctx);
        assert_eq!(scores.len(), 2);
        assert!((scores[0] - 3.0).abs() < 1e-10);
        assert!((scores[1] - 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_tie_breaker_parse() {
        assert_eq!("by-id".parse::<TieBreaker>().unwrap(), TieBreaker::ById);
        assert_eq!(
            "Input-Order".parse::<TieBreaker>().unwrap(),
            TieBreaker::InputOrder
        );
        assert!("random".parse::<TieBreaker>().is_err());
        assert_eq!(TieBreaker::ById.to_string(), "by-id");
    }
}
