//! Non-dominated selection over the four objective scores.
//!
//! Membership is decided by comparing every candidate against every other one,
//! so the cost grows quadratically with the number of hours. Inputs are a few
//! days of daytime hours; a sweep-based skyline would need to reproduce this
//! exact membership before replacing it.

use std::cmp::Ordering;

use crate::model::{ObjectiveScores, ScoredObservation};

/// Result of splitting the valid hours by dominance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParetoPartition {
    /// Hours no other hour dominates.
    pub front: Vec<ScoredObservation>,
    /// Valid hours that some other hour dominates.
    pub remainder: Vec<ScoredObservation>,
}

/// `a` dominates `b` when it is at least as good everywhere and strictly
/// better somewhere. Identical vectors never dominate each other.
pub fn dominates(a: &ObjectiveScores, b: &ObjectiveScores) -> bool {
    let (a, b) = (a.as_array(), b.as_array());
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b.iter()) {
        match x.partial_cmp(y) {
            Some(Ordering::Less) | None => return false,
            Some(Ordering::Greater) => strictly_better = true,
            Some(Ordering::Equal) => {}
        }
    }
    strictly_better
}

/// Whether any candidate dominates `target`.
///
/// `target` may itself be one of the candidates, since a vector never
/// dominates itself.
pub fn is_dominated(target: &ObjectiveScores, candidates: &[ScoredObservation]) -> bool {
    candidates
        .iter()
        .any(|candidate| dominates(&candidate.scores, target))
}

/// Partition `scored` into front and remainder, each sorted chronologically.
pub fn select(scored: Vec<ScoredObservation>) -> ParetoPartition {
    let dominated: Vec<bool> = scored
        .iter()
        .map(|candidate| is_dominated(&candidate.scores, &scored))
        .collect();

    let mut partition = ParetoPartition::default();
    for (candidate, dominated) in scored.into_iter().zip(dominated) {
        if dominated {
            partition.remainder.push(candidate);
        } else {
            partition.front.push(candidate);
        }
    }

    sort_chronologically(&mut partition.front);
    sort_chronologically(&mut partition.remainder);
    partition
}

/// Date, then time of day. The sort is stable, so equal timestamps keep
/// their encounter order.
pub fn sort_chronologically(records: &mut [ScoredObservation]) {
    records.sort_by_key(|r| (r.observation.date, r.observation.time));
}
