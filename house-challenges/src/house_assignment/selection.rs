use super::error::ChallengeError;
use super::graph::RelationshipGraph;
use std::cmp::Reverse;

/// What to do when more people are requested than the houses can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrimPolicy {
    /// Keep the highest-priority people up to total capacity
    #[default]
    Trim,
    /// Fail with `OverCapacityRequest`
    Reject,
}

/// Number of `person`'s neighbors inside `pool`, not counting `person`.
pub fn priority_score(graph: &RelationshipGraph, person: usize, pool: &[usize]) -> usize {
    pool.iter()
        .filter(|&&other| other != person && graph.are_linked(person, other))
        .count()
}

/// Priority score of every member of `pool`, aligned with `pool`.
pub fn priority_scores(graph: &RelationshipGraph, pool: &[usize]) -> Vec<usize> {
    let mut in_pool = vec![false; graph.len()];
    for &p in pool {
        in_pool[p] = true;
    }
    pool.iter()
        .map(|&p| {
            graph
                .neighbor_indices(p)
                .iter()
                .filter(|&&n| in_pool[n])
                .count()
        })
        .collect()
}

/// `pool` sorted by descending priority; equal scores keep their input order.
pub fn priority_order(graph: &RelationshipGraph, pool: &[usize]) -> Vec<usize> {
    let scores = priority_scores(graph, pool);
    let mut order: Vec<usize> = (0..pool.len()).collect();
    order.sort_by_key(|&i| Reverse(scores[i]));
    order.into_iter().map(|i| pool[i]).collect()
}

/// Looks up candidate names, dropping repeated names after their first use.
pub fn resolve_candidates<S: AsRef<str>>(
    graph: &RelationshipGraph,
    names: &[S],
) -> Result<Vec<usize>, ChallengeError> {
    let mut seen = vec![false; graph.len()];
    let mut candidates = Vec::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        let idx = graph
            .index_of(name)
            .ok_or_else(|| ChallengeError::UnknownPerson(name.to_string()))?;
        if !seen[idx] {
            seen[idx] = true;
            candidates.push(idx);
        }
    }
    Ok(candidates)
}

/// Cuts `candidates` down to `total_capacity` people.
///
/// Scores are computed once against the full candidate set before anything
/// is removed. Sets that already fit are returned unchanged.
pub fn select_candidates(
    graph: &RelationshipGraph,
    candidates: &[usize],
    total_capacity: usize,
    policy: TrimPolicy,
) -> Result<Vec<usize>, ChallengeError> {
    if candidates.len() <= total_capacity {
        return Ok(candidates.to_vec());
    }
    if policy == TrimPolicy::Reject {
        return Err(ChallengeError::OverCapacityRequest {
            requested: candidates.len(),
            capacity: total_capacity,
        });
    }

    let scores = priority_scores(graph, candidates);
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| Reverse(scores[i]));

    tracing::info!(
        "Selecting {} of {} candidates by priority",
        total_capacity,
        candidates.len()
    );
    for &i in &order[total_capacity..] {
        tracing::debug!(
            "Excluding '{}' ({} relationships among candidates)",
            graph.name(candidates[i]),
            scores[i]
        );
    }

    Ok(order[..total_capacity]
        .iter()
        .map(|&i| candidates[i])
        .collect())
}

/// Picks `count` people from the whole vertex set by priority.
pub fn select_by_count(
    graph: &RelationshipGraph,
    count: usize,
    total_capacity: usize,
    policy: TrimPolicy,
) -> Result<Vec<usize>, ChallengeError> {
    let mut requested = count.min(graph.len());
    if requested > total_capacity {
        match policy {
            TrimPolicy::Reject => {
                return Err(ChallengeError::OverCapacityRequest {
                    requested,
                    capacity: total_capacity,
                })
            }
            TrimPolicy::Trim => requested = total_capacity,
        }
    }
    let everyone: Vec<usize> = (0..graph.len()).collect();
    let mut ranked = priority_order(graph, &everyone);
    ranked.truncate(requested);
    Ok(ranked)
}
