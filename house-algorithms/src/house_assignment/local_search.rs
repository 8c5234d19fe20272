use super::assignment::Assignment;
use super::config::{Config, Improvement};
use super::instance::Instance;
use house_challenges::house_assignment::NUM_HOUSES;
use rand::{seq::SliceRandom, Rng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Swap(usize, usize),
    Relocate(usize, usize),
}

/// Hill climbing over swaps and moves into free rooms.
///
/// Only strictly improving moves are applied, so the score never drops.
/// Each pass scans people in a fresh random order; among equal gains the
/// first one scanned wins. Stops at a local optimum or after
/// `max_local_search_iterations` applied moves. Returns the number of
/// moves applied.
pub fn improve<R: Rng>(
    assignment: &mut Assignment,
    instance: &Instance,
    config: &Config,
    rng: &mut R,
) -> usize {
    let mut order: Vec<usize> = (0..instance.len()).collect();
    let mut applied = 0;

    while applied < config.max_local_search_iterations {
        order.shuffle(rng);
        let Some(mv) = find_move(assignment, instance, config, &order) else {
            break;
        };
        match mv {
            Move::Swap(a, b) => assignment.apply_swap(instance, a, b),
            Move::Relocate(p, to) => assignment.apply_move(instance, p, to),
        }
        debug_assert!(assignment.respects_capacities(instance));
        applied += 1;
    }
    applied
}

fn find_move(
    assignment: &Assignment,
    instance: &Instance,
    config: &Config,
    order: &[usize],
) -> Option<Move> {
    let first = config.improvement == Improvement::First;
    let mut best: Option<(i64, Move)> = None;

    for (i, &a) in order.iter().enumerate() {
        let Some(ha) = assignment.house_of(a) else {
            continue;
        };
        for &b in &order[i + 1..] {
            match assignment.house_of(b) {
                Some(hb) if hb != ha => {
                    let delta = assignment.swap_delta(instance, a, b);
                    if consider(&mut best, delta, Move::Swap(a, b)) && first {
                        return best.map(|(_, mv)| mv);
                    }
                }
                _ => {}
            }
        }
    }

    if config.allow_moves {
        for &p in order {
            for to in 0..NUM_HOUSES {
                if assignment.house_of(p) == Some(to) || assignment.free(instance, to) == 0 {
                    continue;
                }
                let delta = assignment.move_delta(p, to);
                if consider(&mut best, delta, Move::Relocate(p, to)) && first {
                    return best.map(|(_, mv)| mv);
                }
            }
        }
    }

    best.map(|(_, mv)| mv)
}

/// Keeps `mv` if it beats both zero and the current best.
fn consider(best: &mut Option<(i64, Move)>, delta: i64, mv: Move) -> bool {
    if delta > best.map_or(0, |(d, _)| d) {
        *best = Some((delta, mv));
        true
    } else {
        false
    }
}
