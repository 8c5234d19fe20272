use super::assignment::Assignment;
use super::builder::{Construction, VisitOrder};
use super::config::Config;
use super::instance::Instance;
use super::local_search;
use anyhow::Result;
use house_challenges::house_assignment::*;
use rand::{
    rngs::{SmallRng, StdRng},
    Rng, SeedableRng,
};
use serde_json::{Map, Value};

/// Best partition found across all trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub partition: Partition,
    pub solution: Solution,
    pub score: u32,
    /// Index of the trial that produced the partition, `None` if no trial ran.
    pub trial: Option<usize>,
}

impl Outcome {
    fn unplaced(challenge: &Challenge) -> Self {
        let partition = Partition::new(Default::default(), challenge.candidates.clone());
        Self {
            solution: partition.to_solution(&challenge.graph),
            partition,
            score: 0,
            trial: None,
        }
    }
}

const MIXED: [Construction; 4] = [
    Construction::FillFirst,
    Construction::Balanced,
    Construction::Greedy,
    Construction::Cluster,
];

/// Construction used by trial `trial` of `num_trials`: fill-first over the
/// first third, balanced over the second, then any construction picked at
/// random, visiting people in random order.
pub fn trial_policy<R: Rng>(trial: usize, num_trials: usize, rng: &mut R) -> (Construction, VisitOrder) {
    if trial < num_trials / 3 {
        (Construction::FillFirst, VisitOrder::Priority)
    } else if trial < 2 * num_trials / 3 {
        (Construction::Balanced, VisitOrder::Priority)
    } else {
        (MIXED[rng.gen_range(0..MIXED.len())], VisitOrder::Shuffled)
    }
}

pub struct Solver;

impl Solver {
    /// Runs every trial on its own `SmallRng` seeded from a master `StdRng`,
    /// so a fixed challenge seed always yields the same outcome.
    pub fn run(
        challenge: &Challenge,
        config: &Config,
        save_solution: Option<&dyn Fn(&Solution) -> Result<()>>,
    ) -> Result<Outcome> {
        let instance = Instance::load(challenge);
        if instance.is_empty() || config.num_trials == 0 {
            return Ok(Outcome::unplaced(challenge));
        }

        let mut master = StdRng::from_seed(challenge.seed);
        let mut best: Option<(Assignment, usize)> = None;
        let mut stale_trials = 0;

        for trial in 0..config.num_trials {
            let mut rng = SmallRng::from_seed(master.gen());
            let (construction, order) = trial_policy(trial, config.num_trials, &mut rng);
            let mut assignment = construction.build(&instance, order, &mut rng);
            local_search::improve(&mut assignment, &instance, config, &mut rng);

            let improved = match &best {
                Some((incumbent, _)) => assignment.score() > incumbent.score(),
                None => true,
            };
            if improved {
                tracing::debug!(
                    "Trial {} ({:?}, {:?}): new best with {} relationships",
                    trial,
                    construction,
                    order,
                    assignment.score()
                );
                if let Some(save_solution) = save_solution {
                    save_solution(&assignment.to_partition(&instance).to_solution(&challenge.graph))?;
                }
                best = Some((assignment, trial));
                stale_trials = 0;
            } else {
                stale_trials += 1;
                if config.early_stop_trials.is_some_and(|limit| stale_trials >= limit) {
                    tracing::debug!("Stopping after {} trials without improvement", stale_trials);
                    break;
                }
            }
        }

        let Some((assignment, trial)) = best else {
            return Ok(Outcome::unplaced(challenge));
        };
        let partition = assignment.to_partition(&instance);
        tracing::info!(
            "Best assignment: {} relationships (trial {})",
            assignment.score(),
            trial
        );
        Ok(Outcome {
            solution: partition.to_solution(&challenge.graph),
            partition,
            score: assignment.score(),
            trial: Some(trial),
        })
    }

    pub fn solve_challenge_instance(
        challenge: &Challenge,
        hyperparameters: &Option<Map<String, Value>>,
        save_solution: Option<&dyn Fn(&Solution) -> Result<()>>,
    ) -> Result<Outcome> {
        let config = Config::initialize_for_size(hyperparameters, challenge.candidates.len())?;
        Self::run(challenge, &config, save_solution)
    }
}
