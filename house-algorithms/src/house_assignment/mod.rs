mod assignment;
mod builder;
mod config;
mod instance;
mod local_search;
mod runner;

pub use builder::{Construction, VisitOrder};
pub use config::{Config, Improvement};
pub use runner::{trial_policy, Outcome, Solver};

use anyhow::Result;
use house_challenges::house_assignment::*;
use serde_json::{Map, Value};

pub fn solve_challenge(
    challenge: &Challenge,
    save_solution: &dyn Fn(&Solution) -> Result<()>,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<()> {
    Solver::solve_challenge_instance(challenge, hyperparameters, Some(save_solution))?;
    Ok(())
}

pub fn help() {
    println!("Multi-start local search for three-house assignment");
    println!("");
    println!("HYPERPARAMETERS (all optional):");
    println!("  effort                       0-3 preset for trials/iterations, or \"auto\" to scale");
    println!("                               with the number of people (default 2)");
    println!("  num_trials                   independent construction + search runs (default 1000)");
    println!("  max_local_search_iterations  moves applied per trial at most (default 100)");
    println!("  allow_moves                  also move people into free rooms (default true)");
    println!("  improvement                  \"best\" or \"first\" (default \"best\")");
    println!("  early_stop_trials            stop after this many trials without improvement");
    println!("");
    println!("TRIAL SCHEDULE:");
    println!("  first third:  fill-first construction in priority order");
    println!("  second third: balanced construction in priority order");
    println!("  last third:   fill-first, balanced, greedy or cluster, random visiting order");
}
