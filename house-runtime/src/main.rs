use anyhow::{anyhow, Context, Result};
use clap::{arg, ArgAction, Command};
use house_algorithms::house_assignment::Solver;
use house_challenges::house_assignment::*;
use house_utils::{dejsonify, jsonify_pretty, u8s_from_str};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::{fs, io::Read, path::PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: &str = "house-assignment";

fn cli() -> Command {
    Command::new("house-runtime")
        .about("Assigns people to three houses, maximising relationships kept together")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("solve")
                .about("Computes an assignment")
                .arg(
                    arg!(<INPUT> "Input json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--seed [SEED] "A string used in seed generation")
                        .default_value(DEFAULT_SEED)
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--hyperparameters [HYPERPARAMETERS] "Hyperparameters json string or path to json file")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--strict "Fail instead of trimming when candidates exceed the rooms")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    arg!(--output [OUTPUT_FILE] "If set, the solution will be saved to this file path")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            Command::new("verify_solution")
                .about("Verifies a solution and prints its score")
                .arg(
                    arg!(<INPUT> "Input json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(<SOLUTION> "Solution json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--strict "Fail instead of trimming when candidates exceed the rooms")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("generate_instance")
                .about("Generates a random input")
                .arg(
                    arg!(<TRACK> "Track json string, path to json file, or '-' for stdin")
                        .value_parser(clap::value_parser!(String)),
                )
                .arg(
                    arg!(--seed [SEED] "A string used in seed generation")
                        .default_value(DEFAULT_SEED)
                        .value_parser(clap::value_parser!(String)),
                ),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let matches = cli().get_matches();

    if let Err(e) = match matches.subcommand() {
        Some(("solve", sub_m)) => solve(
            sub_m.get_one::<String>("INPUT").unwrap(),
            sub_m.get_one::<String>("seed").unwrap(),
            sub_m.get_one::<String>("hyperparameters").cloned(),
            sub_m.get_flag("strict"),
            sub_m.get_one::<PathBuf>("output").cloned(),
        ),
        Some(("verify_solution", sub_m)) => verify_solution(
            sub_m.get_one::<String>("INPUT").unwrap(),
            sub_m.get_one::<String>("SOLUTION").unwrap(),
            sub_m.get_flag("strict"),
        ),
        Some(("generate_instance", sub_m)) => generate_instance(
            sub_m.get_one::<String>("TRACK").unwrap(),
            sub_m.get_one::<String>("seed").unwrap(),
        ),
        _ => Err(anyhow!("Invalid subcommand")),
    } {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn trim_policy(strict: bool) -> TrimPolicy {
    if strict {
        TrimPolicy::Reject
    } else {
        TrimPolicy::Trim
    }
}

pub fn solve(
    input: &str,
    seed: &str,
    hyperparameters: Option<String>,
    strict: bool,
    output_file: Option<PathBuf>,
) -> Result<()> {
    let input = load_json::<InputData>(input, "input")?;
    let hyperparameters = hyperparameters
        .map(|h| load_json::<Map<String, Value>>(&h, "hyperparameters"))
        .transpose()?;
    let challenge = Challenge::from_input(&input, &u8s_from_str(seed), trim_policy(strict))?;

    let outcome = Solver::solve_challenge_instance(&challenge, &hyperparameters, None)?;
    print!(
        "{}",
        format_houses(&outcome.solution, &outcome.partition.house_scores(&challenge.graph))
    );
    println!("Total relationships = {}", outcome.score);

    if let Some(path) = output_file {
        fs::write(&path, jsonify_pretty(&outcome.solution)?)
            .with_context(|| format!("Failed to write solution file: {}", path.display()))?;
    }
    Ok(())
}

pub fn verify_solution(input: &str, solution: &str, strict: bool) -> Result<()> {
    if input == "-" && solution == "-" {
        return Err(anyhow!("Only one of INPUT and SOLUTION can be read from stdin"));
    }
    let input = load_json::<InputData>(input, "input")?;
    let solution = load_json::<Solution>(solution, "solution")?;
    let challenge =
        Challenge::from_input(&input, &u8s_from_str(DEFAULT_SEED), trim_policy(strict))?;

    let score = challenge.evaluate_score(&solution)?;
    println!("Solution is valid");
    println!("Total relationships = {}", score);
    Ok(())
}

pub fn generate_instance(track: &str, seed: &str) -> Result<()> {
    let track = load_json::<Track>(track, "track")?;
    println!("{}", instance_json(&track, seed)?);
    Ok(())
}

/// Keeps `relationships` in generation order, which sets priority tie-breaks.
fn instance_json(track: &Track, seed: &str) -> Result<String> {
    let input = InputData::generate(&u8s_from_str(seed), track)?;
    Ok(serde_json::to_string_pretty(&input)?)
}

/// One line per house: `House 1: A, B (1 relationships)`.
fn format_houses(solution: &Solution, house_scores: &[u32]) -> String {
    let mut out = String::new();
    for (i, (members, score)) in solution.houses.iter().zip(house_scores).enumerate() {
        let names = if members.is_empty() {
            "(empty)".to_string()
        } else {
            members.join(", ")
        };
        out.push_str(&format!("House {}: {} ({} relationships)\n", i + 1, names, score));
    }
    if !solution.unassigned.is_empty() {
        out.push_str(&format!("Unassigned: {}\n", solution.unassigned.join(", ")));
    }
    out
}

fn read_source(source: &str, what: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .with_context(|| format!("Failed to read {} from stdin", what))?;
        Ok(buffer)
    } else if source.ends_with(".json") {
        fs::read_to_string(source).with_context(|| format!("Failed to read {} file: {}", what, source))
    } else {
        Ok(source.to_string())
    }
}

fn load_json<T: DeserializeOwned>(source: &str, what: &str) -> Result<T> {
    let json = read_source(source, what)?;
    dejsonify::<T>(&json).map_err(|e| anyhow!("Failed to parse {}: {}", what, e))
}
