mod capacity;
mod error;
mod graph;
mod partition;
mod selection;

pub use capacity::HouseCapacities;
pub use error::ChallengeError;
pub use graph::RelationshipGraph;
pub use partition::{evaluate, house_score, Partition};
pub use selection::{
    priority_order, priority_score, priority_scores, resolve_candidates, select_by_count,
    select_candidates, TrimPolicy,
};

use anyhow::Result;
use rand::{rngs::SmallRng, seq::SliceRandom, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use serde_json::{from_value, Map, Value};

pub const NUM_HOUSES: usize = 3;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    pub houses: Vec<Vec<String>>,
    #[serde(default)]
    pub unassigned: Vec<String>,
}

impl TryFrom<Map<String, Value>> for Solution {
    type Error = serde_json::Error;

    fn try_from(v: Map<String, Value>) -> Result<Self, Self::Error> {
        from_value(Value::Object(v))
    }
}

/// Parameters of a randomly generated instance.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub num_people: usize,
    pub avg_degree: u32,
    pub house_capacities: [u32; NUM_HOUSES],
    pub num_candidates: usize,
}

/// How the people to place are specified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    People(Vec<String>),
    Count(usize),
}

/// The document handed over by whatever front end loads the data.
///
/// `relationships` keeps document order: people are numbered in the order
/// they first appear, and that order breaks priority ties.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct InputData {
    pub house_capacities: Vec<i64>,
    pub relationships: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people_to_select: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_people_to_select: Option<usize>,
}

impl InputData {
    /// An explicit list wins over a count; with neither, everyone is a candidate.
    pub fn candidate_source(&self) -> CandidateSource {
        match (&self.people_to_select, self.num_people_to_select) {
            (Some(people), _) => CandidateSource::People(people.clone()),
            (None, Some(count)) => CandidateSource::Count(count),
            (None, None) => CandidateSource::Count(usize::MAX),
        }
    }

    /// Relationship lists in document order. Every value must be an array
    /// of identifier strings.
    pub fn relationship_lists(&self) -> Result<Vec<(&str, Vec<&str>)>, ChallengeError> {
        self.relationships
            .iter()
            .map(|(person, connections)| {
                let malformed = || {
                    ChallengeError::MalformedGraph(format!(
                        "relationships of '{}' must be a list of names",
                        person
                    ))
                };
                let connections = connections
                    .as_array()
                    .ok_or_else(malformed)?
                    .iter()
                    .map(|c| c.as_str().ok_or_else(malformed))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, ChallengeError>((person.as_str(), connections))
            })
            .collect()
    }

    pub fn generate(seed: &[u8; 32], track: &Track) -> Result<Self> {
        let mut rng = SmallRng::from_seed(*seed);
        let names: Vec<String> = (1..=track.num_people).map(|i| format!("P{}", i)).collect();

        let mut relationships = Map::new();
        for (i, name) in names.iter().enumerate() {
            let mut connections = Vec::new();
            if names.len() > 1 {
                let degree = rng.gen_range(0..=2 * track.avg_degree);
                for _ in 0..degree {
                    let j = rng.gen_range(0..names.len());
                    if j != i {
                        connections.push(names[j].clone());
                    }
                }
            }
            relationships.insert(name.clone(), Value::from(connections));
        }

        let mut candidates = names;
        candidates.shuffle(&mut rng);
        candidates.truncate(track.num_candidates);

        Ok(Self {
            house_capacities: track.house_capacities.iter().map(|&c| c as i64).collect(),
            relationships,
            people_to_select: Some(candidates),
            num_people_to_select: None,
        })
    }
}

/// A validated, immutable house assignment instance.
#[derive(Debug, Clone)]
pub struct Challenge {
    pub seed: [u8; 32],
    pub graph: RelationshipGraph,
    pub capacities: HouseCapacities,
    /// Selected people, already trimmed to fit total capacity.
    pub candidates: Vec<usize>,
}

impl Challenge {
    pub fn new(
        seed: &[u8; 32],
        graph: RelationshipGraph,
        capacities: HouseCapacities,
        source: &CandidateSource,
        policy: TrimPolicy,
    ) -> Result<Self> {
        let total_capacity = capacities.total();
        let candidates = match source {
            CandidateSource::People(names) => {
                let requested = resolve_candidates(&graph, names)?;
                select_candidates(&graph, &requested, total_capacity, policy)?
            }
            CandidateSource::Count(count) => {
                select_by_count(&graph, *count, total_capacity, policy)?
            }
        };
        Ok(Self {
            seed: *seed,
            graph,
            capacities,
            candidates,
        })
    }

    pub fn from_input(input: &InputData, seed: &[u8; 32], policy: TrimPolicy) -> Result<Self> {
        let capacities = HouseCapacities::try_from(input.house_capacities.as_slice())?;
        let graph = RelationshipGraph::from_relationships(input.relationship_lists()?)?;
        Self::new(seed, graph, capacities, &input.candidate_source(), policy)
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Result<Self> {
        let input = InputData::generate(seed, track)?;
        Self::from_input(&input, seed, TrimPolicy::Trim)
    }

    pub fn total_capacity(&self) -> usize {
        self.capacities.total()
    }

    pub fn candidate_names(&self) -> Vec<&str> {
        self.candidates.iter().map(|&p| self.graph.name(p)).collect()
    }

    /// Checks `solution` against this instance and converts it to graph indices.
    pub fn partition_of(&self, solution: &Solution) -> Result<Partition> {
        let invalid = |msg: String| ChallengeError::InvalidSolution(msg);
        if solution.houses.len() != NUM_HOUSES {
            return Err(invalid(format!(
                "expected {} houses, got {}",
                NUM_HOUSES,
                solution.houses.len()
            ))
            .into());
        }

        let mut is_candidate = vec![false; self.graph.len()];
        for &p in &self.candidates {
            is_candidate[p] = true;
        }
        let mut seen = vec![false; self.graph.len()];
        let mut lookup = |name: &String| -> Result<usize> {
            let idx = self
                .graph
                .index_of(name)
                .ok_or_else(|| ChallengeError::UnknownPerson(name.clone()))?;
            if !is_candidate[idx] {
                return Err(invalid(format!("'{}' was not selected", name)).into());
            }
            if seen[idx] {
                return Err(invalid(format!("'{}' appears more than once", name)).into());
            }
            seen[idx] = true;
            Ok(idx)
        };

        let mut houses: [Vec<usize>; NUM_HOUSES] = Default::default();
        for (h, members) in solution.houses.iter().enumerate() {
            if members.len() > self.capacities.get(h) {
                return Err(invalid(format!(
                    "house {} holds {} people but has {} rooms",
                    h + 1,
                    members.len(),
                    self.capacities.get(h)
                ))
                .into());
            }
            houses[h] = members.iter().map(&mut lookup).collect::<Result<_>>()?;
        }
        let unassigned = solution
            .unassigned
            .iter()
            .map(&mut lookup)
            .collect::<Result<Vec<_>>>()?;

        if let Some(&missing) = self.candidates.iter().find(|&&p| !seen[p]) {
            return Err(invalid(format!(
                "'{}' is neither assigned nor listed as unassigned",
                self.graph.name(missing)
            ))
            .into());
        }
        Ok(Partition::new(houses, unassigned))
    }

    pub fn evaluate_score(&self, solution: &Solution) -> Result<u32> {
        Ok(self.partition_of(solution)?.evaluate(&self.graph))
    }

    pub fn verify_solution(&self, solution: &Solution) -> Result<()> {
        self.evaluate_score(solution).map(|_| ())
    }
}
