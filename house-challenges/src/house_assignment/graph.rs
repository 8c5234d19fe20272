use super::error::ChallengeError;
use house_utils::{seeded_hasher, HashMap};
use std::collections::BTreeSet;

/// Undirected relationship graph over people.
///
/// Built from directed declarations; every declared pair is stored in both
/// directions, duplicates collapse and self-edges are dropped. People are
/// numbered in first-seen order and neighbor lists are kept sorted.
#[derive(Debug, Clone)]
pub struct RelationshipGraph {
    people: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
    num_edges: usize,
}

impl RelationshipGraph {
    pub fn from_relationships<I, P, C, Q>(relationships: I) -> Result<Self, ChallengeError>
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<str>,
        C: IntoIterator<Item = Q>,
        Q: AsRef<str>,
    {
        let mut graph = Self {
            people: Vec::new(),
            index: HashMap::with_hasher(seeded_hasher(&[0u8; 32])),
            adjacency: Vec::new(),
            num_edges: 0,
        };

        for (person, connections) in relationships {
            let person = person.as_ref();
            let a = graph.intern(person)?;
            for other in connections {
                let other = other.as_ref();
                let b = graph.intern(other).map_err(|_| {
                    ChallengeError::MalformedGraph(format!(
                        "'{}' declares a relationship with an empty identifier",
                        person
                    ))
                })?;
                if a == b {
                    tracing::warn!("Ignoring self-relationship of '{}'", person);
                    continue;
                }
                graph.adjacency[a].push(b);
                graph.adjacency[b].push(a);
            }
        }

        let mut half_edges = 0;
        for neighbors in graph.adjacency.iter_mut() {
            neighbors.sort_unstable();
            neighbors.dedup();
            half_edges += neighbors.len();
        }
        graph.num_edges = half_edges / 2;
        Ok(graph)
    }

    fn intern(&mut self, person: &str) -> Result<usize, ChallengeError> {
        if person.trim().is_empty() {
            return Err(ChallengeError::MalformedGraph(
                "person identifiers must be non-empty".to_string(),
            ));
        }
        if let Some(&idx) = self.index.get(person) {
            return Ok(idx);
        }
        let idx = self.people.len();
        self.people.push(person.to_string());
        self.index.insert(person.to_string(), idx);
        self.adjacency.push(Vec::new());
        Ok(idx)
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// People in first-seen order.
    pub fn people(&self) -> &[String] {
        &self.people
    }

    pub fn all_people(&self) -> BTreeSet<&str> {
        self.people.iter().map(String::as_str).collect()
    }

    pub fn index_of(&self, person: &str) -> Option<usize> {
        self.index.get(person).copied()
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.people[idx]
    }

    /// Neighbors of `person`; empty for people outside the graph.
    pub fn neighbors(&self, person: &str) -> BTreeSet<&str> {
        match self.index_of(person) {
            Some(idx) => self.adjacency[idx]
                .iter()
                .map(|&n| self.people[n].as_str())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    pub fn neighbor_indices(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        match (self.index_of(a), self.index_of(b)) {
            (Some(a), Some(b)) => self.are_linked(a, b),
            _ => false,
        }
    }

    #[inline]
    pub fn are_linked(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].binary_search(&b).is_ok()
    }
}
