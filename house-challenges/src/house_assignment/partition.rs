use super::capacity::HouseCapacities;
use super::graph::RelationshipGraph;
use super::{Solution, NUM_HOUSES};

/// People (graph indices) grouped by house, plus anyone left without a room.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    houses: [Vec<usize>; NUM_HOUSES],
    unassigned: Vec<usize>,
}

impl Partition {
    pub fn new(houses: [Vec<usize>; NUM_HOUSES], unassigned: Vec<usize>) -> Self {
        Self { houses, unassigned }
    }

    pub fn houses(&self) -> &[Vec<usize>; NUM_HOUSES] {
        &self.houses
    }

    pub fn house(&self, house: usize) -> &[usize] {
        &self.houses[house]
    }

    pub fn unassigned(&self) -> &[usize] {
        &self.unassigned
    }

    pub fn num_assigned(&self) -> usize {
        self.houses.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_assigned() == 0 && self.unassigned.is_empty()
    }

    pub fn respects(&self, capacities: &HouseCapacities) -> bool {
        self.houses
            .iter()
            .enumerate()
            .all(|(h, members)| members.len() <= capacities.get(h))
    }

    pub fn house_scores(&self, graph: &RelationshipGraph) -> [u32; NUM_HOUSES] {
        let mut scores = [0u32; NUM_HOUSES];
        for (h, members) in self.houses.iter().enumerate() {
            scores[h] = house_score(graph, members);
        }
        scores
    }

    pub fn evaluate(&self, graph: &RelationshipGraph) -> u32 {
        evaluate(self, graph)
    }

    pub fn to_solution(&self, graph: &RelationshipGraph) -> Solution {
        let names = |members: &[usize]| -> Vec<String> {
            members.iter().map(|&p| graph.name(p).to_string()).collect()
        };
        Solution {
            houses: self.houses.iter().map(|members| names(members)).collect(),
            unassigned: names(&self.unassigned),
        }
    }
}

/// Linked pairs among `members`.
pub fn house_score(graph: &RelationshipGraph, members: &[usize]) -> u32 {
    let mut links = 0;
    for (i, &a) in members.iter().enumerate() {
        for &b in &members[i + 1..] {
            if graph.are_linked(a, b) {
                links += 1;
            }
        }
    }
    links
}

/// Total number of relationships whose two people share a house.
pub fn evaluate(partition: &Partition, graph: &RelationshipGraph) -> u32 {
    partition
        .houses
        .iter()
        .map(|members| house_score(graph, members))
        .sum()
}
