use house_challenges::house_assignment::{priority_order, Challenge, NUM_HOUSES};

/// The selected people renumbered `0..n`, with relationships restricted to them.
pub struct Instance {
    /// Local index to graph index.
    pub people: Vec<usize>,
    /// Sorted local neighbor lists.
    pub adjacency: Vec<Vec<usize>>,
    pub capacities: [usize; NUM_HOUSES],
    /// Local indices by descending priority, input order on ties.
    pub priority: Vec<usize>,
}

impl Instance {
    pub fn load(challenge: &Challenge) -> Self {
        let graph = &challenge.graph;
        let mut local = vec![None; graph.len()];
        for (i, &p) in challenge.candidates.iter().enumerate() {
            local[p] = Some(i);
        }

        let adjacency = challenge
            .candidates
            .iter()
            .map(|&p| {
                let mut neighbors: Vec<usize> = graph
                    .neighbor_indices(p)
                    .iter()
                    .filter_map(|&n| local[n])
                    .collect();
                neighbors.sort_unstable();
                neighbors
            })
            .collect();

        let priority = priority_order(graph, &challenge.candidates)
            .into_iter()
            .filter_map(|p| local[p])
            .collect();

        let mut capacities = [0usize; NUM_HOUSES];
        for (h, capacity) in capacities.iter_mut().enumerate() {
            *capacity = challenge.capacities.get(h);
        }

        Self {
            people: challenge.candidates.clone(),
            adjacency,
            capacities,
            priority,
        }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    #[inline]
    pub fn linked(&self, a: usize, b: usize) -> bool {
        self.adjacency[a].binary_search(&b).is_ok()
    }
}
