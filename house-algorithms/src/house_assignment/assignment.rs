use super::instance::Instance;
use house_challenges::house_assignment::{Partition, NUM_HOUSES};

/// Mutable house assignment with incrementally maintained score.
///
/// `links[p][h]` is the number of `p`'s neighbors currently in house `h`,
/// which makes the score change of any move or swap an O(1) lookup.
#[derive(Debug, Clone)]
pub struct Assignment {
    house_of: Vec<Option<usize>>,
    position: Vec<usize>,
    members: [Vec<usize>; NUM_HOUSES],
    links: Vec<[u32; NUM_HOUSES]>,
    score: u32,
}

impl Assignment {
    pub fn new(num_people: usize) -> Self {
        Self {
            house_of: vec![None; num_people],
            position: vec![0; num_people],
            members: Default::default(),
            links: vec![[0; NUM_HOUSES]; num_people],
            score: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn house_of(&self, person: usize) -> Option<usize> {
        self.house_of[person]
    }

    pub fn members(&self, house: usize) -> &[usize] {
        &self.members[house]
    }

    pub fn free(&self, instance: &Instance, house: usize) -> usize {
        instance.capacities[house].saturating_sub(self.members[house].len())
    }

    /// Puts an unassigned person into `house`. The caller checks capacity.
    pub fn place(&mut self, instance: &Instance, person: usize, house: usize) {
        debug_assert!(self.house_of[person].is_none());
        self.score += self.links[person][house];
        for &n in &instance.adjacency[person] {
            self.links[n][house] += 1;
        }
        self.house_of[person] = Some(house);
        self.position[person] = self.members[house].len();
        self.members[house].push(person);
    }

    fn remove(&mut self, instance: &Instance, person: usize) -> Option<usize> {
        let house = self.house_of[person]?;
        self.score -= self.links[person][house];
        for &n in &instance.adjacency[person] {
            self.links[n][house] -= 1;
        }
        let pos = self.position[person];
        self.members[house].swap_remove(pos);
        if let Some(&moved) = self.members[house].get(pos) {
            self.position[moved] = pos;
        }
        self.house_of[person] = None;
        Some(house)
    }

    /// Score change of putting `person` into `to`, from its house or from nowhere.
    pub fn move_delta(&self, person: usize, to: usize) -> i64 {
        let gained = self.links[person][to] as i64;
        match self.house_of[person] {
            Some(from) => gained - self.links[person][from] as i64,
            None => gained,
        }
    }

    /// Score change of exchanging the houses of two people in different houses.
    pub fn swap_delta(&self, instance: &Instance, a: usize, b: usize) -> i64 {
        let (ha, hb) = match (self.house_of[a], self.house_of[b]) {
            (Some(ha), Some(hb)) if ha != hb => (ha, hb),
            _ => return 0,
        };
        let la = &self.links[a];
        let lb = &self.links[b];
        let shared = if instance.linked(a, b) { 2 } else { 0 };
        (la[hb] as i64 - la[ha] as i64) + (lb[ha] as i64 - lb[hb] as i64) - shared
    }

    pub fn apply_move(&mut self, instance: &Instance, person: usize, to: usize) {
        self.remove(instance, person);
        self.place(instance, person, to);
    }

    pub fn apply_swap(&mut self, instance: &Instance, a: usize, b: usize) {
        let (Some(ha), Some(hb)) = (self.house_of[a], self.house_of[b]) else {
            return;
        };
        self.remove(instance, a);
        self.remove(instance, b);
        self.place(instance, a, hb);
        self.place(instance, b, ha);
    }

    pub fn respects_capacities(&self, instance: &Instance) -> bool {
        (0..NUM_HOUSES).all(|h| self.members[h].len() <= instance.capacities[h])
    }

    /// Full pair count, for checking the incremental score.
    pub fn recompute_score(&self, instance: &Instance) -> u32 {
        let mut score = 0;
        for members in &self.members {
            for (i, &a) in members.iter().enumerate() {
                score += members[i + 1..]
                    .iter()
                    .filter(|&&b| instance.linked(a, b))
                    .count() as u32;
            }
        }
        score
    }

    pub fn to_partition(&self, instance: &Instance) -> Partition {
        let mut houses: [Vec<usize>; NUM_HOUSES] = Default::default();
        for (h, members) in self.members.iter().enumerate() {
            houses[h] = members.iter().map(|&p| instance.people[p]).collect();
        }
        let unassigned = (0..instance.len())
            .filter(|&p| self.house_of[p].is_none())
            .map(|p| instance.people[p])
            .collect();
        Partition::new(houses, unassigned)
    }
}
