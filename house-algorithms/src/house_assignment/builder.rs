use super::assignment::Assignment;
use super::instance::Instance;
use house_challenges::house_assignment::NUM_HOUSES;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

/// Rule for choosing the house of the next person during construction.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Construction {
    /// First house, in index order, with a free room
    FillFirst,
    /// House with the largest share of its rooms still free
    Balanced,
    /// Open house already holding most of the person's relationships,
    /// then most free rooms
    Greedy,
    /// Houses filled one at a time, each taking whoever has most links
    /// to its current members
    Cluster,
}

/// Order in which people are handed to the construction rule.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VisitOrder {
    Priority,
    Shuffled,
}

impl Construction {
    pub fn build<R: Rng>(self, instance: &Instance, order: VisitOrder, rng: &mut R) -> Assignment {
        let mut people = instance.priority.clone();
        if order == VisitOrder::Shuffled {
            people.shuffle(rng);
        }

        let mut assignment = Assignment::new(instance.len());
        if self == Construction::Cluster {
            grow_clusters(instance, people, &mut assignment);
            return assignment;
        }
        for person in people {
            match self.pick_house(instance, &assignment, person) {
                Some(house) => assignment.place(instance, person, house),
                // every house is full, the rest stay unassigned
                None => break,
            }
        }
        assignment
    }

    fn pick_house(self, instance: &Instance, assignment: &Assignment, person: usize) -> Option<usize> {
        let mut open = (0..NUM_HOUSES).filter(|&h| assignment.free(instance, h) > 0);
        match self {
            Construction::FillFirst | Construction::Cluster => open.next(),
            Construction::Greedy => {
                let key = |h: usize| (assignment.move_delta(person, h), assignment.free(instance, h));
                // lowest index wins full ties
                let first = open.next()?;
                Some(open.fold(first, |best, h| if key(h) > key(best) { h } else { best }))
            }
            Construction::Balanced => {
                let mut best: Option<usize> = None;
                for h in open {
                    best = match best {
                        // free_h / cap_h > free_b / cap_b, cross-multiplied
                        Some(b)
                            if assignment.free(instance, h) * instance.capacities[b]
                                <= assignment.free(instance, b) * instance.capacities[h] =>
                        {
                            Some(b)
                        }
                        _ => Some(h),
                    };
                }
                best
            }
        }
    }
}

/// Fills houses in index order. Each free room goes to the remaining person
/// with most relationships inside that house, earliest in `people` on ties,
/// so an empty house is seeded by the first remaining person.
fn grow_clusters(instance: &Instance, mut people: Vec<usize>, assignment: &mut Assignment) {
    for house in 0..NUM_HOUSES {
        while assignment.free(instance, house) > 0 && !people.is_empty() {
            let mut best = 0;
            for i in 1..people.len() {
                if assignment.move_delta(people[i], house) > assignment.move_delta(people[best], house) {
                    best = i;
                }
            }
            let person = people.remove(best);
            assignment.place(instance, person, house);
        }
    }
}
