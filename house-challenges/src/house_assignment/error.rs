use thiserror::Error;

/// Validation failures raised before any optimization work starts.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChallengeError {
    /// A relationship references an empty or otherwise invalid identifier
    #[error("Malformed relationship graph: {0}")]
    MalformedGraph(String),

    /// A candidate is not a vertex of the relationship graph
    #[error("Unknown person '{0}' is not in the relationship graph")]
    UnknownPerson(String),

    /// Capacity vector is not exactly three non-negative integers
    #[error("Invalid house capacities: {0}")]
    InvalidCapacity(String),

    /// More people requested than the houses can hold, with trimming disabled
    #[error("Requested {requested} people but total house capacity is {capacity}")]
    OverCapacityRequest { requested: usize, capacity: usize },

    /// A caller-supplied solution breaks an invariant of the instance
    #[error("Invalid solution: {0}")]
    InvalidSolution(String),
}
