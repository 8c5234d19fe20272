use super::error::ChallengeError;
use super::NUM_HOUSES;

/// Room counts of the three houses, indexed by house.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseCapacities([u32; NUM_HOUSES]);

impl HouseCapacities {
    pub fn new(capacities: [u32; NUM_HOUSES]) -> Self {
        Self(capacities)
    }

    #[inline]
    pub fn get(&self, house: usize) -> usize {
        self.0[house] as usize
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|&c| c as usize).sum()
    }
}

impl TryFrom<&[i64]> for HouseCapacities {
    type Error = ChallengeError;

    fn try_from(values: &[i64]) -> Result<Self, Self::Error> {
        if values.len() != NUM_HOUSES {
            return Err(ChallengeError::InvalidCapacity(format!(
                "expected {} houses, got {}",
                NUM_HOUSES,
                values.len()
            )));
        }
        let mut capacities = [0u32; NUM_HOUSES];
        for (house, &value) in values.iter().enumerate() {
            capacities[house] = u32::try_from(value).map_err(|_| {
                ChallengeError::InvalidCapacity(format!(
                    "house {} has capacity {}",
                    house + 1,
                    value
                ))
            })?;
        }
        Ok(Self(capacities))
    }
}
