use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    fn seconds(&self) -> u32 {
        match self {
            DurationUnit::Seconds => 1,
            DurationUnit::Minutes => 60,
            DurationUnit::Hours => 3600,
        }
    }
}

/// Duration of a single episode, stored in seconds. Zero means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AnimeDuration {
    seconds: u32,
}

impl AnimeDuration {
    pub fn new(value: u32, unit: DurationUnit) -> Self {
        Self {
            seconds: value.saturating_mul(unit.seconds()),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn is_unknown(&self) -> bool {
        self.seconds == 0
    }
}
