use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Total number of steps in the booking flow.
pub const TOTAL_STEPS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("step must be between 1 and {max}, got {0}", max = TOTAL_STEPS)]
pub struct InvalidStep(pub u8);

/// The four sequential stages of the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    EventDetails,
    DateSelection,
    Requirements,
    Confirmation,
}

impl Step {
    pub fn all() -> &'static [Step] {
        &[
            Step::EventDetails,
            Step::DateSelection,
            Step::Requirements,
            Step::Confirmation,
        ]
    }

    /// Convert a 1-based step number.
    pub fn from_number(n: u8) -> Result<Self, InvalidStep> {
        match n {
            1 => Ok(Self::EventDetails),
            2 => Ok(Self::DateSelection),
            3 => Ok(Self::Requirements),
            4 => Ok(Self::Confirmation),
            _ => Err(InvalidStep(n)),
        }
    }

    /// 1-based position of this step.
    pub fn number(&self) -> u8 {
        match self {
            Self::EventDetails => 1,
            Self::DateSelection => 2,
            Self::Requirements => 3,
            Self::Confirmation => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::EventDetails => "Event Details",
            Self::DateSelection => "Date Selection",
            Self::Requirements => "Requirements",
            Self::Confirmation => "Confirmation",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1).ok()
    }

    pub fn previous(&self) -> Option<Self> {
        self.number()
            .checked_sub(1)
            .and_then(|n| Self::from_number(n).ok())
    }

    pub fn is_last(&self) -> bool {
        self.number() == TOTAL_STEPS
    }

    /// Completion percentage shown in the progress indicator.
    pub fn progress_percent(&self) -> u8 {
        ((u16::from(self.number()) * 100) / u16::from(TOTAL_STEPS)) as u8
    }
}

impl fmt::Display for Step {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), TOTAL_STEPS, self.title())
    }
}
