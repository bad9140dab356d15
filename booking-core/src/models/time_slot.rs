use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeSlot {
    Morning,
    Afternoon,
    Evening,
    Night,
    FullDay,
}

impl TimeSlot {
    pub fn all() -> &'static [TimeSlot] {
        &[
            TimeSlot::Morning,
            TimeSlot::Afternoon,
            TimeSlot::Evening,
            TimeSlot::Night,
            TimeSlot::FullDay,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
            Self::FullDay => "full-day",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == s)
    }

    /// Display label including the slot's hours.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Morning => "Morning (9:00 AM - 12:00 PM)",
            Self::Afternoon => "Afternoon (12:00 PM - 4:00 PM)",
            Self::Evening => "Evening (4:00 PM - 8:00 PM)",
            Self::Night => "Night (8:00 PM - 12:00 AM)",
            Self::FullDay => "Full Day (9:00 AM - 10:00 PM)",
        }
    }
}
