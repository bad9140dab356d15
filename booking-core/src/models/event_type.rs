use serde::{Deserialize, Serialize};

/// Category of event a quote is requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Wedding,
    Birthday,
    BabyShower,
    Corporate,
    Anniversary,
    Engagement,
    Surprise,
    Conference,
    Other,
}

impl EventType {
    pub fn all() -> &'static [EventType] {
        &[
            EventType::Wedding,
            EventType::Birthday,
            EventType::BabyShower,
            EventType::Corporate,
            EventType::Anniversary,
            EventType::Engagement,
            EventType::Surprise,
            EventType::Conference,
            EventType::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wedding => "wedding",
            Self::Birthday => "birthday",
            Self::BabyShower => "baby-shower",
            Self::Corporate => "corporate",
            Self::Anniversary => "anniversary",
            Self::Engagement => "engagement",
            Self::Surprise => "surprise",
            Self::Conference => "conference",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Wedding => "Wedding",
            Self::Birthday => "Birthday Party",
            Self::BabyShower => "Baby Shower",
            Self::Corporate => "Corporate Event",
            Self::Anniversary => "Anniversary",
            Self::Engagement => "Engagement",
            Self::Surprise => "Surprise Party",
            Self::Conference => "Conference",
            Self::Other => "Other",
        }
    }
}
