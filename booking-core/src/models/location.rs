use serde::{Deserialize, Serialize};

/// Serviceable area an event can be held in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    PuneCity,
    Pcmc,
    Wakad,
    Hinjewadi,
    Kothrud,
    Baner,
    Aundh,
    VimanNagar,
    KoregaonPark,
    Hadapsar,
}

impl Location {
    pub fn all() -> &'static [Location] {
        &[
            Location::PuneCity,
            Location::Pcmc,
            Location::Wakad,
            Location::Hinjewadi,
            Location::Kothrud,
            Location::Baner,
            Location::Aundh,
            Location::VimanNagar,
            Location::KoregaonPark,
            Location::Hadapsar,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PuneCity => "pune-city",
            Self::Pcmc => "pcmc",
            Self::Wakad => "wakad",
            Self::Hinjewadi => "hinjewadi",
            Self::Kothrud => "kothrud",
            Self::Baner => "baner",
            Self::Aundh => "aundh",
            Self::VimanNagar => "viman-nagar",
            Self::KoregaonPark => "koregaon-park",
            Self::Hadapsar => "hadapsar",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|l| l.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PuneCity => "Pune City",
            Self::Pcmc => "Pimpri-Chinchwad",
            Self::Wakad => "Wakad",
            Self::Hinjewadi => "Hinjewadi",
            Self::Kothrud => "Kothrud",
            Self::Baner => "Baner",
            Self::Aundh => "Aundh",
            Self::VimanNagar => "Viman Nagar",
            Self::KoregaonPark => "Koregaon Park",
            Self::Hadapsar => "Hadapsar",
        }
    }
}
