use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverageType {
    ThirdParty,
    ThirdPartyFireTheft,
    Comprehensive,
}

impl CoverageType {
    pub const ALL: [CoverageType; 3] =
        [Self::ThirdParty, Self::ThirdPartyFireTheft, Self::Comprehensive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThirdParty => "third-party",
            Self::ThirdPartyFireTheft => "third-party-fire-theft",
            Self::Comprehensive => "comprehensive",
        }
    }

    /// Exact, case-sensitive match against the stored answer.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "third-party" => Some(Self::ThirdParty),
            "third-party-fire-theft" => Some(Self::ThirdPartyFireTheft),
            "comprehensive" => Some(Self::Comprehensive),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ThirdParty => "Third Party",
            Self::ThirdPartyFireTheft => "Third Party + Fire & Theft",
            Self::Comprehensive => "Comprehensive",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ThirdParty => "Basic coverage",
            Self::ThirdPartyFireTheft => "Enhanced protection",
            Self::Comprehensive => "Full coverage",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleUsage {
    Personal,
    Commercial,
}

impl VehicleUsage {
    pub const ALL: [VehicleUsage; 2] = [Self::Personal, Self::Commercial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Commercial => "commercial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "personal" => Some(Self::Personal),
            "commercial" => Some(Self::Commercial),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Personal => "Personal Use",
            Self::Commercial => "Commercial Use",
        }
    }
}
