use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four sequential screens of the quotation form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Step {
    #[default]
    Personal = 1,
    Vehicle = 2,
    Coverage = 3,
    Summary = 4,
}

impl Step {
    pub const ALL: [Step; 4] = [Self::Personal, Self::Vehicle, Self::Coverage, Self::Summary];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Personal),
            2 => Some(Self::Vehicle),
            3 => Some(Self::Coverage),
            4 => Some(Self::Summary),
            _ => None,
        }
    }

    /// The following step, or `None` on the summary screen.
    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step, or `None` on the first screen.
    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Personal => "Personal Details",
            Self::Vehicle => "Vehicle Details",
            Self::Coverage => "Coverage Type",
            Self::Summary => "Quote Summary",
        }
    }

    /// Forward progress stops here; the screen is never validated.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Summary)
    }
}

impl From<Step> for u8 {
    fn from(step: Step) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for Step {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value).ok_or_else(|| format!("step must be 1-4, got {value}"))
    }
}

impl fmt::Display for Step {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Step {} of {}: {}", self.number(), Self::ALL.len(), self.title())
    }
}
