//! The closed set of complaint categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// Complaint category.
///
/// Variants are declared in the lexicographic order of their display names,
/// so the derived `Ord` matches name order. Tie-breaking in the confidence
/// gate relies on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CategoryLabel {
    #[serde(rename = "Child Marriage")]
    ChildMarriage,
    #[serde(rename = "Cultural Discrimination")]
    CulturalDiscrimination,
    #[serde(rename = "Cyber Harassment")]
    CyberHarassment,
    #[serde(rename = "Domestic Violence")]
    DomesticViolence,
    #[serde(rename = "Dowry Harassment")]
    DowryHarassment,
    #[serde(rename = "Gender Discrimination")]
    GenderDiscrimination,
    /// Fallback for complaints the model is unsure about.
    #[serde(rename = "General Complaint")]
    GeneralComplaint,
    #[serde(rename = "Legal System Failure")]
    LegalSystemFailure,
    #[serde(rename = "Public Harassment")]
    PublicHarassment,
    #[serde(rename = "Sexual Harassment")]
    SexualHarassment,
    #[serde(rename = "Workplace Discrimination")]
    WorkplaceDiscrimination,
    #[serde(rename = "Workplace Harassment")]
    WorkplaceHarassment,
}

impl CategoryLabel {
    /// Every category, in name order.
    pub const ALL: [CategoryLabel; 12] = [
        CategoryLabel::ChildMarriage,
        CategoryLabel::CulturalDiscrimination,
        CategoryLabel::CyberHarassment,
        CategoryLabel::DomesticViolence,
        CategoryLabel::DowryHarassment,
        CategoryLabel::GenderDiscrimination,
        CategoryLabel::GeneralComplaint,
        CategoryLabel::LegalSystemFailure,
        CategoryLabel::PublicHarassment,
        CategoryLabel::SexualHarassment,
        CategoryLabel::WorkplaceDiscrimination,
        CategoryLabel::WorkplaceHarassment,
    ];

    /// Human-readable name, as used in corpora and department tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::ChildMarriage => "Child Marriage",
            CategoryLabel::CulturalDiscrimination => "Cultural Discrimination",
            CategoryLabel::CyberHarassment => "Cyber Harassment",
            CategoryLabel::DomesticViolence => "Domestic Violence",
            CategoryLabel::DowryHarassment => "Dowry Harassment",
            CategoryLabel::GenderDiscrimination => "Gender Discrimination",
            CategoryLabel::GeneralComplaint => "General Complaint",
            CategoryLabel::LegalSystemFailure => "Legal System Failure",
            CategoryLabel::PublicHarassment => "Public Harassment",
            CategoryLabel::SexualHarassment => "Sexual Harassment",
            CategoryLabel::WorkplaceDiscrimination => "Workplace Discrimination",
            CategoryLabel::WorkplaceHarassment => "Workplace Harassment",
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryLabel {
    type Err = RouterError;

    /// Parse a display name. Matching ignores ASCII case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        CategoryLabel::ALL
            .into_iter()
            .find(|label| label.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| RouterError::data(format!("unknown category: {s:?}")))
    }
}
