//! Search-constraint enums, combinator kinds, and chat roles.
//!
//! Constraint enums serialize to the exact tag text PubMed understands
//! (`"free full text[sb]"`, `"Review[pt]"`, ...) so a value can be pasted
//! into query text verbatim and read back from a model response unchanged.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// Whether the search is bounded by a custom year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    AnyTime,
    Custom,
}

impl DateRange {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AnyTime => "any_time",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TextAvailability
// ---------------------------------------------------------------------------

/// Which text contents must be available on PubMed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum TextAvailability {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "hasabstract")]
    Abstract,
    #[serde(rename = "free full text[sb]")]
    FreeFullText,
    #[serde(rename = "full text[sb]")]
    FullText,
}

impl TextAvailability {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Abstract => "hasabstract",
            Self::FreeFullText => "free full text[sb]",
            Self::FullText => "full text[sb]",
        }
    }
}

impl fmt::Display for TextAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Species / Gender
// ---------------------------------------------------------------------------

/// Limit to human or animal studies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Species {
    Humans,
    #[serde(rename = "Other Animals")]
    OtherAnimals,
    Both,
}

impl Species {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Humans => "Humans",
            Self::OtherAnimals => "Other Animals",
            Self::Both => "Both",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restrict to male or female study populations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Gender {
    Male,
    Female,
    Both,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Both => "Both",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// PublicationType
// ---------------------------------------------------------------------------

/// Publication types relevant for toxicology research (`[pt]` tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum PublicationType {
    #[serde(rename = "Review[pt]")]
    Review,
    #[serde(rename = "Clinical Trial[pt]")]
    ClinicalTrial,
    #[serde(rename = "Clinical Trial, Phase I[pt]")]
    ClinicalTrialPhase1,
    #[serde(rename = "Clinical Trial, Phase II[pt]")]
    ClinicalTrialPhase2,
    #[serde(rename = "Clinical Trial, Phase III[pt]")]
    ClinicalTrialPhase3,
    #[serde(rename = "Clinical Trial, Phase IV[pt]")]
    ClinicalTrialPhase4,
    #[serde(rename = "Controlled Clinical Trial[pt]")]
    ControlledClinicalTrial,
    #[serde(rename = "Evaluation Study[pt]")]
    EvaluationStudy,
    #[serde(rename = "Journal Article[pt]")]
    JournalArticle,
    #[serde(rename = "Meta-Analysis[pt]")]
    MetaAnalysis,
    #[serde(rename = "Multicenter Study[pt]")]
    MulticenterStudy,
    #[serde(rename = "Observational Study[pt]")]
    ObservationalStudy,
    #[serde(rename = "Validation Study[pt]")]
    ValidationStudy,
    #[serde(rename = "Research Support[pt]")]
    ResearchSupport,
}

impl PublicationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Review => "Review[pt]",
            Self::ClinicalTrial => "Clinical Trial[pt]",
            Self::ClinicalTrialPhase1 => "Clinical Trial, Phase I[pt]",
            Self::ClinicalTrialPhase2 => "Clinical Trial, Phase II[pt]",
            Self::ClinicalTrialPhase3 => "Clinical Trial, Phase III[pt]",
            Self::ClinicalTrialPhase4 => "Clinical Trial, Phase IV[pt]",
            Self::ControlledClinicalTrial => "Controlled Clinical Trial[pt]",
            Self::EvaluationStudy => "Evaluation Study[pt]",
            Self::JournalArticle => "Journal Article[pt]",
            Self::MetaAnalysis => "Meta-Analysis[pt]",
            Self::MulticenterStudy => "Multicenter Study[pt]",
            Self::ObservationalStudy => "Observational Study[pt]",
            Self::ValidationStudy => "Validation Study[pt]",
            Self::ResearchSupport => "Research Support[pt]",
        }
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ArticleType
// ---------------------------------------------------------------------------

/// Article type filters (`[Filter]` tags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ArticleType {
    #[serde(rename = "Clinical Trial[Filter]")]
    ClinicalTrial,
    #[serde(rename = "Comparative Study[Filter]")]
    ComparativeStudy,
    #[serde(rename = "Evaluation Study[Filter]")]
    EvaluationStudy,
    #[serde(rename = "Meta-Analysis[Filter]")]
    MetaAnalysis,
    #[serde(rename = "Multicenter Study[Filter]")]
    MulticenterStudy,
    #[serde(rename = "Observational Study[Filter]")]
    ObservationalStudy,
    #[serde(rename = "Systematic Review[Filter]")]
    SystematicReview,
    #[serde(rename = "Validation Study[Filter]")]
    ValidationStudy,
}

impl ArticleType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClinicalTrial => "Clinical Trial[Filter]",
            Self::ComparativeStudy => "Comparative Study[Filter]",
            Self::EvaluationStudy => "Evaluation Study[Filter]",
            Self::MetaAnalysis => "Meta-Analysis[Filter]",
            Self::MulticenterStudy => "Multicenter Study[Filter]",
            Self::ObservationalStudy => "Observational Study[Filter]",
            Self::SystematicReview => "Systematic Review[Filter]",
            Self::ValidationStudy => "Validation Study[Filter]",
        }
    }
}

impl fmt::Display for ArticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Combinator
// ---------------------------------------------------------------------------

/// How selected queries are dispatched: merged with a boolean operator, or
/// each on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    And,
    Or,
    Individual,
}

impl Combinator {
    /// The literal boolean operator, or `None` for individual execution.
    #[must_use]
    pub const fn operator(self) -> Option<&'static str> {
        match self {
            Self::And => Some("AND"),
            Self::Or => Some("OR"),
            Self::Individual => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Individual => "individual",
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RefinementMode
// ---------------------------------------------------------------------------

/// Which kind of structured completion a chat instruction asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RefinementMode {
    /// Update search settings, optionally proposing queries.
    Settings,
    /// Propose new queries only.
    Queries,
    /// Free-text article summary.
    Summary,
}

impl RefinementMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "settings",
            Self::Queries => "queries",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for RefinementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ChatRole
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_enums_serialize_as_pubmed_tags() {
        assert_eq!(
            serde_json::to_string(&TextAvailability::FreeFullText).unwrap(),
            "\"free full text[sb]\""
        );
        assert_eq!(
            serde_json::to_string(&Species::OtherAnimals).unwrap(),
            "\"Other Animals\""
        );
        assert_eq!(
            serde_json::to_string(&PublicationType::ClinicalTrialPhase3).unwrap(),
            "\"Clinical Trial, Phase III[pt]\""
        );
        assert_eq!(
            serde_json::to_string(&ArticleType::SystematicReview).unwrap(),
            "\"Systematic Review[Filter]\""
        );
    }

    #[test]
    fn as_str_matches_serde_spelling() {
        for species in [Species::Humans, Species::OtherAnimals, Species::Both] {
            let json = serde_json::to_string(&species).unwrap();
            assert_eq!(json, format!("\"{}\"", species.as_str()));
        }
        for availability in [
            TextAvailability::All,
            TextAvailability::Abstract,
            TextAvailability::FreeFullText,
            TextAvailability::FullText,
        ] {
            let json = serde_json::to_string(&availability).unwrap();
            assert_eq!(json, format!("\"{availability}\""));
        }
    }

    #[test]
    fn combinator_operators() {
        assert_eq!(Combinator::And.operator(), Some("AND"));
        assert_eq!(Combinator::Or.operator(), Some("OR"));
        assert_eq!(Combinator::Individual.operator(), None);
    }

    #[test]
    fn date_range_snake_case() {
        let parsed: DateRange = serde_json::from_str("\"custom\"").unwrap();
        assert_eq!(parsed, DateRange::Custom);
        assert_eq!(DateRange::AnyTime.to_string(), "any_time");
    }
}
