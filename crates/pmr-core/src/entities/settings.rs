//! Two-tier search settings.
//!
//! `SimpleTier` and `AdvancedTier` are disjoint field sets. `CombinedSettings`
//! embeds both by composition and validates both rule sets in one pass.
//! `Settings` is the sum type handed to collaborators and snapshots: the
//! simple tier alone, or the combined field set.
//!
//! Every field is optional. `None` means "unconstrained"; no field ever
//! defaults to an empty string, zero, or empty list.

use chrono::Datelike;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::{ArticleType, DateRange, Gender, PublicationType, Species, TextAvailability};
use crate::errors::{ConstraintViolation, ConstraintViolations};

/// Earliest year accepted for a date bound.
pub const MIN_YEAR: i32 = 1950;

/// Bounds for `n_queries_to_generate`.
pub const QUERIES_TO_GENERATE_RANGE: (i64, i64) = (1, 30);

/// Bounds for `n_results_limit_per_query`.
pub const RESULTS_PER_QUERY_RANGE: (i64, i64) = (1, 50);

/// Current calendar year (UTC), the upper bound for date fields.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Copy every `Some` field of `$update` over `$target`.
macro_rules! overlay {
    ($target:expr, $update:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$update.$field {
                $target.$field = Some(value.clone());
            }
        )+
    };
}

// ---------------------------------------------------------------------------
// SimpleTier
// ---------------------------------------------------------------------------

/// Simple search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SimpleTier {
    /// Keywords or phrases to search for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Search for papers by a specific author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<String>,
    /// `custom` requires both year bounds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Start year for the date range (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    /// End year for the date range (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
    /// Which text contents must be available on PubMed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_availability: Option<TextAvailability>,
    /// Terms, authors, journals, or affiliations to exclude with `NOT`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusions: Option<String>,
    /// How the assistant should behave when generating queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
    /// Number of queries to generate (1-30).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_queries_to_generate: Option<i64>,
    /// Number of results fetched per query (1-50).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_results_limit_per_query: Option<i64>,
}

impl SimpleTier {
    pub const FIELDS: &'static [&'static str] = &[
        "keywords",
        "authors",
        "date_range",
        "start_year",
        "end_year",
        "text_availability",
        "exclusions",
        "system_prompt",
        "n_queries_to_generate",
        "n_results_limit_per_query",
    ];

    /// Build from a partial field mapping and validate.
    ///
    /// # Errors
    ///
    /// Returns every malformed field and every broken rule.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ConstraintViolations> {
        let (value, mut violations) = parse_partial::<Self>(fields);
        value.collect_violations(current_year(), &mut violations);
        ConstraintViolations(violations).into_result()?;
        Ok(value)
    }

    /// Validate against the current year.
    ///
    /// # Errors
    ///
    /// Returns all simple-tier violations.
    pub fn validate(&self) -> Result<(), ConstraintViolations> {
        self.validate_for_year(current_year())
    }

    /// Validate with an explicit upper year bound.
    ///
    /// # Errors
    ///
    /// Returns all simple-tier violations.
    pub fn validate_for_year(&self, year: i32) -> Result<(), ConstraintViolations> {
        let mut violations = Vec::new();
        self.collect_violations(year, &mut violations);
        ConstraintViolations(violations).into_result()
    }

    fn collect_violations(&self, year: i32, out: &mut Vec<ConstraintViolation>) {
        if self.date_range == Some(DateRange::Custom) {
            if self.start_year.is_none() {
                out.push(ConstraintViolation::new(
                    "start_year",
                    "required when date_range is custom",
                ));
            }
            if self.end_year.is_none() {
                out.push(ConstraintViolation::new(
                    "end_year",
                    "required when date_range is custom",
                ));
            }
        }

        for (field, bound) in [("start_year", self.start_year), ("end_year", self.end_year)] {
            if let Some(value) = bound
                && !(MIN_YEAR..=year).contains(&value)
            {
                out.push(ConstraintViolation::new(
                    field,
                    format!("must be between {MIN_YEAR} and {year}"),
                ));
            }
        }

        if let (Some(start), Some(end)) = (self.start_year, self.end_year)
            && end < start
        {
            out.push(ConstraintViolation::new(
                "end_year",
                "must be greater than or equal to start_year",
            ));
        }

        check_range(
            "n_queries_to_generate",
            self.n_queries_to_generate,
            QUERIES_TO_GENERATE_RANGE,
            out,
        );
        check_range(
            "n_results_limit_per_query",
            self.n_results_limit_per_query,
            RESULTS_PER_QUERY_RANGE,
            out,
        );
    }

    /// Overwrite every field that is set in `update`; leave the rest.
    pub fn overlay(&mut self, update: &Self) {
        overlay!(self, update;
            keywords,
            authors,
            date_range,
            start_year,
            end_year,
            text_availability,
            exclusions,
            system_prompt,
            n_queries_to_generate,
            n_results_limit_per_query,
        );
    }

    /// Number of queries to generate, falling back to `default` when
    /// unconstrained.
    #[must_use]
    pub fn effective_queries_to_generate(&self, default: u32) -> u32 {
        self.n_queries_to_generate
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(default)
    }

    /// Results fetched per query, falling back to `default` when
    /// unconstrained.
    #[must_use]
    pub fn effective_results_per_query(&self, default: u32) -> u32 {
        self.n_results_limit_per_query
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(default)
    }
}

// ---------------------------------------------------------------------------
// AdvancedTier
// ---------------------------------------------------------------------------

/// Advanced search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AdvancedTier {
    /// First author; inserted with `[1au]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_author: Option<String>,
    /// Last author; inserted with `[lastau]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_author: Option<String>,
    /// Specific chemical or drug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substance_name: Option<String>,
    /// Word distance for proximity search.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity_distance: Option<i64>,
    /// Limit to human or animal studies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<Species>,
    /// Male or female study populations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// MeSH terms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh_terms: Option<String>,
    /// Publication type filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_types: Option<Vec<PublicationType>>,
    /// PMIDs, DOIs, or other identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_identifiers: Option<String>,
    /// Author affiliations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affiliations: Option<String>,
    /// Article type filters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_types: Option<Vec<ArticleType>>,
}

impl AdvancedTier {
    pub const FIELDS: &'static [&'static str] = &[
        "first_author",
        "last_author",
        "substance_name",
        "proximity_distance",
        "species",
        "gender",
        "mesh_terms",
        "publication_types",
        "unique_identifiers",
        "affiliations",
        "article_types",
    ];

    /// Validate the advanced-tier rules.
    ///
    /// # Errors
    ///
    /// Returns all advanced-tier violations.
    pub fn validate(&self) -> Result<(), ConstraintViolations> {
        let mut violations = Vec::new();
        self.collect_violations(&mut violations);
        ConstraintViolations(violations).into_result()
    }

    fn collect_violations(&self, out: &mut Vec<ConstraintViolation>) {
        if let Some(distance) = self.proximity_distance
            && distance < 0
        {
            out.push(ConstraintViolation::new(
                "proximity_distance",
                "must be greater than or equal to 0",
            ));
        }
    }

    /// Overwrite every field that is set in `update`; leave the rest.
    pub fn overlay(&mut self, update: &Self) {
        overlay!(self, update;
            first_author,
            last_author,
            substance_name,
            proximity_distance,
            species,
            gender,
            mesh_terms,
            publication_types,
            unique_identifiers,
            affiliations,
            article_types,
        );
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// CombinedSettings
// ---------------------------------------------------------------------------

/// Both tiers together. Serializes flat, as one field set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CombinedSettings {
    #[serde(flatten)]
    pub simple: SimpleTier,
    #[serde(flatten)]
    pub advanced: AdvancedTier,
}

impl CombinedSettings {
    /// Build from a partial field mapping covering either tier.
    ///
    /// # Errors
    ///
    /// Returns malformed fields plus violations from both tiers together.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ConstraintViolations> {
        let (value, mut violations) = parse_partial::<Self>(fields);
        value.collect_violations(current_year(), &mut violations);
        ConstraintViolations(violations).into_result()?;
        Ok(value)
    }

    /// Validate both tiers, reporting all violations at once.
    ///
    /// # Errors
    ///
    /// Returns simple-tier and advanced-tier violations together.
    pub fn validate(&self) -> Result<(), ConstraintViolations> {
        self.validate_for_year(current_year())
    }

    /// Validate both tiers with an explicit upper year bound.
    ///
    /// # Errors
    ///
    /// Returns simple-tier and advanced-tier violations together.
    pub fn validate_for_year(&self, year: i32) -> Result<(), ConstraintViolations> {
        let mut violations = Vec::new();
        self.collect_violations(year, &mut violations);
        ConstraintViolations(violations).into_result()
    }

    fn collect_violations(&self, year: i32, out: &mut Vec<ConstraintViolation>) {
        self.simple.collect_violations(year, out);
        self.advanced.collect_violations(out);
    }

    /// Project into the sum type for the given mode.
    #[must_use]
    pub fn project(&self, advanced: bool) -> Settings {
        if advanced {
            Settings::Advanced(self.clone())
        } else {
            Settings::Simple(self.simple.clone())
        }
    }

    /// Partial update: every set field in `update` overwrites, unset fields
    /// leave the current value untouched. A simple-tier update never touches
    /// advanced fields.
    pub fn apply(&mut self, update: &Settings) {
        match update {
            Settings::Simple(simple) => self.simple.overlay(simple),
            Settings::Advanced(combined) => {
                self.simple.overlay(&combined.simple);
                self.advanced.overlay(&combined.advanced);
            }
        }
    }

    /// Set or clear (`Value::Null`) one named field, re-validating the
    /// result. The settings are unchanged on error.
    ///
    /// # Errors
    ///
    /// Returns a violation for an unknown field name, a malformed value, or
    /// a broken rule in the resulting settings.
    pub fn set_field(&mut self, field: &str, value: Value) -> Result<(), ConstraintViolations> {
        if !SimpleTier::FIELDS.contains(&field) && !AdvancedTier::FIELDS.contains(&field) {
            return Err(ConstraintViolations(vec![ConstraintViolation::new(
                field,
                "unknown settings field",
            )]));
        }

        let mut fields = match serde_json::to_value(&*self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        fields.insert(field.to_string(), value);
        *self = Self::from_fields(&fields)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Mode-appropriate settings value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "tier", content = "fields", rename_all = "snake_case")]
pub enum Settings {
    Simple(SimpleTier),
    Advanced(CombinedSettings),
}

impl Default for Settings {
    fn default() -> Self {
        Self::Simple(SimpleTier::default())
    }
}

impl Settings {
    #[must_use]
    pub const fn is_advanced(&self) -> bool {
        matches!(self, Self::Advanced(_))
    }

    /// The simple-tier fields, present in both variants.
    #[must_use]
    pub const fn simple(&self) -> &SimpleTier {
        match self {
            Self::Simple(simple) => simple,
            Self::Advanced(combined) => &combined.simple,
        }
    }

    /// The advanced-tier fields, if this is the advanced variant.
    #[must_use]
    pub const fn advanced(&self) -> Option<&AdvancedTier> {
        match self {
            Self::Simple(_) => None,
            Self::Advanced(combined) => Some(&combined.advanced),
        }
    }

    /// Validate the rules that apply to this variant.
    ///
    /// # Errors
    ///
    /// Returns every violation for the variant's tiers.
    pub fn validate(&self) -> Result<(), ConstraintViolations> {
        match self {
            Self::Simple(simple) => simple.validate(),
            Self::Advanced(combined) => combined.validate(),
        }
    }

    /// Widen into the combined field set. The simple variant yields an
    /// unconstrained advanced tier.
    #[must_use]
    pub fn into_combined(self) -> CombinedSettings {
        match self {
            Self::Simple(simple) => CombinedSettings {
                simple,
                advanced: AdvancedTier::default(),
            },
            Self::Advanced(combined) => combined,
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn check_range(field: &str, value: Option<i64>, (min, max): (i64, i64), out: &mut Vec<ConstraintViolation>) {
    if let Some(n) = value
        && !(min..=max).contains(&n)
    {
        out.push(ConstraintViolation::new(
            field,
            format!("must be between {min} and {max}"),
        ));
    }
}

/// Parse each field on its own so one malformed value is reported against
/// its own name, then build the value from the well-formed remainder.
/// Unknown keys are ignored.
fn parse_partial<T>(fields: &Map<String, Value>) -> (T, Vec<ConstraintViolation>)
where
    T: DeserializeOwned + Default,
{
    let mut accepted = Map::new();
    let mut violations = Vec::new();

    for (key, value) in fields {
        let mut single = Map::new();
        single.insert(key.clone(), value.clone());
        match serde_json::from_value::<T>(Value::Object(single)) {
            Ok(_) => {
                accepted.insert(key.clone(), value.clone());
            }
            Err(error) => violations.push(ConstraintViolation::new(
                key.clone(),
                format!("invalid value: {error}"),
            )),
        }
    }

    let value = serde_json::from_value::<T>(Value::Object(accepted)).unwrap_or_default();
    (value, violations)
}
