//! Weight configuration registry
//!
//! Each (phase, review) pair selects four criteria with integer maximum marks.
//! The registry is built once (built-ins plus any `[[weights]]` entries from
//! the store config) and is read-only afterwards.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MarksheetError, Result};

/// Number of criteria in every configuration
pub const CRITERIA_COUNT: usize = 4;

const GUIDE_SECTION_LABEL: &str = "Marks allotted by Project Guide";
const COMMITTEE_SECTION_LABEL: &str = "Marks allotted by Committee";

/// Identifies one evaluation event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReviewKey {
    pub phase: u32,
    pub review: u32,
}

impl ReviewKey {
    pub fn new(phase: u32, review: u32) -> Self {
        Self { phase, review }
    }
}

impl fmt::Display for ReviewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "phase {} review {}", self.phase, self.review)
    }
}

/// One assessment dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionSpec {
    pub name: String,
    pub max_marks: u32,
    /// Only the internal guide's mark is authoritative for display
    #[serde(default)]
    pub guide_only: bool,
    /// Extra header spellings accepted for this criterion's column
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl CriterionSpec {
    fn new(name: &str, max_marks: u32, guide_only: bool, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            max_marks,
            guide_only,
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// Criteria and ceiling for one (phase, review)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightConfig {
    pub phase: u32,
    pub review: u32,
    #[serde(default)]
    pub title: String,
    /// Ceiling; must equal the sum of the criteria maxima
    pub total: u32,
    #[serde(default = "default_guide_label")]
    pub guide_section_label: String,
    #[serde(default = "default_committee_label")]
    pub committee_section_label: String,
    pub criteria: [CriterionSpec; CRITERIA_COUNT],
}

fn default_guide_label() -> String {
    GUIDE_SECTION_LABEL.to_string()
}

fn default_committee_label() -> String {
    COMMITTEE_SECTION_LABEL.to_string()
}

impl WeightConfig {
    pub fn key(&self) -> ReviewKey {
        ReviewKey::new(self.phase, self.review)
    }

    pub fn ceiling(&self) -> u32 {
        self.total
    }

    pub fn max_marks(&self) -> [u32; CRITERIA_COUNT] {
        std::array::from_fn(|i| self.criteria[i].max_marks)
    }

    /// Criterion indices paired with their maxima, in criterion order
    pub fn weights(&self) -> [(usize, u32); CRITERIA_COUNT] {
        std::array::from_fn(|i| (i, self.criteria[i].max_marks))
    }

    pub fn criterion_names(&self) -> Vec<&str> {
        self.criteria.iter().map(|c| c.name.as_str()).collect()
    }

    /// Check the ceiling invariant
    pub fn validate(&self) -> Result<()> {
        if self.total == 0 {
            return Err(MarksheetError::invalid_value(
                "weight configuration",
                format!("{}: total must be positive", self.key()),
            ));
        }
        let sum: u32 = self.criteria.iter().map(|c| c.max_marks).sum();
        if sum != self.total {
            return Err(MarksheetError::invalid_value(
                "weight configuration",
                format!(
                    "{}: criteria maxima sum to {} but total is {}",
                    self.key(),
                    sum,
                    self.total
                ),
            ));
        }
        if let Some(blank) = self.criteria.iter().position(|c| c.name.trim().is_empty()) {
            return Err(MarksheetError::invalid_value(
                "weight configuration",
                format!("{}: criterion {} has no name", self.key(), blank + 1),
            ));
        }
        Ok(())
    }
}

/// Immutable lookup from (phase, review) to its configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightRegistry {
    configs: BTreeMap<ReviewKey, WeightConfig>,
}

impl WeightRegistry {
    /// The four configurations used by the project review committee
    pub fn builtin() -> Self {
        let presentation = |max| {
            CriterionSpec::new(
                "Project presentation skill",
                max,
                false,
                &["presentation", "presentation_skill"],
            )
        };
        let questions = |max| {
            CriterionSpec::new(
                "Question and answer session",
                max,
                false,
                &["qa", "qna", "question_answer"],
            )
        };
        let config = |phase, review, title: &str, criteria| WeightConfig {
            phase,
            review,
            title: title.to_string(),
            total: 50,
            guide_section_label: default_guide_label(),
            committee_section_label: default_committee_label(),
            criteria,
        };

        let configs = [
            config(
                1,
                1,
                "PHASE - I REVIEW - I",
                [
                    CriterionSpec::new("Literature Survey", 20, true, &["literature"]),
                    CriterionSpec::new("Problem Identification", 10, true, &["problem"]),
                    presentation(10),
                    questions(10),
                ],
            ),
            config(
                1,
                2,
                "PHASE - I REVIEW - II",
                [
                    CriterionSpec::new("Objectives", 10, true, &[]),
                    CriterionSpec::new("Methodology", 10, true, &[]),
                    presentation(15),
                    questions(15),
                ],
            ),
            config(
                2,
                1,
                "PHASE - II REVIEW - I",
                [
                    CriterionSpec::new("Preliminary studies", 15, true, &[]),
                    CriterionSpec::new("Execution & Result Analysis", 15, true, &[]),
                    presentation(10),
                    questions(10),
                ],
            ),
            config(
                2,
                2,
                "PHASE - II REVIEW - II",
                [
                    CriterionSpec::new("Conclusion & Future scope of work", 10, true, &[]),
                    CriterionSpec::new("Publication of project work", 10, true, &[]),
                    presentation(15),
                    questions(15),
                ],
            ),
        ];

        Self {
            configs: configs.into_iter().map(|c| (c.key(), c)).collect(),
        }
    }

    /// Registry with no configurations; useful for fully custom setups
    pub fn empty() -> Self {
        Self {
            configs: BTreeMap::new(),
        }
    }

    /// Layer configured entries over this registry.
    ///
    /// An entry replaces an existing configuration with the same key; a key
    /// repeated within `overrides` is rejected.
    pub fn with_overrides(mut self, overrides: &[WeightConfig]) -> Result<Self> {
        let mut seen = std::collections::BTreeSet::new();
        for config in overrides {
            config.validate()?;
            if !seen.insert(config.key()) {
                return Err(MarksheetError::invalid_value(
                    "weight configuration",
                    format!("{} is defined more than once", config.key()),
                ));
            }
            tracing::debug!(key = %config.key(), "weight configuration override");
            self.configs.insert(config.key(), config.clone());
        }
        Ok(self)
    }

    pub fn get(&self, phase: u32, review: u32) -> Option<&WeightConfig> {
        self.configs.get(&ReviewKey::new(phase, review))
    }

    /// Lookup that turns a missing key into the import-fatal error
    pub fn require(&self, phase: u32, review: u32) -> Result<&WeightConfig> {
        self.get(phase, review)
            .ok_or(MarksheetError::UnknownWeightConfig { phase, review })
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightConfig> {
        self.configs.values()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

impl Default for WeightRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
