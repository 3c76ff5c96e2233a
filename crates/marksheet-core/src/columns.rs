//! Spreadsheet header mapping
//!
//! Header text is normalized to a token (lowercase, non-alphanumeric runs
//! collapsed to `_`), then matched against a fixed vocabulary of semantic
//! fields. The mapping decides which [`InputShape`] a sheet carries.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{MarksheetError, Result};
use crate::reconcile::InputShape;
use crate::weights::{WeightConfig, CRITERIA_COUNT};

/// Phrase reported when no mark columns resolve to an input shape
pub const SHAPE_REQUIREMENT: &str =
    "total OR all four component columns OR the three evaluator columns";

/// Fields a spreadsheet column can stand for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SemanticField {
    Name,
    SeatNo,
    Total,
    GroupNo,
    ProjectTitle,
    ProjectGuide,
    Member1,
    Member2,
    InternalGuide,
    /// Zero-based criterion index of the active configuration
    Criterion(usize),
}

impl fmt::Display for SemanticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticField::Name => write!(f, "name"),
            SemanticField::SeatNo => write!(f, "seat_no"),
            SemanticField::Total => write!(f, "total"),
            SemanticField::GroupNo => write!(f, "group_no"),
            SemanticField::ProjectTitle => write!(f, "project_title"),
            SemanticField::ProjectGuide => write!(f, "project_guide"),
            SemanticField::Member1 => write!(f, "member1"),
            SemanticField::Member2 => write!(f, "member2"),
            SemanticField::InternalGuide => write!(f, "internal_guide"),
            SemanticField::Criterion(i) => write!(f, "criteria{}", i + 1),
        }
    }
}

/// Accepted normalized headers, checked in this order
const FIXED_SYNONYMS: &[(SemanticField, &[&str])] = &[
    (SemanticField::Name, &["name", "student_name"]),
    (
        SemanticField::SeatNo,
        &[
            "seat_no",
            "seatno",
            "usn",
            "univ_seat_no",
            "seat_number",
            "enrollment_no",
        ],
    ),
    (
        SemanticField::Total,
        &["total", "total_marks", "average", "avg"],
    ),
    (
        SemanticField::GroupNo,
        &["group", "group_no", "group_number", "project_group"],
    ),
    (SemanticField::ProjectTitle, &["project_title", "title"]),
    (SemanticField::ProjectGuide, &["project_guide", "guide_name"]),
    (SemanticField::Member1, &["member1", "member_1", "chairperson"]),
    (SemanticField::Member2, &["member2", "member_2"]),
    (SemanticField::InternalGuide, &["internal_guide", "guide"]),
];

const EVALUATOR_FIELDS: [SemanticField; 3] = [
    SemanticField::Member1,
    SemanticField::Member2,
    SemanticField::InternalGuide,
];

/// Canonical token for a header cell.
///
/// Strips BOM/NBSP and any other punctuation, lowercases, joins the remaining
/// alphanumeric runs with `_`. Idempotent.
pub fn normalize_header(raw: &str) -> String {
    raw.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Header tokens accepted for each criterion of a configuration
fn criterion_synonyms(config: &WeightConfig) -> Vec<Vec<String>> {
    config
        .criteria
        .iter()
        .map(|criterion| {
            let base = normalize_header(&criterion.name);
            let mut synonyms = vec![
                base.clone(),
                normalize_header(&criterion.name.replace('&', " and ")),
                base.replace('_', ""),
            ];
            synonyms.extend(criterion.aliases.iter().map(|a| normalize_header(a)));
            synonyms.retain(|s| !s.is_empty());
            synonyms.dedup();
            synonyms
        })
        .collect()
}

fn classify(token: &str, criteria: &[Vec<String>]) -> Option<SemanticField> {
    FIXED_SYNONYMS
        .iter()
        .find(|(_, synonyms)| synonyms.contains(&token))
        .map(|(field, _)| *field)
        .or_else(|| {
            criteria
                .iter()
                .position(|synonyms| synonyms.iter().any(|s| s == token))
                .map(SemanticField::Criterion)
        })
}

/// A resolved spreadsheet column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub header: String,
}

/// Semantic field → first matching column
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    columns: BTreeMap<SemanticField, Column>,
}

impl HeaderMap {
    pub fn get(&self, field: SemanticField) -> Option<&Column> {
        self.columns.get(&field)
    }

    pub fn contains(&self, field: SemanticField) -> bool {
        self.columns.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Trimmed cell for a field; `None` when the sheet has no such column
    pub fn cell<'a>(&self, row: &'a [String], field: SemanticField) -> Option<&'a str> {
        self.get(field)
            .map(|column| row.get(column.index).map(|v| v.trim()).unwrap_or(""))
    }

    /// Field name → original header text, in field order
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.columns
            .iter()
            .map(|(field, column)| (field.to_string(), column.header.clone()))
            .collect()
    }

    fn has_all_criteria(&self) -> bool {
        (0..CRITERIA_COUNT).all(|i| self.contains(SemanticField::Criterion(i)))
    }
}

/// Map a header row onto the semantic vocabulary of `config`.
///
/// A header that matches nothing is ignored. When several headers match the
/// same field, the leftmost one wins.
pub fn map_headers(headers: &[String], config: &WeightConfig) -> HeaderMap {
    let criteria = criterion_synonyms(config);
    let mut map = HeaderMap::default();

    for (index, raw) in headers.iter().enumerate() {
        let token = normalize_header(raw);
        if token.is_empty() {
            continue;
        }
        let Some(field) = classify(&token, &criteria) else {
            tracing::trace!(header = %raw, "unmapped header");
            continue;
        };
        if let Some(existing) = map.columns.get(&field) {
            tracing::debug!(
                field = %field,
                kept = %existing.header,
                ignored = %raw,
                "duplicate header for field"
            );
            continue;
        }
        map.columns.insert(
            field,
            Column {
                index,
                header: raw.clone(),
            },
        );
    }

    map
}

/// Decide which input shape the mapped headers carry.
///
/// Priority: three evaluator totals, then all four criterion columns, then a
/// total column. Missing identity columns and an unresolvable shape are
/// reported together.
pub fn select_input_shape(map: &HeaderMap) -> Result<InputShape> {
    let mut missing = Vec::new();
    for field in [SemanticField::Name, SemanticField::SeatNo] {
        if !map.contains(field) {
            missing.push(field.to_string());
        }
    }

    let shape = if EVALUATOR_FIELDS.iter().all(|f| map.contains(*f)) {
        Some(InputShape::ThreeEvaluatorTotals)
    } else if map.has_all_criteria() {
        Some(InputShape::PerCriterionMarks)
    } else if map.contains(SemanticField::Total) {
        Some(InputShape::AggregateTotal)
    } else {
        None
    };

    match shape {
        Some(shape) if missing.is_empty() => Ok(shape),
        _ => {
            if shape.is_none() {
                missing.push(SHAPE_REQUIREMENT.to_string());
            }
            Err(MarksheetError::MissingRequiredColumns { missing })
        }
    }
}
