//! Mark reconciliation engine
//!
//! Spreadsheets arrive in one of three shapes (see [`RawInput`]). Whatever the
//! shape, reconciliation yields the same thing: a canonical per-criterion mark
//! set plus a per-criterion breakdown for each of the three evaluators
//! (member 1, member 2 and the internal guide).
//!
//! The canonical mark for a criterion is the half-up rounded mean of the
//! evaluators' non-zero marks for it. A zero is read as "did not score this
//! criterion" and is left out of the mean; all zeros give zero.

use serde::{Deserialize, Serialize};

use crate::apportion::apportion_by_weight;
use crate::error::Result;
use crate::weights::{WeightConfig, CRITERIA_COUNT};

/// Marks for the four criteria, in configuration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluatorMarks(pub [u32; CRITERIA_COUNT]);

impl EvaluatorMarks {
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn get(&self, criterion: usize) -> u32 {
        self.0[criterion]
    }

    pub fn as_array(&self) -> [u32; CRITERIA_COUNT] {
        self.0
    }
}

/// The input shape a spreadsheet was recognised as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputShape {
    ThreeEvaluatorTotals,
    PerCriterionMarks,
    AggregateTotal,
}

impl std::fmt::Display for InputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputShape::ThreeEvaluatorTotals => write!(f, "three evaluator totals"),
            InputShape::PerCriterionMarks => write!(f, "per-criterion marks"),
            InputShape::AggregateTotal => write!(f, "aggregate total"),
        }
    }
}

/// Parsed marks for one row, already freed from header strings
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    /// Each evaluator's sum across all four criteria
    ThreeEvaluatorTotals { member1: f64, member2: f64, guide: f64 },
    /// One mark per criterion, no apportionment needed
    PerCriterionMarks([f64; CRITERIA_COUNT]),
    /// A single overall number, possibly out of 100
    AggregateTotal(f64),
}

impl RawInput {
    pub fn shape(&self) -> InputShape {
        match self {
            RawInput::ThreeEvaluatorTotals { .. } => InputShape::ThreeEvaluatorTotals,
            RawInput::PerCriterionMarks(_) => InputShape::PerCriterionMarks,
            RawInput::AggregateTotal(_) => InputShape::AggregateTotal,
        }
    }
}

/// Canonical marks plus each evaluator's breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub canonical: EvaluatorMarks,
    pub member1: EvaluatorMarks,
    pub member2: EvaluatorMarks,
    pub guide: EvaluatorMarks,
    /// Always `canonical.total()`
    pub total_marks: u32,
}

impl Reconciliation {
    /// Same marks stand in for the canonical set and all three evaluators
    fn uniform(marks: EvaluatorMarks) -> Self {
        Self {
            canonical: marks,
            member1: marks,
            member2: marks,
            guide: marks,
            total_marks: marks.total(),
        }
    }

    fn from_evaluators(member1: EvaluatorMarks, member2: EvaluatorMarks, guide: EvaluatorMarks) -> Self {
        let canonical = EvaluatorMarks(std::array::from_fn(|i| {
            average_non_zero(&[member1.get(i), member2.get(i), guide.get(i)])
        }));
        Self {
            canonical,
            member1,
            member2,
            guide,
            total_marks: canonical.total(),
        }
    }
}

/// Reconcile one row's raw marks against a weight configuration.
///
/// Raw values are expected to be finite and non-negative (the column mapper
/// rejects anything else as malformed).
pub fn reconcile(input: &RawInput, config: &WeightConfig) -> Result<Reconciliation> {
    match input {
        RawInput::ThreeEvaluatorTotals {
            member1,
            member2,
            guide,
        } => {
            let member1 = disaggregate(evaluator_total(*member1, config), config)?;
            let member2 = disaggregate(evaluator_total(*member2, config), config)?;
            let guide = disaggregate(evaluator_total(*guide, config), config)?;
            Ok(Reconciliation::from_evaluators(member1, member2, guide))
        }
        RawInput::PerCriterionMarks(marks) => {
            let marks = EvaluatorMarks(std::array::from_fn(|i| {
                let max = config.criteria[i].max_marks;
                let mark = truncate(marks[i]);
                if mark > max {
                    tracing::warn!(
                        criterion = %config.criteria[i].name,
                        mark,
                        max,
                        "criterion mark above maximum, clamping"
                    );
                }
                mark.min(max)
            }));
            Ok(Reconciliation::uniform(marks))
        }
        RawInput::AggregateTotal(raw) => {
            let total = normalize_aggregate(*raw, config.ceiling());
            Ok(Reconciliation::uniform(disaggregate(total, config)?))
        }
    }
}

/// Split a total across the criteria in proportion to their maxima
pub fn disaggregate(total: u32, config: &WeightConfig) -> Result<EvaluatorMarks> {
    let shares = apportion_by_weight(&config.weights(), total)?;
    let mut marks = [0; CRITERIA_COUNT];
    for (criterion, mark) in shares {
        marks[criterion] = mark;
    }
    Ok(EvaluatorMarks(marks))
}

/// Bring an aggregate total onto the configuration's scale.
///
/// Values up to the ceiling are used as-is (rounded half-up). Values in
/// `(ceiling, 100]` are read as percentages; anything larger is clamped.
pub fn normalize_aggregate(raw: f64, ceiling: u32) -> u32 {
    let rounded = round_half_up(raw);
    if rounded <= u64::from(ceiling) {
        return rounded as u32;
    }
    if rounded <= 100 {
        let scaled = round_half_up(raw / 100.0 * f64::from(ceiling));
        return scaled.min(u64::from(ceiling)) as u32;
    }
    ceiling
}

/// Evaluator totals are whole marks: truncate, then cap at the ceiling
fn evaluator_total(raw: f64, config: &WeightConfig) -> u32 {
    let total = truncate(raw);
    if total > config.ceiling() {
        tracing::warn!(
            total,
            ceiling = config.ceiling(),
            "evaluator total above ceiling, clamping"
        );
    }
    total.min(config.ceiling())
}

fn truncate(raw: f64) -> u32 {
    if raw.is_finite() && raw > 0.0 {
        raw.trunc().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

fn round_half_up(raw: f64) -> u64 {
    if raw.is_finite() && raw > 0.0 {
        (raw + 0.5).floor() as u64
    } else {
        0
    }
}

/// Half-up rounded mean of the non-zero marks, in integer arithmetic
fn average_non_zero(marks: &[u32]) -> u32 {
    let scored: Vec<u64> = marks.iter().filter(|m| **m > 0).map(|m| u64::from(*m)).collect();
    if scored.is_empty() {
        return 0;
    }
    let n = scored.len() as u64;
    let sum: u64 = scored.iter().sum();
    ((2 * sum + n) / (2 * n)) as u32
}
