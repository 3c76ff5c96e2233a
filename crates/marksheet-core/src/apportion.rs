//! Largest-remainder ("Hamilton") apportionment
//!
//! Turns a proportional allocation into integer shares that sum exactly to a
//! target. Every share is floored, then the leftover units go one at a time to
//! the shares with the largest fractional parts. Equal fractional parts keep
//! the input order, so identical inputs always produce identical outputs.
//!
//! Two entry points share the distribution step:
//! - [`apportion`] takes already-scaled real shares.
//! - [`apportion_by_weight`] takes integer weights and works in exact integer
//!   arithmetic (`target * weight / total_weight`), which is what the
//!   reconciliation engine uses so results do not depend on float rounding.

use std::cmp::Ordering;

use thiserror::Error;

/// Defects raised by the apportionment primitive.
///
/// These indicate a caller bug (bad scaling upstream), never bad spreadsheet data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApportionError {
    #[error("cannot apportion {target} across an empty share set")]
    EmptyShares { target: u32 },

    #[error("cannot apportion {target} across weights that sum to zero")]
    ZeroWeight { target: u32 },

    #[error("share #{index} is not a finite non-negative number: {value}")]
    InvalidShare { index: usize, value: f64 },

    #[error("shares overshoot target {target}: floors already sum to {floor_sum}")]
    Overshoot { target: u32, floor_sum: u64 },
}

/// Apportion `target` across real-valued shares.
///
/// `shares` should already be scaled so that they sum close to `target`.
/// The result preserves the input order of keys.
pub fn apportion<K: Clone>(
    shares: &[(K, f64)],
    target: u32,
) -> Result<Vec<(K, u32)>, ApportionError> {
    if let Some((index, value)) = shares
        .iter()
        .enumerate()
        .find(|(_, (_, v))| !v.is_finite() || *v < 0.0)
        .map(|(i, (_, v))| (i, *v))
    {
        return Err(ApportionError::InvalidShare { index, value });
    }
    if target == 0 {
        return Ok(shares.iter().map(|(k, _)| (k.clone(), 0)).collect());
    }
    if shares.is_empty() {
        return Err(ApportionError::EmptyShares { target });
    }

    let floors: Vec<u64> = shares.iter().map(|(_, v)| v.floor() as u64).collect();
    let fractions: Vec<f64> = shares
        .iter()
        .zip(&floors)
        .map(|((_, v), f)| v - *f as f64)
        .collect();

    let order = rank_descending(shares.len(), |a, b| fractions[a].total_cmp(&fractions[b]));
    let settled = settle(floors, &order, target)?;

    Ok(shares
        .iter()
        .zip(settled)
        .map(|((k, _), n)| (k.clone(), n))
        .collect())
}

/// Apportion `target` in proportion to integer weights, exactly.
///
/// Equivalent to `apportion(scale(weights, target), target)` but with the
/// fractional parts compared as integer remainders over the common
/// denominator, so ties are real ties rather than float noise.
pub fn apportion_by_weight<K: Clone>(
    weights: &[(K, u32)],
    target: u32,
) -> Result<Vec<(K, u32)>, ApportionError> {
    if target == 0 {
        return Ok(weights.iter().map(|(k, _)| (k.clone(), 0)).collect());
    }
    if weights.is_empty() {
        return Err(ApportionError::EmptyShares { target });
    }

    let total_weight: u64 = weights.iter().map(|(_, w)| u64::from(*w)).sum();
    if total_weight == 0 {
        return Err(ApportionError::ZeroWeight { target });
    }

    let products: Vec<u64> = weights
        .iter()
        .map(|(_, w)| u64::from(target) * u64::from(*w))
        .collect();
    let floors: Vec<u64> = products.iter().map(|p| p / total_weight).collect();
    let remainders: Vec<u64> = products.iter().map(|p| p % total_weight).collect();

    let order = rank_descending(weights.len(), |a, b| remainders[a].cmp(&remainders[b]));
    let settled = settle(floors, &order, target)?;

    Ok(weights
        .iter()
        .zip(settled)
        .map(|((k, _), n)| (k.clone(), n))
        .collect())
}

/// Scale integer weights to real shares of `target` (`target * w / sum(w)`).
pub fn scale<K: Clone>(weights: &[(K, u32)], target: u32) -> Vec<(K, f64)> {
    let total: u64 = weights.iter().map(|(_, w)| u64::from(*w)).sum();
    weights
        .iter()
        .map(|(k, w)| {
            let share = if total == 0 {
                0.0
            } else {
                f64::from(target) * f64::from(*w) / total as f64
            };
            (k.clone(), share)
        })
        .collect()
}

/// Indices sorted by descending key; `sort_by` is stable so ties keep input order.
fn rank_descending(len: usize, cmp: impl Fn(usize, usize) -> Ordering) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.sort_by(|&a, &b| cmp(b, a));
    order
}

/// Hand out `target - sum(floors)` extra units in rank order, wrapping if needed.
fn settle(mut floors: Vec<u64>, order: &[usize], target: u32) -> Result<Vec<u32>, ApportionError> {
    let floor_sum: u64 = floors.iter().sum();
    if floor_sum > u64::from(target) {
        return Err(ApportionError::Overshoot { target, floor_sum });
    }

    let remainder = u64::from(target) - floor_sum;
    for i in 0..remainder {
        let slot = order[(i % order.len() as u64) as usize];
        floors[slot] += 1;
    }

    // Every value is bounded by target, which fits in u32
    Ok(floors.into_iter().map(|v| v as u32).collect())
}
