use crate::{
    core::variant::{Column, VariantTable},
    error::SvevalError,
    utils::util::Result,
};
use serde::Serialize;
use std::collections::HashSet;

fn require_column(table: &VariantTable, column: Column) -> Result<()> {
    if table.has_column(column) {
        Ok(())
    } else {
        Err(SvevalError::missing_column(column.name()))
    }
}

/// Fraction of calls flagged as true positives, 1.0 for an empty call set.
pub fn precision(calls: &VariantTable) -> Result<f64> {
    if calls.is_empty() {
        return Ok(1.0);
    }
    require_column(calls, Column::IsTp)?;
    let tp = calls.iter().filter(|record| record.is_tp).count();
    Ok(tp as f64 / calls.len() as f64)
}

/// Distinct truth variants recovered by true-positive calls over the size of
/// the truth set, 0.0 for an empty call set.
///
/// Every distinct MATCHING value among true positives counts once, including
/// the unmatched sentinel.
pub fn recall(calls: &VariantTable, truth: &VariantTable) -> Result<f64> {
    if calls.is_empty() {
        return Ok(0.0);
    }
    require_column(calls, Column::IsTp)?;
    require_column(calls, Column::Matching)?;

    let truth_indices: HashSet<usize> = truth.indices().into_iter().collect();
    let matches = calls
        .iter()
        .filter(|record| {
            record
                .matching
                .and_then(|m| usize::try_from(m).ok())
                .is_some_and(|m| truth_indices.contains(&m))
        })
        .count();
    log::trace!(
        "{matches} of {} calls reference the truth set",
        calls.len()
    );

    if truth.is_empty() {
        return Err(SvevalError::EmptyTruthSet);
    }
    let tp: HashSet<Option<i64>> = calls
        .iter()
        .filter(|record| record.is_tp)
        .map(|record| record.matching)
        .collect();
    Ok(tp.len() as f64 / truth.len() as f64)
}

/// Phred-scales a probability: `-10 * log10(prob)`.
pub fn phred_scale(prob: f64) -> Result<f64> {
    if prob.is_nan() || prob <= 0.0 {
        return Err(SvevalError::InvalidProbability { prob });
    }
    Ok(-10.0 * prob.log10())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalSummary {
    pub calls: usize,
    pub truth: usize,
    pub precision: f64,
    pub recall: f64,
}

pub fn evaluate(calls: &VariantTable, truth: &VariantTable) -> Result<EvalSummary> {
    let summary = EvalSummary {
        calls: calls.len(),
        truth: truth.len(),
        precision: precision(calls)?,
        recall: recall(calls, truth)?,
    };
    log::info!(
        "Precision {:.4}, recall {:.4} ({} calls, {} truth variants)",
        summary.precision,
        summary.recall,
        summary.calls,
        summary.truth
    );
    Ok(summary)
}
