//! Convergence heuristics over the trailing generations of a run.
//!
//! Four independent checks inspect the last few generation records: mean
//! objective stability, hypervolume stability, non-dominated-count stability
//! and IGD stability. A run is declared converged as soon as any one of them
//! fires. This flags apparent plateauing of observable metrics; it is a
//! heuristic, not a proof of optimality.

use itertools::Itertools;
use typed_builder::TypedBuilder;

use crate::{score::Objectives, solver::GenerationRecord};

/// Thresholds and window size of the convergence checks.
///
/// The defaults reproduce long-observed behavior and are not adapted to
/// problem scale; change them only with evidence.
#[derive(Debug, Clone, Copy, PartialEq, TypedBuilder)]
pub struct ConvergenceCriteria {
  /// Number of trailing generations inspected.
  #[builder(default = 5)]
  window: usize,
  /// Upper bound on the mean successive difference of a stable metric.
  #[builder(default = 1e-3)]
  stall_tolerance: f64,
  /// Upper bound on the coefficient of variation of a stable
  /// non-dominated-set size.
  #[builder(default = 0.05)]
  count_variation_limit: f64,
}

impl Default for ConvergenceCriteria {
  fn default() -> Self {
    Self::builder().build()
  }
}

/// Returns whether the run described by `history` has converged.
///
/// Histories shorter than two generations are never converged. Otherwise the
/// checks run over the window of the last [`window`](ConvergenceCriteria)
/// generations (or the whole history when shorter), in order: objective
/// stability, hypervolume stability, count stability, IGD stability. The
/// first match wins, but each check is an independent predicate.
pub fn has_converged(
  history: &[GenerationRecord],
  criteria: &ConvergenceCriteria,
) -> bool {
  if history.len() < 2 {
    return false;
  }
  let start = history.len().saturating_sub(criteria.window);
  let window = &history[start..];
  objective_stability(window, criteria.stall_tolerance)
    || hypervolume_stability(window, criteria.stall_tolerance)
    || count_stability(window, criteria.count_variation_limit)
    || igd_stability(window, criteria.stall_tolerance)
}

/// Fires when the per-generation means of all objective values change, on
/// average, by less than `tolerance` between successive generations.
pub fn objective_stability(
  window: &[GenerationRecord],
  tolerance: f64,
) -> bool {
  if window.len() < 2 {
    return false;
  }
  let means: Option<Vec<f64>> = window
    .iter()
    .map(|generation| mean_objective(generation.non_dominated()))
    .collect();
  means
    .as_deref()
    .and_then(mean_absolute_difference)
    .is_some_and(|change| change < tolerance)
}

/// Fires when every generation in the window carries a hypervolume and the
/// successive values change, on average, by less than `tolerance`.
pub fn hypervolume_stability(
  window: &[GenerationRecord],
  tolerance: f64,
) -> bool {
  metric_stability(window, GenerationRecord::hv, tolerance)
}

/// Fires when every generation in the window carries an IGD and the
/// successive values change, on average, by less than `tolerance`.
pub fn igd_stability(window: &[GenerationRecord], tolerance: f64) -> bool {
  metric_stability(window, GenerationRecord::igd, tolerance)
}

/// Fires when the non-dominated-set sizes across the window are identical,
/// or their coefficient of variation is below `variation_limit`.
pub fn count_stability(
  window: &[GenerationRecord],
  variation_limit: f64,
) -> bool {
  if window.len() < 2 {
    return false;
  }
  let counts: Vec<usize> =
    window.iter().map(GenerationRecord::n_nds).collect();
  if counts.iter().all_equal() {
    return true;
  }
  // unequal counts, so the mean is positive
  let mean =
    counts.iter().sum::<usize>() as f64 / counts.len() as f64;
  let variance = counts
    .iter()
    .map(|&count| (count as f64 - mean).powi(2))
    .sum::<f64>()
    / counts.len() as f64;
  variance.sqrt() / mean < variation_limit
}

fn metric_stability(
  window: &[GenerationRecord],
  metric: impl Fn(&GenerationRecord) -> Option<f64>,
  tolerance: f64,
) -> bool {
  if window.len() < 2 {
    return false;
  }
  let values: Option<Vec<f64>> = window.iter().map(metric).collect();
  values
    .as_deref()
    .and_then(mean_absolute_difference)
    .is_some_and(|change| change < tolerance)
}

/// Mean of all objective values across a non-dominated set, or `None` for an
/// empty set.
fn mean_objective(set: &[Objectives]) -> Option<f64> {
  let count: usize = set.iter().map(Vec::len).sum();
  (count > 0)
    .then(|| set.iter().flatten().sum::<f64>() / count as f64)
}

/// Mean of absolute successive differences, or `None` for fewer than two
/// values.
fn mean_absolute_difference(values: &[f64]) -> Option<f64> {
  (values.len() >= 2).then(|| {
    let count = values.len() - 1;
    values
      .iter()
      .tuple_windows()
      .map(|(a, b)| (b - a).abs())
      .sum::<f64>()
      / count as f64
  })
}
