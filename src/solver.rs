//! The contract between the orchestration engine and an external
//! evolutionary solver.
//!
//! The solver is a black box: given a [`Problem`] and an [`Algorithm`]
//! configuration it runs the evolutionary loop for up to `n_gen` generations
//! (it may stop earlier) and reports a [`SolverOutput`] with the final
//! population and one [`GenerationRecord`] per executed generation. How
//! selection, recombination, mutation or niching work inside is of no
//! concern here.

use std::error::Error;

use crate::{algorithm::Algorithm, problem::Problem, score::Objectives};

/// The error type solvers are free to fail with.
pub type SolverError = Box<dyn Error + Send + Sync>;

/// An external evolutionary solver.
pub trait Solver {
  /// Runs the evolutionary loop on `problem` under the `algorithm`
  /// configuration for at most `n_gen` generations.
  fn solve(
    &mut self,
    problem: &Problem,
    algorithm: &Algorithm,
    n_gen: usize,
  ) -> Result<SolverOutput, SolverError>;
}

/// A snapshot of the search state after one generation.
///
/// Created once per generation by the solver. The indicator engine attaches
/// indicator values exactly once; the record is read-only afterwards.
/// Indicators that cannot be computed for a run stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRecord {
  n_gen: usize,
  n_eval: usize,
  non_dominated: Vec<Objectives>,
  igd: Option<f64>,
  gd: Option<f64>,
  hv: Option<f64>,
}

impl GenerationRecord {
  /// Creates a record for generation `n_gen` (1-based) with `n_eval`
  /// cumulative objective evaluations and the current non-dominated
  /// objective set.
  pub fn new(
    n_gen: usize,
    n_eval: usize,
    non_dominated: Vec<Objectives>,
  ) -> Self {
    Self {
      n_gen,
      n_eval,
      non_dominated,
      igd: None,
      gd: None,
      hv: None,
    }
  }

  /// 1-based generation index.
  pub fn n_gen(&self) -> usize {
    self.n_gen
  }

  /// Cumulative number of objective evaluations up to this generation.
  pub fn n_eval(&self) -> usize {
    self.n_eval
  }

  /// The non-dominated objective set of this generation.
  pub fn non_dominated(&self) -> &[Objectives] {
    &self.non_dominated
  }

  /// Size of the non-dominated set.
  pub fn n_nds(&self) -> usize {
    self.non_dominated.len()
  }

  /// Inverted generational distance, once attached.
  pub fn igd(&self) -> Option<f64> {
    self.igd
  }

  /// Generational distance, once attached.
  pub fn gd(&self) -> Option<f64> {
    self.gd
  }

  /// Hypervolume, once attached.
  pub fn hv(&self) -> Option<f64> {
    self.hv
  }

  pub(crate) fn attach_indicators(
    &mut self,
    igd: Option<f64>,
    gd: Option<f64>,
    hv: Option<f64>,
  ) {
    self.igd = igd;
    self.gd = gd;
    self.hv = hv;
  }
}

/// Everything an external solver hands back after a run.
///
/// The final population fields are optional on purpose: a black-box solver
/// may fail to populate them, and the result assembler treats their absence
/// as a fatal, non-retried error instead of guessing.
#[derive(Debug, Clone, Default)]
pub struct SolverOutput {
  /// Decision vectors of the final non-dominated set.
  pub decision_vectors: Option<Vec<Vec<f64>>>,
  /// Objective vectors of the final non-dominated set.
  pub objectives: Option<Vec<Objectives>>,
  /// Number of generations the solver actually executed.
  pub generations_run: usize,
  /// One record per executed generation, in order.
  pub history: Vec<GenerationRecord>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_record_has_no_indicators() {
    let record = GenerationRecord::new(1, 100, vec![vec![0.5, 0.5]]);
    assert_eq!(record.n_gen(), 1);
    assert_eq!(record.n_eval(), 100);
    assert_eq!(record.n_nds(), 1);
    assert_eq!(record.igd(), None);
    assert_eq!(record.gd(), None);
    assert_eq!(record.hv(), None);
  }

  #[test]
  fn test_attach_indicators() {
    let mut record = GenerationRecord::new(3, 300, vec![vec![0.1, 0.9]]);
    record.attach_indicators(Some(0.01), Some(0.02), None);
    assert_eq!(record.igd(), Some(0.01));
    assert_eq!(record.gd(), Some(0.02));
    assert_eq!(record.hv(), None);
  }
}
