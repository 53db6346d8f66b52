//! Assembly of the final, self-describing result payload.
//!
//! [`assemble`] is a pure data transformation from the solver output, the
//! annotated generation history and the convergence verdict into one
//! [`OptimizationResult`]. It performs no computation of its own and fails
//! only when the solver output lacks a required field, which aborts the run.

use std::time::Duration;

use serde::Serialize;

use crate::{
  algorithm::Algorithm,
  error::RunError,
  problem::Problem,
  score::Objectives,
  solver::{GenerationRecord, SolverOutput},
};

/// Input parameters echoed back in the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStatistics {
  /// Number of decision variables.
  pub n_var: usize,
  /// Number of objectives.
  pub n_obj: usize,
  /// Population size.
  pub pop_size: usize,
  /// Requested generation count.
  pub n_gen: usize,
}

/// The discovered trade-off surface in both spaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoFront {
  /// Objective vectors of the final non-dominated set.
  pub objectives: Vec<Objectives>,
  /// Decision vectors of the final non-dominated set.
  pub variables: Vec<Vec<f64>>,
}

/// One entry of the per-generation history in the payload. Indicator keys
/// are omitted entirely when a value was not computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
  /// 1-based generation index.
  pub n_gen: usize,
  /// Cumulative evaluation count.
  pub n_eval: usize,
  /// Size of the non-dominated set.
  pub n_nds: usize,
  /// Inverted generational distance, when computed.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub igd: Option<f64>,
  /// Generational distance, when computed.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub gd: Option<f64>,
  /// Hypervolume, when computed.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub hv: Option<f64>,
}

impl From<&GenerationRecord> for HistoryEntry {
  fn from(record: &GenerationRecord) -> Self {
    Self {
      n_gen: record.n_gen(),
      n_eval: record.n_eval(),
      n_nds: record.n_nds(),
      igd: record.igd(),
      gd: record.gd(),
      hv: record.hv(),
    }
  }
}

/// Objective-space bounds of the problem, serialized as explicit nulls when
/// unknown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceBounds {
  /// Per-objective best-case bound.
  pub ideal_point: Option<Objectives>,
  /// Per-objective worst-case bound.
  pub nadir_point: Option<Objectives>,
}

/// The complete description of a finished optimization run.
///
/// Constructed once by [`assemble`] and read-only afterwards. Serializes to
/// the wire shape consumed by the web layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationResult {
  /// Decision vectors of the final non-dominated set.
  #[serde(rename = "X")]
  pub x: Vec<Vec<f64>>,
  /// Objective vectors of the final non-dominated set.
  #[serde(rename = "F")]
  pub f: Vec<Objectives>,
  /// Number of generations the solver executed.
  pub generation: usize,
  /// The convergence verdict.
  pub success: bool,
  /// Wall-clock duration of the solver run, in seconds.
  pub execution_time: f64,
  /// Identifier of the problem the run was configured with.
  pub problem_name: String,
  /// Identifier of the algorithm the run was configured with.
  pub algorithm_name: String,
  /// Echoed input parameters.
  pub statistics: RunStatistics,
  /// The discovered trade-off surface.
  pub pareto_front: ParetoFront,
  /// Per-generation progress with attached indicators.
  pub history: Vec<HistoryEntry>,
  /// Objective-space bounds, when known.
  pub convergence: ConvergenceBounds,
}

/// Combines the solver output, the annotated history and the convergence
/// verdict into the final payload.
///
/// Fails with [`RunError::IncompleteSolverOutput`] if the solver did not
/// report final decision or objective vectors; such a run is aborted and the
/// error is surfaced to the caller as is.
pub fn assemble(
  problem: &Problem,
  algorithm: &Algorithm,
  output: SolverOutput,
  converged: bool,
  execution_time: Duration,
  statistics: RunStatistics,
) -> Result<OptimizationResult, RunError> {
  let x = output
    .decision_vectors
    .ok_or(RunError::IncompleteSolverOutput("X"))?;
  let f = output
    .objectives
    .ok_or(RunError::IncompleteSolverOutput("F"))?;
  let history = output.history.iter().map(HistoryEntry::from).collect();

  Ok(OptimizationResult {
    pareto_front: ParetoFront {
      objectives: f.clone(),
      variables: x.clone(),
    },
    x,
    f,
    generation: output.generations_run,
    success: converged,
    execution_time: execution_time.as_secs_f64(),
    problem_name: problem.id().id().to_owned(),
    algorithm_name: algorithm.id().id().to_owned(),
    statistics,
    history,
    convergence: ConvergenceBounds {
      ideal_point: problem.ideal_point().map(<[f64]>::to_vec),
      nadir_point: problem.nadir_point().map(<[f64]>::to_vec),
    },
  })
}
