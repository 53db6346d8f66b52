//! Orchestration of one optimization run.
//!
//! [`execute`] wires the pieces together: it resolves the problem, builds
//! the algorithm configuration, hands both to the external solver, annotates
//! every returned generation record with quality indicators, classifies
//! convergence and assembles the final payload. The whole run is a
//! synchronous, single-threaded computation that blocks the caller; nothing
//! is shared between concurrent runs, and cancellation or timeouts belong in
//! a wrapper around the entire call, not inside it.

use std::time::Instant;

use log::{debug, info};
use typed_builder::TypedBuilder;

use crate::{
  algorithm::Algorithm,
  convergence::{self, ConvergenceCriteria},
  error::RunError,
  indicator,
  problem::Problem,
  result::{self, OptimizationResult, RunStatistics},
  solver::Solver,
};

/// Parameters of one optimization run.
///
/// # Examples
/// ```
/// use mobench::run::RunRequest;
///
/// let request = RunRequest::builder()
///   .problem("dtlz2")
///   .algorithm("nsga3")
///   .n_obj(3)
///   .build();
/// assert_eq!(request.pop_size(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct RunRequest {
  /// Problem identifier, e.g. `"zdt1"`.
  #[builder(setter(into))]
  problem: String,
  /// Algorithm identifier, e.g. `"nsga2"`.
  #[builder(setter(into))]
  algorithm: String,
  /// Number of decision variables.
  #[builder(default = 10)]
  n_var: usize,
  /// Number of objectives.
  #[builder(default = 2)]
  n_obj: usize,
  /// Population size.
  #[builder(default = 100)]
  pop_size: usize,
  /// Generation count handed to the solver as its termination parameter.
  #[builder(default = 200)]
  n_gen: usize,
}

impl RunRequest {
  /// Requested problem identifier.
  pub fn problem(&self) -> &str {
    &self.problem
  }

  /// Requested algorithm identifier.
  pub fn algorithm(&self) -> &str {
    &self.algorithm
  }

  /// Requested decision-variable count.
  pub fn n_var(&self) -> usize {
    self.n_var
  }

  /// Requested objective count.
  pub fn n_obj(&self) -> usize {
    self.n_obj
  }

  /// Requested population size.
  pub fn pop_size(&self) -> usize {
    self.pop_size
  }

  /// Requested generation count.
  pub fn n_gen(&self) -> usize {
    self.n_gen
  }

  /// The statistics block echoed in the result payload.
  pub fn statistics(&self) -> RunStatistics {
    RunStatistics {
      n_var: self.n_var,
      n_obj: self.n_obj,
      pop_size: self.pop_size,
      n_gen: self.n_gen,
    }
  }
}

/// Executes one optimization run with the default convergence criteria.
///
/// See [`execute_with_criteria`].
pub fn execute<S: Solver>(
  solver: &mut S,
  request: &RunRequest,
) -> Result<OptimizationResult, RunError> {
  execute_with_criteria(solver, request, &ConvergenceCriteria::default())
}

/// Executes one optimization run.
///
/// Validation happens before the solver is invoked: an unknown identifier or
/// an objective-count mismatch fails the run without running a single
/// generation. A solver failure or a solver output missing required fields
/// also fails the whole run; no step is retried.
pub fn execute_with_criteria<S: Solver>(
  solver: &mut S,
  request: &RunRequest,
  criteria: &ConvergenceCriteria,
) -> Result<OptimizationResult, RunError> {
  let problem =
    Problem::resolve(&request.problem, request.n_var, request.n_obj)?;
  let algorithm =
    Algorithm::build(&request.algorithm, request.n_obj, request.pop_size)?;

  info!(
    "starting {} on {}: n_var={}, n_obj={}, pop_size={}, n_gen={}",
    algorithm.id().name(),
    problem.id().name(),
    request.n_var,
    request.n_obj,
    request.pop_size,
    request.n_gen
  );

  let started = Instant::now();
  let mut output = solver
    .solve(&problem, &algorithm, request.n_gen)
    .map_err(|source| RunError::Solver(source.to_string()))?;
  let execution_time = started.elapsed();

  for record in &mut output.history {
    indicator::annotate(record, &problem);
    debug!(
      "generation {}: n_eval={}, n_nds={}, igd={:?}, hv={:?}",
      record.n_gen(),
      record.n_eval(),
      record.n_nds(),
      record.igd(),
      record.hv()
    );
  }

  let converged = convergence::has_converged(&output.history, criteria);
  info!(
    "{} generations in {:.3}s, converged: {converged}",
    output.generations_run,
    execution_time.as_secs_f64()
  );

  result::assemble(
    &problem,
    &algorithm,
    output,
    converged,
    execution_time,
    request.statistics(),
  )
}
