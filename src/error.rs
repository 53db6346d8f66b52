//! Error taxonomy of the orchestration engine.
//!
//! Errors split into two classes. [`ConfigurationError`] covers everything
//! the caller can fix by resubmitting with corrected parameters: unknown
//! identifiers and objective-count mismatches. [`RunError`] covers whole-run
//! failures, including malformed output from the external solver, which is
//! fatal for the run. No error is ever retried internally.

use thiserror::Error;

/// A recoverable configuration error: the request named something the
/// catalog or the factory does not recognize, or violated a structural
/// constraint of a problem family.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
  /// The requested problem identifier is not in the catalog.
  #[error("unsupported problem: {0}")]
  UnknownProblem(String),

  /// The requested algorithm identifier is not known to the factory.
  #[error("unknown algorithm: {0}")]
  UnknownAlgorithm(String),

  /// The problem family has a fixed objective count and the request
  /// asked for a different one.
  #[error(
    "{family} problems are {expected}-objective only, got n_obj={requested}"
  )]
  FixedObjectiveCount {
    /// Name of the problem family, e.g. "ZDT".
    family: &'static str,
    /// The objective count the family is fixed to.
    expected: usize,
    /// The objective count the caller asked for.
    requested: usize,
  },

  /// A count parameter that must be positive was zero.
  #[error("{0} must be positive")]
  NonPositiveParameter(&'static str),
}

/// A failure of a whole optimization run.
#[derive(Debug, Error)]
pub enum RunError {
  /// The run was misconfigured. See [`ConfigurationError`].
  #[error(transparent)]
  Configuration(#[from] ConfigurationError),

  /// The external solver did not produce a field the result assembler
  /// requires. Fatal for the run, surfaced to the caller as is.
  #[error("solver output is missing required field `{0}`")]
  IncompleteSolverOutput(&'static str),

  /// The external solver itself failed. The message carries whatever
  /// diagnostic the solver reported.
  #[error("solver failed: {0}")]
  Solver(String),
}
