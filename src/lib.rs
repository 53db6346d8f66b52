//! **mobench** orchestrates runs of evolutionary multi-objective
//! optimization solvers against benchmark problems and produces a
//! structured, self-describing result: the discovered trade-off surface,
//! per-generation quality indicators and a convergence verdict.
//!
//! The solver itself is *not* part of this crate. Selection, crossover,
//! mutation, non-dominated sorting and niching live behind the
//! [`Solver`](solver::Solver) trait; this crate validates and wires together
//! everything around a solver run:
//!
//! 1. The [problem catalog](problem) validates the requested benchmark
//!    problem against the structural constraints of its family (ZDT problems
//!    are rigidly bi-objective, DTLZ problems scale) and yields a descriptor
//!    with a sampled reference front and ideal/nadir points where the front
//!    is known analytically.
//! 2. The [algorithm factory](algorithm) builds a passive configuration for
//!    the requested algorithm; reference-direction based variants carry a
//!    Das-Dennis lattice on the unit simplex whose density shrinks as the
//!    objective count grows.
//! 3. The external solver runs the evolutionary loop and reports one
//!    [`GenerationRecord`](solver::GenerationRecord) per generation.
//! 4. The [indicator engine](indicator) annotates each record with inverted
//!    generational distance, generational distance and hypervolume, wherever
//!    the data for an indicator is available.
//! 5. The [convergence monitor](convergence) inspects the trailing window of
//!    the history with four independent stability heuristics.
//! 6. The [result assembler](result) combines everything into one
//!    [`OptimizationResult`](result::OptimizationResult) that serializes to
//!    the wire shape of the serving layer, whose request and response
//!    envelopes are fixed in [`api`].
//!
//! The run is a synchronous, CPU-bound, single-threaded computation. Nothing
//! is shared between concurrent runs: each run owns its problem, algorithm
//! and history. If the surrounding service wants responsiveness, it
//! schedules the whole run on a background worker; cancellation and timeouts
//! likewise wrap the entire run from outside.
//!
//! # Example
//!
//! A toy solver that "discovers" a fixed grid instead of evolving a
//! population is enough to drive the whole pipeline:
//!
//! ```
//! use mobench::{
//!   algorithm::Algorithm,
//!   problem::Problem,
//!   run::{execute, RunRequest},
//!   solver::{GenerationRecord, Solver, SolverError, SolverOutput},
//! };
//!
//! struct GridSolver;
//!
//! impl Solver for GridSolver {
//!   fn solve(
//!     &mut self,
//!     problem: &Problem,
//!     _algorithm: &Algorithm,
//!     n_gen: usize,
//!   ) -> Result<SolverOutput, SolverError> {
//!     let front: Vec<Vec<f64>> = (0..10)
//!       .map(|i| {
//!         let f1 = i as f64 / 9.0;
//!         vec![f1, 1.0 - f1.sqrt()]
//!       })
//!       .collect();
//!     let history = (1..=n_gen)
//!       .map(|gen| GenerationRecord::new(gen, gen * 100, front.clone()))
//!       .collect();
//!     Ok(SolverOutput {
//!       decision_vectors: Some(vec![vec![0.0; problem.n_var()]; 10]),
//!       objectives: Some(front),
//!       generations_run: n_gen,
//!       history,
//!     })
//!   }
//! }
//!
//! let request = RunRequest::builder()
//!   .problem("zdt1")
//!   .algorithm("nsga2")
//!   .n_gen(25)
//!   .build();
//! let result = execute(&mut GridSolver, &request).unwrap();
//! assert_eq!(result.history.len(), 25);
//! assert!(result.success);
//! ```
//!
//! A stochastic end-to-end demo lives in `demos/zdt1_random_search.rs`.

#![warn(missing_docs)]

pub mod algorithm;
pub mod api;
pub mod convergence;
pub mod error;
pub mod indicator;
pub mod problem;
pub mod result;
pub mod run;
pub mod score;
pub mod solver;
