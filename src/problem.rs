//! Benchmark problem catalog.
//!
//! A [`Problem`] is a passive descriptor of a benchmark instance: variable
//! and objective counts plus, when the front is known analytically, a sampled
//! reference Pareto front with the ideal and nadir points derived from it.
//! The objective functions themselves live in the external solver; the
//! catalog only validates a request against the structural constraints of
//! the problem family and hands out the descriptor.

use std::{fmt, str::FromStr};

use crate::{
  algorithm::reference_directions,
  error::ConfigurationError,
  score::Objectives,
};

/// Number of samples of a bi-objective analytic front.
const BI_OBJECTIVE_FRONT_SAMPLES: usize = 100;

/// Identifiers of supported benchmark problems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProblemId {
  /// ZDT1, bi-objective, convex front.
  Zdt1,
  /// ZDT2, bi-objective, concave front.
  Zdt2,
  /// DTLZ1, scalable objective count, linear front.
  Dtlz1,
  /// DTLZ2, scalable objective count, spherical front.
  Dtlz2,
}

impl ProblemId {
  /// All supported identifiers in catalog order.
  pub const ALL: [ProblemId; 4] = [
    ProblemId::Zdt1,
    ProblemId::Zdt2,
    ProblemId::Dtlz1,
    ProblemId::Dtlz2,
  ];

  /// The lowercase identifier used in requests and payloads.
  pub fn id(&self) -> &'static str {
    match self {
      ProblemId::Zdt1 => "zdt1",
      ProblemId::Zdt2 => "zdt2",
      ProblemId::Dtlz1 => "dtlz1",
      ProblemId::Dtlz2 => "dtlz2",
    }
  }

  /// Human readable name of the problem.
  pub fn name(&self) -> &'static str {
    match self {
      ProblemId::Zdt1 => "ZDT1",
      ProblemId::Zdt2 => "ZDT2",
      ProblemId::Dtlz1 => "DTLZ1",
      ProblemId::Dtlz2 => "DTLZ2",
    }
  }

  /// One line description of the problem.
  pub fn description(&self) -> &'static str {
    match self {
      ProblemId::Zdt1 => "ZDT1 benchmark problem",
      ProblemId::Zdt2 => "ZDT2 benchmark problem",
      ProblemId::Dtlz1 => "DTLZ1 benchmark problem",
      ProblemId::Dtlz2 => "DTLZ2 benchmark problem",
    }
  }

  /// Name of the problem family the identifier belongs to.
  pub fn family(&self) -> &'static str {
    match self {
      ProblemId::Zdt1 | ProblemId::Zdt2 => "ZDT",
      ProblemId::Dtlz1 | ProblemId::Dtlz2 => "DTLZ",
    }
  }

  /// Returns the objective count the problem family is fixed to, or `None`
  /// for families with a free objective count.
  pub fn fixed_objective_count(&self) -> Option<usize> {
    match self {
      // ZDT problems are rigidly bi-objective
      ProblemId::Zdt1 | ProblemId::Zdt2 => Some(2),
      ProblemId::Dtlz1 | ProblemId::Dtlz2 => None,
    }
  }
}

impl FromStr for ProblemId {
  type Err = ConfigurationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "zdt1" => Ok(ProblemId::Zdt1),
      "zdt2" => Ok(ProblemId::Zdt2),
      "dtlz1" => Ok(ProblemId::Dtlz1),
      "dtlz2" => Ok(ProblemId::Dtlz2),
      other => Err(ConfigurationError::UnknownProblem(other.to_owned())),
    }
  }
}

impl fmt::Display for ProblemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.id())
  }
}

/// An immutable descriptor of a resolved benchmark problem, owned by the run
/// that constructed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
  id: ProblemId,
  n_var: usize,
  n_obj: usize,
  pareto_front: Option<Vec<Objectives>>,
  ideal_point: Option<Objectives>,
  nadir_point: Option<Objectives>,
}

impl Problem {
  /// Resolves `identifier` into a problem descriptor with `n_var` decision
  /// variables and `n_obj` objectives.
  ///
  /// Fails if the identifier is unrecognized, if either count is zero, or if
  /// the identifier belongs to a family with a fixed objective count and
  /// `n_obj` does not match it. Families with a free objective count accept
  /// `n_obj` as given.
  pub fn resolve(
    identifier: &str,
    n_var: usize,
    n_obj: usize,
  ) -> Result<Self, ConfigurationError> {
    let id: ProblemId = identifier.parse()?;
    if n_var == 0 {
      return Err(ConfigurationError::NonPositiveParameter("n_var"));
    }
    if n_obj == 0 {
      return Err(ConfigurationError::NonPositiveParameter("n_obj"));
    }
    if let Some(expected) = id.fixed_objective_count() {
      if n_obj != expected {
        return Err(ConfigurationError::FixedObjectiveCount {
          family: id.family(),
          expected,
          requested: n_obj,
        });
      }
    }

    let pareto_front = sample_front(id, n_obj);
    let ideal_point = pareto_front.as_deref().map(coordinate_minima);
    let nadir_point = pareto_front.as_deref().map(coordinate_maxima);
    Ok(Self {
      id,
      n_var,
      n_obj,
      pareto_front,
      ideal_point,
      nadir_point,
    })
  }

  /// The identifier this descriptor was resolved from.
  pub fn id(&self) -> ProblemId {
    self.id
  }

  /// Number of decision variables.
  pub fn n_var(&self) -> usize {
    self.n_var
  }

  /// Number of objectives.
  pub fn n_obj(&self) -> usize {
    self.n_obj
  }

  /// The sampled reference Pareto front, if known analytically.
  pub fn pareto_front(&self) -> Option<&[Objectives]> {
    self.pareto_front.as_deref()
  }

  /// Per-objective minima over the reference front, if known.
  pub fn ideal_point(&self) -> Option<&[f64]> {
    self.ideal_point.as_deref()
  }

  /// Per-objective maxima over the reference front, if known.
  pub fn nadir_point(&self) -> Option<&[f64]> {
    self.nadir_point.as_deref()
  }
}

/// Samples the analytic Pareto front of a problem, or returns `None` when
/// the front is not known.
fn sample_front(id: ProblemId, n_obj: usize) -> Option<Vec<Objectives>> {
  let front = match id {
    // f2 = 1 - sqrt(f1) over f1 in [0, 1]
    ProblemId::Zdt1 => bi_objective_front(|f1| 1.0 - f1.sqrt()),
    // f2 = 1 - f1^2 over f1 in [0, 1]
    ProblemId::Zdt2 => bi_objective_front(|f1| 1.0 - f1.powi(2)),
    // the simplex sum f_i = 0.5
    ProblemId::Dtlz1 => simplex_lattice(n_obj)
      .into_iter()
      .map(|dir| dir.into_iter().map(|v| v * 0.5).collect())
      .collect(),
    // the unit sphere octant sum f_i^2 = 1
    ProblemId::Dtlz2 => simplex_lattice(n_obj)
      .into_iter()
      .map(|dir| {
        let norm = dir.iter().map(|v| v * v).sum::<f64>().sqrt();
        dir.into_iter().map(|v| v / norm).collect()
      })
      .collect(),
  };
  Some(front)
}

/// Samples a bi-objective front `f2 = shape(f1)` at evenly spaced `f1`.
fn bi_objective_front(shape: impl Fn(f64) -> f64) -> Vec<Objectives> {
  (0..BI_OBJECTIVE_FRONT_SAMPLES)
    .map(|i| {
      let f1 = i as f64 / (BI_OBJECTIVE_FRONT_SAMPLES - 1) as f64;
      vec![f1, shape(f1)]
    })
    .collect()
}

/// Returns a simplex lattice dense enough to sample a DTLZ front, coarser
/// for higher dimensional objective spaces.
fn simplex_lattice(n_obj: usize) -> Vec<Objectives> {
  let partitions = match n_obj {
    1 => 1,
    2 => BI_OBJECTIVE_FRONT_SAMPLES - 1,
    3 => 12,
    _ => 5,
  };
  reference_directions(n_obj, partitions)
}

fn coordinate_minima(front: &[Objectives]) -> Objectives {
  fold_coordinates(front, f64::min)
}

fn coordinate_maxima(front: &[Objectives]) -> Objectives {
  fold_coordinates(front, f64::max)
}

fn fold_coordinates(
  front: &[Objectives],
  fold: impl Fn(f64, f64) -> f64,
) -> Objectives {
  let mut acc = front[0].clone();
  for point in &front[1..] {
    for (a, &v) in acc.iter_mut().zip(point) {
      *a = fold(*a, v);
    }
  }
  acc
}

#[cfg(test)]
mod tests {
  use float_cmp::assert_approx_eq;

  use super::*;

  #[test]
  fn test_resolve_zdt1() {
    let problem = Problem::resolve("zdt1", 30, 2).unwrap();
    assert_eq!(problem.id(), ProblemId::Zdt1);
    assert_eq!(problem.n_var(), 30);
    assert_eq!(problem.n_obj(), 2);
  }

  #[test]
  fn test_zdt_rejects_non_bi_objective_requests() {
    for n_obj in [1, 3, 5] {
      let err = Problem::resolve("zdt1", 10, n_obj).unwrap_err();
      assert_eq!(
        err,
        ConfigurationError::FixedObjectiveCount {
          family: "ZDT",
          expected: 2,
          requested: n_obj,
        }
      );
    }
    assert!(Problem::resolve("zdt2", 10, 3).is_err());
  }

  #[test]
  fn test_dtlz_accepts_any_positive_objective_count() {
    for n_obj in [2, 3, 5, 8] {
      let problem = Problem::resolve("dtlz2", 10, n_obj).unwrap();
      assert_eq!(problem.n_obj(), n_obj);
    }
  }

  #[test]
  fn test_resolve_unknown_problem() {
    let err = Problem::resolve("schaffer", 10, 2).unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownProblem("schaffer".into()));
  }

  #[test]
  fn test_resolve_rejects_zero_counts() {
    assert_eq!(
      Problem::resolve("zdt1", 0, 2).unwrap_err(),
      ConfigurationError::NonPositiveParameter("n_var")
    );
    assert_eq!(
      Problem::resolve("dtlz2", 10, 0).unwrap_err(),
      ConfigurationError::NonPositiveParameter("n_obj")
    );
  }

  #[test]
  fn test_zdt1_front_shape() {
    let problem = Problem::resolve("zdt1", 30, 2).unwrap();
    let front = problem.pareto_front().unwrap();
    assert_eq!(front.len(), 100);
    assert_eq!(front[0], vec![0.0, 1.0]);
    assert_eq!(front[99], vec![1.0, 0.0]);
    for point in front {
      assert_approx_eq!(f64, point[1], 1.0 - point[0].sqrt(), epsilon = 1e-12);
    }
  }

  #[test]
  fn test_dtlz2_front_lies_on_unit_sphere() {
    let problem = Problem::resolve("dtlz2", 10, 3).unwrap();
    let front = problem.pareto_front().unwrap();
    assert_eq!(front.len(), 91);
    for point in front {
      let norm = point.iter().map(|v| v * v).sum::<f64>().sqrt();
      assert_approx_eq!(f64, norm, 1.0, epsilon = 1e-12);
    }
  }

  #[test]
  fn test_ideal_and_nadir_derive_from_front() {
    let problem = Problem::resolve("zdt1", 30, 2).unwrap();
    assert_eq!(problem.ideal_point().unwrap(), &[0.0, 0.0]);
    assert_eq!(problem.nadir_point().unwrap(), &[1.0, 1.0]);

    let problem = Problem::resolve("dtlz1", 10, 3).unwrap();
    assert_eq!(problem.ideal_point().unwrap(), &[0.0, 0.0, 0.0]);
    assert_eq!(problem.nadir_point().unwrap(), &[0.5, 0.5, 0.5]);
  }
}
