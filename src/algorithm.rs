//! Algorithm configurations and the factory that builds them.
//!
//! An [`Algorithm`] is a passive description of an evolutionary solver
//! configuration: an identifier, a population size and variant-specific
//! parameters. Decomposition and reference-direction based variants carry a
//! structured lattice of [reference directions](reference_directions) on the
//! unit simplex, generated with the Das-Dennis scheme. The external solver
//! consumes this description as is; this crate never runs genetic operators
//! itself.

use std::{fmt, str::FromStr};

use crate::{error::ConfigurationError, score::Objectives};

/// Neighborhood size of the MOEA/D configuration.
const MOEAD_NEIGHBORS: usize = 15;
/// Probability of mating within the neighborhood for MOEA/D.
const MOEAD_NEIGHBOR_MATING: f64 = 0.7;

/// Identifiers of supported algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
  /// Non-dominated Sorting Genetic Algorithm II.
  Nsga2,
  /// Multi-objective Evolutionary Algorithm based on Decomposition.
  Moead,
  /// Non-dominated Sorting Genetic Algorithm III.
  Nsga3,
}

impl AlgorithmId {
  /// All supported identifiers in catalog order.
  pub const ALL: [AlgorithmId; 3] =
    [AlgorithmId::Nsga2, AlgorithmId::Moead, AlgorithmId::Nsga3];

  /// The lowercase identifier used in requests and payloads.
  pub fn id(&self) -> &'static str {
    match self {
      AlgorithmId::Nsga2 => "nsga2",
      AlgorithmId::Moead => "moead",
      AlgorithmId::Nsga3 => "nsga3",
    }
  }

  /// Human readable name of the algorithm.
  pub fn name(&self) -> &'static str {
    match self {
      AlgorithmId::Nsga2 => "NSGA-II",
      AlgorithmId::Moead => "MOEA/D",
      AlgorithmId::Nsga3 => "NSGA-III",
    }
  }

  /// One line description of the algorithm.
  pub fn description(&self) -> &'static str {
    match self {
      AlgorithmId::Nsga2 => "Non-dominated Sorting Genetic Algorithm II",
      AlgorithmId::Moead => {
        "Multi-objective Evolutionary Algorithm based on Decomposition"
      }
      AlgorithmId::Nsga3 => "Non-dominated Sorting Genetic Algorithm III",
    }
  }
}

impl FromStr for AlgorithmId {
  type Err = ConfigurationError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "nsga2" => Ok(AlgorithmId::Nsga2),
      "moead" => Ok(AlgorithmId::Moead),
      "nsga3" => Ok(AlgorithmId::Nsga3),
      other => Err(ConfigurationError::UnknownAlgorithm(other.to_owned())),
    }
  }
}

impl fmt::Display for AlgorithmId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.id())
  }
}

/// Variant-specific parameters of an [`Algorithm`].
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
  /// Crowding-distance based elitist configuration.
  Nsga2 {
    /// Whether duplicate solutions are removed from the population.
    eliminate_duplicates: bool,
  },
  /// Decomposition into scalar sub-problems along reference directions.
  Moead {
    /// Reference directions partitioning the objective space.
    reference_directions: Vec<Objectives>,
    /// Number of neighboring sub-problems considered for mating.
    n_neighbors: usize,
    /// Probability of selecting parents from the neighborhood.
    prob_neighbor_mating: f64,
  },
  /// Reference-direction based niching configuration.
  Nsga3 {
    /// Reference directions guiding the niching selection.
    reference_directions: Vec<Objectives>,
  },
}

/// An immutable description of a configured algorithm, produced by
/// [`Algorithm::build`] and owned by the run that constructed it.
#[derive(Debug, Clone, PartialEq)]
pub struct Algorithm {
  id: AlgorithmId,
  pop_size: usize,
  variant: Variant,
}

impl Algorithm {
  /// Builds an algorithm configuration for `identifier` with `pop_size`
  /// individuals on a problem with `n_obj` objectives.
  ///
  /// For reference-direction based variants the direction lattice density
  /// follows [`partition_count`]. Fails if `identifier` is unrecognized.
  pub fn build(
    identifier: &str,
    n_obj: usize,
    pop_size: usize,
  ) -> Result<Self, ConfigurationError> {
    let id: AlgorithmId = identifier.parse()?;
    let variant = match id {
      AlgorithmId::Nsga2 => Variant::Nsga2 {
        eliminate_duplicates: true,
      },
      AlgorithmId::Moead => Variant::Moead {
        reference_directions: reference_directions(
          n_obj,
          partition_count(n_obj),
        ),
        n_neighbors: MOEAD_NEIGHBORS,
        prob_neighbor_mating: MOEAD_NEIGHBOR_MATING,
      },
      AlgorithmId::Nsga3 => Variant::Nsga3 {
        reference_directions: reference_directions(
          n_obj,
          partition_count(n_obj),
        ),
      },
    };
    Ok(Self {
      id,
      pop_size,
      variant,
    })
  }

  /// The identifier this configuration was built for.
  pub fn id(&self) -> AlgorithmId {
    self.id
  }

  /// Population size of the configuration.
  pub fn pop_size(&self) -> usize {
    self.pop_size
  }

  /// Variant-specific parameters.
  pub fn variant(&self) -> &Variant {
    &self.variant
  }
}

/// Returns the partition count used for reference direction generation on a
/// problem with `n_obj` objectives.
///
/// The number of directions grows combinatorially with the dimension, so the
/// lattice is partitioned coarser as the objective space grows: 12 partitions
/// below 3 objectives, 8 at exactly 3, 5 at 4 and above.
pub fn partition_count(n_obj: usize) -> usize {
  match n_obj {
    0..=2 => 12,
    3 => 8,
    _ => 5,
  }
}

/// Generates the Das-Dennis lattice of uniformly spaced directions on the
/// unit simplex of dimension `n_dim`.
///
/// Every way of placing `n_partitions` indivisible units across `n_dim`
/// non-negative integer coordinates is enumerated; dividing each coordinate
/// by `n_partitions` yields a direction with non-negative components summing
/// to one. The result holds `C(n_partitions + n_dim - 1, n_dim - 1)`
/// directions.
///
/// # Panics
///
/// Panics if `n_dim` or `n_partitions` is zero.
pub fn reference_directions(
  n_dim: usize,
  n_partitions: usize,
) -> Vec<Objectives> {
  assert!(n_dim > 0, "dimension must be positive");
  assert!(n_partitions > 0, "partition count must be positive");
  let mut directions = Vec::new();
  let mut units = vec![0usize; n_dim];
  place_units(n_partitions, 0, &mut units, n_partitions, &mut directions);
  directions
}

// recursively distributes `remaining` units over axes `axis..`
fn place_units(
  remaining: usize,
  axis: usize,
  units: &mut [usize],
  total: usize,
  out: &mut Vec<Objectives>,
) {
  if axis == units.len() - 1 {
    // the last axis takes whatever is left, closing the simplex
    units[axis] = remaining;
    out.push(units.iter().map(|&u| u as f64 / total as f64).collect());
    return;
  }
  for taken in (0..=remaining).rev() {
    units[axis] = taken;
    place_units(remaining - taken, axis + 1, units, total, out);
  }
}

#[cfg(test)]
mod tests {
  use float_cmp::assert_approx_eq;

  use super::*;

  #[test]
  fn test_reference_direction_count() {
    // C(p + n - 1, n - 1): 13 for (2, 12), 45 for (3, 8), 126 for (5, 5)
    assert_eq!(reference_directions(2, 12).len(), 13);
    assert_eq!(reference_directions(3, 8).len(), 45);
    assert_eq!(reference_directions(5, 5).len(), 126);
  }

  #[test]
  fn test_reference_directions_sum_to_one() {
    for dir in reference_directions(3, 8) {
      assert_eq!(dir.len(), 3);
      assert!(dir.iter().all(|&v| (0.0..=1.0).contains(&v)));
      assert_approx_eq!(f64, dir.iter().sum(), 1.0, epsilon = 1e-12);
    }
  }

  #[test]
  fn test_reference_directions_are_unique() {
    let dirs = reference_directions(3, 8);
    for (i, a) in dirs.iter().enumerate() {
      for b in &dirs[i + 1..] {
        assert_ne!(a, b);
      }
    }
  }

  #[test]
  fn test_partition_count_policy() {
    assert_eq!(partition_count(2), 12);
    assert_eq!(partition_count(3), 8);
    assert_eq!(partition_count(4), 5);
    assert_eq!(partition_count(10), 5);
  }

  #[test]
  fn test_build_nsga2() {
    let algorithm = Algorithm::build("nsga2", 2, 100).unwrap();
    assert_eq!(algorithm.id(), AlgorithmId::Nsga2);
    assert_eq!(algorithm.pop_size(), 100);
    assert_eq!(
      algorithm.variant(),
      &Variant::Nsga2 {
        eliminate_duplicates: true
      }
    );
  }

  #[test]
  fn test_build_moead_carries_neighborhood_constants() {
    let algorithm = Algorithm::build("moead", 3, 50).unwrap();
    match algorithm.variant() {
      Variant::Moead {
        reference_directions,
        n_neighbors,
        prob_neighbor_mating,
      } => {
        assert_eq!(reference_directions.len(), 45);
        assert_eq!(*n_neighbors, 15);
        assert_approx_eq!(f64, *prob_neighbor_mating, 0.7);
      }
      other => panic!("expected MOEA/D variant, got {other:?}"),
    }
  }

  #[test]
  fn test_build_unknown_algorithm() {
    let err = Algorithm::build("pso", 2, 100).unwrap_err();
    assert_eq!(err, ConfigurationError::UnknownAlgorithm("pso".into()));
  }
}
