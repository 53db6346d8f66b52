//! Objective vectors and Pareto dominance used throughout the library.

use std::cmp::Ordering;

/// An alias for a vector of objective values of a single solution.
///
/// All objectives are minimized. The number of objectives is a run-time
/// property of a [`Problem`](crate::problem::Problem), so objective vectors
/// are heap-allocated rather than fixed-size arrays.
pub type Objectives = Vec<f64>;

/// Describes Pareto dominance for slices of objective values.
pub trait ParetoDominance {
  /// Returns `Less` if `self` dominates `other`, `Greater` if `other`
  /// dominates `self`, otherwise `Equal`. `self` dominates `other` if
  /// no value of `self` is greater than the respective value of `other`
  /// and at least one is smaller.
  fn dominance(&self, other: &Self) -> Ordering;
}

impl ParetoDominance for [f64] {
  fn dominance(&self, other: &Self) -> Ordering {
    let mut ord = Ordering::Equal;
    for (a, b) in self.iter().zip(other) {
      match (ord, a.partial_cmp(b).expect("NaN encountered")) {
        (Ordering::Equal, next_ord) => ord = next_ord,
        (Ordering::Greater, Ordering::Less)
        | (Ordering::Less, Ordering::Greater) => return Ordering::Equal,
        _ => {}
      }
    }
    ord
  }
}

/// Returns indices of objective vectors in `set` that are not dominated by
/// any other member of `set`.
pub fn non_dominated_indices(set: &[Objectives]) -> Vec<usize> {
  set
    .iter()
    .enumerate()
    .filter(|(i, a)| {
      !set
        .iter()
        .enumerate()
        .any(|(j, b)| j != *i && b.as_slice().dominance(a) == Ordering::Less)
    })
    .map(|(i, _)| i)
    .collect()
}

#[cfg(test)]
mod tests {
  use std::cmp::Ordering;

  use super::*;

  #[test]
  fn test_pareto_dominance() {
    assert_eq!([1.0, 2.0, 3.0].dominance(&[1.0, 2.0, 3.0]), Ordering::Equal);
    assert_eq!([1.0, 3.0].dominance(&[3.0, 1.0]), Ordering::Equal);

    assert_eq!([1.0, 2.0, 3.0].dominance(&[1.0, 2.0, 4.0]), Ordering::Less);
    assert_eq!([0.0, 0.0].dominance(&[1.0, 0.0]), Ordering::Less);
    assert_eq!([1.0, 2.0, 3.0].dominance(&[2.0, 3.0, 4.0]), Ordering::Less);

    assert_eq!(
      [1.0, 2.0, 4.0].dominance(&[1.0, 2.0, 3.0]),
      Ordering::Greater
    );
    assert_eq!([1.0, 0.0].dominance(&[0.0, 0.0]), Ordering::Greater);

    assert_eq!([1.0; 0].dominance(&[0.0; 0]), Ordering::Equal);
  }

  #[test]
  fn test_non_dominated_indices() {
    let set = vec![
      vec![0.0, 1.0],
      vec![1.0, 0.0],
      vec![0.5, 0.5],
      vec![1.0, 1.0],
      vec![2.0, 2.0],
    ];
    assert_eq!(non_dominated_indices(&set), vec![0, 1, 2]);

    let single = vec![vec![1.0, 2.0]];
    assert_eq!(non_dominated_indices(&single), vec![0]);

    let empty: Vec<Objectives> = vec![];
    assert_eq!(non_dominated_indices(&empty), Vec::<usize>::new());
  }
}
