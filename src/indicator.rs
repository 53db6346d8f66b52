//! Per-generation quality indicators.
//!
//! Three standard indicators are computed against a problem's reference
//! front: inverted generational distance, generational distance and
//! hypervolume. [`annotate`] applies them to a [`GenerationRecord`] and
//! leaves an indicator unset wherever the data it needs is unavailable:
//! distance indicators need a reference front, hypervolume is only tractable
//! up to three objectives.

use crate::{problem::Problem, score::Objectives, solver::GenerationRecord};

/// Every coordinate of the hypervolume reference point.
///
/// Assumes objectives normalized to roughly `[0, 1]`; a front touching the
/// reference point contributes no volume.
const HV_REFERENCE_COORDINATE: f64 = 1.1;

/// Ranges narrower than this cannot be used for normalization.
const DEGENERATE_RANGE: f64 = 1e-12;

/// Attaches indicator values to a generation record.
///
/// IGD and GD are computed only when the problem carries a reference front.
/// Hypervolume is computed only for problems with at most three objectives,
/// against the fixed reference point `[1.1, ...]`; when both ideal and nadir
/// points are known the objectives are rescaled per-objective to `[0, 1]`
/// first, otherwise raw values are used against the same reference point,
/// which is only meaningful for problems already scaled to unit range.
pub fn annotate(record: &mut GenerationRecord, problem: &Problem) {
  let (igd_value, gd_value, hv_value) = {
    let current = record.non_dominated();
    let (igd_value, gd_value) = match problem.pareto_front() {
      Some(front) => (igd(current, front), gd(current, front)),
      None => (None, None),
    };
    let hv_value = if problem.n_obj() <= 3 {
      let reference = vec![HV_REFERENCE_COORDINATE; problem.n_obj()];
      match (problem.ideal_point(), problem.nadir_point()) {
        (Some(ideal), Some(nadir)) => normalized(current, ideal, nadir)
          .and_then(|scaled| hypervolume(&scaled, &reference)),
        _ => hypervolume(current, &reference),
      }
    } else {
      None
    };
    (igd_value, gd_value, hv_value)
  };
  record.attach_indicators(igd_value, gd_value, hv_value);
}

/// Inverted generational distance: the average over reference points of the
/// distance to the nearest member of `current`. Zero iff every reference
/// point is matched exactly. `None` when either set is empty.
pub fn igd(current: &[Objectives], reference: &[Objectives]) -> Option<f64> {
  mean_nearest_distance(reference, current)
}

/// Generational distance: the average over `current` of the distance to the
/// nearest reference point. `None` when either set is empty.
pub fn gd(current: &[Objectives], reference: &[Objectives]) -> Option<f64> {
  mean_nearest_distance(current, reference)
}

fn mean_nearest_distance(
  from: &[Objectives],
  to: &[Objectives],
) -> Option<f64> {
  if from.is_empty() || to.is_empty() {
    return None;
  }
  let total: f64 = from
    .iter()
    .map(|point| {
      to.iter()
        .map(|other| euclidean(point, other))
        .fold(f64::INFINITY, f64::min)
    })
    .sum();
  Some(total / from.len() as f64)
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
  a.iter()
    .zip(b)
    .map(|(x, y)| (x - y).powi(2))
    .sum::<f64>()
    .sqrt()
}

/// Rescales every objective vector per-objective as
/// `(value - ideal) / (nadir - ideal)`.
///
/// Returns `None` when any objective's range is degenerate; reporting the
/// result as indeterminate beats producing infinities.
pub fn normalized(
  objectives: &[Objectives],
  ideal: &[f64],
  nadir: &[f64],
) -> Option<Vec<Objectives>> {
  let ranges: Vec<f64> = ideal
    .iter()
    .zip(nadir)
    .map(|(lo, hi)| hi - lo)
    .collect();
  if ranges.iter().any(|r| r.abs() <= DEGENERATE_RANGE) {
    return None;
  }
  Some(
    objectives
      .iter()
      .map(|point| {
        point
          .iter()
          .zip(ideal)
          .zip(&ranges)
          .map(|((v, lo), range)| (v - lo) / range)
          .collect()
      })
      .collect(),
  )
}

/// Hypervolume dominated by `points` relative to `reference`, exact for two
/// and three objectives, `None` for any other dimension.
///
/// Points that do not strictly dominate the reference point contribute
/// nothing. The empty set dominates zero volume.
pub fn hypervolume(
  points: &[Objectives],
  reference: &[f64],
) -> Option<f64> {
  match reference.len() {
    2 => Some(hypervolume_2d(
      points.iter().map(|p| (p[0], p[1])).collect(),
      (reference[0], reference[1]),
    )),
    3 => Some(hypervolume_3d(points, reference)),
    _ => None,
  }
}

/// Sweep over points sorted by the first objective; each point contributes
/// the rectangle between itself, the lowest second objective seen so far and
/// the reference point.
fn hypervolume_2d(mut points: Vec<(f64, f64)>, reference: (f64, f64)) -> f64 {
  points.retain(|&(x, y)| x < reference.0 && y < reference.1);
  points.sort_by(|a, b| a.0.total_cmp(&b.0));

  let mut volume = 0.0;
  let mut lowest = reference.1;
  for (x, y) in points {
    if y < lowest {
      volume += (reference.0 - x) * (lowest - y);
      lowest = y;
    }
  }
  volume
}

/// Slices the volume along the third objective: between two consecutive cut
/// heights the dominated area is constant and equals the 2-D hypervolume of
/// the points below the lower cut.
fn hypervolume_3d(points: &[Objectives], reference: &[f64]) -> f64 {
  let dominating: Vec<&Objectives> = points
    .iter()
    .filter(|p| p.iter().zip(reference).all(|(v, r)| v < r))
    .collect();
  if dominating.is_empty() {
    return 0.0;
  }

  let mut cuts: Vec<f64> = dominating.iter().map(|p| p[2]).collect();
  cuts.sort_by(f64::total_cmp);
  cuts.dedup();
  cuts.push(reference[2]);

  let mut volume = 0.0;
  for pair in cuts.windows(2) {
    let (cut, next_cut) = (pair[0], pair[1]);
    let slab: Vec<(f64, f64)> = dominating
      .iter()
      .filter(|p| p[2] <= cut)
      .map(|p| (p[0], p[1]))
      .collect();
    let area = hypervolume_2d(slab, (reference[0], reference[1]));
    volume += area * (next_cut - cut);
  }
  volume
}

#[cfg(test)]
mod tests {
  use float_cmp::assert_approx_eq;

  use super::*;

  fn front() -> Vec<Objectives> {
    vec![vec![0.0, 1.0], vec![0.5, 0.5], vec![1.0, 0.0]]
  }

  #[test]
  fn test_igd_and_gd_are_zero_on_the_reference_front() {
    let current = front();
    assert_approx_eq!(f64, igd(&current, &front()).unwrap(), 0.0);
    assert_approx_eq!(f64, gd(&current, &front()).unwrap(), 0.0);
  }

  #[test]
  fn test_igd_and_gd_known_values() {
    let current = vec![vec![0.0, 0.0]];
    let reference = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
    // both reference points are a unit away from the only member
    assert_approx_eq!(f64, igd(&current, &reference).unwrap(), 1.0);
    // the only member is a unit away from its nearest reference point
    assert_approx_eq!(f64, gd(&current, &reference).unwrap(), 1.0);
  }

  #[test]
  fn test_distance_indicators_need_both_sets() {
    let empty: Vec<Objectives> = vec![];
    assert_eq!(igd(&empty, &front()), None);
    assert_eq!(igd(&front(), &empty), None);
    assert_eq!(gd(&empty, &front()), None);
  }

  #[test]
  fn test_hypervolume_2d() {
    let reference = vec![2.0, 2.0];
    assert_approx_eq!(
      f64,
      hypervolume(&[vec![1.0, 1.0]], &reference).unwrap(),
      1.0
    );
    assert_approx_eq!(
      f64,
      hypervolume(&[vec![0.5, 1.5], vec![1.0, 1.0]], &reference).unwrap(),
      1.25
    );
    // dominated members add nothing
    assert_approx_eq!(
      f64,
      hypervolume(&[vec![1.0, 1.0], vec![1.5, 1.5]], &reference).unwrap(),
      1.0
    );
    // points beyond the reference point add nothing
    assert_approx_eq!(
      f64,
      hypervolume(&[vec![3.0, 3.0]], &reference).unwrap(),
      0.0
    );
  }

  #[test]
  fn test_hypervolume_3d() {
    let reference = vec![2.0, 2.0, 2.0];
    assert_approx_eq!(
      f64,
      hypervolume(&[vec![1.0, 1.0, 1.0]], &reference).unwrap(),
      1.0
    );
    assert_approx_eq!(
      f64,
      hypervolume(
        &[vec![0.5, 0.5, 1.5], vec![1.0, 1.0, 1.0]],
        &reference
      )
      .unwrap(),
      1.625
    );
  }

  #[test]
  fn test_hypervolume_intractable_above_three_objectives() {
    assert_eq!(hypervolume(&[vec![0.5; 4]], &[1.1; 4]), None);
    assert_eq!(hypervolume(&[vec![0.5]], &[1.1]), None);
  }

  #[test]
  fn test_normalized_rescales_per_objective() {
    let scaled = normalized(
      &[vec![5.0, 30.0], vec![10.0, 10.0]],
      &[5.0, 10.0],
      &[10.0, 30.0],
    )
    .unwrap();
    assert_eq!(scaled, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
  }

  #[test]
  fn test_normalized_rejects_degenerate_range() {
    assert_eq!(
      normalized(&[vec![1.0, 2.0]], &[0.0, 2.0], &[1.0, 2.0]),
      None
    );
  }

  #[test]
  fn test_annotate_with_reference_front() {
    let problem = Problem::resolve("zdt1", 30, 2).unwrap();
    let current = problem.pareto_front().unwrap().to_vec();
    let mut record = GenerationRecord::new(1, 100, current);
    annotate(&mut record, &problem);
    assert_approx_eq!(f64, record.igd().unwrap(), 0.0);
    assert_approx_eq!(f64, record.gd().unwrap(), 0.0);
    assert!(record.hv().unwrap() > 0.0);
  }

  #[test]
  fn test_annotate_skips_hypervolume_above_three_objectives() {
    let problem = Problem::resolve("dtlz2", 10, 4).unwrap();
    let current = problem.pareto_front().unwrap().to_vec();
    let mut record = GenerationRecord::new(1, 100, current);
    annotate(&mut record, &problem);
    assert!(record.igd().is_some());
    assert!(record.gd().is_some());
    assert_eq!(record.hv(), None);
  }
}
