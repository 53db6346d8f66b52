use mobench::{
  algorithm::Algorithm,
  problem::Problem,
  run::{execute, RunRequest},
  score::non_dominated_indices,
  solver::{GenerationRecord, Solver, SolverError, SolverOutput},
};
use rand::prelude::*;
use rand_distr::Normal;

/// A crude stochastic solver: every generation half of the samples are
/// drawn uniformly and half perturb archived solutions, then the archive
/// keeps the non-dominated survivors. No selection pressure beyond that,
/// yet it is enough to exercise the whole orchestration pipeline.
struct RandomSearch;

impl Solver for RandomSearch {
  fn solve(
    &mut self,
    problem: &Problem,
    algorithm: &Algorithm,
    n_gen: usize,
  ) -> Result<SolverOutput, SolverError> {
    let mut rng = rand::thread_rng();
    let jitter = Normal::new(0.0, 0.1).unwrap();

    let mut variables: Vec<Vec<f64>> = Vec::new();
    let mut objectives: Vec<Vec<f64>> = Vec::new();
    let mut history = Vec::with_capacity(n_gen);
    let mut n_eval = 0;

    for gen in 1..=n_gen {
      for i in 0..algorithm.pop_size() {
        let x: Vec<f64> = if variables.is_empty() || i % 2 == 0 {
          (0..problem.n_var()).map(|_| rng.gen_range(0.0..1.0)).collect()
        } else {
          let parent = variables.choose(&mut rng).unwrap();
          parent
            .iter()
            .map(|v| (v + jitter.sample(&mut rng)).clamp(0.0, 1.0))
            .collect()
        };
        objectives.push(zdt1(&x));
        variables.push(x);
        n_eval += 1;
      }

      let keep = non_dominated_indices(&objectives);
      variables = keep.iter().map(|&i| variables[i].clone()).collect();
      objectives = keep.iter().map(|&i| objectives[i].clone()).collect();
      history.push(GenerationRecord::new(gen, n_eval, objectives.clone()));
    }

    Ok(SolverOutput {
      decision_vectors: Some(variables),
      objectives: Some(objectives),
      generations_run: n_gen,
      history,
    })
  }
}

// f1 = x0, f2 = g * (1 - sqrt(f1 / g)) with g = 1 + 9 * mean(x[1..])
fn zdt1(x: &[f64]) -> Vec<f64> {
  let f1 = x[0];
  let g =
    1.0 + 9.0 * x[1..].iter().sum::<f64>() / (x.len() - 1) as f64;
  vec![f1, g * (1.0 - (f1 / g).sqrt())]
}

fn main() {
  let request = RunRequest::builder()
    .problem("zdt1")
    .algorithm("nsga2")
    .n_var(5)
    .pop_size(50)
    .n_gen(30)
    .build();

  let result = execute(&mut RandomSearch, &request).unwrap();

  println!(
    "{} generations, {} solutions, converged: {}",
    result.generation,
    result.f.len(),
    result.success
  );
  println!("  gen | n_nds |    igd    |    hv    ");
  for entry in result.history.iter().rev().take(5).rev() {
    println!(
      " {:>4} | {:>5} | {:>9.5} | {:>8.5}",
      entry.n_gen,
      entry.n_nds,
      entry.igd.unwrap_or(f64::NAN),
      entry.hv.unwrap_or(f64::NAN),
    );
  }

  // and the first few points of the discovered front
  println!("   f1   |   f2   ");
  for point in result.f.iter().take(10) {
    println!(" {:.4} | {:.4}", point[0], point[1]);
  }
}
