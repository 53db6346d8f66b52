//! Wire contracts consumed by the serving layer.
//!
//! The HTTP server itself lives outside this crate, but the shapes it
//! exchanges are fixed here: the catalog descriptors, the optimize request
//! with its parameter defaults, and the success/error response envelope.
//! Configuration errors surface with a `ValueError` tag and no trace;
//! anything else carries a diagnostic trace string. Either way the serving
//! layer answers with HTTP 400 and never crashes.

use serde::{Deserialize, Serialize};

use crate::{
  algorithm::AlgorithmId,
  error::RunError,
  problem::ProblemId,
  result::OptimizationResult,
  run::RunRequest,
};

/// A catalog entry describing a problem or an algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Descriptor {
  /// Identifier accepted by [`OptimizeRequest`].
  pub id: &'static str,
  /// Human readable name.
  pub name: &'static str,
  /// One line description.
  pub description: &'static str,
}

/// The catalog of supported problems, in listing order.
pub fn problems() -> Vec<Descriptor> {
  ProblemId::ALL
    .iter()
    .map(|id| Descriptor {
      id: id.id(),
      name: id.name(),
      description: id.description(),
    })
    .collect()
}

/// The catalog of supported algorithms, in listing order.
pub fn algorithms() -> Vec<Descriptor> {
  AlgorithmId::ALL
    .iter()
    .map(|id| Descriptor {
      id: id.id(),
      name: id.name(),
      description: id.description(),
    })
    .collect()
}

/// The body of an optimize request. Only the identifiers are required;
/// every count falls back to its documented default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptimizeRequest {
  /// Problem identifier.
  pub problem: String,
  /// Algorithm identifier.
  pub algorithm: String,
  /// Number of decision variables.
  #[serde(default = "default_n_var")]
  pub n_var: usize,
  /// Number of objectives.
  #[serde(default = "default_n_obj")]
  pub n_obj: usize,
  /// Population size.
  #[serde(default = "default_pop_size")]
  pub pop_size: usize,
  /// Generation count.
  #[serde(default = "default_n_gen")]
  pub n_gen: usize,
}

fn default_n_var() -> usize {
  10
}

fn default_n_obj() -> usize {
  2
}

fn default_pop_size() -> usize {
  100
}

fn default_n_gen() -> usize {
  200
}

impl From<OptimizeRequest> for RunRequest {
  fn from(request: OptimizeRequest) -> Self {
    RunRequest::builder()
      .problem(request.problem)
      .algorithm(request.algorithm)
      .n_var(request.n_var)
      .n_obj(request.n_obj)
      .pop_size(request.pop_size)
      .n_gen(request.n_gen)
      .build()
  }
}

/// The response envelope of the optimize endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ApiResponse {
  /// The run finished and produced a result.
  Success {
    /// The assembled result payload.
    data: OptimizationResult,
  },
  /// The run failed.
  Error {
    /// Human readable failure description.
    message: String,
    /// Failure class tag: `ValueError` for caller-fixable configuration
    /// errors, `Exception` for everything else.
    #[serde(rename = "type")]
    kind: &'static str,
    /// Diagnostic trace, present for unexpected failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    traceback: Option<String>,
  },
}

impl ApiResponse {
  /// Wraps a finished run.
  pub fn success(data: OptimizationResult) -> Self {
    ApiResponse::Success { data }
  }

  /// Maps a run failure onto the error envelope.
  pub fn from_error(error: &RunError) -> Self {
    match error {
      RunError::Configuration(source) => ApiResponse::Error {
        message: source.to_string(),
        kind: "ValueError",
        traceback: None,
      },
      other => ApiResponse::Error {
        message: other.to_string(),
        kind: "Exception",
        traceback: Some(format!("{other:?}")),
      },
    }
  }

  /// The HTTP status code the serving layer should answer with.
  pub fn http_status(&self) -> u16 {
    match self {
      ApiResponse::Success { .. } => 200,
      ApiResponse::Error { .. } => 400,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::error::ConfigurationError;

  #[test]
  fn test_catalogs_list_every_identifier() {
    let problems = problems();
    assert_eq!(
      problems.iter().map(|d| d.id).collect::<Vec<_>>(),
      vec!["zdt1", "zdt2", "dtlz1", "dtlz2"]
    );
    assert_eq!(problems[0].name, "ZDT1");

    let algorithms = algorithms();
    assert_eq!(
      algorithms.iter().map(|d| d.id).collect::<Vec<_>>(),
      vec!["nsga2", "moead", "nsga3"]
    );
    assert_eq!(algorithms[1].name, "MOEA/D");
  }

  #[test]
  fn test_optimize_request_defaults() {
    let request: OptimizeRequest = serde_json::from_value(json!({
      "problem": "zdt1",
      "algorithm": "nsga2",
    }))
    .unwrap();
    assert_eq!(request.n_var, 10);
    assert_eq!(request.n_obj, 2);
    assert_eq!(request.pop_size, 100);
    assert_eq!(request.n_gen, 200);
  }

  #[test]
  fn test_optimize_request_requires_identifiers() {
    let missing: Result<OptimizeRequest, _> =
      serde_json::from_value(json!({"problem": "zdt1"}));
    assert!(missing.is_err());
  }

  #[test]
  fn test_optimize_request_into_run_request() {
    let request: OptimizeRequest = serde_json::from_value(json!({
      "problem": "dtlz2",
      "algorithm": "nsga3",
      "n_obj": 3,
      "pop_size": 50,
    }))
    .unwrap();
    let run: RunRequest = request.into();
    assert_eq!(run.problem(), "dtlz2");
    assert_eq!(run.n_obj(), 3);
    assert_eq!(run.pop_size(), 50);
    assert_eq!(run.n_gen(), 200);
  }

  #[test]
  fn test_configuration_error_maps_to_value_error() {
    let error: RunError =
      ConfigurationError::UnknownProblem("sch".to_owned()).into();
    let response = ApiResponse::from_error(&error);
    assert_eq!(response.http_status(), 400);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
      json,
      json!({
        "status": "error",
        "message": "unsupported problem: sch",
        "type": "ValueError",
      })
    );
  }

  #[test]
  fn test_unexpected_error_carries_a_trace() {
    let error = RunError::Solver("population exploded".to_owned());
    let response = ApiResponse::from_error(&error);
    assert_eq!(response.http_status(), 400);
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "error");
    assert_eq!(json["type"], "Exception");
    assert!(json["traceback"].as_str().unwrap().contains("exploded"));
  }
}
