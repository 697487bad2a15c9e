use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::value::{DomainValue, Real, ValueError};

/// Errors in a parameter model. Raised before any enumeration starts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("parameter '{parameter}' has an empty domain")]
    EmptyDomain { parameter: String },

    #[error("parameter '{parameter}' lists value {value} more than once")]
    DuplicateValue { parameter: String, value: String },

    #[error("parameter '{name}' is declared more than once")]
    DuplicateParameter { name: String },

    #[error("invalid value: {0}")]
    Value(#[from] ValueError),
}

/// A named dimension of the input space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Candidate values in declared order. Order fixes the scan order.
    pub domain: Vec<DomainValue>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, domain: Vec<DomainValue>) -> Self {
        Self {
            name: name.into(),
            domain,
        }
    }

    /// Number of values in the domain.
    pub fn arity(&self) -> usize {
        self.domain.len()
    }

    /// Position of `value` in the domain.
    pub fn position(&self, value: &DomainValue) -> Option<usize> {
        self.domain.iter().position(|v| v == value)
    }
}

/// A validated, ordered set of parameters.
///
/// Every domain is non-empty and duplicate-free, and every name is unique.
/// Declaration order is preserved and drives all enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet {
    parameters: Vec<Parameter>,
}

impl ParameterSet {
    pub fn new(parameters: Vec<Parameter>) -> Result<Self, ModelError> {
        let mut names = HashSet::new();

        for param in &parameters {
            if !names.insert(param.name.as_str()) {
                return Err(ModelError::DuplicateParameter {
                    name: param.name.clone(),
                });
            }
            if param.domain.is_empty() {
                return Err(ModelError::EmptyDomain {
                    parameter: param.name.clone(),
                });
            }
            let mut seen = HashSet::new();
            for value in &param.domain {
                if !seen.insert(value) {
                    return Err(ModelError::DuplicateValue {
                        parameter: param.name.clone(),
                        value: value.to_string(),
                    });
                }
            }
        }

        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.name.clone()).collect()
    }

    /// Domain size of each parameter, in declared order.
    pub fn arities(&self) -> Vec<usize> {
        self.parameters.iter().map(Parameter::arity).collect()
    }
}

/// Tunables for the greedy generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Value spaces with at least this many candidates are scored on the
    /// rayon pool. Output is identical either way.
    pub parallel_threshold: usize,
    /// Upper bound on the Cartesian product size the generator will scan.
    pub max_candidates: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 4096,
            max_candidates: 1_000_000,
        }
    }
}

/// A parsed model file: parameters plus optional generation settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputModel {
    pub parameters: ParameterSet,
    pub generation: GenerationConfig,
}

/// Shared domain of the reference configuration.
const REFERENCE_DOMAIN: [f64; 9] = [-10.0, -2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0, 10.0];

/// The reference configuration: parameters `a`, `b`, `c`, each over
/// {-10, -2, -1, -0.5, 0, 0.5, 1, 2, 10}. Whole numbers are `Int`, the
/// halves are `Real`.
pub fn reference_parameters() -> ParameterSet {
    let domain: Vec<DomainValue> = REFERENCE_DOMAIN
        .iter()
        .map(|&x| {
            if x.fract() == 0.0 {
                DomainValue::Int(x as i64)
            } else {
                DomainValue::Real(Real::from_finite(x))
            }
        })
        .collect();

    ParameterSet {
        parameters: ["a", "b", "c"]
            .iter()
            .map(|name| Parameter::new(*name, domain.clone()))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ints(values: &[i64]) -> Vec<DomainValue> {
        values.iter().copied().map(DomainValue::Int).collect()
    }

    #[test]
    fn test_valid_set_preserves_order() {
        let set = ParameterSet::new(vec![
            Parameter::new("z", ints(&[1, 2])),
            Parameter::new("a", ints(&[3])),
        ])
        .unwrap();
        assert_eq!(set.names(), vec!["z".to_string(), "a".to_string()]);
        assert_eq!(set.arities(), vec![2, 1]);
        assert_eq!(set.index_of("a"), Some(1));
    }

    #[test]
    fn test_empty_domain_rejected() {
        let err = ParameterSet::new(vec![
            Parameter::new("a", ints(&[1])),
            Parameter::new("b", vec![]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ModelError::EmptyDomain {
                parameter: "b".into()
            }
        );
    }

    #[test]
    fn test_duplicate_value_rejected() {
        let err = ParameterSet::new(vec![Parameter::new("a", ints(&[1, 2, 1]))]).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateValue { ref value, .. } if value == "1"));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let err = ParameterSet::new(vec![
            Parameter::new("a", ints(&[1])),
            Parameter::new("a", ints(&[2])),
        ])
        .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateParameter { .. }));
    }

    #[test]
    fn test_reference_parameters() {
        let set = reference_parameters();
        assert_eq!(set.len(), 3);
        assert_eq!(set.arities(), vec![9, 9, 9]);
        // Built without validation; make sure it would pass anyway.
        assert!(ParameterSet::new(set.parameters().to_vec()).is_ok());
        let a = set.get("a").unwrap();
        assert_eq!(a.domain[0], DomainValue::Int(-10));
        assert_eq!(a.domain[3], DomainValue::real(-0.5).unwrap());
        assert_eq!(a.position(&DomainValue::Int(0)), Some(4));
    }

    #[test]
    fn test_generation_config_defaults() {
        let config: GenerationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GenerationConfig::default());
        let config: GenerationConfig =
            serde_json::from_str(r#"{ "parallel_threshold": 1 }"#).unwrap();
        assert_eq!(config.parallel_threshold, 1);
        assert_eq!(config.max_candidates, 1_000_000);
    }
}
