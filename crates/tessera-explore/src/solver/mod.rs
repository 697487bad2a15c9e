pub mod coverage;
pub mod domain;
pub mod greedy;

use std::collections::BTreeMap;

use serde::Serialize;

pub use tessera_ir::value::DomainValue;

/// A concrete assignment of values to parameters.
/// Uses BTreeMap for deterministic ordering and Hash support.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TestVector {
    /// Parameter name -> assigned value (sorted for determinism)
    pub assignments: BTreeMap<String, DomainValue>,
}

impl TestVector {
    pub fn new() -> Self {
        Self {
            assignments: BTreeMap::new(),
        }
    }

    /// Build a vector from `(name, value)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<DomainValue>,
    {
        Self {
            assignments: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, parameter: &str) -> Option<&DomainValue> {
        self.assignments.get(parameter)
    }
}

impl Default for TestVector {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TestVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (name, value) in &self.assignments {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
            first = false;
        }
        Ok(())
    }
}

/// An ordered sequence of test vectors, in generation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestSuite {
    /// Parameter names in declared order.
    parameters: Vec<String>,
    vectors: Vec<TestVector>,
}

impl TestSuite {
    pub fn new(parameters: Vec<String>, vectors: Vec<TestVector>) -> Self {
        Self {
            parameters,
            vectors,
        }
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn vectors(&self) -> &[TestVector] {
        &self.vectors
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestVector> {
        self.vectors.iter()
    }
}

impl<'a> IntoIterator for &'a TestSuite {
    type Item = &'a TestVector;
    type IntoIter = std::slice::Iter<'a, TestVector>;

    fn into_iter(self) -> Self::IntoIter {
        self.vectors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_display_is_sorted_by_name() {
        let v = TestVector::from_pairs([("b", 2i64), ("a", 1i64)]);
        assert_eq!(v.to_string(), "a=1, b=2");
    }

    #[test]
    fn test_suite_accessors() {
        let suite = TestSuite::new(
            vec!["a".into()],
            vec![TestVector::from_pairs([("a", true)])],
        );
        assert_eq!(suite.len(), 1);
        assert!(!suite.is_empty());
        assert_eq!(suite.parameters(), &["a".to_string()]);
        assert_eq!((&suite).into_iter().count(), 1);
    }
}
