//! Pairwise obligations and coverage checking.
//!
//! An obligation is a (param_a=value_a, param_b=value_b) combination that
//! some vector in a suite must exercise. Obligations exist only between
//! distinct parameters, with `param_a` declared before `param_b`.

use std::collections::HashSet;

use serde::Serialize;
use tessera_ir::types::ParameterSet;

use super::{DomainValue, TestVector};

/// A pair of parameter assignments that must appear together in some vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Obligation {
    pub param_a: String,
    pub value_a: DomainValue,
    pub param_b: String,
    pub value_b: DomainValue,
}

impl Obligation {
    /// True if `vector` assigns both values of this obligation.
    pub fn is_satisfied_by(&self, vector: &TestVector) -> bool {
        vector.get(&self.param_a) == Some(&self.value_a)
            && vector.get(&self.param_b) == Some(&self.value_b)
    }
}

impl std::fmt::Display for Obligation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}={} & {}={}",
            self.param_a, self.value_a, self.param_b, self.value_b
        )
    }
}

/// Enumerate every pairwise obligation for the given parameters.
///
/// Parameter pairs are visited as (i, j) with i < j in declared order, and
/// values in domain order, so the output order is fixed. Fewer than two
/// parameters yields no obligations.
pub fn enumerate_obligations(parameters: &ParameterSet) -> Vec<Obligation> {
    let params = parameters.parameters();
    let mut obligations = Vec::with_capacity(obligation_count(parameters));

    for i in 0..params.len() {
        for j in (i + 1)..params.len() {
            let first = &params[i];
            let second = &params[j];

            for v1 in &first.domain {
                for v2 in &second.domain {
                    obligations.push(Obligation {
                        param_a: first.name.clone(),
                        value_a: v1.clone(),
                        param_b: second.name.clone(),
                        value_b: v2.clone(),
                    });
                }
            }
        }
    }

    obligations
}

/// Σ over parameter pairs i < j of |domain_i| × |domain_j|.
pub fn obligation_count(parameters: &ParameterSet) -> usize {
    let arities = parameters.arities();
    let mut total = 0;
    for i in 0..arities.len() {
        for j in (i + 1)..arities.len() {
            total += arities[i] * arities[j];
        }
    }
    total
}

/// Check which obligations a set of vectors covers.
pub fn check_coverage(vectors: &[TestVector], targets: &[Obligation]) -> HashSet<Obligation> {
    targets
        .iter()
        .filter(|target| vectors.iter().any(|v| target.is_satisfied_by(v)))
        .cloned()
        .collect()
}

/// Outcome of validating a suite against a parameter set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageReport {
    /// Every obligation is satisfied by at least one vector.
    pub is_complete: bool,
    /// 100 × covered / total. 100 when there are no obligations.
    pub coverage_percent: f64,
    pub covered: usize,
    pub total: usize,
    /// Unsatisfied obligations, in enumeration order.
    pub missing: Vec<Obligation>,
}

/// Recompute pairwise coverage of `vectors` from scratch.
///
/// Independent of the generator: the obligation set is enumerated again
/// and checked vector by vector. An empty obligation set is vacuously
/// complete.
pub fn validate(vectors: &[TestVector], parameters: &ParameterSet) -> CoverageReport {
    let targets = enumerate_obligations(parameters);
    let covered = check_coverage(vectors, &targets);

    let missing: Vec<Obligation> = targets
        .iter()
        .filter(|t| !covered.contains(*t))
        .cloned()
        .collect();

    let total = targets.len();
    let coverage_percent = if total == 0 {
        100.0
    } else {
        covered.len() as f64 / total as f64 * 100.0
    };

    CoverageReport {
        is_complete: missing.is_empty(),
        coverage_percent,
        covered: covered.len(),
        total,
        missing,
    }
}
