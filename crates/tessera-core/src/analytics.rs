//! Reduction statistics: how much smaller the pairwise suite is than the
//! exhaustive product, and whether it still covers every pair.

use serde::Serialize;
use tessera_explore::solver::coverage::validate;
use tessera_explore::solver::domain::ValueSpace;
use tessera_explore::solver::TestSuite;
use tessera_ir::types::ParameterSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReductionStats {
    pub parameters: Vec<String>,
    pub values_per_parameter: Vec<usize>,
    /// Size of the Cartesian product; `None` if it overflows `u64`.
    pub exhaustive: Option<u64>,
    pub suite_size: usize,
    pub obligations: usize,
    /// 100 − 100 × suite / exhaustive.
    pub reduction_percent: f64,
    pub coverage_percent: f64,
    pub complete: bool,
}

impl ReductionStats {
    pub fn compute(parameters: &ParameterSet, suite: &TestSuite) -> Self {
        let exhaustive = ValueSpace::new(parameters).size();
        let coverage = validate(suite.vectors(), parameters);

        let reduction_percent = match exhaustive {
            Some(0) => 0.0,
            Some(n) => 100.0 - suite.len() as f64 / n as f64 * 100.0,
            None => 100.0,
        };

        Self {
            parameters: parameters.names(),
            values_per_parameter: parameters.arities(),
            exhaustive,
            suite_size: suite.len(),
            obligations: coverage.total,
            reduction_percent,
            coverage_percent: coverage.coverage_percent,
            complete: coverage.is_complete,
        }
    }
}

impl std::fmt::Display for ReductionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arities: Vec<String> = self
            .values_per_parameter
            .iter()
            .map(|n| n.to_string())
            .collect();

        writeln!(f, "=== Pairwise statistics ===")?;
        writeln!(f, "Parameters: {}", self.parameters.join(", "))?;
        writeln!(f, "Values per parameter: {}", arities.join(" x "))?;
        match self.exhaustive {
            Some(n) => writeln!(f, "Exhaustive combinations: {n}")?,
            None => writeln!(f, "Exhaustive combinations: > {}", u64::MAX)?,
        }
        writeln!(f, "Pairwise obligations: {}", self.obligations)?;
        writeln!(f, "Pairwise test cases: {}", self.suite_size)?;
        writeln!(f, "Reduction: {:.1}%", self.reduction_percent)?;
        writeln!(f, "Pairwise coverage: {:.2}%", self.coverage_percent)?;
        write!(
            f,
            "Complete coverage: {}",
            if self.complete { "yes" } else { "no" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_explore::solver::greedy::generate;
    use tessera_ir::types::reference_parameters;

    #[test]
    fn test_reference_stats() {
        let params = reference_parameters();
        let suite = generate(&params).unwrap();
        let stats = ReductionStats::compute(&params, &suite);

        assert_eq!(stats.exhaustive, Some(729));
        assert_eq!(stats.obligations, 243);
        assert_eq!(stats.values_per_parameter, vec![9, 9, 9]);
        assert!(stats.complete);
        assert_eq!(stats.coverage_percent, 100.0);
        assert!(stats.reduction_percent > 80.0 && stats.reduction_percent < 100.0);
    }

    #[test]
    fn test_empty_suite_stats() {
        let params = reference_parameters();
        let suite = TestSuite::new(params.names(), vec![]);
        let stats = ReductionStats::compute(&params, &suite);
        assert!(!stats.complete);
        assert_eq!(stats.coverage_percent, 0.0);
        assert_eq!(stats.reduction_percent, 100.0);
    }

    #[test]
    fn test_display() {
        let params = reference_parameters();
        let suite = generate(&params).unwrap();
        let text = ReductionStats::compute(&params, &suite).to_string();
        assert!(text.contains("Parameters: a, b, c"));
        assert!(text.contains("Values per parameter: 9 x 9 x 9"));
        assert!(text.contains("Exhaustive combinations: 729"));
        assert!(text.contains("Pairwise coverage: 100.00%"));
        assert!(text.ends_with("Complete coverage: yes"));
    }
}
