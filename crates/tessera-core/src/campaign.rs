//! Running a generated suite against a system under test.
//!
//! The generator knows nothing about what its vectors are for. A
//! [`SystemUnderTest`] adapter reads the parameters it cares about from each
//! vector, exercises the real code, and judges the result.

use serde::Serialize;
use tessera_explore::solver::greedy::{GenerateError, Generation, PairwiseGenerator};
use tessera_explore::solver::{TestSuite, TestVector};
use tessera_ir::types::{GenerationConfig, ParameterSet};
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum CampaignError {
    #[error("generation error: {0}")]
    Generate(#[from] GenerateError),

    #[error("vector has no value for parameter '{parameter}'")]
    MissingParameter { parameter: String },

    #[error("parameter '{parameter}' is not numeric: {value}")]
    NonNumeric { parameter: String, value: String },
}

/// Verdict for a single vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Outcome {
    /// Result checked out.
    Passed,
    /// The system refused the input, and refusing it was correct.
    Rejected { reason: String },
    /// Wrong result or an unexpected refusal.
    Failed { reason: String },
}

/// Adapter between generated vectors and the code being exercised.
pub trait SystemUnderTest {
    /// Name used in reports.
    fn name(&self) -> &str;

    /// Execute one vector and judge the result.
    ///
    /// `Err` means the vector could not be fed to the system at all (wrong
    /// shape), which aborts the campaign.
    fn execute(&self, vector: &TestVector) -> Result<Outcome, CampaignError>;
}

/// A vector that failed, with its position in the suite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure {
    pub index: usize,
    pub vector: TestVector,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignReport {
    pub system: String,
    pub executed: usize,
    pub passed: usize,
    pub rejected: usize,
    pub failures: Vec<Failure>,
}

impl CampaignReport {
    /// No vector failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

impl std::fmt::Display for CampaignReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Campaign: {} ===", self.system)?;
        writeln!(f, "Executed: {}", self.executed)?;
        writeln!(f, "Passed: {}", self.passed)?;
        writeln!(f, "Rejected (expected): {}", self.rejected)?;
        write!(f, "Failed: {}", self.failures.len())?;
        for failure in self.failures.iter().take(5) {
            write!(
                f,
                "\n  #{} [{}]: {}",
                failure.index, failure.vector, failure.reason
            )?;
        }
        Ok(())
    }
}

/// Execute every vector of `suite` in order.
pub fn run_campaign(
    suite: &TestSuite,
    system: &dyn SystemUnderTest,
) -> Result<CampaignReport, CampaignError> {
    let mut report = CampaignReport {
        system: system.name().to_string(),
        executed: 0,
        passed: 0,
        rejected: 0,
        failures: Vec::new(),
    };

    for (index, vector) in suite.iter().enumerate() {
        match system.execute(vector)? {
            Outcome::Passed => report.passed += 1,
            Outcome::Rejected { .. } => report.rejected += 1,
            Outcome::Failed { reason } => report.failures.push(Failure {
                index,
                vector: vector.clone(),
                reason,
            }),
        }
        report.executed += 1;
    }

    if report.is_clean() {
        info!(
            system = %report.system,
            executed = report.executed,
            rejected = report.rejected,
            "campaign finished"
        );
    } else {
        warn!(
            system = %report.system,
            executed = report.executed,
            failures = report.failures.len(),
            "campaign finished with failures"
        );
    }

    Ok(report)
}

/// Generate a suite for `parameters` and run it.
pub fn generate_and_run(
    parameters: &ParameterSet,
    config: GenerationConfig,
    system: &dyn SystemUnderTest,
) -> Result<(Generation, CampaignReport), CampaignError> {
    let generation = PairwiseGenerator::new(config).run(parameters)?;
    let report = run_campaign(&generation.suite, system)?;
    Ok((generation, report))
}

/// Read a numeric parameter from a vector.
pub fn numeric(vector: &TestVector, parameter: &str) -> Result<f64, CampaignError> {
    let value = vector
        .get(parameter)
        .ok_or_else(|| CampaignError::MissingParameter {
            parameter: parameter.to_string(),
        })?;
    value.as_f64().ok_or_else(|| CampaignError::NonNumeric {
        parameter: parameter.to_string(),
        value: value.to_string(),
    })
}
