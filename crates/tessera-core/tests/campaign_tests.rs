use std::cell::RefCell;

use tessera_core::campaign::{
    generate_and_run, run_campaign, CampaignError, Outcome, SystemUnderTest,
};
use tessera_core::quadratic::QuadraticSut;
use tessera_explore::solver::domain::ValueSpace;
use tessera_explore::solver::greedy::{generate, GenerateError};
use tessera_explore::solver::{DomainValue, TestSuite, TestVector};
use tessera_ir::parse::parse_model;
use tessera_ir::types::{reference_parameters, GenerationConfig};

/// Records the order it saw vectors in and fails any vector with `flag=true`.
struct Recorder {
    seen: RefCell<Vec<TestVector>>,
}

impl Recorder {
    fn new() -> Self {
        Self {
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl SystemUnderTest for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    fn execute(&self, vector: &TestVector) -> Result<Outcome, CampaignError> {
        self.seen.borrow_mut().push(vector.clone());
        Ok(match vector.get("flag") {
            Some(DomainValue::Bool(true)) => Outcome::Failed {
                reason: "flag set".into(),
            },
            Some(DomainValue::Bool(false)) => Outcome::Rejected {
                reason: "flag clear".into(),
            },
            _ => Outcome::Passed,
        })
    }
}

#[test]
fn test_quadratic_campaign_on_reference_suite_is_clean() {
    let params = reference_parameters();
    let (generation, report) =
        generate_and_run(&params, GenerationConfig::default(), &QuadraticSut).unwrap();

    assert_eq!(report.system, "quadratic");
    assert_eq!(report.executed, generation.suite.len());
    assert_eq!(report.passed + report.rejected, report.executed);
    assert!(report.is_clean(), "{report}");
}

#[test]
fn test_quadratic_campaign_on_exhaustive_space() {
    let params = reference_parameters();
    let all: Vec<TestVector> = ValueSpace::new(&params).iter().collect();
    let suite = TestSuite::new(params.names(), all);
    let report = run_campaign(&suite, &QuadraticSut).unwrap();

    assert_eq!(report.executed, 729);
    // a = b = 0 with c != 0: eight of the nine c values.
    assert_eq!(report.rejected, 8);
    assert!(report.is_clean());
}

#[test]
fn test_campaign_runs_in_suite_order() {
    let suite = TestSuite::new(
        vec!["flag".into(), "n".into()],
        vec![
            TestVector::from_pairs([("flag", DomainValue::Bool(false)), ("n", 1i64.into())]),
            TestVector::from_pairs([("flag", DomainValue::Bool(true)), ("n", 2i64.into())]),
            TestVector::from_pairs([("n", DomainValue::Int(3))]),
        ],
    );
    let recorder = Recorder::new();
    let report = run_campaign(&suite, &recorder).unwrap();

    assert_eq!(recorder.seen.borrow().as_slice(), suite.vectors());
    assert_eq!(report.executed, 3);
    assert_eq!(report.passed, 1);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(report.failures[0].reason, "flag set");
    assert!(!report.is_clean());
}

#[test]
fn test_campaign_aborts_on_malformed_vector() {
    let suite = TestSuite::new(
        vec!["a".into(), "b".into()],
        vec![TestVector::from_pairs([("a", 1i64), ("b", 2i64)])],
    );
    let result = run_campaign(&suite, &QuadraticSut);
    assert!(matches!(result, Err(CampaignError::MissingParameter { .. })));
}

#[test]
fn test_generation_errors_surface_through_campaign() {
    let params = reference_parameters();
    let config = GenerationConfig {
        max_candidates: 10,
        ..GenerationConfig::default()
    };
    let result = generate_and_run(&params, config, &QuadraticSut);
    assert!(matches!(
        result,
        Err(CampaignError::Generate(GenerateError::CandidateSpaceTooLarge { .. }))
    ));
}

#[test]
fn test_campaign_from_model_file() {
    let model = parse_model(include_str!("../../tessera-ir/tests/fixtures/quadratic.json")).unwrap();
    let (generation, report) =
        generate_and_run(&model.parameters, model.generation, &QuadraticSut).unwrap();
    assert_eq!(generation.suite, generate(&model.parameters).unwrap());
    assert!(report.is_clean());
}

#[test]
fn test_report_display() {
    let params = reference_parameters();
    let suite = generate(&params).unwrap();
    let report = run_campaign(&suite, &QuadraticSut).unwrap();
    let text = report.to_string();
    assert!(text.starts_with("=== Campaign: quadratic ==="));
    assert!(text.ends_with("Failed: 0"));
}
