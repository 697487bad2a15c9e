//! Generate a pairwise suite and print reduction and coverage statistics.
//!
//! Usage: tessera-report [MODEL.json] [--json]
//!
//! Without a model file the reference a/b/c configuration is used. Models
//! that declare `a`, `b` and `c` are also run through the quadratic solver.

use anyhow::{bail, Context};
use tessera_core::analytics::ReductionStats;
use tessera_core::campaign::{run_campaign, CampaignReport};
use tessera_core::quadratic::QuadraticSut;
use tessera_explore::solver::greedy::PairwiseGenerator;
use tessera_ir::parse::parse_model;
use tessera_ir::types::{reference_parameters, GenerationConfig, InputModel};
use tracing_subscriber::EnvFilter;

/// Vectors shown in the text report.
const PREVIEW: usize = 10;

struct Options {
    model: Option<String>,
    json: bool,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut options = Options {
        model: None,
        json: false,
    };
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => options.json = true,
            "-h" | "--help" => {
                println!("usage: tessera-report [MODEL.json] [--json]");
                std::process::exit(0);
            }
            flag if flag.starts_with('-') => bail!("unknown flag '{flag}'"),
            path if options.model.is_none() => options.model = Some(path.to_string()),
            extra => bail!("unexpected argument '{extra}'"),
        }
    }
    Ok(options)
}

fn load_model(path: Option<&str>) -> anyhow::Result<InputModel> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading model {path}"))?;
            parse_model(&json).with_context(|| format!("parsing model {path}"))
        }
        None => Ok(InputModel {
            parameters: reference_parameters(),
            generation: GenerationConfig::default(),
        }),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let options = parse_args()?;
    let model = load_model(options.model.as_deref())?;

    let generation = PairwiseGenerator::new(model.generation.clone())
        .run(&model.parameters)
        .context("generating pairwise suite")?;
    let suite = &generation.suite;
    let stats = ReductionStats::compute(&model.parameters, suite);

    let wants_quadratic = QuadraticSut::PARAMETERS
        .iter()
        .all(|name| model.parameters.get(name).is_some());
    let campaign: Option<CampaignReport> = if wants_quadratic {
        Some(run_campaign(suite, &QuadraticSut).context("running quadratic campaign")?)
    } else {
        None
    };

    if options.json {
        let out = serde_json::json!({
            "stats": stats,
            "suite": suite,
            "campaign": campaign,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{stats}");
        println!();
        println!("=== First pairwise test cases ===");
        for (i, vector) in suite.iter().take(PREVIEW).enumerate() {
            println!("{}. {vector}", i + 1);
        }
        if suite.len() > PREVIEW {
            println!("... and {} more", suite.len() - PREVIEW);
        }
        if let Some(report) = &campaign {
            println!();
            println!("{report}");
        }
    }

    if let Some(report) = &campaign {
        if !report.is_clean() {
            bail!("{} vectors failed", report.failures.len());
        }
    }
    Ok(())
}
