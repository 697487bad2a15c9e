//! Greedy maximum-coverage suite generation.
//!
//! Each round scans the whole value space, scores every candidate by the
//! number of still-uncovered obligations it satisfies, and keeps the best
//! one. Ties go to the lowest candidate index, i.e. the first candidate met
//! in scan order. The loop only exits once every obligation is covered, so a
//! returned suite always has full pairwise coverage.
//!
//! Scoring may run on the rayon pool for large value spaces. The parallel
//! reduction keeps (highest score, lowest index), which is exactly what the
//! sequential scan selects, so the output never depends on scheduling.

use std::collections::HashMap;

use rayon::prelude::*;
use serde::Serialize;
use tessera_ir::types::{GenerationConfig, ParameterSet};
use tracing::{debug, info};

use super::coverage::{enumerate_obligations, Obligation};
use super::domain::ValueSpace;
use super::{DomainValue, TestSuite};

/// Errors during generation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error("value space too large: {} candidates (max {limit})", display_size(.size))]
    CandidateSpaceTooLarge { size: Option<u64>, limit: u64 },

    #[error("no candidate covers any of the {remaining} remaining obligations")]
    Stalled { remaining: usize },
}

fn display_size(size: &Option<u64>) -> String {
    match size {
        Some(n) => n.to_string(),
        None => "more than u64::MAX".to_string(),
    }
}

/// One accepted vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GenerationStep {
    /// Index of the selected candidate in the value space.
    pub candidate_index: u64,
    /// Obligations this vector removed from the uncovered set.
    pub newly_covered: usize,
    /// Obligations still uncovered after this step.
    pub remaining: usize,
}

/// A finished run: the suite plus how it was built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generation {
    pub suite: TestSuite,
    pub steps: Vec<GenerationStep>,
    /// Size of the full obligation set.
    pub obligations: usize,
    /// Size of the scanned value space (0 when nothing was scanned).
    pub candidates: u64,
}

/// Generate a pairwise-covering suite with default settings.
pub fn generate(parameters: &ParameterSet) -> Result<TestSuite, GenerateError> {
    PairwiseGenerator::with_defaults()
        .run(parameters)
        .map(|generation| generation.suite)
}

/// Greedy generator.
#[derive(Debug, Clone, Default)]
pub struct PairwiseGenerator {
    config: GenerationConfig,
}

impl PairwiseGenerator {
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Run the greedy loop until every obligation is covered.
    ///
    /// Fewer than two parameters have no obligations and produce an empty
    /// suite.
    pub fn run(&self, parameters: &ParameterSet) -> Result<Generation, GenerateError> {
        let names = parameters.names();
        let obligations = enumerate_obligations(parameters);

        if obligations.is_empty() {
            return Ok(Generation {
                suite: TestSuite::new(names, Vec::new()),
                steps: Vec::new(),
                obligations: 0,
                candidates: 0,
            });
        }

        let space = ValueSpace::new(parameters);
        let size = space
            .size()
            .filter(|&n| n <= self.config.max_candidates)
            .ok_or(GenerateError::CandidateSpaceTooLarge {
                size: space.size(),
                limit: self.config.max_candidates,
            })?;

        let mut uncovered = UncoveredTable::from_obligations(parameters, &obligations);
        let parallel = size >= self.config.parallel_threshold as u64;
        let mut positions = vec![0; parameters.len()];
        let mut vectors = Vec::new();
        let mut steps = Vec::new();

        while uncovered.remaining() > 0 {
            let (index, score) = if parallel {
                best_candidate_parallel(&space, &uncovered, size)
            } else {
                best_candidate_sequential(&space, &uncovered)
            };

            if score == 0 {
                return Err(GenerateError::Stalled {
                    remaining: uncovered.remaining(),
                });
            }

            space.decode(index, &mut positions);
            let newly_covered = uncovered.cover(&positions);
            vectors.push(space.vector_from_positions(&positions));

            let step = GenerationStep {
                candidate_index: index,
                newly_covered,
                remaining: uncovered.remaining(),
            };
            debug!(
                step = steps.len(),
                candidate = step.candidate_index,
                newly_covered = step.newly_covered,
                remaining = step.remaining,
                "selected vector"
            );
            steps.push(step);
        }

        info!(
            parameters = parameters.len(),
            obligations = obligations.len(),
            candidates = size,
            vectors = vectors.len(),
            parallel,
            "pairwise suite generated"
        );

        Ok(Generation {
            suite: TestSuite::new(names, vectors),
            steps,
            obligations: obligations.len(),
            candidates: size,
        })
    }
}

/// First candidate in scan order with the strictly greatest score.
fn best_candidate_sequential(space: &ValueSpace<'_>, uncovered: &UncoveredTable) -> (u64, usize) {
    let mut best = (0u64, 0usize);
    for (index, positions) in space.positions().enumerate() {
        let score = uncovered.score(&positions);
        if score > best.1 {
            best = (index as u64, score);
        }
    }
    best
}

fn best_candidate_parallel(
    space: &ValueSpace<'_>,
    uncovered: &UncoveredTable,
    size: u64,
) -> (u64, usize) {
    let width = space.parameters().len();
    (0..size)
        .into_par_iter()
        .map_init(
            || vec![0usize; width],
            |buf, index| {
                space.decode(index, buf);
                (index, uncovered.score(buf))
            },
        )
        .reduce(|| (u64::MAX, 0), prefer)
}

/// Higher score wins; equal scores go to the lower index.
fn prefer(a: (u64, usize), b: (u64, usize)) -> (u64, usize) {
    if b.1 > a.1 || (b.1 == a.1 && b.0 < a.0) {
        b
    } else {
        a
    }
}

/// Uncovered obligations, one flag table per parameter pair.
///
/// Cells are indexed by value positions, so scoring a candidate costs one
/// lookup per parameter pair.
#[derive(Debug)]
struct UncoveredTable {
    pairs: Vec<PairCells>,
    remaining: usize,
}

#[derive(Debug)]
struct PairCells {
    first: usize,
    second: usize,
    /// Arity of `second`; row stride.
    stride: usize,
    open: Vec<bool>,
}

impl UncoveredTable {
    fn from_obligations(parameters: &ParameterSet, obligations: &[Obligation]) -> Self {
        let params = parameters.parameters();
        let lookup: Vec<HashMap<&DomainValue, usize>> = params
            .iter()
            .map(|p| p.domain.iter().enumerate().map(|(i, v)| (v, i)).collect())
            .collect();

        let mut pairs = Vec::new();
        let mut slot_of = HashMap::new();
        for i in 0..params.len() {
            for j in (i + 1)..params.len() {
                slot_of.insert((params[i].name.as_str(), params[j].name.as_str()), pairs.len());
                pairs.push(PairCells {
                    first: i,
                    second: j,
                    stride: params[j].arity(),
                    open: vec![false; params[i].arity() * params[j].arity()],
                });
            }
        }

        let mut remaining = 0;
        for ob in obligations {
            let Some(&slot) = slot_of.get(&(ob.param_a.as_str(), ob.param_b.as_str())) else {
                continue;
            };
            let cells = &mut pairs[slot];
            let (Some(&va), Some(&vb)) = (
                lookup[cells.first].get(&ob.value_a),
                lookup[cells.second].get(&ob.value_b),
            ) else {
                continue;
            };
            let cell = &mut cells.open[va * cells.stride + vb];
            if !*cell {
                *cell = true;
                remaining += 1;
            }
        }

        Self { pairs, remaining }
    }

    fn remaining(&self) -> usize {
        self.remaining
    }

    fn score(&self, positions: &[usize]) -> usize {
        self.pairs
            .iter()
            .filter(|p| p.open[positions[p.first] * p.stride + positions[p.second]])
            .count()
    }

    /// Close every obligation the candidate satisfies; returns how many closed.
    fn cover(&mut self, positions: &[usize]) -> usize {
        let mut closed = 0;
        for p in &mut self.pairs {
            let cell = &mut p.open[positions[p.first] * p.stride + positions[p.second]];
            if *cell {
                *cell = false;
                closed += 1;
            }
        }
        self.remaining -= closed;
        closed
    }
}
