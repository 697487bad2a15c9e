pub mod solver;

pub use solver::coverage::{enumerate_obligations, validate, CoverageReport, Obligation};
pub use solver::domain::ValueSpace;
pub use solver::greedy::{generate, GenerateError, Generation, PairwiseGenerator};
pub use solver::{TestSuite, TestVector};
