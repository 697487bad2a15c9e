//! Reference system under test: real and complex roots of a·x² + b·x + c = 0.

use serde::Serialize;
use tessera_explore::solver::TestVector;

use crate::campaign::{numeric, CampaignError, Outcome, SystemUnderTest};

/// Largest residual |a·x² + b·x + c| accepted for a root.
pub const RESIDUAL_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuadraticError {
    #[error("no solution: a = b = 0 but c = {c}")]
    NoSolution { c: f64 },
}

/// Solutions of a quadratic (or degenerate linear) equation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Roots {
    /// 0 = 0: every x is a solution.
    Infinite,
    /// a = 0, b ≠ 0.
    Linear(f64),
    /// Δ > 0. First root uses +√Δ.
    TwoReal(f64, f64),
    /// Δ = 0.
    Double(f64),
    /// Δ < 0: the conjugate pair re ± i·im.
    Complex { re: f64, im: f64 },
}

impl Roots {
    /// Number of distinct roots; `None` for infinitely many.
    pub fn count(&self) -> Option<usize> {
        match self {
            Roots::Infinite => None,
            Roots::Linear(_) | Roots::Double(_) => Some(1),
            Roots::TwoReal(..) | Roots::Complex { .. } => Some(2),
        }
    }

    /// Every root satisfies the equation within [`RESIDUAL_TOLERANCE`].
    pub fn verify(&self, a: f64, b: f64, c: f64) -> bool {
        match *self {
            Roots::Infinite => a == 0.0 && b == 0.0 && c == 0.0,
            Roots::Linear(x) | Roots::Double(x) => verify_real(a, b, c, x),
            Roots::TwoReal(x1, x2) => verify_real(a, b, c, x1) && verify_real(a, b, c, x2),
            Roots::Complex { re, im } => {
                verify_complex(a, b, c, re, im) && verify_complex(a, b, c, re, -im)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DiscriminantKind {
    Positive,
    Zero,
    Negative,
}

impl DiscriminantKind {
    pub fn of(discriminant: f64) -> Self {
        if discriminant > 0.0 {
            DiscriminantKind::Positive
        } else if discriminant == 0.0 {
            DiscriminantKind::Zero
        } else {
            DiscriminantKind::Negative
        }
    }
}

/// b² − 4ac.
pub fn discriminant(a: f64, b: f64, c: f64) -> f64 {
    b * b - 4.0 * a * c
}

pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Result<Roots, QuadraticError> {
    if a == 0.0 {
        if b == 0.0 {
            if c == 0.0 {
                return Ok(Roots::Infinite);
            }
            return Err(QuadraticError::NoSolution { c });
        }
        return Ok(Roots::Linear(-c / b));
    }

    let delta = discriminant(a, b, c);
    let roots = match DiscriminantKind::of(delta) {
        DiscriminantKind::Positive => {
            let sqrt_delta = delta.sqrt();
            Roots::TwoReal((-b + sqrt_delta) / (2.0 * a), (-b - sqrt_delta) / (2.0 * a))
        }
        DiscriminantKind::Zero => Roots::Double(-b / (2.0 * a)),
        DiscriminantKind::Negative => Roots::Complex {
            re: -b / (2.0 * a),
            im: (-delta).sqrt() / (2.0 * a),
        },
    };
    Ok(roots)
}

pub fn verify_real(a: f64, b: f64, c: f64, x: f64) -> bool {
    (a * x * x + b * x + c).abs() < RESIDUAL_TOLERANCE
}

/// Check x = re + i·im. Expands a·x² + b·x + c into real and imaginary parts.
pub fn verify_complex(a: f64, b: f64, c: f64, re: f64, im: f64) -> bool {
    let real = a * (re * re - im * im) + b * re + c;
    let imag = 2.0 * a * re * im + b * im;
    real.hypot(imag) < RESIDUAL_TOLERANCE
}

/// Harness adapter reading parameters `a`, `b` and `c`.
///
/// Returned roots must verify. `NoSolution` is only acceptable when
/// a = b = 0 and c ≠ 0.
#[derive(Debug, Clone, Default)]
pub struct QuadraticSut;

impl QuadraticSut {
    pub const PARAMETERS: [&'static str; 3] = ["a", "b", "c"];
}

impl SystemUnderTest for QuadraticSut {
    fn name(&self) -> &str {
        "quadratic"
    }

    fn execute(&self, vector: &TestVector) -> Result<Outcome, CampaignError> {
        let a = numeric(vector, "a")?;
        let b = numeric(vector, "b")?;
        let c = numeric(vector, "c")?;

        let outcome = match solve_quadratic(a, b, c) {
            Ok(roots) if roots.verify(a, b, c) => Outcome::Passed,
            Ok(roots) => Outcome::Failed {
                reason: format!("roots {roots:?} do not satisfy a={a}, b={b}, c={c}"),
            },
            Err(err) if a == 0.0 && b == 0.0 && c != 0.0 => Outcome::Rejected {
                reason: err.to_string(),
            },
            Err(err) => Outcome::Failed {
                reason: format!("unexpected error: {err}"),
            },
        };
        Ok(outcome)
    }
}
