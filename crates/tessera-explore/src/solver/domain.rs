//! The value space: the Cartesian product of all parameter domains.
//!
//! Candidates are addressed by a mixed-radix index. The first declared
//! parameter is the most significant digit and the last is the least, so
//! scanning indices in ascending order walks the nested loops a -> b -> c
//! (outer to inner) in domain order. The product is never materialized.

use tessera_ir::types::ParameterSet;

use super::TestVector;

/// Lazy view over every full assignment of a parameter set.
#[derive(Debug, Clone)]
pub struct ValueSpace<'a> {
    parameters: &'a ParameterSet,
    radices: Vec<usize>,
}

impl<'a> ValueSpace<'a> {
    pub fn new(parameters: &'a ParameterSet) -> Self {
        Self {
            parameters,
            radices: parameters.arities(),
        }
    }

    pub fn parameters(&self) -> &'a ParameterSet {
        self.parameters
    }

    /// Number of candidates, or `None` if it does not fit in a `u64`.
    pub fn size(&self) -> Option<u64> {
        self.radices
            .iter()
            .try_fold(1u64, |acc, &r| acc.checked_mul(r as u64))
    }

    /// Write the per-parameter value positions of candidate `index` into `out`.
    ///
    /// `out` must have one slot per parameter and `index` must be below `size()`.
    pub fn decode(&self, mut index: u64, out: &mut [usize]) {
        for (slot, &radix) in out.iter_mut().zip(&self.radices).rev() {
            let radix = radix as u64;
            *slot = (index % radix) as usize;
            index /= radix;
        }
    }

    /// Materialize the assignment at the given value positions.
    pub fn vector_from_positions(&self, positions: &[usize]) -> TestVector {
        let mut vector = TestVector::new();
        for (param, &pos) in self.parameters.parameters().iter().zip(positions) {
            vector
                .assignments
                .insert(param.name.clone(), param.domain[pos].clone());
        }
        vector
    }

    /// The assignment at candidate `index`, if in range.
    pub fn vector_at(&self, index: u64) -> Option<TestVector> {
        if index >= self.size()? {
            return None;
        }
        let mut positions = vec![0; self.radices.len()];
        self.decode(index, &mut positions);
        Some(self.vector_from_positions(&positions))
    }

    /// Value positions of every candidate, in index order.
    pub fn positions(&self) -> Positions<'_> {
        Positions {
            radices: &self.radices,
            current: vec![0; self.radices.len()],
            done: self.radices.iter().any(|&r| r == 0),
        }
    }

    /// Every full assignment, in index order.
    pub fn iter(&self) -> impl Iterator<Item = TestVector> + '_ {
        self.positions()
            .map(move |positions| self.vector_from_positions(&positions))
    }
}

/// Odometer over the mixed-radix digits of a value space.
#[derive(Debug, Clone)]
pub struct Positions<'s> {
    radices: &'s [usize],
    current: Vec<usize>,
    done: bool,
}

impl Iterator for Positions<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.current.clone();

        // Increment, least significant digit last.
        self.done = true;
        for (digit, &radix) in self.current.iter_mut().zip(self.radices).rev() {
            *digit += 1;
            if *digit < radix {
                self.done = false;
                break;
            }
            *digit = 0;
        }

        Some(item)
    }
}
