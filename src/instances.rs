//! # Weighted Partial CNF Instance Representation
//!
//! The [`Wcnf`] type is the target of every reduction in this project: a CNF
//! formula split into hard clauses, which any accepted assignment must
//! satisfy, and weighted soft clauses, where falsifying a clause incurs its
//! weight as cost. This is the native input language of weighted partial
//! MaxSAT solvers.

use std::io;

use crate::{
    types::{Assignment, Clause, Var},
    var,
};

pub mod fio;

/// A weighted partial CNF formula.
///
/// Variables are allocated through [`Wcnf::new_var`], monotonically and
/// without reuse. Hard and soft clauses keep their insertion order; encoders
/// rely on this to map decision variables back to domain objects by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Wcnf {
    n_vars: u32,
    hard: Vec<Clause>,
    soft: Vec<(Clause, usize)>,
}

impl Wcnf {
    /// Creates a new empty formula
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates and returns the next unused variable
    ///
    /// # Panics
    ///
    /// If the variable index space is exhausted.
    pub fn new_var(&mut self) -> Var {
        let var = var![self.n_vars];
        self.n_vars += 1;
        var
    }

    /// Allocates `n` fresh variables and returns them in allocation order
    pub fn new_vars(&mut self, n: usize) -> Vec<Var> {
        (0..n).map(|_| self.new_var()).collect()
    }

    /// Gets the number of allocated variables
    pub fn n_vars(&self) -> u32 {
        self.n_vars
    }

    /// Gets the variable with the highest index, if any variable was allocated
    pub fn max_var(&self) -> Option<Var> {
        if self.n_vars == 0 {
            None
        } else {
            Some(var![self.n_vars - 1])
        }
    }

    /// Adds a hard clause to the formula
    ///
    /// Callers must only reference variables allocated through this formula;
    /// this is checked with a debug assertion.
    pub fn add_hard(&mut self, clause: Clause) {
        debug_assert!(self.in_range(&clause));
        self.hard.push(clause);
    }

    /// Adds a soft clause with the given weight to the formula
    ///
    /// # Panics
    ///
    /// In debug builds, if `weight` is zero or a literal references an
    /// unallocated variable.
    pub fn add_soft(&mut self, weight: usize, clause: Clause) {
        debug_assert!(weight > 0, "soft clauses carry a positive weight");
        debug_assert!(self.in_range(&clause));
        self.soft.push((clause, weight));
    }

    fn in_range(&self, clause: &Clause) -> bool {
        clause.iter().all(|l| l.vidx32() < self.n_vars)
    }

    /// Gets the hard clauses in insertion order
    pub fn hards(&self) -> &[Clause] {
        &self.hard
    }

    /// Gets the weighted soft clauses in insertion order
    pub fn softs(&self) -> &[(Clause, usize)] {
        &self.soft
    }

    /// Gets the number of hard clauses
    pub fn n_hards(&self) -> usize {
        self.hard.len()
    }

    /// Gets the number of soft clauses
    pub fn n_softs(&self) -> usize {
        self.soft.len()
    }

    /// Gets the sum of all soft clause weights. An optimal cost can never
    /// exceed this value, and `sum_soft_weights - cost` converts a MaxSAT
    /// cost into a domain-level benefit.
    pub fn sum_soft_weights(&self) -> usize {
        self.soft.iter().fold(0, |sum, (_, w)| sum + w)
    }

    /// Gets the sentinel weight marking a clause as hard when hard and soft
    /// clauses share one representation, as in the DIMACS WCNF format.
    /// Strictly greater than the sum of all soft weights.
    pub fn top_weight(&self) -> usize {
        self.sum_soft_weights() + 1
    }

    /// Evaluates the formula under an assignment. Returns the cost of the
    /// assignment, i.e., the summed weight of falsified soft clauses, or
    /// `None` if a hard clause is falsified.
    pub fn evaluate(&self, assignment: &Assignment) -> Option<usize> {
        if !self.hard.iter().all(|cl| cl.is_sat(assignment)) {
            return None;
        }
        Some(self.soft.iter().fold(0, |cost, (cl, w)| {
            if cl.is_sat(assignment) {
                cost
            } else {
                cost + w
            }
        }))
    }

    /// Writes the formula to DIMACS WCNF (`p wcnf` header with top weight)
    pub fn write_dimacs<W: io::Write>(&self, writer: &mut W) -> Result<(), io::Error> {
        fio::write_wcnf_annotated(writer, self)
    }
}
