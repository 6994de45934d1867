//! # Interfaces to MaxSAT Solvers
//!
//! This project never solves anything itself; it builds [`Wcnf`] formulas and
//! hands them to a collaborator implementing [`SolveMaxsat`]. The one
//! implementation shipped here calls an external solver executable
//! ([`ExternalMaxsatSolver`]), but an in-process library or a network service
//! are equally valid behind the same trait.

use thiserror::Error;

use crate::{instances::Wcnf, types::Assignment};

pub mod external;
pub use external::ExternalMaxsatSolver;

/// An optimal answer from a weighted partial MaxSAT solver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxsatSolution {
    /// The minimum achievable summed weight of falsified soft clauses over
    /// all assignments satisfying the hard clauses
    pub cost: usize,
    /// An assignment attaining that cost, with exactly one value per
    /// variable declared in the formula
    pub assignment: Assignment,
}

/// Trait for weighted partial MaxSAT solvers
///
/// Solving is blocking; no timeout is imposed at this level and failures are
/// never retried.
pub trait SolveMaxsat {
    /// Gets a signature of the solver implementation
    fn signature(&self) -> &'static str;

    /// Solves a formula to optimality
    ///
    /// # Errors
    ///
    /// - [`SolverError::Infeasible`] if no assignment satisfies the hard
    ///   clauses
    /// - [`SolverError::Inconclusive`] if the solver gave up without an
    ///   answer
    /// - Implementation-specific errors for invocation or output failures
    fn solve(&mut self, formula: &Wcnf) -> anyhow::Result<MaxsatSolution>;
}

/// Type representing solver failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The hard clauses of the formula admit no assignment
    #[error("no assignment satisfies the hard clauses")]
    Infeasible,
    /// The solver terminated without a conclusive answer
    #[error("the solver terminated without a conclusive answer")]
    Inconclusive,
    /// The solver process returned an exit code outside the accepted set
    #[error("solver returned unexpected exit code {0}")]
    UnexpectedExitCode(i32),
    /// The solver process was terminated by a signal
    #[error("solver process terminated by signal")]
    TerminatedBySignal,
}
