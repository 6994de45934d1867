//! # satreduce - MaxSAT Reductions for Small Combinatorial Problems
//!
//! `satreduce` provides the building blocks for reducing small NP-hard
//! decision and optimization problems to weighted partial MaxSAT: a weighted
//! CNF formula type with a hard/soft clause split ([`instances::Wcnf`]), the
//! literal and assignment types that go with it ([`types`]), and an interface
//! for delegating the actual solving to an external MaxSAT solver
//! ([`solvers`]).
//!
//! The problem-specific encodings (combinatorial auctions, vertex cover,
//! clique, cut) and their command line frontends live in the
//! `satreduce-tools` crate.

pub mod instances;
pub mod solvers;
pub mod types;
