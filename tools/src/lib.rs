//! # satreduce-tools - Problem Encodings and CLI Frontends
//!
//! This crate contains the problem-specific reductions to weighted partial
//! MaxSAT and the command line tools driving them. They are separate from the
//! `satreduce` library because the library knows nothing about any concrete
//! problem domain.

pub mod encodings {
    //! # Reductions of Combinatorial Problems to Weighted Partial MaxSAT

    pub mod auction;
    pub mod graph;
}
