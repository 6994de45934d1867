//! # `graph`
//!
//! Computes a minimum vertex cover, a maximum clique, and a maximum cut of an
//! undirected graph by reduction to weighted partial MaxSAT, solved through
//! an external MaxSAT solver.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use anyhow::Context;
use clap::Parser;
use itertools::Itertools;
use satreduce::solvers::{ExternalMaxsatSolver, SolveMaxsat};
use satreduce_tools::encodings::graph::Graph;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the MaxSAT solver to use
    solver: PathBuf,
    /// The path to the file that describes the input graph
    graph: PathBuf,
    /// Write a Graphviz DOT description of the graph next to the input file
    #[arg(long, short)]
    visualize: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let reader = BufReader::new(
        File::open(&args.graph)
            .with_context(|| format!("could not open graph file '{}'", args.graph.display()))?,
    );
    let graph = Graph::from_file(reader)?;

    if args.visualize {
        let dot_path = args.graph.with_extension("dot");
        let mut writer = BufWriter::new(
            File::create(&dot_path)
                .with_context(|| format!("could not create '{}'", dot_path.display()))?,
        );
        graph.write_dot(&mut writer)?;
    }

    let mut solver = ExternalMaxsatSolver::new(&args.solver);

    let encoding = graph.min_vertex_cover();
    let solution = solver.solve(encoding.formula())?;
    println!("MVC {}", encoding.decode(&solution.assignment).iter().join(" "));

    let encoding = graph.max_clique();
    let solution = solver.solve(encoding.formula())?;
    println!(
        "MCLIQUE {}",
        encoding.decode(&solution.assignment).iter().join(" ")
    );

    let encoding = graph.max_cut();
    let solution = solver.solve(encoding.formula())?;
    println!("MCUT {}", encoding.decode(&solution.assignment).iter().join(" "));

    Ok(())
}
