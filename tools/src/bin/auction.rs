//! # `auction`
//!
//! Winner determination for combinatorial auctions: parses an auction
//! description, reduces it to weighted partial MaxSAT, solves through an
//! external MaxSAT solver, and reports the winning bids and benefit.

use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use satreduce::solvers::{ExternalMaxsatSolver, SolveMaxsat};
use satreduce_tools::encodings::auction::Auction;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The path to the MaxSAT solver to use
    solver: PathBuf,
    /// The path to the input file
    input_file: PathBuf,
    /// Disable the constraint that every auctioneer wins at least one of its
    /// bids
    #[arg(long)]
    no_min_win_bids: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let reader = BufReader::new(
        File::open(&args.input_file)
            .with_context(|| format!("could not open input file '{}'", args.input_file.display()))?,
    );
    let auction = Auction::from_file(reader)?;
    let encoding = auction.winner_determination(!args.no_min_win_bids);

    let mut solver = ExternalMaxsatSolver::new(&args.solver);
    let solution = solver.solve(encoding.formula())?;
    let result = encoding.decode(solution.cost, &solution.assignment);

    println!("Benefit: {}", result.benefit);
    for bid in &result.winners {
        println!("{}: {} (Price {})", bid.agent, bid.goods.join(","), bid.price);
    }
    if result.valid {
        println!("Valid solution");
    } else {
        println!("Invalid solution");
    }
    Ok(())
}
