//! # File IO for Weighted Partial CNF Instances
//!
//! Writing [`Wcnf`] formulas in the DIMACS WCNF format consumed by MaxSAT
//! solvers, and parsing the textual output such solvers produce.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::types::{Assignment, Clause};

use super::Wcnf;

/// Writes a formula to the classic DIMACS WCNF format: a `p wcnf <vars>
/// <clauses> <top>` header, hard clauses carrying the top weight, and soft
/// clauses carrying their own weight.
pub fn write_wcnf_annotated<W: Write>(writer: &mut W, wcnf: &Wcnf) -> Result<(), io::Error> {
    let top = wcnf.top_weight();
    writeln!(writer, "c WCNF file written by satreduce")?;
    writeln!(writer, "c {} hard clauses", wcnf.n_hards())?;
    writeln!(writer, "c {} soft clauses", wcnf.n_softs())?;
    writeln!(
        writer,
        "p wcnf {} {} {}",
        wcnf.n_vars(),
        wcnf.n_hards() + wcnf.n_softs(),
        top
    )?;
    for cl in wcnf.hards() {
        write!(writer, "{top} ")?;
        write_clause(writer, cl)?;
    }
    for (cl, w) in wcnf.softs() {
        write!(writer, "{w} ")?;
        write_clause(writer, cl)?;
    }
    writer.flush()
}

fn write_clause<W: Write>(writer: &mut W, clause: &Clause) -> Result<(), io::Error> {
    clause
        .iter()
        .try_for_each(|l| write!(writer, "{} ", l.to_dimacs()))?;
    writeln!(writer, "0")
}

/// Output of a weighted partial MaxSAT solver
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaxsatOutput {
    /// The solver found a provably optimal assignment with the given cost
    Optimal {
        /// The summed weight of soft clauses falsified by the assignment
        cost: usize,
        /// The optimal assignment
        solution: Assignment,
    },
    /// No assignment satisfies the hard clauses
    Infeasible,
    /// The solver terminated without a conclusive answer
    Unknown,
}

/// Errors in MaxSAT solver output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaxsatOutputError {
    /// No solution status line in the output
    #[error("no solution status line found in the output")]
    NoSLine,
    /// An optimum was claimed but no cost line precedes it
    #[error("no cost line found in the output")]
    NoOLine,
    /// An optimum was claimed but no value line describes the assignment
    #[error("no value line found in the output")]
    NoVLine,
    /// The solution status line is not one of the known statuses
    #[error("invalid solution status line found in the output")]
    InvalidSLine,
    /// A cost line could not be parsed as a non-negative integer
    #[error("invalid cost line found in the output: '{0}'")]
    InvalidOLine(String),
}

/// Parses the output of a weighted partial MaxSAT solver
///
/// Expects the standard `o` (cost), `s` (status), and `v` (assignment) line
/// scheme. Of multiple cost lines the last one counts; the assignment may be
/// split over multiple value lines.
pub fn parse_maxsat_output<R: BufRead>(reader: R) -> anyhow::Result<MaxsatOutput> {
    let mut cost: Option<usize> = None;
    let mut optimum_found = false;
    let mut solution: Option<Assignment> = None;

    for line in reader.lines() {
        let line = &line?;

        if line.starts_with("o ") || line == "o" {
            let val = line[1..].trim();
            cost = Some(
                val.parse::<usize>()
                    .map_err(|_| MaxsatOutputError::InvalidOLine(line.clone()))?,
            );
        }

        if line.starts_with("s ") {
            let status = line[1..].trim_start();
            match status {
                status if status.starts_with("UNSATISFIABLE") => {
                    return Ok(MaxsatOutput::Infeasible)
                }
                status if status.starts_with("UNKNOWN") => return Ok(MaxsatOutput::Unknown),
                status if status.starts_with("OPTIMUM FOUND") => optimum_found = true,
                _ => anyhow::bail!(MaxsatOutputError::InvalidSLine),
            }
        }

        if line.starts_with("v ") {
            match &mut solution {
                Some(assign) => assign.extend_from_vline(line)?,
                None => solution = Some(Assignment::from_vline(line)?),
            }
        }
    }

    if !optimum_found {
        anyhow::bail!(MaxsatOutputError::NoSLine);
    }
    let Some(cost) = cost else {
        anyhow::bail!(MaxsatOutputError::NoOLine);
    };
    let Some(solution) = solution else {
        anyhow::bail!(MaxsatOutputError::NoVLine);
    };
    Ok(MaxsatOutput::Optimal { cost, solution })
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{parse_maxsat_output, write_wcnf_annotated, MaxsatOutput, MaxsatOutputError};
    use crate::{clause, instances::Wcnf, types::Assignment};

    fn example_wcnf() -> Wcnf {
        let mut wcnf = Wcnf::new();
        let a = wcnf.new_var();
        let b = wcnf.new_var();
        wcnf.add_soft(10, clause![a.pos_lit()]);
        wcnf.add_soft(5, clause![b.pos_lit()]);
        wcnf.add_hard(clause![!a.pos_lit(), !b.pos_lit()]);
        wcnf
    }

    #[test]
    fn write_wcnf() {
        let mut buf = Vec::new();
        write_wcnf_annotated(&mut buf, &example_wcnf()).unwrap();
        let written = String::from_utf8(buf).unwrap();
        let expected = "c WCNF file written by satreduce\n\
            c 1 hard clauses\n\
            c 2 soft clauses\n\
            p wcnf 2 3 16\n\
            16 -1 -2 0\n\
            10 1 0\n\
            5 2 0\n";
        assert_eq!(written, expected);
    }

    #[test]
    fn parse_optimum() {
        let data = "c comment\no 7\no 5\ns OPTIMUM FOUND\nv 1 -2 0\n";
        let res = parse_maxsat_output(io::Cursor::new(data)).unwrap();
        let ground_truth = MaxsatOutput::Optimal {
            cost: 5,
            solution: Assignment::from_vline("v 1 -2 0").unwrap(),
        };
        assert_eq!(res, ground_truth);
    }

    #[test]
    fn parse_split_vlines() {
        let data = "s OPTIMUM FOUND\no 0\nv 1 -2\nv 3 0\n";
        let res = parse_maxsat_output(io::Cursor::new(data)).unwrap();
        let ground_truth = MaxsatOutput::Optimal {
            cost: 0,
            solution: Assignment::from_vline("v 1 -2 3 0").unwrap(),
        };
        assert_eq!(res, ground_truth);
    }

    #[test]
    fn parse_infeasible() {
        let data = "c comment\ns UNSATISFIABLE\n";
        let res = parse_maxsat_output(io::Cursor::new(data)).unwrap();
        assert_eq!(res, MaxsatOutput::Infeasible);
    }

    #[test]
    fn parse_unknown() {
        let data = "s UNKNOWN\n";
        let res = parse_maxsat_output(io::Cursor::new(data)).unwrap();
        assert_eq!(res, MaxsatOutput::Unknown);
    }

    #[test]
    fn parse_no_sline() {
        let data = "c comment\no 5\nv 1 -2 0\n";
        let err = parse_maxsat_output(io::Cursor::new(data)).unwrap_err();
        match err.downcast::<MaxsatOutputError>().unwrap() {
            MaxsatOutputError::NoSLine => (),
            _ => panic!(),
        }
    }

    #[test]
    fn parse_no_oline() {
        let data = "s OPTIMUM FOUND\nv 1 0\n";
        let err = parse_maxsat_output(io::Cursor::new(data)).unwrap_err();
        match err.downcast::<MaxsatOutputError>().unwrap() {
            MaxsatOutputError::NoOLine => (),
            _ => panic!(),
        }
    }

    #[test]
    fn parse_no_vline() {
        let data = "o 5\ns OPTIMUM FOUND\n";
        let err = parse_maxsat_output(io::Cursor::new(data)).unwrap_err();
        match err.downcast::<MaxsatOutputError>().unwrap() {
            MaxsatOutputError::NoVLine => (),
            _ => panic!(),
        }
    }
}
