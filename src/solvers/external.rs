//! # Solver Interface for External Executables
//!
//! Calls a MaxSAT solver executable via [`Command`]: the instance is written
//! to a temporary WCNF file passed as the last argument, and the solver's
//! `o`/`s`/`v` output lines are parsed from a pipe on `stdout`.

use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    process::{self, Command},
};

use crate::instances::{
    fio::{self, MaxsatOutput},
    Wcnf,
};

use super::{MaxsatSolution, SolveMaxsat, SolverError};

/// A weighted partial MaxSAT solver called via an external executable
///
/// The runner is stateless across calls; one instance can solve any number of
/// formulas in sequence.
#[derive(Debug, Clone)]
pub struct ExternalMaxsatSolver {
    program: PathBuf,
    args: Vec<OsString>,
}

impl ExternalMaxsatSolver {
    /// Initializes a solver from the path to its executable
    pub fn new<P: AsRef<Path>>(program: P) -> Self {
        ExternalMaxsatSolver {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Adds an argument passed to the solver before the instance path
    pub fn arg<S: Into<OsString>>(&mut self, arg: S) -> &mut Self {
        self.args.push(arg.into());
        self
    }
}

macro_rules! check_exit_code {
    ($status:expr) => {
        match $status.code() {
            // 10/20 are the SAT solver conventions, 30 the MaxSAT evaluation
            // convention for optimum found; the output is authoritative
            Some(0 | 10 | 20 | 30) => (),
            Some(x) => anyhow::bail!(SolverError::UnexpectedExitCode(x)),
            None => anyhow::bail!(SolverError::TerminatedBySignal),
        };
    };
}

impl SolveMaxsat for ExternalMaxsatSolver {
    fn signature(&self) -> &'static str {
        "external-maxsat-solver"
    }

    fn solve(&mut self, formula: &Wcnf) -> anyhow::Result<MaxsatSolution> {
        let mut writer = io::BufWriter::new(tempfile::NamedTempFile::new()?);
        formula.write_dimacs(&mut writer)?;
        let temppath = writer.into_inner()?.into_temp_path();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(&temppath)
            .stdout(process::Stdio::piped())
            .spawn()?;
        let mut stdout = io::BufReader::new(
            child
                .stdout
                .take()
                .ok_or_else(|| anyhow::anyhow!("could not capture solver stdout"))?,
        );
        let output = fio::parse_maxsat_output(&mut stdout)?;
        check_exit_code!(child.wait()?);
        // keep pipe open till after the child has terminated
        drop(stdout);
        temppath.close()?;

        match output {
            MaxsatOutput::Optimal { cost, solution } => {
                let mut assignment = match formula.max_var() {
                    Some(max_var) => solution.truncate(max_var),
                    None => Default::default(),
                };
                // one value per declared variable, unreported ones default
                // to false
                if let Some(max_var) = formula.max_var() {
                    let val = assignment.var_value(max_var);
                    assignment.assign_var(max_var, val);
                }
                assignment.replace_dont_care(false);
                Ok(MaxsatSolution { cost, assignment })
            }
            MaxsatOutput::Infeasible => Err(SolverError::Infeasible.into()),
            MaxsatOutput::Unknown => Err(SolverError::Inconclusive.into()),
        }
    }
}
