//! Shared test tooling: an exhaustive MaxSAT "solver" for small formulas

use satreduce::{
    instances::Wcnf,
    solvers::{MaxsatSolution, SolveMaxsat, SolverError},
    types::{Assignment, Var},
};

/// Solves by enumerating all assignments. Only usable for formulas with few
/// variables, which is all the tests ever build.
pub struct BruteForce;

impl SolveMaxsat for BruteForce {
    fn signature(&self) -> &'static str {
        "brute-force"
    }

    fn solve(&mut self, formula: &Wcnf) -> anyhow::Result<MaxsatSolution> {
        let n_vars = formula.n_vars();
        assert!(n_vars < 20, "exhaustive enumeration only works for tiny formulas");
        let mut best: Option<MaxsatSolution> = None;
        for mask in 0_u32..(1 << n_vars) {
            let assignment: Assignment = (0..n_vars)
                .map(|idx| {
                    let var = Var::new(idx);
                    if mask & (1 << idx) != 0 {
                        var.pos_lit()
                    } else {
                        var.neg_lit()
                    }
                })
                .collect();
            if let Some(cost) = formula.evaluate(&assignment) {
                if best.as_ref().map_or(true, |sol| cost < sol.cost) {
                    best = Some(MaxsatSolution { cost, assignment });
                }
            }
        }
        best.ok_or_else(|| SolverError::Infeasible.into())
    }
}
