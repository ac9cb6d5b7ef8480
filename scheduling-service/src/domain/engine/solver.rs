use std::time::Duration;

use highs::{HighsModelStatus, RowProblem, Sense, SolvedModel};

/// Four-way classification spec.md §4.7 requires of any CP-SAT-shaped solver
/// binding; HiGHS' own [`HighsModelStatus`] has finer granularity (presolve
/// errors, memory limits, ...) that collapses into `Unknown` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    Optimal,
    Feasible,
    Infeasible,
    Unknown,
}

impl SolverStatus {
    pub fn name(self) -> &'static str {
        match self {
            Self::Optimal => "OPTIMAL",
            Self::Feasible => "FEASIBLE",
            Self::Infeasible => "INFEASIBLE",
            Self::Unknown => "UNKNOWN",
        }
    }

    pub fn has_solution(self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible)
    }
}

/// Submits `pb` to HiGHS with a caller-provided time budget, maximizing.
/// Deterministic given identical inputs and solver state; no seed is set by
/// default (spec.md §4.7).
pub fn solve(pb: RowProblem, timeout: Duration) -> (SolverStatus, SolvedModel) {
    let mut model = pb.optimise(Sense::Maximise);
    model.set_option("time_limit", timeout.as_secs_f64());
    model.set_option("output_flag", false);

    let solved = model.solve();
    let status = classify(solved.status(), &solved);
    (status, solved)
}

fn classify(raw: HighsModelStatus, solved: &SolvedModel) -> SolverStatus {
    match raw {
        HighsModelStatus::Optimal => SolverStatus::Optimal,
        HighsModelStatus::Infeasible | HighsModelStatus::UnboundedOrInfeasible => {
            SolverStatus::Infeasible
        }
        HighsModelStatus::TimeLimit
        | HighsModelStatus::IterationLimit
        | HighsModelStatus::SolutionLimit
        | HighsModelStatus::MemoryLimit => {
            if solved.get_solution().columns().is_empty() {
                SolverStatus::Unknown
            } else {
                SolverStatus::Feasible
            }
        }
        _ => SolverStatus::Unknown,
    }
}
