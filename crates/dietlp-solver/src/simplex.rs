use log::{debug, error, warn};
use microlp::{ComparisonOp, OptimizationDirection, Problem};

use crate::problem::{ConstraintOp, LpProblem, Sense};
use crate::solution::Solution;

/// Common interface for LP solvers
pub trait LpSolver {
    /// Solve `problem`, reporting failures through the solution status.
    fn solve(&self, problem: &LpProblem) -> Solution;

    /// Solver name for logging
    fn name(&self) -> &str;
}

/// Simplex solver backed by the `microlp` crate
#[derive(Debug, Clone)]
pub struct SimplexSolver {
    /// Tolerance used when re-checking the returned point against the constraints
    tolerance: f64,
}

impl Default for SimplexSolver {
    fn default() -> Self {
        Self { tolerance: 1e-6 }
    }
}

impl SimplexSolver {
    pub fn new() -> Self {
        Self::default()
    }

    fn is_well_formed(problem: &LpProblem) -> bool {
        let n = problem.num_variables();
        if problem.objective.coefficients.len() != n {
            error!(
                "objective has {} coefficients for {} variables",
                problem.objective.coefficients.len(),
                n
            );
            return false;
        }
        if let Some(c) = problem.constraints.iter().find(|c| c.coefficients.len() != n) {
            error!("constraint {} has {} coefficients for {} variables", c.name, c.coefficients.len(), n);
            return false;
        }
        let finite = problem.objective.coefficients.iter().all(|x| x.is_finite())
            && problem
                .constraints
                .iter()
                .all(|c| c.rhs.is_finite() && c.coefficients.iter().all(|x| x.is_finite()));
        if !finite {
            error!("problem contains non-finite coefficients");
        }
        finite
    }
}

impl LpSolver for SimplexSolver {
    fn solve(&self, problem: &LpProblem) -> Solution {
        if !Self::is_well_formed(problem) {
            return Solution::not_solved();
        }

        let direction = match problem.objective.sense {
            Sense::Minimize => OptimizationDirection::Minimize,
            Sense::Maximize => OptimizationDirection::Maximize,
        };
        let mut lp = Problem::new(direction);

        let vars: Vec<_> = problem
            .variables
            .iter()
            .zip(&problem.objective.coefficients)
            .map(|(v, &cost)| lp.add_var(cost, (v.lower, v.upper)))
            .collect();

        for c in &problem.constraints {
            let terms: Vec<_> = vars
                .iter()
                .zip(&c.coefficients)
                .filter(|&(_, &coef)| coef != 0.0)
                .map(|(&var, &coef)| (var, coef))
                .collect();
            let op = match c.op {
                ConstraintOp::Le => ComparisonOp::Le,
                ConstraintOp::Ge => ComparisonOp::Ge,
                ConstraintOp::Eq => ComparisonOp::Eq,
            };
            debug!("{}: {:?} {} {}", c.name, c.coefficients, c.op.symbol(), c.rhs);
            lp.add_constraint(terms.as_slice(), op, c.rhs);
        }

        match lp.solve() {
            Ok(solved) => {
                let values: Vec<f64> = vars.iter().map(|&var| solved[var]).collect();
                let solution = Solution::optimal(values, solved.objective());

                for v in solution.violations(problem, self.tolerance) {
                    warn!("{} returned a point outside the feasible region: {}", self.name(), v.description);
                }
                solution
            }
            Err(microlp::Error::Infeasible) => Solution::infeasible(),
            Err(microlp::Error::Unbounded) => Solution::unbounded(),
            Err(e) => {
                error!("{} failed: {}", self.name(), e);
                Solution::not_solved()
            }
        }
    }

    fn name(&self) -> &str {
        "microlp"
    }
}
