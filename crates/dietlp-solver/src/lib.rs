mod problem;
mod simplex;
mod solution;

pub use problem::{Constraint, ConstraintOp, LpProblem, Objective, Sense, Variable};
pub use simplex::{LpSolver, SimplexSolver};
pub use solution::{ConstraintViolation, Solution, SolutionStatus};
