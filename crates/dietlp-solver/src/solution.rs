use crate::problem::{ConstraintOp, LpProblem};

/// The result of solving an LP problem
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Solution status
    pub status: SolutionStatus,
    /// Full-precision value of each variable; empty unless optimal
    pub values: Vec<f64>,
    /// Optimal objective value; `None` unless optimal
    pub objective_value: Option<f64>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    /// An optimal solution was found
    Optimal,
    /// The problem is infeasible (no solution exists)
    Infeasible,
    /// The problem is unbounded
    Unbounded,
    /// The solver did not terminate with an answer, or was never invoked
    NotSolved,
}

impl SolutionStatus {
    /// Human-readable status label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            SolutionStatus::Optimal => "Optimal",
            SolutionStatus::Infeasible => "Infeasible",
            SolutionStatus::Unbounded => "Unbounded",
            SolutionStatus::NotSolved => "Not Solved",
        }
    }

    pub fn is_optimal(self) -> bool {
        self == SolutionStatus::Optimal
    }
}

impl std::fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Information about a violated constraint
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintViolation {
    /// Constraint name
    pub constraint: String,
    /// Required value (from constraint RHS)
    pub required: f64,
    /// Actual value achieved
    pub actual: f64,
    /// How much the constraint is violated by
    pub violation_amount: f64,
    /// Human-readable description of what's wrong
    pub description: String,
}

impl Solution {
    pub fn optimal(values: Vec<f64>, objective_value: f64) -> Self {
        Self {
            status: SolutionStatus::Optimal,
            values,
            objective_value: Some(objective_value),
        }
    }

    pub fn infeasible() -> Self {
        Self::without_values(SolutionStatus::Infeasible)
    }

    pub fn unbounded() -> Self {
        Self::without_values(SolutionStatus::Unbounded)
    }

    pub fn not_solved() -> Self {
        Self::without_values(SolutionStatus::NotSolved)
    }

    fn without_values(status: SolutionStatus) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: None,
        }
    }

    /// Constraints of `problem` that this solution's values violate, worst first.
    /// A solution without values violates nothing.
    pub fn violations(&self, problem: &LpProblem, tolerance: f64) -> Vec<ConstraintViolation> {
        if self.values.is_empty() {
            return Vec::new();
        }

        let mut violations: Vec<ConstraintViolation> = problem
            .constraints
            .iter()
            .filter(|c| !c.is_satisfied(&self.values, tolerance))
            .map(|c| {
                let lhs = c.lhs(&self.values);
                let amount = (lhs - c.rhs).abs();
                let description = match c.op {
                    ConstraintOp::Le => format!("{} exceeds maximum of {:.2} by {:.2}", c.name, c.rhs, amount),
                    ConstraintOp::Ge => format!("{} is below minimum of {:.2} by {:.2}", c.name, c.rhs, amount),
                    ConstraintOp::Eq => format!("{} requires exactly {:.2} but got {:.2}", c.name, c.rhs, lhs),
                };
                ConstraintViolation {
                    constraint: c.name.clone(),
                    required: c.rhs,
                    actual: lhs,
                    violation_amount: amount,
                    description,
                }
            })
            .collect();

        violations.sort_by(|a, b| b.violation_amount.total_cmp(&a.violation_amount));
        violations
    }

    /// Names of constraints that hold with equality at this solution.
    pub fn binding_constraints<'a>(&self, problem: &'a LpProblem, tolerance: f64) -> Vec<&'a str> {
        if self.values.is_empty() {
            return Vec::new();
        }
        problem
            .constraints
            .iter()
            .filter(|c| (c.lhs(&self.values) - c.rhs).abs() <= tolerance)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Value of variable `index`, if the solution carries values.
    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Variable;

    fn two_var_problem() -> LpProblem {
        let mut problem = LpProblem::new(vec![Variable::non_negative("x"), Variable::non_negative("y")]);
        problem.add_constraint("sum_min", vec![1.0, 1.0], ConstraintOp::Ge, 4.0);
        problem.add_constraint("x_max", vec![1.0, 0.0], ConstraintOp::Le, 3.0);
        problem
    }

    #[test]
    fn test_violations_sorted_worst_first() {
        let problem = two_var_problem();
        let solution = Solution::optimal(vec![5.0, -4.0], 0.0);

        let violations = solution.violations(&problem, 1e-9);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].constraint, "sum_min");
        assert!((violations[0].violation_amount - 3.0).abs() < 1e-9);
        assert_eq!(violations[1].constraint, "x_max");
        assert!(violations[1].description.contains("exceeds maximum"));
    }

    #[test]
    fn test_binding_constraints() {
        let problem = two_var_problem();
        let solution = Solution::optimal(vec![3.0, 1.0], 0.0);

        assert!(solution.violations(&problem, 1e-9).is_empty());
        assert_eq!(solution.binding_constraints(&problem, 1e-9), vec!["sum_min", "x_max"]);
    }

    #[test]
    fn test_failed_solution_has_no_values() {
        for solution in [Solution::infeasible(), Solution::unbounded(), Solution::not_solved()] {
            assert!(!solution.status.is_optimal());
            assert!(solution.values.is_empty());
            assert_eq!(solution.objective_value, None);
            assert_eq!(solution.value(0), None);
            assert!(solution.violations(&two_var_problem(), 1e-9).is_empty());
        }
        assert_eq!(SolutionStatus::NotSolved.label(), "Not Solved");
        assert_eq!(SolutionStatus::Optimal.to_string(), "Optimal");
    }
}
