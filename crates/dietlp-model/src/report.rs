//! Human-readable and serializable summaries of solved models.
//!
//! Reported quantities are rounded to two decimals; the full-precision values
//! stay on the [`Solution`].

use std::fmt;

use dietlp_solver::{Solution, SolutionStatus};

use crate::builder::DietModel;
use crate::catalog::Catalog;
use crate::constraints::Variant;
use crate::money::Money;

/// Tolerance for treating a nutrient row as binding
const BINDING_TOLERANCE: f64 = 1e-6;

/// Round to two decimals for display, folding `-0.00` into `0.00`.
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Serving {
    pub food: String,
    pub quantity: f64,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct DietReport {
    pub title: &'static str,
    pub variant: Variant,
    pub status: SolutionStatus,
    /// Empty unless the status is optimal
    pub servings: Vec<Serving>,
    pub minimized_cost: Option<f64>,
    /// Nutrient rows that hold with equality at the optimum
    pub binding: Vec<String>,
}

impl DietReport {
    pub fn new(model: &DietModel, solution: &Solution) -> Self {
        let problem = model.problem();
        let optimal = solution.status.is_optimal();

        let servings = if optimal {
            problem
                .variable_names()
                .zip(&solution.values)
                .map(|(name, &value)| Serving {
                    food: name.to_string(),
                    quantity: round2(value),
                })
                .collect()
        } else {
            Vec::new()
        };

        let binding = solution
            .binding_constraints(problem, BINDING_TOLERANCE)
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            title: model.variant().title(),
            variant: model.variant(),
            status: solution.status,
            servings,
            minimized_cost: solution.objective_value.filter(|_| optimal).map(round2),
            binding,
        }
    }
}

impl fmt::Display for DietReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Status: {}", self.status)?;

        let Some(cost) = self.minimized_cost else {
            let reason = match self.status {
                SolutionStatus::Infeasible => "no combination of servings satisfies every constraint",
                SolutionStatus::Unbounded => "the cost can decrease without limit",
                _ => "the solver did not produce a solution",
            };
            return writeln!(f, "No usable servings: {}", reason);
        };

        writeln!(f, "Servings of:")?;
        for serving in &self.servings {
            writeln!(f, "  - {} = {:.2}", serving.food, serving.quantity)?;
        }
        writeln!(f, "Minimized Cost: {:.2}", cost)?;
        if !self.binding.is_empty() {
            writeln!(f, "Binding: {}", self.binding.join(", "))?;
        }
        Ok(())
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCost {
    pub food: String,
    pub per_serving: Money,
}

/// Cost per serving of every food in the catalog
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCostReport {
    pub costs: Vec<UnitCost>,
}

impl UnitCostReport {
    pub fn new(catalog: &Catalog, unit_costs: &[Money]) -> Self {
        let costs = catalog
            .foods()
            .iter()
            .zip(unit_costs)
            .map(|(food, &per_serving)| UnitCost {
                food: food.name.clone(),
                per_serving,
            })
            .collect();
        Self { costs }
    }
}

impl fmt::Display for UnitCostReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cost in &self.costs {
            writeln!(f, "{}: {} per serving", cost.food, cost.per_serving)?;
        }
        Ok(())
    }
}
