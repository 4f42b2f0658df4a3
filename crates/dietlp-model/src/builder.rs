use std::collections::HashSet;

use dietlp_solver::{LpProblem, LpSolver, Sense, Solution, Variable};
use log::{debug, info, warn};

use crate::catalog::{Catalog, Nutrient};
use crate::constraints::{Direction, NutrientConstraint, Variant, select};
use crate::error::{ModelError, Result};
use crate::money::Money;
use crate::report::DietReport;

/// Assembles one diet LP: a non-negative servings variable per food,
/// a cost objective, and one row per nutrient bound.
#[derive(Debug)]
pub struct ModelBuilder<'a> {
    variant: Variant,
    catalog: &'a Catalog,
    unit_costs: &'a [Money],
    problem: LpProblem,
    has_objective: bool,
    constraints: Vec<NutrientConstraint>,
    seen: HashSet<(Nutrient, Direction)>,
    /// Reject foods that lack a constrained nutrient instead of treating it as zero
    strict: bool,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(variant: Variant, catalog: &'a Catalog, unit_costs: &'a [Money]) -> Result<Self> {
        if catalog.is_empty() {
            return Err(ModelError::InvalidInput("catalog has no foods".to_string()));
        }
        if unit_costs.len() != catalog.len() {
            return Err(ModelError::InvalidInput(format!(
                "{} unit costs for {} foods",
                unit_costs.len(),
                catalog.len()
            )));
        }

        let variables = catalog.foods().iter().map(|f| Variable::non_negative(&f.name)).collect();

        Ok(Self {
            variant,
            catalog,
            unit_costs,
            problem: LpProblem::new(variables),
            has_objective: false,
            constraints: Vec::new(),
            seen: HashSet::new(),
            strict: false,
        })
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Minimize the sum of unit cost times servings over every food.
    pub fn build_objective(&mut self) -> Result<()> {
        if let Some((food, cost)) = self
            .catalog
            .foods()
            .iter()
            .zip(self.unit_costs)
            .find(|(_, cost)| !cost.is_positive())
        {
            return Err(ModelError::InvalidInput(format!(
                "unit cost of {} must be positive, got {}",
                food.name, cost
            )));
        }

        let coefficients: Vec<f64> = self.unit_costs.iter().map(|c| c.as_f64()).collect();
        debug!("{:?} objective: minimize {:?}", self.variant, coefficients);
        self.problem.set_objective(coefficients, Sense::Minimize);
        self.has_objective = true;
        Ok(())
    }

    /// Append one nutrient bound as a linear row over all foods.
    pub fn add_constraint(&mut self, constraint: NutrientConstraint) -> Result<()> {
        let key = (constraint.nutrient, constraint.direction);
        if !self.seen.insert(key) {
            warn!(
                "{:?} model already bounds {} {}; rejecting {}",
                self.variant,
                constraint.nutrient,
                constraint.direction,
                constraint.describe()
            );
            return Err(ModelError::DuplicateConstraint {
                nutrient: constraint.nutrient,
                direction: constraint.direction,
            });
        }

        let mut coefficients = Vec::with_capacity(self.catalog.len());
        for food in self.catalog.foods() {
            let amount = match food.amount(constraint.nutrient) {
                Some(amount) => amount,
                None if self.strict => {
                    return Err(ModelError::MissingNutrient {
                        food: food.name.clone(),
                        nutrient: constraint.nutrient,
                    });
                }
                None => {
                    debug!("{} lists no {}; using 0", food.name, constraint.nutrient);
                    0.0
                }
            };
            coefficients.push(amount);
        }

        debug!("{:?} row {}: {}", self.variant, constraint.label(), constraint.describe());
        self.problem
            .add_constraint(constraint.label(), coefficients, constraint.direction.op(), constraint.bound);
        self.constraints.push(constraint);
        Ok(())
    }

    pub fn finish(self) -> Result<DietModel> {
        if !self.has_objective {
            return Err(ModelError::MissingObjective);
        }
        Ok(DietModel {
            variant: self.variant,
            unit_costs: self.unit_costs.to_vec(),
            constraints: self.constraints,
            problem: self.problem,
        })
    }
}

/// Build the model for `variant` from the constraints that apply to it.
pub fn build(
    variant: Variant,
    catalog: &Catalog,
    unit_costs: &[Money],
    constraints: &[NutrientConstraint],
) -> Result<DietModel> {
    let mut builder = ModelBuilder::new(variant, catalog, unit_costs)?;
    builder.build_objective()?;
    for constraint in select(constraints, variant) {
        builder.add_constraint(constraint)?;
    }
    builder.finish()
}

/// A fully built model, ready to be solved once
#[derive(Debug, Clone)]
pub struct DietModel {
    variant: Variant,
    unit_costs: Vec<Money>,
    constraints: Vec<NutrientConstraint>,
    problem: LpProblem,
}

impl DietModel {
    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn problem(&self) -> &LpProblem {
        &self.problem
    }

    pub fn constraints(&self) -> &[NutrientConstraint] {
        &self.constraints
    }

    pub fn unit_costs(&self) -> &[Money] {
        &self.unit_costs
    }

    pub fn solve(self, solver: &dyn LpSolver) -> SolvedModel {
        info!(
            "solving {:?} model ({} variables, {} constraints) with {}",
            self.variant,
            self.problem.num_variables(),
            self.problem.num_constraints(),
            solver.name()
        );
        let solution = solver.solve(&self.problem);
        info!("{:?} model: {}", self.variant, solution.status);

        SolvedModel { model: self, solution }
    }
}

/// A model together with the solver's answer for it
#[derive(Debug, Clone)]
pub struct SolvedModel {
    model: DietModel,
    solution: Solution,
}

impl SolvedModel {
    pub fn model(&self) -> &DietModel {
        &self.model
    }

    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    pub fn is_optimal(&self) -> bool {
        self.solution.status.is_optimal()
    }

    pub fn report(&self) -> DietReport {
        DietReport::new(&self.model, &self.solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodItem;
    use crate::constraints::{Scope, standard_constraints};
    use dietlp_solver::{ConstraintOp, SolutionStatus};

    fn standard_model(variant: Variant) -> DietModel {
        let catalog = Catalog::standard();
        let costs = catalog.unit_costs().unwrap();
        build(variant, &catalog, &costs, &standard_constraints()).unwrap()
    }

    #[test]
    fn test_objective_uses_unit_costs() {
        let model = standard_model(Variant::Base);
        let problem = model.problem();

        assert_eq!(problem.objective.sense, Sense::Minimize);
        assert_eq!(problem.objective.coefficients, vec![0.12, 0.24, 1.2, 0.26, 0.61]);
        assert_eq!(
            problem.variable_names().collect::<Vec<_>>(),
            vec!["Eggs", "Milk", "Yogurt", "Vegetables", "Cheerios"]
        );
        assert!(problem.variables.iter().all(|v| v.lower == 0.0 && v.upper == f64::INFINITY));
    }

    #[test]
    fn test_objective_identical_across_variants() {
        let base = standard_model(Variant::Base);
        let revised = standard_model(Variant::Revised);
        assert_eq!(base.problem().objective.coefficients, revised.problem().objective.coefficients);
        assert_eq!(base.unit_costs(), revised.unit_costs());
    }

    #[test]
    fn test_constraint_rows_match_profiles() {
        let catalog = Catalog::standard();
        let model = standard_model(Variant::Revised);
        assert_eq!(model.problem().num_constraints(), 10);

        for (row, constraint) in model.problem().constraints.iter().zip(model.constraints()) {
            assert_eq!(row.name, constraint.label());
            assert_eq!(row.rhs, constraint.bound);
            assert_eq!(row.op, constraint.direction.op());
            for (coef, food) in row.coefficients.iter().zip(catalog.foods()) {
                assert_eq!(Some(*coef), food.amount(constraint.nutrient), "{} / {}", row.name, food.name);
            }
        }

        let sodium = &model.problem().constraints[0];
        assert_eq!(sodium.coefficients, vec![70.0, 115.0, 60.0, 10.0, 190.0]);
        assert_eq!(sodium.op, ConstraintOp::Le);
        let calcium_max = &model.problem().constraints[9];
        assert_eq!(calcium_max.name, "calcium_max");
        assert_eq!(calcium_max.rhs, 1950.0);
    }

    #[test]
    fn test_duplicate_constraint_rejected() {
        let catalog = Catalog::standard();
        let costs = catalog.unit_costs().unwrap();
        let mut builder = ModelBuilder::new(Variant::Base, &catalog, &costs).unwrap();

        builder
            .add_constraint(NutrientConstraint::at_least(Nutrient::Protein, 50.0, Scope::Both))
            .unwrap();
        let err = builder
            .add_constraint(NutrientConstraint::at_least(Nutrient::Protein, 60.0, Scope::Both))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::DuplicateConstraint {
                nutrient: Nutrient::Protein,
                direction: Direction::AtLeast
            }
        );

        // Opposite direction on the same nutrient is a window, not a duplicate.
        builder
            .add_constraint(NutrientConstraint::at_most(Nutrient::Protein, 150.0, Scope::Both))
            .unwrap();
    }

    #[test]
    fn test_missing_nutrient_is_zero_unless_strict() {
        let catalog = Catalog::new(vec![
            FoodItem::new("Rice", Money::from_cents(300), 10).with(Nutrient::Calories, 200.0),
            FoodItem::new("Beans", Money::from_cents(150), 5)
                .with(Nutrient::Calories, 110.0)
                .with(Nutrient::Protein, 7.0),
        ]);
        let costs = catalog.unit_costs().unwrap();
        let protein = NutrientConstraint::at_least(Nutrient::Protein, 20.0, Scope::Both);

        let mut lenient = ModelBuilder::new(Variant::Base, &catalog, &costs).unwrap();
        lenient.add_constraint(protein).unwrap();
        lenient.build_objective().unwrap();
        let model = lenient.finish().unwrap();
        assert_eq!(model.problem().constraints[0].coefficients, vec![0.0, 7.0]);

        let mut strict = ModelBuilder::new(Variant::Base, &catalog, &costs).unwrap().strict(true);
        assert_eq!(
            strict.add_constraint(protein).unwrap_err(),
            ModelError::MissingNutrient {
                food: "Rice".to_string(),
                nutrient: Nutrient::Protein
            }
        );
    }

    #[test]
    fn test_finish_requires_objective() {
        let catalog = Catalog::standard();
        let costs = catalog.unit_costs().unwrap();
        let builder = ModelBuilder::new(Variant::Base, &catalog, &costs).unwrap();
        assert_eq!(builder.finish().unwrap_err(), ModelError::MissingObjective);
    }

    #[test]
    fn test_rejects_mismatched_or_non_positive_costs() {
        let catalog = Catalog::standard();
        let short = vec![Money::from_cents(10); 3];
        assert!(matches!(
            ModelBuilder::new(Variant::Base, &catalog, &short),
            Err(ModelError::InvalidInput(_))
        ));

        let zero = vec![Money::from_cents(0); 5];
        let mut builder = ModelBuilder::new(Variant::Base, &catalog, &zero).unwrap();
        assert!(matches!(builder.build_objective(), Err(ModelError::InvalidInput(_))));
    }

    #[test]
    fn test_solve_records_status() {
        struct Refuses;
        impl LpSolver for Refuses {
            fn solve(&self, _problem: &LpProblem) -> Solution {
                Solution::not_solved()
            }
            fn name(&self) -> &str {
                "refuses"
            }
        }

        let solved = standard_model(Variant::Base).solve(&Refuses);
        assert!(!solved.is_optimal());
        assert_eq!(solved.solution().status, SolutionStatus::NotSolved);
        assert_eq!(solved.model().variant(), Variant::Base);
    }
}
