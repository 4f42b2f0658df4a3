pub mod builder;
pub mod catalog;
pub mod constraints;
pub mod error;
pub mod money;
pub mod report;

pub use builder::{DietModel, ModelBuilder, SolvedModel, build};
pub use catalog::{Catalog, FoodItem, Nutrient};
pub use constraints::{Direction, NutrientConstraint, Scope, Variant, select, standard_constraints};
pub use error::{ModelError, Result};
pub use money::{Money, unit_cost};
pub use report::{DietReport, Serving, UnitCost, UnitCostReport, round2};
