use thiserror::Error;

use crate::catalog::Nutrient;
use crate::constraints::Direction;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Duplicate constraint: {nutrient} {direction} already present in this model")]
    DuplicateConstraint { nutrient: Nutrient, direction: Direction },
    #[error("Food {food} has no {nutrient} value")]
    MissingNutrient { food: String, nutrient: Nutrient },
    #[error("Model has no objective")]
    MissingObjective,
}

pub type Result<T> = std::result::Result<T, ModelError>;
