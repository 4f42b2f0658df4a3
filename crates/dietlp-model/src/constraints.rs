use std::fmt;

use dietlp_solver::ConstraintOp;

use crate::catalog::Nutrient;

/// Side of the bound a nutrient total must stay on
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    AtMost,
    AtLeast,
}

impl Direction {
    pub fn op(self) -> ConstraintOp {
        match self {
            Direction::AtMost => ConstraintOp::Le,
            Direction::AtLeast => ConstraintOp::Ge,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Direction::AtMost => "max",
            Direction::AtLeast => "min",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.op().symbol())
    }
}

/// Which problem a model is built for
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Base,
    Revised,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Base, Variant::Revised];

    pub fn title(self) -> &'static str {
        match self {
            Variant::Base => "Diet Problem",
            Variant::Revised => "Revised Diet Problem",
        }
    }
}

/// Which variants a constraint belongs to
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Base,
    Revised,
    Both,
}

/// A declarative bound on the total of one nutrient across all servings
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientConstraint {
    pub nutrient: Nutrient,
    pub bound: f64,
    pub direction: Direction,
    pub applies_in: Scope,
}

impl NutrientConstraint {
    pub const fn at_least(nutrient: Nutrient, bound: f64, applies_in: Scope) -> Self {
        Self {
            nutrient,
            bound,
            direction: Direction::AtLeast,
            applies_in,
        }
    }

    pub const fn at_most(nutrient: Nutrient, bound: f64, applies_in: Scope) -> Self {
        Self {
            nutrient,
            bound,
            direction: Direction::AtMost,
            applies_in,
        }
    }

    pub fn applies_to(&self, variant: Variant) -> bool {
        matches!(
            (self.applies_in, variant),
            (Scope::Both, _) | (Scope::Base, Variant::Base) | (Scope::Revised, Variant::Revised)
        )
    }

    /// Label used for the LP row, e.g. `calcium_min`
    pub fn label(&self) -> String {
        format!("{}_{}", self.nutrient.key(), self.direction.suffix())
    }

    /// Bound with its unit, e.g. `calcium >= 1300 mg`
    pub fn describe(&self) -> String {
        format!("{} {} {} {}", self.nutrient, self.direction, self.bound, self.nutrient.unit())
    }
}

/// Recommended daily calcium intake, mg
pub const CALCIUM_MIN: f64 = 1300.0;

/// Daily nutrient bounds for both problems, in report order.
pub fn standard_constraints() -> Vec<NutrientConstraint> {
    use Nutrient::*;
    use Scope::*;

    vec![
        NutrientConstraint::at_most(Sodium, 5000.0, Both),
        NutrientConstraint::at_least(Calories, 2000.0, Both),
        NutrientConstraint::at_least(Protein, 50.0, Both),
        NutrientConstraint::at_least(VitaminD, 20.0, Both),
        NutrientConstraint::at_least(Calcium, CALCIUM_MIN, Both),
        NutrientConstraint::at_least(Iron, 18.0, Both),
        NutrientConstraint::at_least(Potassium, 4700.0, Both),
        NutrientConstraint::at_least(Zinc, 11.0, Revised),
        NutrientConstraint::at_most(AddedSugar, 50.0, Revised),
        NutrientConstraint::at_most(Calcium, CALCIUM_MIN * 1.5, Revised),
    ]
}

/// The subset of `constraints` that applies to `variant`, order preserved.
pub fn select(constraints: &[NutrientConstraint], variant: Variant) -> Vec<NutrientConstraint> {
    constraints.iter().filter(|c| c.applies_to(variant)).copied().collect()
}
