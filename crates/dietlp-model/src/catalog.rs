use std::collections::BTreeMap;
use std::fmt;

use log::debug;

use crate::error::Result;
use crate::money::{Money, unit_cost};

/// Nutrients tracked per serving
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Nutrient {
    Sodium,
    Calories,
    Protein,
    VitaminD,
    Calcium,
    Iron,
    Potassium,
    Zinc,
    AddedSugar,
}

impl Nutrient {
    pub const ALL: [Nutrient; 9] = [
        Nutrient::Sodium,
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::VitaminD,
        Nutrient::Calcium,
        Nutrient::Iron,
        Nutrient::Potassium,
        Nutrient::Zinc,
        Nutrient::AddedSugar,
    ];

    /// Identifier used in constraint labels, e.g. `vitamin_d`
    pub fn key(self) -> &'static str {
        match self {
            Nutrient::Sodium => "sodium",
            Nutrient::Calories => "calories",
            Nutrient::Protein => "protein",
            Nutrient::VitaminD => "vitamin_d",
            Nutrient::Calcium => "calcium",
            Nutrient::Iron => "iron",
            Nutrient::Potassium => "potassium",
            Nutrient::Zinc => "zinc",
            Nutrient::AddedSugar => "added_sugar",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Sodium | Nutrient::Calcium | Nutrient::Iron | Nutrient::Potassium | Nutrient::Zinc => "mg",
            Nutrient::Calories => "kcal",
            Nutrient::Protein | Nutrient::AddedSugar => "g",
            Nutrient::VitaminD => "µg",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A food that can be purchased by the serving
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FoodItem {
    pub name: String,
    /// Price of one package
    pub price: Money,
    pub servings_per_package: i64,
    /// Amount of each nutrient in one serving
    pub nutrients: BTreeMap<Nutrient, f64>,
}

impl FoodItem {
    pub fn new(name: impl Into<String>, price: Money, servings_per_package: i64) -> Self {
        Self {
            name: name.into(),
            price,
            servings_per_package,
            nutrients: BTreeMap::new(),
        }
    }

    pub fn with(mut self, nutrient: Nutrient, amount: f64) -> Self {
        self.nutrients.insert(nutrient, amount);
        self
    }

    /// Per-serving amount of `nutrient`, if the profile lists it.
    pub fn amount(&self, nutrient: Nutrient) -> Option<f64> {
        self.nutrients.get(&nutrient).copied()
    }

    pub fn unit_cost(&self) -> Result<Money> {
        unit_cost(self.price, self.servings_per_package)
    }
}

/// The fixed, read-only set of foods a model is built over
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    foods: Vec<FoodItem>,
}

impl Catalog {
    pub fn new(foods: Vec<FoodItem>) -> Self {
        Self { foods }
    }

    /// Eggs, milk, yogurt, vegetables and cereal with their package prices
    /// and per-serving nutrient profiles.
    pub fn standard() -> Self {
        let profile = |name: &str, cents: i64, servings: i64, amounts: [f64; 9]| {
            Nutrient::ALL
                .iter()
                .zip(amounts)
                .fold(FoodItem::new(name, Money::from_cents(cents), servings), |food, (&n, a)| {
                    food.with(n, a)
                })
        };

        // Column order follows Nutrient::ALL:
        //        sodium calories protein vit_d calcium iron potassium zinc sugar
        let foods = vec![
            profile("Eggs", 149, 12, [70.0, 70.0, 6.0, 1.0, 30.0, 1.0, 70.0, 1.0, 0.0]),
            profile("Milk", 189, 8, [115.0, 120.0, 8.0, 3.0, 292.0, 0.0, 341.0, 0.0, 0.0]),
            profile("Yogurt", 599, 5, [60.0, 130.0, 14.0, 0.0, 170.0, 0.0, 220.0, 0.0, 11.0]),
            profile("Vegetables", 259, 10, [10.0, 60.0, 2.0, 0.0, 0.0, 1.0, 171.0, 0.0, 0.0]),
            profile("Cheerios", 369, 6, [190.0, 140.0, 5.0, 4.0, 130.0, 13.0, 250.0, 2.0, 1.0]),
        ];
        Self::new(foods)
    }

    /// Per-serving cost of every food, in catalog order.
    pub fn unit_costs(&self) -> Result<Vec<Money>> {
        self.foods
            .iter()
            .map(|food| {
                let cost = food.unit_cost()?;
                debug!("{}: {} / {} servings = {} per serving", food.name, food.price, food.servings_per_package, cost);
                Ok(cost)
            })
            .collect()
    }

    pub fn foods(&self) -> &[FoodItem] {
        &self.foods
    }

    pub fn get(&self, name: &str) -> Option<&FoodItem> {
        self.foods.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.foods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.foods.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;

    #[test]
    fn test_standard_catalog() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), 5);

        let names: Vec<_> = catalog.foods().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["Eggs", "Milk", "Yogurt", "Vegetables", "Cheerios"]);

        let milk = catalog.get("Milk").unwrap();
        assert_eq!(milk.amount(Nutrient::Calcium), Some(292.0));
        assert_eq!(milk.amount(Nutrient::Potassium), Some(341.0));

        let yogurt = catalog.get("Yogurt").unwrap();
        assert_eq!(yogurt.amount(Nutrient::AddedSugar), Some(11.0));
        assert_eq!(yogurt.amount(Nutrient::VitaminD), Some(0.0));

        for food in catalog.foods() {
            assert_eq!(food.nutrients.len(), Nutrient::ALL.len(), "{} profile incomplete", food.name);
        }
    }

    #[test]
    fn test_standard_unit_costs() {
        let costs = Catalog::standard().unit_costs().unwrap();
        let cents: Vec<i64> = costs.iter().map(|c| c.cents()).collect();
        assert_eq!(cents, vec![12, 24, 120, 26, 61]);
    }

    #[test]
    fn test_unit_costs_fail_fast() {
        let catalog = Catalog::new(vec![
            FoodItem::new("Bread", Money::from_cents(250), 10),
            FoodItem::new("Broken", Money::from_cents(100), 0),
        ]);
        assert!(matches!(catalog.unit_costs(), Err(ModelError::InvalidInput(_))));
    }
}
