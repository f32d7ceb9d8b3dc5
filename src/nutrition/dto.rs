use serde::{Deserialize, Serialize};

use crate::meals::MealType;

/// One food in an analyzed meal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    pub name: String,
    #[serde(default)]
    pub grams: f64,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
}

/// Validated meal guess returned by the nutrition model. Totals cover all items.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NutritionAnalysis {
    pub name: String,
    pub meal_type: MealType,
    pub grams: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub items: Vec<FoodItem>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub description: String,
}
