use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::repo_types::{Meal, MealType};

#[derive(Debug, Deserialize)]
pub struct NewMeal {
    pub name: String,
    pub meal_type: MealType,
    pub calories: i32,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
    /// Defaults to now.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub eaten_at: Option<OffsetDateTime>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MealPatch {
    pub name: Option<String>,
    pub meal_type: Option<MealType>,
    pub calories: Option<i32>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub eaten_at: Option<OffsetDateTime>,
}

fn check_energy(calories: Option<i32>, macros: [(&str, Option<f64>); 3]) -> Result<(), String> {
    if matches!(calories, Some(c) if c < 0) {
        return Err("calories must not be negative".into());
    }
    for (name, value) in macros {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(format!("{name} must not be negative"));
            }
        }
    }
    Ok(())
}

impl NewMeal {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is required".into());
        }
        check_energy(
            Some(self.calories),
            [
                ("protein", Some(self.protein)),
                ("carbs", Some(self.carbs)),
                ("fats", Some(self.fats)),
            ],
        )
    }
}

impl MealPatch {
    pub fn validate(&self) -> Result<(), String> {
        if matches!(self.name.as_deref(), Some(n) if n.trim().is_empty()) {
            return Err("name must not be empty".into());
        }
        check_energy(
            self.calories,
            [
                ("protein", self.protein),
                ("carbs", self.carbs),
                ("fats", self.fats),
            ],
        )
    }
}

#[derive(Debug, Default, Serialize)]
pub struct MealsByType {
    pub breakfast: Vec<Meal>,
    pub lunch: Vec<Meal>,
    pub dinner: Vec<Meal>,
    pub snack: Vec<Meal>,
}

impl MealsByType {
    pub fn group(meals: Vec<Meal>) -> Self {
        let mut out = Self::default();
        for meal in meals {
            match meal.meal_type.as_str() {
                "breakfast" => out.breakfast.push(meal),
                "lunch" => out.lunch.push(meal),
                "dinner" => out.dinner.push(meal),
                "snack" => out.snack.push(meal),
                _ => {}
            }
        }
        out
    }
}
