use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use super::dto::{FoodItem, NutritionAnalysis};
use super::error::NutritionError;
use crate::meals::MealType;

/// Shape the model is asked to produce; everything optional so that
/// validation, not deserialization, decides what is missing.
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    name: Option<String>,
    meal_type: Option<MealType>,
    #[serde(default)]
    grams: f64,
    #[serde(default)]
    calories: f64,
    #[serde(default)]
    protein: f64,
    #[serde(default)]
    carbs: f64,
    #[serde(default)]
    fats: f64,
    #[serde(default)]
    items: Vec<FoodItem>,
}

/// Pulls the JSON object out of free-form model text (which may be wrapped in
/// markdown fences or prose) and validates it.
pub fn parse_analysis(text: &str) -> Result<NutritionAnalysis, NutritionError> {
    lazy_static! {
        static ref JSON_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
    }
    let json = JSON_OBJECT.find(text).ok_or(NutritionError::NoJson)?.as_str();
    let raw: RawAnalysis = serde_json::from_str(json)?;

    let name = raw
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| NutritionError::Invalid("missing meal name".into()))?;
    let meal_type = raw
        .meal_type
        .ok_or_else(|| NutritionError::Invalid("missing meal_type".into()))?;

    for (field, value) in [("calories", raw.calories), ("grams", raw.grams)] {
        if !value.is_finite() || value < 0.0 {
            return Err(NutritionError::Invalid(format!("{field} must not be negative")));
        }
    }

    Ok(NutritionAnalysis {
        name,
        meal_type,
        grams: raw.grams,
        calories: raw.calories,
        protein: raw.protein,
        carbs: raw.carbs,
        fats: raw.fats,
        items: raw.items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LUNCH: &str = r#"{
        "meal_type": "lunch",
        "name": "Grilled chicken with white rice",
        "grams": 350,
        "calories": 495,
        "protein": 52,
        "carbs": 53,
        "fats": 5,
        "items": [
            {"name": "Grilled chicken", "grams": 200, "calories": 330, "protein": 50, "carbs": 0, "fats": 5},
            {"name": "White rice", "grams": 150, "calories": 165, "protein": 2, "carbs": 53, "fats": 0}
        ]
    }"#;

    #[test]
    fn parses_plain_json() {
        let a = parse_analysis(LUNCH).unwrap();
        assert_eq!(a.meal_type, MealType::Lunch);
        assert_eq!(a.name, "Grilled chicken with white rice");
        assert_eq!(a.calories, 495.0);
        assert_eq!(a.items.len(), 2);
        assert_eq!(a.items[1].carbs, 53.0);
    }

    #[test]
    fn strips_markdown_fences_and_prose() {
        let text = format!("Here is the analysis:\n```json\n{LUNCH}\n```\nEnjoy!");
        let a = parse_analysis(&text).unwrap();
        assert_eq!(a.grams, 350.0);
    }

    #[test]
    fn no_object_is_no_json() {
        assert!(matches!(
            parse_analysis("I could not hear any food."),
            Err(NutritionError::NoJson)
        ));
    }

    #[test]
    fn broken_json_is_malformed() {
        assert!(matches!(
            parse_analysis(r#"{"name": "x", "calories": }"#),
            Err(NutritionError::Malformed(_))
        ));
    }

    #[test]
    fn unknown_meal_type_is_malformed() {
        assert!(matches!(
            parse_analysis(r#"{"name": "x", "meal_type": "brunch"}"#),
            Err(NutritionError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_missing_name_or_type() {
        assert!(matches!(
            parse_analysis(r#"{"name": " ", "meal_type": "snack"}"#),
            Err(NutritionError::Invalid(_))
        ));
        assert!(matches!(
            parse_analysis(r#"{"name": "Apple", "calories": 52}"#),
            Err(NutritionError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_negative_energy_or_weight() {
        assert!(matches!(
            parse_analysis(r#"{"name": "Apple", "meal_type": "snack", "calories": -1}"#),
            Err(NutritionError::Invalid(_))
        ));
        assert!(matches!(
            parse_analysis(r#"{"name": "Apple", "meal_type": "snack", "grams": -100}"#),
            Err(NutritionError::Invalid(_))
        ));
    }

    #[test]
    fn missing_numbers_default_to_zero() {
        let a = parse_analysis(r#"{"name": "Water", "meal_type": "snack"}"#).unwrap();
        assert_eq!(a.calories, 0.0);
        assert!(a.items.is_empty());
    }
}
