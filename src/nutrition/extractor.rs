use async_trait::async_trait;
use bytes::Bytes;

use super::dto::NutritionAnalysis;
use super::error::NutritionError;

/// What the user handed in to be analyzed.
#[derive(Debug, Clone)]
pub enum NutritionInput {
    /// A voice note (`audio/*`) or a photo (`image/*`).
    Media { data: Bytes, mime_type: String },
    Text(String),
}

impl NutritionInput {
    pub fn media(data: Bytes, mime_type: &str) -> Result<Self, NutritionError> {
        let mime_type = mime_type.trim().to_ascii_lowercase();
        if !(mime_type.starts_with("audio/") || mime_type.starts_with("image/")) {
            return Err(NutritionError::UnsupportedMedia(mime_type));
        }
        if data.is_empty() {
            return Err(NutritionError::Invalid("empty upload".into()));
        }
        Ok(Self::Media { data, mime_type })
    }

    pub fn kind(&self) -> &'static str {
        match self {
            NutritionInput::Media { mime_type, .. } if mime_type.starts_with("audio/") => "audio",
            NutritionInput::Media { .. } => "image",
            NutritionInput::Text(_) => "text",
        }
    }
}

/// Turns a meal description into a structured nutrition guess.
#[async_trait]
pub trait NutritionExtractor: Send + Sync {
    async fn analyze(&self, input: NutritionInput) -> Result<NutritionAnalysis, NutritionError>;
}

const RESPONSE_FORMAT: &str = r#"Work out:
1. The meal type (breakfast, lunch, dinner or snack).
2. A descriptive name for the whole dish.
3. A breakdown of every individual food with its amount in grams.
4. Nutrition values based on standard food composition tables (USDA or equivalent).

Be precise and use real food data.

Reply ONLY with a valid JSON object, no extra text:
{
  "meal_type": "breakfast" | "lunch" | "dinner" | "snack",
  "name": "descriptive name of the whole dish",
  "grams": total grams of all items,
  "calories": total kcal,
  "protein": total protein in grams,
  "carbs": total carbohydrates in grams,
  "fats": total fats in grams,
  "items": [
    {
      "name": "individual food",
      "grams": amount in grams,
      "calories": kcal of this item,
      "protein": protein of this item,
      "carbs": carbohydrates of this item,
      "fats": fats of this item
    }
  ]
}"#;

/// Instruction text sent alongside the input.
pub fn prompt_for(input: &NutritionInput) -> String {
    let intro = match input {
        NutritionInput::Text(description) => format!(
            "You are an expert nutritionist. The user describes a meal they ate:\n\"{}\"\n",
            description.trim()
        ),
        _ if input.kind() == "audio" => "You are an expert nutritionist. Listen to this audio where \
             the user describes a meal they ate.\n"
            .to_string(),
        _ => "You are an expert nutritionist. Look at this photo of a meal and estimate what and \
              how much is on the plate.\n"
            .to_string(),
    };
    format!("{intro}\n{RESPONSE_FORMAT}")
}
