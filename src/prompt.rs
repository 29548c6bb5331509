use crate::ingredients::IngredientList;

pub const MAX_RECIPES: usize = 5;
pub const MAX_STEPS: usize = 8;

const RECIPE_SCHEMA: &str = r#"{
  "recipes": [
    {
      "title": "string",
      "why_it_fits": "string",
      "missing_ingredients": ["string"],
      "estimated_time_minutes": number,
      "difficulty": "Easy|Medium|Hard",
      "steps": ["string"],
      "optional_additions": ["string"]
    }
  ]
}"#;

/// Instruction for the primary generation call.
pub fn build_suggestion_prompt(ingredients: &IngredientList) -> String {
    let listed = ingredients
        .iter()
        .map(|ingredient| format!("- {ingredient}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Return ONLY valid JSON. No markdown. No commentary. No code fences.

Schema:
{RECIPE_SCHEMA}

Ingredients the user has:
{listed}

Rules:
- Suggest {MAX_RECIPES} recipes max.
- Do not list pantry staples (salt, pepper, oil, water) as missing.
- At most {MAX_STEPS} steps per recipe."
    )
}

/// Instruction for the repair call; `raw_completion` is embedded verbatim.
pub fn build_repair_prompt(raw_completion: &str) -> String {
    format!(
        "You are a formatter. Convert the following into VALID JSON that matches this schema exactly.
Return ONLY JSON. No markdown. No extra text.

Schema:
{RECIPE_SCHEMA}

Text to convert:
{raw_completion}"
    )
}
