use serde_json::Value;
use tracing::warn;

/// Outcome of the shape gate over one completion.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeShape {
    /// Top level is an object with a `recipes` array; entries are not inspected.
    Recipes(Vec<Value>),
    /// Valid JSON, but not an object holding a `recipes` array.
    WrongShape,
    /// Not JSON at all.
    Unparsable,
}

impl RecipeShape {
    pub fn into_recipes(self) -> Option<Vec<Value>> {
        match self {
            RecipeShape::Recipes(recipes) => Some(recipes),
            RecipeShape::WrongShape | RecipeShape::Unparsable => None,
        }
    }
}

/// Parses `candidate` (or `raw` when the candidate is empty) as JSON and
/// classifies its top-level shape. Never fails.
pub fn check_recipes(candidate: &str, raw: &str) -> RecipeShape {
    let source = if candidate.is_empty() { raw } else { candidate };

    let parsed: Value = match serde_json::from_str(source) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Completion is not valid JSON");
            return RecipeShape::Unparsable;
        }
    };

    match parsed {
        Value::Object(mut object) => match object.remove("recipes") {
            Some(Value::Array(recipes)) => RecipeShape::Recipes(recipes),
            other => {
                warn!(found = ?other.as_ref().map(json_kind), "Completion has no `recipes` array");
                RecipeShape::WrongShape
            }
        },
        other => {
            warn!(found = json_kind(&other), "Completion top level is not an object");
            RecipeShape::WrongShape
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_object_with_recipes_array() {
        let recipes = check_recipes(r#"{"recipes":[{"title":"X"}]}"#, "").into_recipes().unwrap();
        assert_eq!(recipes, vec![json!({ "title": "X" })]);
    }

    #[test]
    fn empty_recipes_array_passes_the_gate() {
        assert_eq!(check_recipes(r#"{"recipes": []}"#, ""), RecipeShape::Recipes(vec![]));
    }

    #[test]
    fn elements_are_not_inspected() {
        let recipes = check_recipes(r#"{"recipes":[1, "two", {"nope": true}]}"#, "")
            .into_recipes()
            .unwrap();
        assert_eq!(recipes.len(), 3);
    }

    #[test]
    fn parsed_json_of_the_wrong_shape_is_distinguished() {
        assert_eq!(check_recipes(r#"{"recipes": {"title": "X"}}"#, ""), RecipeShape::WrongShape);
        assert_eq!(check_recipes(r#"{"recipes": null}"#, ""), RecipeShape::WrongShape);
        assert_eq!(check_recipes(r#"{"dishes": []}"#, ""), RecipeShape::WrongShape);
        assert_eq!(check_recipes(r#"[{"title": "X"}]"#, ""), RecipeShape::WrongShape);
        assert_eq!(check_recipes("null", ""), RecipeShape::WrongShape);
    }

    #[test]
    fn invalid_json_is_unparsable_without_panicking() {
        assert_eq!(check_recipes("Here are some ideas: omelette", ""), RecipeShape::Unparsable);
        assert_eq!(check_recipes(r#"{"recipes": [}"#, ""), RecipeShape::Unparsable);
    }

    #[test]
    fn falls_back_to_raw_when_candidate_is_empty() {
        assert_eq!(check_recipes("", r#"{"recipes": []}"#), RecipeShape::Recipes(vec![]));
        assert_eq!(check_recipes("", ""), RecipeShape::Unparsable);
    }
}
