//! Prompt Builder: renders the instruction prompt for a generation request.
//!
//! Pure and total: every request renders to a string, including empty inputs.

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::Deserialize;

use crate::planner::diet::DietRestriction;
use crate::planner::prompts::{FUSION_RECIPE_PROMPT_TEMPLATE, MEAL_PLAN_PROMPT_TEMPLATE};

/// Inputs for a single fusion recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct FusionRecipeRequest {
    pub ingredients: String,
    /// Zero, one, or two cuisine labels. Extra labels are ignored.
    #[serde(default)]
    pub cuisines: Vec<String>,
    #[serde(default = "default_recipe_diet")]
    pub diet: DietRestriction,
}

/// Inputs for a 7-day meal plan.
#[derive(Debug, Clone, Deserialize)]
pub struct MealPlanRequest {
    #[serde(default = "default_meal_plan_diet")]
    pub diet: DietRestriction,
    #[serde(default)]
    pub preferences: String,
}

fn default_recipe_diet() -> DietRestriction {
    DietRestriction::None
}

fn default_meal_plan_diet() -> DietRestriction {
    DietRestriction::Balanced
}

/// The typed inputs to a prompt.
#[derive(Debug, Clone)]
pub enum GenerationRequest {
    FusionRecipe(FusionRecipeRequest),
    MealPlan(MealPlanRequest),
}

/// Renders the prompt for `request`.
pub fn build_prompt(request: &GenerationRequest) -> String {
    match request {
        GenerationRequest::FusionRecipe(recipe) => {
            let cuisines = cuisine_phrase(&recipe.cuisines);
            fill_template(FUSION_RECIPE_PROMPT_TEMPLATE, |name| match name {
                "cuisines" => Some(cuisines.as_str()),
                "ingredients" => Some(recipe.ingredients.as_str()),
                "diet_instruction" => Some(recipe.diet.recipe_clause()),
                _ => None,
            })
        }
        GenerationRequest::MealPlan(plan) => {
            fill_template(MEAL_PLAN_PROMPT_TEMPLATE, |name| match name {
                "diet" => Some(plan.diet.label()),
                "preferences" => Some(plan.preferences.as_str()),
                "diet_instruction" => Some(plan.diet.meal_plan_clause()),
                _ => None,
            })
        }
    }
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("valid placeholder regex"))
}

/// Substitutes every `{name}` in `template` in one pass. Substituted values
/// are never rescanned; unknown names are left as written.
fn fill_template<'a>(template: &str, value: impl Fn(&str) -> Option<&'a str>) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures| match value(&caps[1]) {
            Some(text) => text.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// "A and B" for two cuisines, "A" for one, "any" for none.
fn cuisine_phrase(cuisines: &[String]) -> String {
    match cuisines {
        [] => "any".to_string(),
        [only] => only.clone(),
        [first, second, ..] => format!("{first} and {second}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::diet::{
        KNOWN_RESTRICTIONS, MEAL_PLAN_FALLBACK_CLAUSE, RECIPE_FALLBACK_CLAUSE,
    };

    fn recipe(ingredients: &str, cuisines: &[&str], diet: &str) -> GenerationRequest {
        GenerationRequest::FusionRecipe(FusionRecipeRequest {
            ingredients: ingredients.to_string(),
            cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
            diet: DietRestriction::from_label(diet),
        })
    }

    fn meal_plan(diet: &str, preferences: &str) -> GenerationRequest {
        GenerationRequest::MealPlan(MealPlanRequest {
            diet: DietRestriction::from_label(diet),
            preferences: preferences.to_string(),
        })
    }

    #[test]
    fn test_every_table_clause_appears_in_its_prompt() {
        for restriction in KNOWN_RESTRICTIONS {
            let label = restriction.label();
            if let Some(clause) = restriction.recipe_entry() {
                let prompt = build_prompt(&recipe("tofu", &["Thai", "Mexican"], label));
                assert!(prompt.contains(clause), "recipe prompt for {label}");
            }
            if let Some(clause) = restriction.meal_plan_entry() {
                let prompt = build_prompt(&meal_plan(label, ""));
                assert!(prompt.contains(clause), "meal plan prompt for {label}");
            }
        }
    }

    #[test]
    fn test_unknown_selector_gets_fallback_clause() {
        let prompt = build_prompt(&recipe("rice", &["Indian", "Korean"], "Paleo"));
        assert!(prompt.contains(RECIPE_FALLBACK_CLAUSE));

        let prompt = build_prompt(&meal_plan("Paleo", "quick meals"));
        assert!(prompt.contains(MEAL_PLAN_FALLBACK_CLAUSE));
        assert!(prompt.contains("**Paleo diet**"));
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let request = recipe("paneer, tomatoes", &["Indian", "Italian"], "Keto");
        assert_eq!(build_prompt(&request), build_prompt(&request));

        let request = meal_plan("Vegan", "spicy food");
        assert_eq!(build_prompt(&request), build_prompt(&request));
    }

    #[test]
    fn test_recipe_prompt_interpolates_inputs() {
        let prompt = build_prompt(&recipe("potatoes, paneer", &["Indian", "Mexican"], "None"));
        assert!(prompt.contains("**Indian and Mexican** cuisine"));
        assert!(prompt.contains("Available ingredients: potatoes, paneer."));
        assert!(prompt.contains("**Grocery List**"));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_cuisine_counts() {
        assert!(build_prompt(&recipe("eggs", &["French"], "None")).contains("**French** cuisine"));
        assert!(build_prompt(&recipe("eggs", &[], "None")).contains("**any** cuisine"));
    }

    #[test]
    fn test_empty_inputs_still_render() {
        let prompt = build_prompt(&recipe("", &[], ""));
        assert!(prompt.contains("Available ingredients: ."));
        assert!(prompt.contains(RECIPE_FALLBACK_CLAUSE));

        let prompt = build_prompt(&meal_plan("Balanced", ""));
        assert!(prompt.contains("Preferences: \n"));
    }

    #[test]
    fn test_brace_tokens_in_inputs_are_kept_verbatim() {
        let prompt = build_prompt(&recipe("tofu", &["{ingredients}", "Thai"], "{diet_instruction}"));
        assert!(prompt.contains("**{ingredients} and Thai** cuisine"));
        assert!(prompt.contains("Available ingredients: tofu."));
        assert!(prompt.contains(RECIPE_FALLBACK_CLAUSE));

        let prompt = build_prompt(&recipe("{cuisines}", &["Thai"], "None"));
        assert!(prompt.contains("Available ingredients: {cuisines}."));
        assert!(prompt.contains("**Thai** cuisine"));

        let prompt = build_prompt(&meal_plan("{preferences}", "{diet}"));
        assert!(prompt.contains("**{preferences} diet**"));
        assert!(prompt.contains("Preferences: {diet}\n"));
        assert!(prompt.contains(MEAL_PLAN_FALLBACK_CLAUSE));
    }

    #[test]
    fn test_meal_plan_request_defaults() {
        let request: MealPlanRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.diet, DietRestriction::Balanced);
        assert!(request.preferences.is_empty());
    }
}
