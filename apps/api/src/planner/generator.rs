//! Generation pipelines.
//!
//! Fusion recipe: build_prompt → LLM → recipe text (not persisted).
//! Meal plan: build_prompt → LLM → extract_grocery_list → save → response.

use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::CompletionProvider;
use crate::planner::grocery::{extract_grocery_list_from_text, GroceryList};
use crate::planner::prompt_builder::{
    build_prompt, FusionRecipeRequest, GenerationRequest, MealPlanRequest,
};
use crate::planner::prompts::RECIPE_UNAVAILABLE_MESSAGE;
use crate::planner::shopping::{shopping_links, ShoppingCategory};
use crate::planner::store::{save_meal_plan, NewMealPlan};

#[derive(Debug, Clone, Serialize)]
pub struct FusionRecipe {
    pub recipe: String,
    /// False when the model produced nothing usable and `recipe` holds a notice.
    pub generated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedMealPlan {
    pub id: i64,
    pub diet_type: String,
    pub meal_plan: String,
    pub grocery_list: GroceryList,
    pub shopping_links: Vec<ShoppingCategory>,
}

/// Generates one fusion recipe.
pub async fn generate_fusion_recipe(
    llm: &dyn CompletionProvider,
    request: FusionRecipeRequest,
) -> Result<FusionRecipe, AppError> {
    info!(
        "Generating fusion recipe ({:?}, diet={}) with {}",
        request.cuisines,
        request.diet,
        llm.model()
    );
    let prompt = build_prompt(&GenerationRequest::FusionRecipe(request));
    let text = llm.complete(&prompt).await?;

    if text.trim().is_empty() || text.to_lowercase().contains("recipe not found") {
        warn!("Model returned no usable recipe");
        return Ok(FusionRecipe {
            recipe: RECIPE_UNAVAILABLE_MESSAGE.to_string(),
            generated: false,
        });
    }

    Ok(FusionRecipe {
        recipe: text,
        generated: true,
    })
}

/// Generates a 7-day meal plan, extracts its grocery list and stores both.
pub async fn generate_meal_plan(
    pool: &SqlitePool,
    llm: &dyn CompletionProvider,
    request: MealPlanRequest,
    affiliate_tag: Option<&str>,
) -> Result<GeneratedMealPlan, AppError> {
    info!("Generating {} meal plan with {}", request.diet, llm.model());
    let diet_type = request.diet.label().to_string();
    let preferences = request.preferences.clone();

    let prompt = build_prompt(&GenerationRequest::MealPlan(request));
    let meal_plan = llm.complete(&prompt).await?;

    let grocery_list = extract_grocery_list_from_text(&meal_plan);
    if grocery_list.is_empty() {
        warn!("No grocery list extracted from {diet_type} meal plan");
    } else {
        info!(
            "Extracted {} grocery items across {} categories",
            grocery_list.item_count(),
            grocery_list.len()
        );
    }

    let record = save_meal_plan(
        pool,
        NewMealPlan {
            diet_type: &diet_type,
            preferences: &preferences,
            meal_plan: &meal_plan,
            grocery_list: &grocery_list,
        },
    )
    .await?;

    let shopping_links = shopping_links(&grocery_list, affiliate_tag);

    Ok(GeneratedMealPlan {
        id: record.id,
        diet_type,
        meal_plan,
        grocery_list,
        shopping_links,
    })
}


#[cfg(test)]
mod tests {
    use super::fake::FakeCompletion;
    use super::*;
    use crate::db::memory_pool;
    use crate::planner::diet::DietRestriction;
    use crate::planner::store::get_latest_meal_plan;

    const PLAN_TEXT: &str = "**Day 1**\nOats\n\n**Grocery List**\n**Vegetables**\n- spinach\n- carrots\n**Proteins**\nchickpeas, tofu\n\n**Nutritional Info**\n400 kcal";

    fn fusion(ingredients: &str) -> FusionRecipeRequest {
        FusionRecipeRequest {
            ingredients: ingredients.to_string(),
            cuisines: vec!["Indian".to_string(), "Mexican".to_string()],
            diet: DietRestriction::Vegan,
        }
    }

    #[tokio::test]
    async fn test_fusion_recipe_returns_model_text() {
        let llm = FakeCompletion::replying("Paneer Tacos\n**Grocery List**\n- paneer");
        let recipe = generate_fusion_recipe(&llm, fusion("paneer")).await.unwrap();

        assert!(recipe.generated);
        assert!(recipe.recipe.starts_with("Paneer Tacos"));
        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].contains("**Indian and Mexican**"));
        assert!(prompts[0].contains(DietRestriction::Vegan.recipe_clause()));
    }

    #[tokio::test]
    async fn test_recipe_not_found_becomes_notice() {
        let llm = FakeCompletion::replying("Sorry, Recipe Not Found for those ingredients.");
        let recipe = generate_fusion_recipe(&llm, fusion("gravel")).await.unwrap();

        assert!(!recipe.generated);
        assert_eq!(recipe.recipe, RECIPE_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_llm_failure_propagates() {
        let llm = FakeCompletion::failing();
        let err = generate_fusion_recipe(&llm, fusion("rice")).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_meal_plan_is_extracted_and_stored() {
        let pool = memory_pool().await;
        let llm = FakeCompletion::replying(PLAN_TEXT);
        let request = MealPlanRequest {
            diet: DietRestriction::HighProtein,
            preferences: "quick meals".to_string(),
        };

        let generated = generate_meal_plan(&pool, &llm, request, Some("chef-20"))
            .await
            .unwrap();

        assert_eq!(generated.diet_type, "High-Protein");
        assert_eq!(
            generated.grocery_list.get("Proteins"),
            Some(&["chickpeas".to_string(), "tofu".to_string()][..])
        );
        assert_eq!(generated.shopping_links.len(), 2);
        assert!(generated.shopping_links[0].items[0].url.contains("k=spinach"));

        let latest = get_latest_meal_plan(&pool).await.unwrap().unwrap();
        assert_eq!(latest.id, generated.id);
        assert_eq!(latest.preferences, "quick meals");
        assert_eq!(latest.meal_plan, PLAN_TEXT);
        assert_eq!(latest.grocery_list.0, generated.grocery_list);
    }

    #[tokio::test]
    async fn test_failed_meal_plan_is_not_stored() {
        let pool = memory_pool().await;
        let llm = FakeCompletion::failing();
        let request = MealPlanRequest {
            diet: DietRestriction::Keto,
            preferences: String::new(),
        };

        assert!(generate_meal_plan(&pool, &llm, request, None).await.is_err());
        assert!(get_latest_meal_plan(&pool).await.unwrap().is_none());
    }
}
