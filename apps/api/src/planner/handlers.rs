//! Axum route handlers for recipes, meal plans and grocery-list extraction.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::models::meal_plan::MealPlanRecord;
use crate::planner::diet::DietRestriction;
use crate::planner::generator::{
    generate_fusion_recipe, generate_meal_plan, FusionRecipe, GeneratedMealPlan,
};
use crate::planner::grocery::{extract_grocery_list, GroceryList};
use crate::planner::prompt_builder::{FusionRecipeRequest, MealPlanRequest};
use crate::planner::store::get_latest_meal_plan;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FusionRecipeQuery {
    pub ingredients: String,
    pub cuisine1: Option<String>,
    pub cuisine2: Option<String>,
    pub diet: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub raw: Value,
}

/// GET /api/v1/recipes/fusion
pub async fn handle_fusion_recipe(
    State(state): State<AppState>,
    Query(query): Query<FusionRecipeQuery>,
) -> Result<Json<FusionRecipe>, AppError> {
    if query.ingredients.trim().is_empty() {
        return Err(AppError::Validation(
            "Please enter at least one ingredient".to_string(),
        ));
    }

    let cuisines = [query.cuisine1, query.cuisine2]
        .into_iter()
        .flatten()
        .filter(|c| !c.trim().is_empty())
        .collect();
    let request = FusionRecipeRequest {
        ingredients: query.ingredients,
        cuisines,
        diet: query
            .diet
            .map(DietRestriction::from)
            .unwrap_or(DietRestriction::None),
    };

    let recipe = generate_fusion_recipe(state.llm.as_ref(), request).await?;
    Ok(Json(recipe))
}

/// POST /api/v1/meal-plans
pub async fn handle_generate_meal_plan(
    State(state): State<AppState>,
    Json(request): Json<MealPlanRequest>,
) -> Result<Json<GeneratedMealPlan>, AppError> {
    let plan = generate_meal_plan(
        &state.db,
        state.llm.as_ref(),
        request,
        state.config.affiliate_tag.as_deref(),
    )
    .await?;
    Ok(Json(plan))
}

/// GET /api/v1/meal-plans/latest
pub async fn handle_latest_meal_plan(
    State(state): State<AppState>,
) -> Result<Json<MealPlanRecord>, AppError> {
    let record = get_latest_meal_plan(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No meal plan has been generated yet".to_string()))?;
    Ok(Json(record))
}

/// POST /api/v1/grocery-list/extract
///
/// Runs the extractor on arbitrary JSON. Never fails; unusable input yields `{}`.
pub async fn handle_extract_grocery_list(Json(request): Json<ExtractRequest>) -> Json<GroceryList> {
    Json(extract_grocery_list(&request.raw))
}
