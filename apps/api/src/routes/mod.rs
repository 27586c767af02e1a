pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::planner::handlers;
use crate::state::AppState;
use crate::stores::handlers::handle_nearby_stores;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::welcome_handler))
        .route("/health", get(health::health_handler))
        // Recipes
        .route(
            "/api/v1/recipes/fusion",
            get(handlers::handle_fusion_recipe),
        )
        // Meal plans
        .route(
            "/api/v1/meal-plans",
            post(handlers::handle_generate_meal_plan),
        )
        .route(
            "/api/v1/meal-plans/latest",
            get(handlers::handle_latest_meal_plan),
        )
        .route(
            "/api/v1/grocery-list/extract",
            post(handlers::handle_extract_grocery_list),
        )
        // Store finder
        .route("/api/v1/stores/nearby", get(handle_nearby_stores))
        .with_state(state)
}
