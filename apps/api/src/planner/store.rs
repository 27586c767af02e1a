//! Meal-plan persistence: one append, one "latest" query. Rows are never updated.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;
use tracing::info;

use crate::models::meal_plan::MealPlanRecord;
use crate::planner::grocery::GroceryList;

/// Fields of a meal plan about to be stored.
pub struct NewMealPlan<'a> {
    pub diet_type: &'a str,
    pub preferences: &'a str,
    pub meal_plan: &'a str,
    pub grocery_list: &'a GroceryList,
}

/// Appends a meal plan and returns the stored row.
pub async fn save_meal_plan(
    pool: &SqlitePool,
    plan: NewMealPlan<'_>,
) -> Result<MealPlanRecord, sqlx::Error> {
    let record = sqlx::query_as::<_, MealPlanRecord>(
        r#"
        INSERT INTO meal_plans (diet_type, preferences, meal_plan, grocery_list, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, diet_type, preferences, meal_plan, grocery_list, created_at
        "#,
    )
    .bind(plan.diet_type)
    .bind(plan.preferences)
    .bind(plan.meal_plan)
    .bind(Json(plan.grocery_list))
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    info!(
        "Saved meal plan {} ({} diet, {} grocery categories)",
        record.id,
        record.diet_type,
        plan.grocery_list.len()
    );
    Ok(record)
}

/// Most recently created meal plan, if any.
pub async fn get_latest_meal_plan(pool: &SqlitePool) -> Result<Option<MealPlanRecord>, sqlx::Error> {
    sqlx::query_as::<_, MealPlanRecord>(
        "SELECT id, diet_type, preferences, meal_plan, grocery_list, created_at \
         FROM meal_plans ORDER BY id DESC LIMIT 1",
    )
    .fetch_optional(pool)
    .await
}
