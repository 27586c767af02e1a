use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::planner::grocery::GroceryList;

/// One generated meal plan. Rows are append-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MealPlanRecord {
    pub id: i64,
    pub diet_type: String,
    pub preferences: String,
    pub meal_plan: String,
    /// Stored as JSON text, category order preserved.
    pub grocery_list: Json<GroceryList>,
    pub created_at: DateTime<Utc>,
}
