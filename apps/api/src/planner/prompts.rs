// Prompt templates for recipe and meal-plan generation.
// Placeholders in `{braces}` are substituted by `prompt_builder::build_prompt`.

/// Fusion recipe prompt template.
/// Replace: {cuisines}, {ingredients}, {diet_instruction}
pub const FUSION_RECIPE_PROMPT_TEMPLATE: &str = r#"You are an AI chef specializing in fusion cuisine.

User has requested a fusion dish combining **{cuisines}** cuisine.
Available ingredients: {ingredients}.

**Dietary Preference:** {diet_instruction}

Generate:
- A **creative and unique recipe name**
- A **Grocery List** section with items grouped under bold category headings (Vegetables, Proteins, Spices, Other)
- **Step-by-step cooking instructions**
- **Estimated cooking time**
- **Calories per serving**
- **Nutritional Info**: macronutrients (Protein, Carbs, Fats per serving)
- **Health Score (A, B, C - based on nutritional content)**

Ensure the recipe follows the dietary preference. If ingredients are missing, suggest alternatives."#;

/// Seven-day meal plan prompt template.
/// Replace: {diet}, {preferences}, {diet_instruction}
pub const MEAL_PLAN_PROMPT_TEMPLATE: &str = r#"You are a top AI nutritionist.

User has requested a **7-day meal plan** for a **{diet} diet**.
Preferences: {preferences}

**Dietary Guidance:** {diet_instruction}

Generate:
- **Breakfast, Lunch, and Dinner** for 7 days
- **Grocery List** with categorized items: put each category name in bold (e.g. **Vegetables**) followed by its items as a bulleted list
- **Nutritional Info**: breakdown (Calories, Protein, Carbs, Fats) per meal
- Ensure the plan is diverse and easy to cook.

Respond in a structured way."#;

/// Message returned when the model produces nothing usable for a recipe.
pub const RECIPE_UNAVAILABLE_MESSAGE: &str =
    "AI couldn't generate a recipe. Try modifying the ingredients!";
