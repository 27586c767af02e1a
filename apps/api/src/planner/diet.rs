//! Dietary restriction table: maps a restriction selector to the canned
//! instruction clause injected into recipe and meal-plan prompts.
//!
//! Lookup is a case-sensitive exact match on the label. Anything unrecognized
//! lands in `DietRestriction::Other` and receives the mode's fallback clause.

use serde::{Deserialize, Serialize};

/// Fallback clause for fusion recipes when the selector is unknown.
pub const RECIPE_FALLBACK_CLAUSE: &str = "No dietary restrictions.";

/// Fallback clause for meal plans when the selector is unknown.
pub const MEAL_PLAN_FALLBACK_CLAUSE: &str = "Provide a general healthy meal plan.";

/// A dietary restriction selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DietRestriction {
    None,
    Balanced,
    DiabetesFriendly,
    LowCarb,
    HighProtein,
    Vegan,
    GlutenFree,
    Keto,
    HeartHealthy,
    /// Any label not in the table. Carries the label verbatim.
    Other(String),
}

/// Every selector with a dedicated entry in at least one clause table.
#[cfg(test)]
pub const KNOWN_RESTRICTIONS: &[DietRestriction] = &[
    DietRestriction::None,
    DietRestriction::Balanced,
    DietRestriction::DiabetesFriendly,
    DietRestriction::LowCarb,
    DietRestriction::HighProtein,
    DietRestriction::Vegan,
    DietRestriction::GlutenFree,
    DietRestriction::Keto,
    DietRestriction::HeartHealthy,
];

impl DietRestriction {
    /// Parses a selector label. Case-sensitive; unknown labels become `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "None" => Self::None,
            "Balanced" => Self::Balanced,
            "Diabetes-Friendly" => Self::DiabetesFriendly,
            "Low-Carb" => Self::LowCarb,
            "High-Protein" => Self::HighProtein,
            "Vegan" => Self::Vegan,
            "Gluten-Free" => Self::GlutenFree,
            "Keto" => Self::Keto,
            "Heart-Healthy" => Self::HeartHealthy,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::None => "None",
            Self::Balanced => "Balanced",
            Self::DiabetesFriendly => "Diabetes-Friendly",
            Self::LowCarb => "Low-Carb",
            Self::HighProtein => "High-Protein",
            Self::Vegan => "Vegan",
            Self::GlutenFree => "Gluten-Free",
            Self::Keto => "Keto",
            Self::HeartHealthy => "Heart-Healthy",
            Self::Other(label) => label,
        }
    }

    /// Clause for a single fusion recipe, or `None` if the table has no entry.
    pub fn recipe_entry(&self) -> Option<&'static str> {
        match self {
            Self::None => Some(RECIPE_FALLBACK_CLAUSE),
            Self::DiabetesFriendly => Some(
                "Avoid sugar, white rice, potatoes, and refined flour. Suggest healthy alternatives.",
            ),
            Self::LowCarb => Some(
                "Limit high-carb ingredients like potatoes and rice. Suggest protein-rich alternatives.",
            ),
            Self::HighProtein => Some(
                "Ensure the recipe includes high-protein ingredients like lentils, tofu, and beans.",
            ),
            Self::Vegan => Some(
                "Exclude all animal products, including dairy and eggs. Use plant-based alternatives.",
            ),
            Self::GlutenFree => Some(GLUTEN_FREE_CLAUSE),
            Self::Keto => Some(KETO_CLAUSE),
            Self::HeartHealthy => Some(HEART_HEALTHY_CLAUSE),
            Self::Balanced | Self::Other(_) => None,
        }
    }

    /// Clause for a 7-day meal plan, or `None` if the table has no entry.
    pub fn meal_plan_entry(&self) -> Option<&'static str> {
        match self {
            Self::Balanced => Some("Include a mix of proteins, carbohydrates, and healthy fats."),
            Self::DiabetesFriendly => Some(
                "Limit sugar, refined carbs, and high-GI foods. Focus on fiber and proteins.",
            ),
            Self::LowCarb => {
                Some("Minimize carbohydrate intake and increase healthy fats and proteins.")
            }
            Self::HighProtein => Some(
                "Ensure each meal has a high-protein source like lentils, tofu, or lean meats.",
            ),
            Self::Vegan => {
                Some("Exclude all animal products and suggest plant-based protein sources.")
            }
            Self::GlutenFree => Some(GLUTEN_FREE_CLAUSE),
            Self::Keto => Some(KETO_CLAUSE),
            Self::HeartHealthy => Some(HEART_HEALTHY_CLAUSE),
            Self::None | Self::Other(_) => None,
        }
    }

    pub fn recipe_clause(&self) -> &'static str {
        self.recipe_entry().unwrap_or(RECIPE_FALLBACK_CLAUSE)
    }

    pub fn meal_plan_clause(&self) -> &'static str {
        self.meal_plan_entry().unwrap_or(MEAL_PLAN_FALLBACK_CLAUSE)
    }
}

const GLUTEN_FREE_CLAUSE: &str =
    "Avoid wheat, barley, and rye. Suggest gluten-free grains like quinoa or rice.";
const KETO_CLAUSE: &str =
    "Ensure very low carbs, moderate protein, and high healthy fats like avocados and nuts.";
const HEART_HEALTHY_CLAUSE: &str =
    "Use heart-friendly ingredients like olive oil, nuts, leafy greens, and avoid processed foods.";

impl From<String> for DietRestriction {
    fn from(label: String) -> Self {
        Self::from_label(&label)
    }
}

impl From<DietRestriction> for String {
    fn from(restriction: DietRestriction) -> Self {
        restriction.label().to_string()
    }
}

impl std::fmt::Display for DietRestriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_round_trip_through_from_label() {
        for restriction in KNOWN_RESTRICTIONS {
            assert_eq!(&DietRestriction::from_label(restriction.label()), restriction);
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(
            DietRestriction::from_label("vegan"),
            DietRestriction::Other("vegan".to_string())
        );
        assert_eq!(
            DietRestriction::from_label("vegan").recipe_clause(),
            RECIPE_FALLBACK_CLAUSE
        );
    }

    #[test]
    fn test_unknown_selector_uses_fallbacks() {
        let other = DietRestriction::from_label("Paleo");
        assert_eq!(other.recipe_clause(), RECIPE_FALLBACK_CLAUSE);
        assert_eq!(other.meal_plan_clause(), MEAL_PLAN_FALLBACK_CLAUSE);
        assert_eq!(other.label(), "Paleo");
    }

    #[test]
    fn test_mode_specific_gaps_fall_back() {
        // Balanced only exists for meal plans, None only for recipes.
        assert_eq!(DietRestriction::Balanced.recipe_entry(), None);
        assert_eq!(DietRestriction::None.meal_plan_entry(), None);
        assert_eq!(
            DietRestriction::None.meal_plan_clause(),
            MEAL_PLAN_FALLBACK_CLAUSE
        );
    }

    #[test]
    fn test_vegan_clauses_differ_per_mode() {
        assert!(DietRestriction::Vegan.recipe_clause().contains("dairy and eggs"));
        assert!(DietRestriction::Vegan
            .meal_plan_clause()
            .contains("plant-based protein sources"));
    }

    #[test]
    fn test_serde_uses_plain_labels() {
        let parsed: DietRestriction = serde_json::from_str(r#""Heart-Healthy""#).unwrap();
        assert_eq!(parsed, DietRestriction::HeartHealthy);

        let other: DietRestriction = serde_json::from_str(r#""Carnivore""#).unwrap();
        assert_eq!(serde_json::to_string(&other).unwrap(), r#""Carnivore""#);
    }
}
