//! Grocery List Extractor: pulls a categorized grocery list out of free-form
//! model output.
//!
//! Best-effort by contract: any input shape is accepted and the worst outcome
//! is an empty `GroceryList`. Nothing in here returns an error.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use tracing::debug;

/// Category that collects items when the section has no bold sub-headings.
pub const FALLBACK_CATEGORY: &str = "General Items";

/// Field holding the model text when the raw response is an object.
const TEXT_FIELD: &str = "meal_plan";

/// Ordered mapping of category → items.
///
/// Categories are unique and keep first-seen order. Items keep insertion order
/// and may repeat. Serializes as a JSON object in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroceryList {
    categories: Vec<(String, Vec<String>)>,
}

impl GroceryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the items for `category`. An existing category keeps its position.
    pub fn insert(&mut self, category: impl Into<String>, items: Vec<String>) {
        let category = category.into();
        match self.categories.iter_mut().find(|(name, _)| *name == category) {
            Some((_, existing)) => *existing = items,
            None => self.categories.push((category, items)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, items)| items.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn item_count(&self) -> usize {
        self.categories.iter().map(|(_, items)| items.len()).sum()
    }
}

impl<C, I> FromIterator<(C, I)> for GroceryList
where
    C: Into<String>,
    I: IntoIterator,
    I::Item: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (C, I)>>(iter: T) -> Self {
        let mut list = GroceryList::new();
        for (category, items) in iter {
            list.insert(category, items.into_iter().map(Into::into).collect());
        }
        list
    }
}

impl Serialize for GroceryList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for (category, items) in &self.categories {
            map.serialize_entry(category, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for GroceryList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroceryListVisitor;

        impl<'de> Visitor<'de> for GroceryListVisitor {
            type Value = GroceryList;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category names to item lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<GroceryList, A::Error> {
                let mut list = GroceryList::new();
                while let Some((category, items)) = access.next_entry::<String, Vec<String>>()? {
                    list.insert(category, items);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_map(GroceryListVisitor)
    }
}

fn grocery_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\*\*\s*Grocery List\s*:?\s*\*\*[:\s]*")
            .expect("valid grocery heading regex")
    })
}

fn section_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\n\n(?:\*\*|Nutritional)").expect("valid section end regex")
    })
}

fn category_heading() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\*\*\s*(.+?)\s*\*\*").expect("valid category heading regex"))
}

/// Extracts a grocery list from a raw model response.
///
/// Accepts a JSON string, or an object whose `meal_plan` field is a string.
/// Every other shape yields an empty list.
pub fn extract_grocery_list(raw: &Value) -> GroceryList {
    let text = match raw {
        Value::String(text) => text.as_str(),
        Value::Object(fields) => match fields.get(TEXT_FIELD) {
            Some(Value::String(text)) => text.as_str(),
            Some(other) => {
                debug!("'{TEXT_FIELD}' field is not a string: {other}");
                return GroceryList::new();
            }
            None => "",
        },
        other => {
            debug!("Unsupported model response shape: {other}");
            return GroceryList::new();
        }
    };
    extract_grocery_list_from_text(text)
}

/// Extracts a grocery list from model text.
pub fn extract_grocery_list_from_text(text: &str) -> GroceryList {
    let Some(section) = locate_grocery_section(text) else {
        debug!("Grocery section not found in model output");
        return GroceryList::new();
    };
    debug!("Extracted grocery section ({} bytes)", section.len());

    let categorized = parse_categories(section);
    if !categorized.is_empty() {
        return categorized;
    }

    let items: Vec<String> = section.split('\n').filter_map(clean_item).collect();
    let mut list = GroceryList::new();
    if !items.is_empty() {
        list.insert(FALLBACK_CATEGORY, items);
    }
    list
}

/// Returns the trimmed text between the first grocery heading and the next
/// blank-line-preceded bold or "Nutritional" heading.
fn locate_grocery_section(text: &str) -> Option<&str> {
    let heading = grocery_heading().find(text)?;
    let body = &text[heading.end()..];

    // The section holds at least one character before a terminator can match.
    let first_len = body.chars().next()?.len_utf8();
    let end = section_end()
        .find_at(body, first_len)
        .map_or(body.len(), |m| m.start());

    Some(body[..end].trim())
}

/// Parses `**Category**` headings and their items. Empty when the section has
/// no bold headings at all.
fn parse_categories(section: &str) -> GroceryList {
    let mut list = GroceryList::new();
    let mut cursor = 0;

    while let Some(caps) = category_heading().captures_at(section, cursor) {
        let (Some(heading), Some(label)) = (caps.get(0), caps.get(1)) else {
            break;
        };

        let items_start = heading.end();
        let items_end = section[items_start..]
            .find("\n**")
            .map(|offset| items_start + offset)
            .unwrap_or(section.len());

        let items = section[items_start..items_end]
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
            .split(['\n', ','])
            .filter_map(clean_item)
            .collect();
        list.insert(label.as_str().trim(), items);

        cursor = items_end;
    }

    list
}

/// Strips bullet markers and whitespace; `None` if nothing is left.
fn clean_item(raw: &str) -> Option<String> {
    let item = raw.trim_matches(|c: char| c == '-' || c == '•' || c.is_whitespace());
    (!item.is_empty()).then(|| item.to_string())
}
