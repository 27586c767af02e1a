//! Affiliate shopping-search links for grocery items.

use serde::Serialize;
use url::Url;

use crate::planner::grocery::GroceryList;

const SHOPPING_SEARCH_URL: &str = "https://www.amazon.com/s";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingLink {
    pub item: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoppingCategory {
    pub category: String,
    pub items: Vec<ShoppingLink>,
}

/// Search URL for `item`, tagged with the affiliate id when one is configured.
pub fn shopping_search_url(item: &str, affiliate_tag: Option<&str>) -> String {
    let mut url = Url::parse(SHOPPING_SEARCH_URL).expect("valid shopping search URL");
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("k", item);
        if let Some(tag) = affiliate_tag.filter(|t| !t.is_empty()) {
            query.append_pair("tag", tag);
        }
    }
    url.into()
}

/// One link per item, grouped and ordered like `list`.
pub fn shopping_links(list: &GroceryList, affiliate_tag: Option<&str>) -> Vec<ShoppingCategory> {
    list.iter()
        .map(|(category, items)| ShoppingCategory {
            category: category.to_string(),
            items: items
                .iter()
                .map(|item| ShoppingLink {
                    item: item.clone(),
                    url: shopping_search_url(item, affiliate_tag),
                })
                .collect(),
        })
        .collect()
}
