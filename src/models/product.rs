use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProductId = Uuid;

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub instagram_link: Option<String>,
    #[serde(default)]
    pub order_position: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Image to display; `None` means the placeholder is shown.
    pub fn image(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|s| !s.is_empty())
    }

    /// Target of the "Ver en Instagram" call-to-action, if any.
    pub fn instagram(&self) -> Option<&str> {
        self.instagram_link.as_deref().filter(|s| !s.is_empty())
    }
}

/// Validated column values sent on insert and update.
///
/// Blank optional fields are `None` and serialize as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub instagram_link: Option<String>,
    pub order_position: i32,
}

/// Update payload: the fields plus the client-side modification time.
#[derive(Debug, Clone, Serialize)]
pub struct ProductChanges<'a> {
    #[serde(flatten)]
    pub fields: &'a ProductFields,
    pub updated_at: DateTime<Utc>,
}

/// Ordering requested from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    OrderPosition,
    Title,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::OrderPosition => "order_position",
            SortColumn::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: SortColumn,
    pub ascending: bool,
}

impl OrderBy {
    /// Display order of the catalog everywhere in the site.
    pub const POSITION: OrderBy = OrderBy {
        column: SortColumn::OrderPosition,
        ascending: true,
    };

    /// PostgREST `order` parameter value, e.g. `order_position.asc`.
    pub fn as_query(&self) -> String {
        let direction = if self.ascending { "asc" } else { "desc" };
        format!("{}.{}", self.column.as_str(), direction)
    }

    /// Stable in-place sort, ties keep their fetched order.
    pub fn sort(&self, products: &mut [Product]) {
        let column = self.column;
        let compare = move |a: &Product, b: &Product| match column {
            SortColumn::OrderPosition => a.order_position.cmp(&b.order_position),
            SortColumn::Title => a.title.cmp(&b.title),
        };

        if self.ascending {
            products.sort_by(compare);
        } else {
            products.sort_by(|a, b| compare(b, a));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, pos: i32) -> Product {
        Product {
            id: Uuid::new_v4(),
            title: title.into(),
            description: "d".into(),
            image_url: None,
            instagram_link: None,
            order_position: pos,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_order_by_query_string() {
        assert_eq!(OrderBy::POSITION.as_query(), "order_position.asc");
        let desc = OrderBy {
            column: SortColumn::Title,
            ascending: false,
        };
        assert_eq!(desc.as_query(), "title.desc");
    }

    #[test]
    fn test_sort_by_position_is_stable_for_ties() {
        let mut products = vec![
            product("c", 2),
            product("a", 1),
            product("b", 2),
            product("d", 0),
        ];
        OrderBy::POSITION.sort(&mut products);
        let titles: Vec<_> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn test_blank_links_are_treated_as_absent() {
        let mut p = product("x", 0);
        p.image_url = Some(String::new());
        p.instagram_link = Some("https://instagram.com/p/1".into());
        assert_eq!(p.image(), None);
        assert_eq!(p.instagram(), Some("https://instagram.com/p/1"));
    }

    #[test]
    fn test_decodes_row_with_nulls() {
        let row = serde_json::json!({
            "id": "6f1c1c1e-8d3b-4b7e-9a55-1f2d3c4b5a69",
            "title": "Pendientes Azul",
            "description": "Pieza artesanal",
            "image_url": null,
            "instagram_link": null,
            "order_position": 2,
            "created_at": "2025-01-10T10:00:00+00:00",
            "updated_at": null
        });
        let p: Product = serde_json::from_value(row).unwrap();
        assert_eq!(p.order_position, 2);
        assert!(p.image().is_none());
        assert!(p.created_at.is_some());
        assert!(p.updated_at.is_none());
    }

    #[test]
    fn test_changes_payload_flattens_fields() {
        let fields = ProductFields {
            title: "t".into(),
            description: "d".into(),
            image_url: None,
            instagram_link: Some("https://instagram.com".into()),
            order_position: 3,
        };
        let changes = ProductChanges {
            fields: &fields,
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&changes).unwrap();
        assert_eq!(value["title"], "t");
        assert!(value["image_url"].is_null());
        assert_eq!(value["order_position"], 3);
        assert!(value["updated_at"].is_string());
    }
}
