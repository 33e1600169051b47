use serde::{Deserialize, Serialize};

use super::{Product, ProductFields};
use crate::common::ValidationError;

/// Editable form state shared by the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub instagram_link: String,
    pub order_position: i32,
}

impl ProductDraft {
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone().unwrap_or_default(),
            instagram_link: product.instagram_link.clone().unwrap_or_default(),
            order_position: product.order_position,
        }
    }

    /// Sets the position from raw input text.
    pub fn set_order_position(&mut self, raw: &str) {
        self.order_position = parse_order_position(raw);
    }

    pub fn validate(&self) -> Result<ProductFields, ValidationError> {
        if self.title.trim().is_empty() || self.description.trim().is_empty() {
            return Err(ValidationError::MissingRequired);
        }

        Ok(ProductFields {
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: non_blank(&self.image_url),
            instagram_link: non_blank(&self.instagram_link),
            order_position: self.order_position,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Leading-integer parse of a number input: optional sign followed by
/// digits, trailing garbage ignored. No digits or overflow gives 0.
pub fn parse_order_position(raw: &str) -> i32 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }

    let signed = if negative {
        format!("-{}", &digits[..end])
    } else {
        digits[..end].to_string()
    };
    signed.parse::<i32>().unwrap_or(0)
}
