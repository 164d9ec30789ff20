//! Product records, response bodies, and payload extraction
//!
//! Request bodies are arbitrary JSON objects. [`ProductDraft::from_value`]
//! copies only the known product columns plus the `brand` and `categories`
//! reference keys, type-checking and validating each field as it goes;
//! unknown keys are ignored. Reference names are resolved against the
//! database by the command handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::features::shared::validation::{
    validate_items_in_stock, validate_name, validate_rating, NameValidationError,
    RatingValidationError, StockValidationError,
};

/// A stored brand, serialized nested inside product bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub id: i32,
    pub name: String,
    pub country_code: String,
}

/// A stored category, serialized nested inside product bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

/// A product row joined with its brand columns
#[derive(Debug, Clone, FromRow)]
pub struct ProductRow {
    pub id: i32,
    pub name: String,
    pub rating: f64,
    pub featured: bool,
    pub items_in_stock: i32,
    pub created_at: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub receipt_date: Option<DateTime<Utc>>,
    pub brand_id: i32,
    pub brand_name: String,
    pub brand_country_code: String,
}

/// Serialized product graph returned by every endpoint
///
/// All fields are always present; optional timestamps serialize as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductBody {
    pub id: i32,
    pub name: String,
    pub rating: f64,
    pub featured: bool,
    pub items_in_stock: i32,
    pub receipt_date: Option<DateTime<Utc>>,
    pub brand: Brand,
    pub categories: Vec<Category>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ProductBody {
    /// Assemble the response graph from a joined row and its categories
    pub fn from_parts(row: ProductRow, categories: Vec<Category>) -> Self {
        Self {
            id: row.id,
            name: row.name,
            rating: row.rating,
            featured: row.featured,
            items_in_stock: row.items_in_stock,
            receipt_date: row.receipt_date,
            brand: Brand {
                id: row.brand_id,
                name: row.brand_name,
                country_code: row.brand_country_code,
            },
            categories,
            expiration_date: row.expiration_date,
            created_at: row.created_at,
        }
    }
}

/// Errors raised while extracting a product draft from a JSON payload
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PayloadError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("[{field}] expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("[{field}] expected an RFC 3339 timestamp, got '{value}'")]
    BadTimestamp { field: &'static str, value: String },

    #[error(transparent)]
    Name(#[from] NameValidationError),

    #[error(transparent)]
    Rating(#[from] RatingValidationError),

    #[error(transparent)]
    Stock(#[from] StockValidationError),
}

/// The subset of product fields present in a request payload
///
/// `None` means the key was absent (or carried an empty reference value)
/// and the corresponding column is left untouched on update. The nullable
/// date columns are tri-state: an explicit JSON null is `Some(None)` and
/// clears the stored value, while an absent key stays `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub featured: Option<bool>,
    pub items_in_stock: Option<i32>,
    pub expiration_date: Option<Option<DateTime<Utc>>>,
    pub receipt_date: Option<Option<DateTime<Utc>>>,
    /// Brand name, resolved to a foreign key by the command handlers
    pub brand: Option<String>,
    /// Category names; when present, the resolved set replaces the full
    /// category list
    pub categories: Option<Vec<String>>,
}

impl ProductDraft {
    /// Extract and validate known product fields from a JSON payload
    ///
    /// Unknown keys are ignored. Each extracted field is type-checked
    /// (`featured` must be a JSON boolean, not merely truthy) and passed
    /// through its validator, so a draft that extracts successfully is safe
    /// to persist once its references resolve.
    pub fn from_value(payload: &Value) -> Result<Self, PayloadError> {
        let object = payload.as_object().ok_or(PayloadError::NotAnObject)?;
        let mut draft = ProductDraft::default();

        if let Some(value) = object.get("name") {
            let name = value.as_str().ok_or(PayloadError::WrongType {
                field: "name",
                expected: "a string",
            })?;
            validate_name(name)?;
            draft.name = Some(name.to_string());
        }

        if let Some(value) = object.get("rating") {
            let rating = value.as_f64().ok_or(PayloadError::WrongType {
                field: "rating",
                expected: "a number",
            })?;
            validate_rating(rating)?;
            draft.rating = Some(rating);
        }

        if let Some(value) = object.get("featured") {
            let featured = value.as_bool().ok_or(PayloadError::WrongType {
                field: "featured",
                expected: "a boolean",
            })?;
            draft.featured = Some(featured);
        }

        if let Some(value) = object.get("items_in_stock") {
            let count = value.as_i64().ok_or(PayloadError::WrongType {
                field: "items_in_stock",
                expected: "an integer",
            })?;
            validate_items_in_stock(count)?;
            let count = i32::try_from(count).map_err(|_| PayloadError::WrongType {
                field: "items_in_stock",
                expected: "a 32-bit integer",
            })?;
            draft.items_in_stock = Some(count);
        }

        draft.expiration_date = extract_timestamp(object, "expiration_date")?;
        draft.receipt_date = extract_timestamp(object, "receipt_date")?;

        if let Some(value) = object.get("brand") {
            match value {
                Value::Null => {},
                Value::String(name) if name.is_empty() => {},
                Value::String(name) => draft.brand = Some(name.clone()),
                _ => {
                    return Err(PayloadError::WrongType {
                        field: "brand",
                        expected: "a brand name string",
                    })
                },
            }
        }

        if let Some(value) = object.get("categories") {
            let items = value.as_array().ok_or(PayloadError::WrongType {
                field: "categories",
                expected: "a list of category names",
            })?;
            let mut names: Vec<String> = Vec::with_capacity(items.len());
            for item in items {
                let name = item.as_str().ok_or(PayloadError::WrongType {
                    field: "categories",
                    expected: "a list of category names",
                })?;
                // Duplicate names collapse to a single membership row.
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
            // An empty list behaves like an absent key; create still
            // enforces its at-least-one-category rule.
            if !names.is_empty() {
                draft.categories = Some(names);
            }
        }

        Ok(draft)
    }
}

fn extract_timestamp(
    object: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<Option<Option<DateTime<Utc>>>, PayloadError> {
    match object.get(field) {
        None => Ok(None),
        // An explicit null clears the stored value on update.
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(raw)) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| Some(Some(dt.with_timezone(&Utc))))
            .map_err(|_| PayloadError::BadTimestamp {
                field,
                value: raw.clone(),
            }),
        Some(_) => Err(PayloadError::WrongType {
            field,
            expected: "an RFC 3339 timestamp string",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_draft_from_full_payload() {
        let payload = json!({
            "name": "Sparkling Water",
            "rating": 4.5,
            "featured": true,
            "items_in_stock": 12,
            "expiration_date": "2026-12-31T00:00:00Z",
            "brand": "Aqua Co",
            "categories": ["drinks", "water"],
        });

        let draft = ProductDraft::from_value(&payload).unwrap();
        assert_eq!(draft.name.as_deref(), Some("Sparkling Water"));
        assert_eq!(draft.rating, Some(4.5));
        assert_eq!(draft.featured, Some(true));
        assert_eq!(draft.items_in_stock, Some(12));
        assert!(matches!(draft.expiration_date, Some(Some(_))));
        assert!(draft.receipt_date.is_none());
        assert_eq!(draft.brand.as_deref(), Some("Aqua Co"));
        assert_eq!(
            draft.categories,
            Some(vec!["drinks".to_string(), "water".to_string()])
        );
    }

    #[test]
    fn test_draft_ignores_unknown_keys() {
        let payload = json!({
            "name": "Chips",
            "color": "orange",
            "nested": {"ignored": true},
        });

        let draft = ProductDraft::from_value(&payload).unwrap();
        assert_eq!(draft.name.as_deref(), Some("Chips"));
        assert!(draft.rating.is_none());
    }

    #[test]
    fn test_draft_rejects_non_object_payload() {
        assert_eq!(
            ProductDraft::from_value(&json!([1, 2, 3])),
            Err(PayloadError::NotAnObject)
        );
    }

    #[test]
    fn test_draft_rejects_truthy_featured() {
        // A truthy integer is not a boolean.
        let payload = json!({"featured": 1});
        assert_eq!(
            ProductDraft::from_value(&payload),
            Err(PayloadError::WrongType {
                field: "featured",
                expected: "a boolean"
            })
        );
    }

    #[test]
    fn test_draft_rejects_negative_rating() {
        let payload = json!({"rating": -1});
        assert!(matches!(
            ProductDraft::from_value(&payload),
            Err(PayloadError::Rating(_))
        ));
    }

    #[test]
    fn test_draft_rejects_negative_stock() {
        let payload = json!({"items_in_stock": -5});
        assert!(matches!(
            ProductDraft::from_value(&payload),
            Err(PayloadError::Stock(_))
        ));
    }

    #[test]
    fn test_draft_rejects_fractional_stock() {
        let payload = json!({"items_in_stock": 2.5});
        assert!(matches!(
            ProductDraft::from_value(&payload),
            Err(PayloadError::WrongType { field: "items_in_stock", .. })
        ));
    }

    #[test]
    fn test_draft_rejects_long_name() {
        let payload = json!({"name": "x".repeat(51)});
        assert!(matches!(
            ProductDraft::from_value(&payload),
            Err(PayloadError::Name(_))
        ));
    }

    #[test]
    fn test_draft_rejects_bad_timestamp() {
        let payload = json!({"expiration_date": "next tuesday"});
        assert!(matches!(
            ProductDraft::from_value(&payload),
            Err(PayloadError::BadTimestamp { field: "expiration_date", .. })
        ));
    }

    #[test]
    fn test_draft_null_date_is_distinct_from_absent() {
        // An explicit null must survive extraction so update can clear the
        // stored column; an absent key leaves it untouched.
        let with_null = ProductDraft::from_value(&json!({"expiration_date": null})).unwrap();
        let absent = ProductDraft::from_value(&json!({})).unwrap();

        assert_eq!(with_null.expiration_date, Some(None));
        assert_eq!(absent.expiration_date, None);
        assert_ne!(with_null, absent);
    }

    #[test]
    fn test_draft_null_receipt_date_clears() {
        let draft = ProductDraft::from_value(&json!({"receipt_date": null})).unwrap();
        assert_eq!(draft.receipt_date, Some(None));
    }

    #[test]
    fn test_draft_rejects_null_categories() {
        let payload = json!({"categories": null});
        assert!(matches!(
            ProductDraft::from_value(&payload),
            Err(PayloadError::WrongType { field: "categories", .. })
        ));
    }

    #[test]
    fn test_draft_empty_brand_treated_as_absent() {
        let payload = json!({"brand": ""});
        let draft = ProductDraft::from_value(&payload).unwrap();
        assert!(draft.brand.is_none());
    }

    #[test]
    fn test_draft_empty_categories_treated_as_absent() {
        let payload = json!({"categories": []});
        let draft = ProductDraft::from_value(&payload).unwrap();
        assert!(draft.categories.is_none());
    }

    #[test]
    fn test_draft_deduplicates_category_names() {
        let payload = json!({"categories": ["food", "food", "snacks"]});
        let draft = ProductDraft::from_value(&payload).unwrap();
        assert_eq!(
            draft.categories,
            Some(vec!["food".to_string(), "snacks".to_string()])
        );
    }

    #[test]
    fn test_draft_rejects_non_string_category() {
        let payload = json!({"categories": ["food", 7]});
        assert!(matches!(
            ProductDraft::from_value(&payload),
            Err(PayloadError::WrongType { field: "categories", .. })
        ));
    }

    #[test]
    fn test_product_body_serializes_all_fields() {
        let body = ProductBody {
            id: 1,
            name: "Tea".to_string(),
            rating: 3.0,
            featured: false,
            items_in_stock: 4,
            receipt_date: None,
            brand: Brand {
                id: 2,
                name: "Leaf".to_string(),
                country_code: "GB".to_string(),
            },
            categories: vec![Category {
                id: 3,
                name: "drinks".to_string(),
            }],
            expiration_date: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&body).unwrap();
        let object = json.as_object().unwrap();
        // Null fields stay present in the serialized form.
        for key in [
            "id",
            "name",
            "rating",
            "featured",
            "items_in_stock",
            "receipt_date",
            "brand",
            "categories",
            "expiration_date",
            "created_at",
        ] {
            assert!(object.contains_key(key), "missing field {key}");
        }
        assert!(json["receipt_date"].is_null());
        assert_eq!(json["brand"]["country_code"], "GB");
        assert_eq!(json["categories"][0]["name"], "drinks");
    }
}
