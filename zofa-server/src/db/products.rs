//! Product reads and single-column edits

use rust_decimal::Decimal;
use serde_json::Value;
use shared::models::{HealthMarking, Product, ProductSummary};
use sqlx::PgPool;

use super::StoreResult;

pub async fn find_all(pool: &PgPool) -> StoreResult<Vec<Product>> {
    let rows = sqlx::query_as("SELECT * FROM products ORDER BY name")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Case-insensitive substring match on the product name
pub async fn search(pool: &PgPool, query: &str) -> StoreResult<Vec<Product>> {
    let pattern = format!("%{}%", escape_like(query));
    let rows = sqlx::query_as("SELECT * FROM products WHERE name ILIKE $1 ORDER BY name")
        .bind(pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Products linked to every one of `category_ids`; all products when empty.
pub async fn find_by_categories(
    pool: &PgPool,
    category_ids: &[i64],
) -> StoreResult<Vec<ProductSummary>> {
    if category_ids.is_empty() {
        let rows = sqlx::query_as("SELECT id, name, price, in_stock FROM products ORDER BY name")
            .fetch_all(pool)
            .await?;
        return Ok(rows);
    }

    let rows = sqlx::query_as(
        r#"
        SELECT p.id, p.name, p.price, p.in_stock
        FROM products p
        JOIN product_category pc ON pc.product_id = p.id
        WHERE pc.category_id = ANY($1)
        GROUP BY p.id, p.name, p.price, p.in_stock
        HAVING COUNT(DISTINCT pc.category_id) = $2
        ORDER BY p.name
        "#,
    )
    .bind(category_ids)
    .bind(distinct_count(category_ids))
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

fn distinct_count(ids: &[i64]) -> i64 {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids.len() as i64
}

pub async fn category_names(pool: &PgPool, product_id: &str) -> StoreResult<Vec<String>> {
    let names = sqlx::query_scalar(
        r#"
        SELECT c.name FROM category c
        JOIN product_category pc ON pc.category_id = c.id
        WHERE pc.product_id = $1
        ORDER BY c.id
        "#,
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

pub async fn health_markings(pool: &PgPool) -> StoreResult<Vec<HealthMarking>> {
    let rows = sqlx::query_as("SELECT id, name FROM health_marking ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Product columns that may be edited one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditableField {
    Name,
    Data,
    Components,
    AdditionalFeatures,
    Contain,
    MayContain,
    Allergies,
    Price,
}

/// Typed value for an [`EditableField`]
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(Option<String>),
    Price(Decimal),
}

impl EditableField {
    /// Accepts the column name or its camelCase form
    pub fn parse(field: &str) -> Option<Self> {
        Some(match field {
            "name" => Self::Name,
            "data" => Self::Data,
            "components" => Self::Components,
            "additional_features" | "additionalFeatures" => Self::AdditionalFeatures,
            "contain" => Self::Contain,
            "may_contain" | "mayContain" => Self::MayContain,
            "allergies" => Self::Allergies,
            "price" => Self::Price,
            _ => return None,
        })
    }

    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Data => "data",
            Self::Components => "components",
            Self::AdditionalFeatures => "additional_features",
            Self::Contain => "contain",
            Self::MayContain => "may_contain",
            Self::Allergies => "allergies",
            Self::Price => "price",
        }
    }

    /// Coerce a JSON value to this column's type. `None` when it does not fit.
    pub fn value(self, raw: &Value) -> Option<FieldValue> {
        match self {
            Self::Price => {
                let price = match raw {
                    Value::Number(n) => n.to_string().parse::<Decimal>().ok()?,
                    Value::String(s) => s.trim().parse::<Decimal>().ok()?,
                    _ => return None,
                };
                (price >= Decimal::ZERO).then_some(FieldValue::Price(price))
            }
            Self::Name => match raw {
                Value::String(s) if !s.trim().is_empty() => {
                    Some(FieldValue::Text(Some(s.trim().to_string())))
                }
                _ => None,
            },
            _ => match raw {
                Value::String(s) => Some(FieldValue::Text(Some(s.clone()))),
                Value::Null => Some(FieldValue::Text(None)),
                Value::Number(n) => Some(FieldValue::Text(Some(n.to_string()))),
                _ => None,
            },
        }
    }
}

/// Returns affected rows
pub async fn update_field(
    pool: &PgPool,
    product_id: &str,
    field: EditableField,
    value: &FieldValue,
) -> StoreResult<u64> {
    // Column name comes from the whitelist above, never from the request
    let sql = format!("UPDATE products SET {} = $1 WHERE id = $2", field.column());
    let query = sqlx::query(&sql);
    let query = match value {
        FieldValue::Text(text) => query.bind(text.clone()),
        FieldValue::Price(price) => query.bind(*price),
    };
    let rows = query.bind(product_id).execute(pool).await?.rows_affected();
    Ok(rows)
}
