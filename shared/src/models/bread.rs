//! Bread types and daily bread orders

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Bread type offered for daily ordering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BreadType {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Create bread type payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadTypeCreate {
    pub name: String,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
}

/// Bread order for a given weekday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BreadOrder {
    pub id: i64,
    pub username: String,
    pub phone_number: String,
    /// Serialized order lines as sent by the client
    pub order_details: String,
    pub total_price: Decimal,
    pub status: String,
    pub day: String,
}

/// Create bread order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreadOrderCreate {
    pub username: String,
    pub phone_number: String,
    /// Accepts either a string or structured JSON, stored as text
    pub order_details: serde_json::Value,
    pub total_price: Decimal,
    pub status: Option<String>,
    pub day: String,
}

/// `GET /api/getAllBreadOrders` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BreadOrderQuery {
    pub day: Option<String>,
}

/// `POST /api/setBreadOrderStatus` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BreadOrderStatusUpdate {
    pub id: Option<i64>,
    pub status: String,
}

/// `POST /api/updateBreadPrice/{id}` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BreadPriceUpdate {
    pub new_price: Option<Decimal>,
}
