//! Product orders placed from the shop screen

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductOrder {
    pub id: i64,
    pub username: String,
    pub phone_number: String,
    pub order_details: String,
    pub total_price: Decimal,
    pub status: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductOrderCreate {
    pub username: String,
    pub phone_number: String,
    pub order_details: serde_json::Value,
    pub total_price: Decimal,
    pub status: Option<String>,
    pub email: Option<String>,
}

/// Default status for freshly placed orders
pub const ORDER_STATUS_PENDING: &str = "pending";

/// Render the order lines as stored text; strings are kept verbatim.
pub fn order_details_text(details: &serde_json::Value) -> String {
    match details {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_details_are_stored_as_text() {
        assert_eq!(order_details_text(&serde_json::json!("2x pita")), "2x pita");
        assert_eq!(
            order_details_text(&serde_json::json!([{"item": "pita", "qty": 2}])),
            r#"[{"item":"pita","qty":2}]"#
        );
        assert_eq!(order_details_text(&serde_json::Value::Null), "");
    }
}
