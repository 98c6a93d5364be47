//! Live WebSocket protocol
//!
//! Server → Client: [`LiveMessage`] (stock changes, relayed orders, resync hint)
//! Client → Server: [`LiveCommand`] (new order announcements)
//!
//! Frames are JSON text, `{"event": "...", "data": ...}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stock flag of a product changed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockChange {
    pub product_id: String,
    pub stock: i16,
}

/// Server → Client push
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum LiveMessage {
    /// Stock change or an order relayed from another client
    #[serde(rename = "orderUpdate")]
    OrderUpdate(Value),
    /// Events were dropped for this subscriber; re-fetch current state
    #[serde(rename = "resync")]
    Resync,
}

impl LiveMessage {
    pub fn stock_changed(change: &StockChange) -> Self {
        Self::OrderUpdate(serde_json::json!({
            "productId": change.product_id,
            "stock": change.stock,
        }))
    }
}

/// Client → Server command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum LiveCommand {
    /// Announce an order to every other connected client
    #[serde(rename = "newOrder")]
    NewOrder(Value),
}
