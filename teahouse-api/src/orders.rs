use chrono::NaiveDateTime;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: Option<i64>,
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    pub product_emoji: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<f64>,
    pub item_total_price: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub order_number: Option<String>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    pub total_price: Option<f64>,
    pub status: Option<String>,
    pub customer_notes: Option<String>,
    pub order_date: Option<NaiveDateTime>,
    pub estimated_ready_time: Option<NaiveDateTime>,
    pub completed_date: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateStatus {
    pub status: String,
}
