use chrono::NaiveDateTime;
use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: i64,
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    pub product_emoji: Option<String>,
    #[serde(default)]
    pub product_price: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub item_total_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub username: Option<String>,
    #[serde(default)]
    pub cart_items: Vec<CartItem>,
    pub total_price: Option<f64>,
    pub total_quantity: Option<i64>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItem {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateQuantity {
    pub quantity: i64,
}
