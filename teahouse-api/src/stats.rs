use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: Option<i64>,
    pub total_orders: Option<i64>,
    pub total_revenue: Option<f64>,
    pub total_products: Option<i64>,
    pub revenue_change: Option<f64>,
    pub orders_change: Option<f64>,
    pub users_change: Option<f64>,
    pub avg_order_value: Option<f64>,
    pub avg_order_change: Option<f64>,
}
