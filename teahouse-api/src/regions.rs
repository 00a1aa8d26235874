use serde::{Serialize, Deserialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: Option<i64>,
    pub code: String,
    pub name: Option<String>,
    pub icon: Option<String>,
    pub cover_provinces: Option<String>,
    pub specialty_desc: Option<String>,
    pub climate_feature: Option<String>,
    pub recommend_tags: Option<String>,
    pub is_active: Option<bool>,
    pub product_count: Option<i64>,
    pub featured_count: Option<i64>,
}

/// a product as offered within a region
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionProduct {
    pub id: Option<i64>,
    pub region_id: Option<i64>,
    pub region_name: Option<String>,
    pub region_icon: Option<String>,
    pub product_id: Option<i64>,
    pub product_name: Option<String>,
    pub product_description: Option<String>,
    pub product_price: Option<f64>,
    pub product_image_url: Option<String>,
    pub product_tags: Option<String>,
    pub is_featured: Option<bool>,
    pub recommend_reason: Option<String>,
    pub local_name: Option<String>,
    pub popularity_score: Option<i64>,
    pub seasonal_month: Option<String>,
    /// full product record when the server attaches one
    pub product_detail: Option<serde_json::Value>,
}

/// where the user is, or the region to pretend they are in
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default)]
    pub use_mock: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mock_region_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRecommendation {
    pub region: Option<Region>,
    pub detected_province: Option<String>,
    pub detected_city: Option<String>,
    /// exact, fuzzy, default or manual
    pub match_type: Option<String>,
    #[serde(default)]
    pub featured_products: Vec<RegionProduct>,
    #[serde(default)]
    pub all_products: Vec<RegionProduct>,
    pub weather_suggestion: Option<String>,
    pub seasonal_suggestion: Option<String>,
}
