use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::regions::{Region, RegionProduct, RegionRecommendation, LocationRequest};

pub struct QueryRegions {}

impl QueryRegions {
    pub fn new() -> Self {
        QueryRegions {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<Vec<Region>, RequestError> {
        client.send_json(client.get("/regions")?).await
    }
}

pub struct RetrieveRegion {
    code: String,
}

impl RetrieveRegion {
    pub fn code<C>(code: C) -> Self
    where
        C: Into<String>
    {
        RetrieveRegion {
            code: code.into()
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Region, RequestError> {
        let path = format!("/regions/{}", ApiClient::segment(&self.code)?);

        client.send_json(client.get(path)?).await
    }
}

pub struct RecommendRegion {
    body: LocationRequest,
}

impl RecommendRegion {
    pub fn new(body: LocationRequest) -> Self {
        RecommendRegion { body }
    }

    /// skips location detection and answers for the given region
    pub fn mock<C>(code: C) -> Self
    where
        C: Into<String>
    {
        RecommendRegion {
            body: LocationRequest {
                use_mock: true,
                mock_region_code: Some(code.into()),
                ..LocationRequest::default()
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<RegionRecommendation, RequestError> {
        client.send_json(client.post("/regions/recommendation")?.json(&self.body)).await
    }
}

pub struct QueryRegionProducts {
    code: String,
    featured: bool,
}

impl QueryRegionProducts {
    pub fn code<C>(code: C) -> Self
    where
        C: Into<String>
    {
        QueryRegionProducts {
            code: code.into(),
            featured: false,
        }
    }

    /// only list the products the region features
    pub fn featured(&mut self, featured: bool) -> &mut Self {
        self.featured = featured;
        self
    }

    pub async fn send(self, client: &ApiClient) -> Result<Vec<RegionProduct>, RequestError> {
        let list = if self.featured {
            "featured-products"
        } else {
            "products"
        };
        let path = format!("/regions/{}/{}", ApiClient::segment(&self.code)?, list);

        client.send_json(client.get(path)?).await
    }
}

pub struct SearchRegionProducts {
    keyword: String,
    region_code: Option<String>,
}

impl SearchRegionProducts {
    pub fn keyword<K>(keyword: K) -> Self
    where
        K: Into<String>
    {
        SearchRegionProducts {
            keyword: keyword.into(),
            region_code: None,
        }
    }

    pub fn region<C>(&mut self, code: C) -> &mut Self
    where
        C: Into<String>
    {
        self.region_code = Some(code.into());
        self
    }

    pub async fn send(self, client: &ApiClient) -> Result<Vec<RegionProduct>, RequestError> {
        let mut query = vec![("keyword", self.keyword)];

        if let Some(code) = self.region_code {
            query.push(("regionCode", code));
        }

        client.send_json(client.get("/regions/search")?.query(&query)).await
    }
}
