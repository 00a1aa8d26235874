use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::products::{Product, ProductBody};

pub struct QueryProducts {}

impl QueryProducts {
    pub fn new() -> Self {
        QueryProducts {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<Vec<Product>, RequestError> {
        client.send_json(client.get("/products")?).await
    }
}

pub struct RetrieveProduct {
    id: i64,
}

impl RetrieveProduct {
    pub fn id(id: i64) -> Self {
        RetrieveProduct { id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Product, RequestError> {
        client.send_json(client.get(format!("/products/{}", self.id))?).await
    }
}

pub struct CreateProduct {
    body: ProductBody,
}

impl CreateProduct {
    pub fn new(body: ProductBody) -> Self {
        CreateProduct { body }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Product, RequestError> {
        client.send_json(client.post("/products")?.json(&self.body)).await
    }
}

pub struct UpdateProduct {
    id: i64,
    body: ProductBody,
}

impl UpdateProduct {
    pub fn new(id: i64, body: ProductBody) -> Self {
        UpdateProduct { id, body }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Product, RequestError> {
        let path = format!("/products/{}", self.id);

        client.send_json(client.put(path)?.json(&self.body)).await
    }
}

pub struct DeleteProduct {
    id: i64,
}

impl DeleteProduct {
    pub fn id(id: i64) -> Self {
        DeleteProduct { id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        client.send_value(client.delete(format!("/products/{}", self.id))?).await
    }
}
