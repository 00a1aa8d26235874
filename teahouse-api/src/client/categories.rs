use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::categories::{Category, CategoryBody};

pub struct QueryCategories {}

impl QueryCategories {
    pub fn new() -> Self {
        QueryCategories {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<Vec<Category>, RequestError> {
        client.send_json(client.get("/categories")?).await
    }
}

pub struct RetrieveCategory {
    id: i64,
}

impl RetrieveCategory {
    pub fn id(id: i64) -> Self {
        RetrieveCategory { id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Category, RequestError> {
        client.send_json(client.get(format!("/categories/{}", self.id))?).await
    }
}

pub struct CreateCategory {
    body: CategoryBody,
}

impl CreateCategory {
    pub fn new(body: CategoryBody) -> Self {
        CreateCategory { body }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Category, RequestError> {
        client.send_json(client.post("/categories")?.json(&self.body)).await
    }
}

pub struct UpdateCategory {
    id: i64,
    body: CategoryBody,
}

impl UpdateCategory {
    pub fn new(id: i64, body: CategoryBody) -> Self {
        UpdateCategory { id, body }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Category, RequestError> {
        let path = format!("/categories/{}", self.id);

        client.send_json(client.put(path)?.json(&self.body)).await
    }
}

pub struct DeleteCategory {
    id: i64,
}

impl DeleteCategory {
    pub fn id(id: i64) -> Self {
        DeleteCategory { id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        client.send_value(client.delete(format!("/categories/{}", self.id))?).await
    }
}
