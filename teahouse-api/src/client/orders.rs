use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::orders::{Order, CreateOrder as CreateOrderBody, UpdateStatus};

pub struct QueryOrders {}

impl QueryOrders {
    pub fn new() -> Self {
        QueryOrders {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<Vec<Order>, RequestError> {
        client.send_json(client.get("/orders")?).await
    }
}

pub struct RetrieveOrder {
    id: i64,
}

impl RetrieveOrder {
    pub fn id(id: i64) -> Self {
        RetrieveOrder { id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Order, RequestError> {
        client.send_json(client.get(format!("/orders/{}", self.id))?).await
    }
}

pub struct CreateOrder {
    body: CreateOrderBody,
}

impl CreateOrder {
    pub fn new() -> Self {
        CreateOrder {
            body: CreateOrderBody::default()
        }
    }

    pub fn notes<N>(&mut self, notes: N) -> &mut Self
    where
        N: Into<String>
    {
        self.body.customer_notes = Some(notes.into());
        self
    }

    pub async fn send(self, client: &ApiClient) -> Result<Order, RequestError> {
        client.send_json(client.post("/orders")?.json(&self.body)).await
    }
}

pub struct UpdateOrderStatus {
    id: i64,
    body: UpdateStatus,
}

impl UpdateOrderStatus {
    pub fn new<S>(id: i64, status: S) -> Self
    where
        S: Into<String>
    {
        UpdateOrderStatus {
            id,
            body: UpdateStatus {
                status: status.into()
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        let path = format!("/orders/{}/status", self.id);

        client.send_value(client.put(path)?.json(&self.body)).await
    }
}

pub struct CancelOrder {
    id: i64,
}

impl CancelOrder {
    pub fn id(id: i64) -> Self {
        CancelOrder { id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        client.send_value(client.put(format!("/orders/{}/cancel", self.id))?).await
    }
}

pub struct DeleteOrder {
    id: i64,
}

impl DeleteOrder {
    pub fn id(id: i64) -> Self {
        DeleteOrder { id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        client.send_value(client.delete(format!("/orders/{}", self.id))?).await
    }
}
