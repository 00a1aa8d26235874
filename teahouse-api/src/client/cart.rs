use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::cart::{Cart, AddCartItem, UpdateQuantity};

pub struct RetrieveCart {}

impl RetrieveCart {
    pub fn new() -> Self {
        RetrieveCart {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<Cart, RequestError> {
        client.send_json(client.get("/cart")?).await
    }
}

pub struct AddToCart {
    body: AddCartItem,
}

impl AddToCart {
    pub fn new(product_id: i64) -> Self {
        AddToCart {
            body: AddCartItem {
                product_id,
                quantity: 1,
            }
        }
    }

    pub fn quantity(&mut self, quantity: i64) -> &mut Self {
        self.body.quantity = quantity;
        self
    }

    pub async fn send(self, client: &ApiClient) -> Result<Cart, RequestError> {
        client.send_json(client.post("/cart/add")?.json(&self.body)).await
    }
}

pub struct UpdateCartItem {
    item_id: i64,
    body: UpdateQuantity,
}

impl UpdateCartItem {
    pub fn new(item_id: i64, quantity: i64) -> Self {
        UpdateCartItem {
            item_id,
            body: UpdateQuantity { quantity }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Cart, RequestError> {
        let path = format!("/cart/items/{}", self.item_id);

        client.send_json(client.put(path)?.json(&self.body)).await
    }
}

pub struct RemoveFromCart {
    item_id: i64,
}

impl RemoveFromCart {
    pub fn item(item_id: i64) -> Self {
        RemoveFromCart { item_id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        client.send_value(client.delete(format!("/cart/items/{}", self.item_id))?).await
    }
}

pub struct ClearCart {}

impl ClearCart {
    pub fn new() -> Self {
        ClearCart {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        client.send_value(client.post("/cart/clear")?).await
    }
}
