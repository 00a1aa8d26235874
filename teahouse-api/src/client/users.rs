use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::users::{User, UpdateRole as UpdateRoleBody};

pub struct QueryUsers {}

impl QueryUsers {
    pub fn new() -> Self {
        QueryUsers {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<Vec<User>, RequestError> {
        client.send_json(client.get("/admin/users")?).await
    }
}

pub struct UpdateRole {
    id: i64,
    body: UpdateRoleBody,
}

impl UpdateRole {
    pub fn new<R>(id: i64, role: R) -> Self
    where
        R: Into<String>
    {
        UpdateRole {
            id,
            body: UpdateRoleBody {
                role: role.into()
            }
        }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        let path = format!("/admin/users/{}/role", self.id);

        client.send_value(client.put(path)?.json(&self.body)).await
    }
}

pub struct DeleteUser {
    id: i64,
}

impl DeleteUser {
    pub fn id(id: i64) -> Self {
        DeleteUser { id }
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        client.send_value(client.delete(format!("/admin/users/{}", self.id))?).await
    }
}
