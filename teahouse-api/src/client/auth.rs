use crate::client::error::RequestError;
use crate::client::ApiClient;
use crate::auth::{
    LoginRequest,
    RegisterRequest,
    AuthResponse,
    UserInfo,
};

pub struct Login {
    admin: bool,
    body: LoginRequest,
}

impl Login {
    pub fn new<U, P>(username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Login {
            admin: false,
            body: LoginRequest {
                username: username.into(),
                password: password.into(),
            }
        }
    }

    /// sends the credentials to the admin login endpoint instead
    pub fn admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    pub async fn send(self, client: &ApiClient) -> Result<AuthResponse, RequestError> {
        let path = if self.admin {
            "/auth/admin/login"
        } else {
            "/auth/login"
        };

        client.send_json(client.post(path)?.json(&self.body)).await
    }
}

pub struct Register {
    body: RegisterRequest,
}

impl Register {
    pub fn new<U, P>(username: U, password: P) -> Self
    where
        U: Into<String>,
        P: Into<String>,
    {
        Register {
            body: RegisterRequest {
                username: username.into(),
                password: password.into(),
                email: None,
            }
        }
    }

    pub fn email<E>(&mut self, email: E) -> &mut Self
    where
        E: Into<String>
    {
        self.body.email = Some(email.into());
        self
    }

    pub async fn send(self, client: &ApiClient) -> Result<AuthResponse, RequestError> {
        client.send_json(client.post("/auth/register")?.json(&self.body)).await
    }
}

pub struct Logout {}

impl Logout {
    pub fn new() -> Self {
        Logout {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        client.send_value(client.post("/auth/logout")?).await
    }
}

pub struct RetrieveMe {}

impl RetrieveMe {
    pub fn new() -> Self {
        RetrieveMe {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<UserInfo, RequestError> {
        client.send_json(client.get("/auth/me")?).await
    }
}

pub struct CheckUsername {
    username: String,
}

impl CheckUsername {
    pub fn new<U>(username: U) -> Self
    where
        U: Into<String>
    {
        CheckUsername {
            username: username.into()
        }
    }

    /// true when the username is already registered
    pub async fn send(self, client: &ApiClient) -> Result<bool, RequestError> {
        let path = format!("/auth/check-user/{}", ApiClient::segment(&self.username)?);

        client.send_json(client.get(path)?).await
    }
}

pub struct Health {}

impl Health {
    pub fn new() -> Self {
        Health {}
    }

    pub async fn send(self, client: &ApiClient) -> Result<Option<serde_json::Value>, RequestError> {
        client.send_value(client.get("/auth/health")?).await
    }
}
