use serde::{Serialize, Deserialize};
use teahouse_lib::{Role, Session};

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// response of the login and register endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub username: Option<String>,
    pub user_id: Option<i64>,
    pub role: Option<String>,
    pub token: Option<String>,
}

/// the record kept under the `currentUser` session key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: Option<i64>,
    pub username: Option<String>,
    pub role: Option<Role>,
}

impl AuthResponse {
    pub fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|v| v.parse().ok())
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            user_id: self.user_id,
            username: self.username.clone(),
            role: self.role(),
        }
    }

    /// builds the session to store after a successful login or register.
    /// returns `None` when the server did not accept the credentials.
    pub fn session(&self) -> Option<Session> {
        if !self.success {
            return None;
        }

        let current_user = serde_json::to_string(&self.current_user()).ok();

        Some(Session {
            token: self.token.clone(),
            user_id: self.user_id.map(|id| id.to_string()),
            username: self.username.clone(),
            role: self.role().or(Some(Role::User)),
            current_user,
        })
    }
}

/// payload of the current user endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(alias = "userId")]
    pub id: Option<i64>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub message: Option<String>,
}
