use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};
use strum::{AsRefStr as StrumAsRefStr, EnumString};

mod store;

pub use store::{SessionStore, Backend, MemoryBackend, FileBackend, SessionError};

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "userId";
pub const USERNAME_KEY: &str = "username";
pub const ROLE_KEY: &str = "role";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// every key owned by the session. clearing the session removes all of
/// them together.
pub const SESSION_KEYS: [&str; 5] = [
    TOKEN_KEY,
    USER_ID_KEY,
    USERNAME_KEY,
    ROLE_KEY,
    CURRENT_USER_KEY,
];

pub type Entries = BTreeMap<String, String>;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq,
    StrumAsRefStr, EnumString,
    Serialize, Deserialize
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

/// typed view of the credential entries for the current user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub token: Option<String>,
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub role: Option<Role>,
    pub current_user: Option<String>,
}

impl Session {
    pub fn from_entries(entries: &Entries) -> Self {
        Session {
            token: entries.get(TOKEN_KEY).cloned(),
            user_id: entries.get(USER_ID_KEY).cloned(),
            username: entries.get(USERNAME_KEY).cloned(),
            role: entries.get(ROLE_KEY)
                .and_then(|v| v.parse().ok()),
            current_user: entries.get(CURRENT_USER_KEY).cloned(),
        }
    }

    pub(crate) fn write_entries(&self, entries: &mut Entries) {
        let pairs = [
            (TOKEN_KEY, self.token.clone()),
            (USER_ID_KEY, self.user_id.clone()),
            (USERNAME_KEY, self.username.clone()),
            (ROLE_KEY, self.role.map(|r| r.as_ref().to_owned())),
            (CURRENT_USER_KEY, self.current_user.clone()),
        ];

        for (key, value) in pairs {
            match value {
                Some(value) => {
                    entries.insert(key.to_owned(), value);
                },
                None => {
                    entries.remove(key);
                }
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }

    /// role of the session, a missing role counts as a guest
    pub fn role(&self) -> Role {
        self.role.unwrap_or(Role::Guest)
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none() &&
            self.user_id.is_none() &&
            self.username.is_none() &&
            self.role.is_none() &&
            self.current_user.is_none()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn role_parses_backend_casing() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("User".parse::<Role>().unwrap(), Role::User);
        assert_eq!("guest".parse::<Role>().unwrap(), Role::Guest);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn entries_round_trip_through_session() {
        let session = Session {
            token: Some("abc".into()),
            user_id: Some("7".into()),
            username: Some("mei".into()),
            role: Some(Role::Admin),
            current_user: None,
        };

        let mut entries = Entries::new();
        entries.insert(CURRENT_USER_KEY.into(), "stale".into());
        entries.insert("theme".into(), "dark".into());

        session.write_entries(&mut entries);

        assert_eq!(entries.get(ROLE_KEY).map(String::as_str), Some("admin"));
        assert!(!entries.contains_key(CURRENT_USER_KEY), "absent fields are removed");
        assert_eq!(entries.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(Session::from_entries(&entries), session);
    }

    #[test]
    fn unknown_role_is_treated_as_missing() {
        let mut entries = Entries::new();
        entries.insert(ROLE_KEY.into(), "superuser".into());

        let session = Session::from_entries(&entries);

        assert_eq!(session.role, None);
        assert_eq!(session.role(), Role::Guest);
        assert!(!session.is_admin());
    }
}
