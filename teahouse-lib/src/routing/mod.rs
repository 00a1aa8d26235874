use strum::AsRefStr as StrumAsRefStr;

use crate::session::{Role, Session};

pub mod guard;
pub mod router;

pub use guard::{Guard, MetaGuard, Decision, Intent};
pub use router::{Router, NavigationError};

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const CUSTOMER_PATH: &str = "/customer";
pub const ADMIN_PATH: &str = "/admin";

/// something that can report and change the active location.
///
/// used by the http client to send the user back to the login view when
/// the server rejects the session.
pub trait Navigator: Send + Sync {
    fn location(&self) -> Option<String>;

    fn navigate(&self, path: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumAsRefStr)]
pub enum ViewKey {
    Login,
    Register,
    Customer,
    Admin,
    Recommendation,
    RegionRecommendation,
}

impl std::fmt::Display for ViewKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_guest: bool,
    pub requires_admin: bool,
}

impl RouteMeta {
    pub const NONE: RouteMeta = RouteMeta {
        requires_auth: false,
        requires_guest: false,
        requires_admin: false,
    };

    pub const GUEST: RouteMeta = RouteMeta {
        requires_auth: false,
        requires_guest: true,
        requires_admin: false,
    };

    pub const AUTH: RouteMeta = RouteMeta {
        requires_auth: true,
        requires_guest: false,
        requires_admin: false,
    };

    pub const ADMIN: RouteMeta = RouteMeta {
        requires_auth: true,
        requires_guest: false,
        requires_admin: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    View(ViewKey),
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: Option<&'static str>,
    pub target: RouteTarget,
    pub meta: RouteMeta,
}

impl RouteDescriptor {
    pub fn view(&self) -> Option<ViewKey> {
        match self.target {
            RouteTarget::View(key) => Some(key),
            RouteTarget::Redirect(_) => None,
        }
    }
}

pub static ROUTES: [RouteDescriptor; 8] = [
    RouteDescriptor {
        path: ROOT_PATH,
        name: None,
        target: RouteTarget::Redirect(LOGIN_PATH),
        meta: RouteMeta::NONE,
    },
    RouteDescriptor {
        path: LOGIN_PATH,
        name: Some("Login"),
        target: RouteTarget::View(ViewKey::Login),
        meta: RouteMeta::GUEST,
    },
    RouteDescriptor {
        path: REGISTER_PATH,
        name: Some("Register"),
        target: RouteTarget::View(ViewKey::Register),
        meta: RouteMeta::GUEST,
    },
    RouteDescriptor {
        path: CUSTOMER_PATH,
        name: Some("Customer"),
        target: RouteTarget::View(ViewKey::Customer),
        meta: RouteMeta::AUTH,
    },
    RouteDescriptor {
        path: ADMIN_PATH,
        name: Some("Admin"),
        target: RouteTarget::View(ViewKey::Admin),
        meta: RouteMeta::ADMIN,
    },
    RouteDescriptor {
        path: "/recommendation",
        name: Some("Recommendation"),
        target: RouteTarget::View(ViewKey::Recommendation),
        meta: RouteMeta::AUTH,
    },
    RouteDescriptor {
        path: "/ai-recommend",
        name: Some("AIRecommend"),
        target: RouteTarget::View(ViewKey::Recommendation),
        meta: RouteMeta::AUTH,
    },
    RouteDescriptor {
        path: "/region-recommend",
        name: Some("RegionRecommend"),
        target: RouteTarget::View(ViewKey::RegionRecommendation),
        meta: RouteMeta::AUTH,
    },
];

/// strips any query or fragment and a trailing slash from the given path
pub fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = &path[..end];

    if trimmed.len() > 1 {
        trimmed.trim_end_matches('/')
    } else if trimmed.is_empty() {
        ROOT_PATH
    } else {
        trimmed
    }
}

pub fn lookup(routes: &'static [RouteDescriptor], path: &str) -> Option<&'static RouteDescriptor> {
    let path = normalize(path);

    routes.iter().find(|route| route.path == path)
}

/// the route a session lands on after authenticating
pub fn home_path(session: &Session) -> &'static str {
    match session.role() {
        Role::Admin => ADMIN_PATH,
        Role::User | Role::Guest => CUSTOMER_PATH,
    }
}
