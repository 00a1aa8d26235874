use crate::session::Session;

use super::{RouteDescriptor, LOGIN_PATH, home_path};

/// everything a guard gets to look at for a single navigation attempt
#[derive(Debug, Clone, Copy)]
pub struct Intent<'a> {
    pub target: &'a RouteDescriptor,
    pub current: Option<&'a RouteDescriptor>,
    pub session: &'a Session,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Redirect(String),
    Deny,
}

pub trait Guard {
    fn check(&self, intent: &Intent<'_>) -> Decision;
}

impl<F> Guard for F
where
    F: Fn(&Intent<'_>) -> Decision
{
    fn check(&self, intent: &Intent<'_>) -> Decision {
        (self)(intent)
    }
}

/// enforces the `requires_*` flags declared on each route.
///
/// - missing token on an auth route sends the user to the login view
/// - a non admin on an admin route is denied
/// - an authenticated user on a guest route is sent to their home route
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaGuard;

impl Guard for MetaGuard {
    fn check(&self, intent: &Intent<'_>) -> Decision {
        let meta = &intent.target.meta;
        let session = intent.session;

        if meta.requires_auth && !session.is_authenticated() {
            return Decision::Redirect(LOGIN_PATH.to_owned());
        }

        if meta.requires_admin && !session.is_admin() {
            return Decision::Deny;
        }

        if meta.requires_guest && session.is_authenticated() {
            return Decision::Redirect(home_path(session).to_owned());
        }

        Decision::Proceed
    }
}
