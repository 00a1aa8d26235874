use crate::session::Session;

use super::{
    lookup,
    normalize,
    Guard,
    MetaGuard,
    Decision,
    Intent,
    RouteDescriptor,
    RouteTarget,
    ROUTES,
};

/// upper bound on redirects followed by a single navigation
pub const MAX_REDIRECTS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
    #[error("already at {0}")]
    DuplicateNavigation(String),

    #[error("no route matches {0}")]
    NotFound(String),

    #[error("navigation to {0} was denied")]
    Denied(String),

    #[error("too many redirects navigating to {0}")]
    RedirectLoop(String),
}

impl NavigationError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, NavigationError::DuplicateNavigation(_))
    }
}

/// drops [`NavigationError::DuplicateNavigation`], anything else is
/// returned as is
fn ignore_duplicate(result: Result<&'static RouteDescriptor, NavigationError>) -> Result<(), NavigationError> {
    match result {
        Ok(_) => Ok(()),
        Err(NavigationError::DuplicateNavigation(path)) => {
            tracing::debug!(path = %path, "ignoring duplicate navigation");

            Ok(())
        },
        Err(err) => Err(err),
    }
}

pub struct Router<G = MetaGuard> {
    routes: &'static [RouteDescriptor],
    guard: G,
    history: Vec<&'static RouteDescriptor>,
}

impl Router<MetaGuard> {
    pub fn new() -> Self {
        Router::with_guard(MetaGuard)
    }
}

impl Default for Router<MetaGuard> {
    fn default() -> Self {
        Router::new()
    }
}

impl<G> Router<G>
where
    G: Guard
{
    pub fn with_guard(guard: G) -> Self {
        Router {
            routes: &ROUTES,
            guard,
            history: Vec::new(),
        }
    }

    pub fn routes(&self) -> &'static [RouteDescriptor] {
        self.routes
    }

    pub fn current(&self) -> Option<&'static RouteDescriptor> {
        self.history.last().copied()
    }

    pub fn current_path(&self) -> Option<&'static str> {
        self.current().map(|route| route.path)
    }

    pub fn history(&self) -> &[&'static RouteDescriptor] {
        &self.history
    }

    /// runs the guard for the given path, following redirects, without
    /// changing the active route
    pub fn resolve(&self, path: &str, session: &Session) -> Result<&'static RouteDescriptor, NavigationError> {
        let current = self.current();
        let mut next = normalize(path).to_owned();
        let mut redirects = 0;

        loop {
            tracing::debug!(path = %next, "navigating");

            let Some(target) = lookup(self.routes, &next) else {
                return Err(NavigationError::NotFound(next));
            };

            let redirect = match target.target {
                RouteTarget::Redirect(to) => to.to_owned(),
                RouteTarget::View(_) => {
                    if current.map(|c| c.path) == Some(target.path) {
                        return Err(NavigationError::DuplicateNavigation(next));
                    }

                    let intent = Intent {
                        target,
                        current,
                        session,
                    };

                    match self.guard.check(&intent) {
                        Decision::Proceed => return Ok(target),
                        Decision::Deny => return Err(NavigationError::Denied(next)),
                        Decision::Redirect(to) => to,
                    }
                }
            };

            redirects += 1;

            if redirects > MAX_REDIRECTS {
                return Err(NavigationError::RedirectLoop(normalize(path).to_owned()));
            }

            next = normalize(&redirect).to_owned();
        }
    }

    /// resolves the path and pushes the result onto the history. a
    /// navigation to the active route is reported as
    /// [`NavigationError::DuplicateNavigation`]
    pub fn navigate(&mut self, path: &str, session: &Session) -> Result<&'static RouteDescriptor, NavigationError> {
        let target = self.resolve(path, session)?;

        self.history.push(target);

        Ok(target)
    }

    /// same as [`Router::navigate`] but replaces the active route instead
    /// of adding to the history
    pub fn navigate_replace(&mut self, path: &str, session: &Session) -> Result<&'static RouteDescriptor, NavigationError> {
        let target = self.resolve(path, session)?;

        self.history.pop();
        self.history.push(target);

        Ok(target)
    }

    pub fn push(&mut self, path: &str, session: &Session) -> Result<(), NavigationError> {
        ignore_duplicate(self.navigate(path, session))
    }

    pub fn replace(&mut self, path: &str, session: &Session) -> Result<(), NavigationError> {
        ignore_duplicate(self.navigate_replace(path, session))
    }

    /// drops the active route and returns to the previous one without
    /// running the guard again
    pub fn back(&mut self) -> Option<&'static RouteDescriptor> {
        if self.history.len() > 1 {
            self.history.pop();
        }

        self.current()
    }
}
