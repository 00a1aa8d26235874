use std::sync::{Arc, Mutex, MutexGuard};

use teahouse_api::client::ApiClient;
use teahouse_lib::{Navigator, NavigationError, Router, RouteDescriptor, SessionStore};
use teahouse_lib::routing::{home_path, ROOT_PATH};

use crate::config::Config;
use crate::error::{self, Context};
use crate::notify::Notifier;

pub const USER_AGENT: &str = concat!("teahouse/", env!("CARGO_PKG_VERSION"));

/// router shared between the shell and the http client. navigation always
/// evaluates against the current contents of the session store
pub struct SharedRouter {
    router: Mutex<Router>,
    session: Arc<SessionStore>,
}

impl SharedRouter {
    pub fn new(session: Arc<SessionStore>) -> Self {
        SharedRouter {
            router: Mutex::new(Router::new()),
            session,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Router> {
        match self.router.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn current(&self) -> Option<&'static RouteDescriptor> {
        self.lock().current()
    }

    pub fn push(&self, path: &str) -> Result<(), NavigationError> {
        let session = self.session.current();

        self.lock().push(path, &session)
    }

    pub fn replace(&self, path: &str) -> Result<(), NavigationError> {
        let session = self.session.current();

        self.lock().replace(path, &session)
    }

    pub fn back(&self) -> Option<&'static RouteDescriptor> {
        self.lock().back()
    }

    /// sends the user to the landing route of the current session
    pub fn home(&self) -> Result<(), NavigationError> {
        let path = home_path(&self.session.current());

        self.push(path)
    }
}

impl Navigator for SharedRouter {
    fn location(&self) -> Option<String> {
        self.current().map(|route| route.path.to_owned())
    }

    fn navigate(&self, path: &str) {
        if let Err(err) = self.push(path) {
            tracing::warn!("failed to navigate to {}: {}", path, err);
        }
    }
}

pub struct AppState {
    pub client: ApiClient,
    pub router: Arc<SharedRouter>,
    pub notifier: Notifier,
}

impl AppState {
    /// wires the session store, router and client together and settles the
    /// router on its first route
    pub fn bootstrap(config: &Config, notifier: Notifier) -> error::Result<AppState> {
        let session = match &config.session {
            Some(path) => SessionStore::open(path)
                .context(format!("failed to load session file {}", path.display()))?,
            None => SessionStore::memory(),
        };
        let session = Arc::new(session);
        let router = Arc::new(SharedRouter::new(session.clone()));

        let mut builder = ApiClient::builder();
        builder.base_url(config.url.clone())
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .session(session)
            .navigator(router.clone());

        let client = builder.build().context("failed to create api client")?;

        router.push(ROOT_PATH)?;

        Ok(AppState {
            client,
            router,
            notifier,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.client.session()
    }
}
