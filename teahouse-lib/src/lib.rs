pub mod error;
pub mod session;
pub mod routing;

pub use session::{Role, Session, SessionStore, SessionError};
pub use routing::{Navigator, Router, RouteDescriptor, NavigationError};
