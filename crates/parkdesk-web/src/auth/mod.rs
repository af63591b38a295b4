pub mod middleware;
pub mod session;

pub use middleware::{require_admin, require_user, AdminSession, UserSession};
