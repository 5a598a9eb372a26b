//! Authentication, session persistence and access control

pub mod guard;
pub mod models;
pub mod session;
pub mod storage;

pub use guard::{evaluate, AccessDecision, RouteRequirement};
pub use models::{Role, UserData};
pub use session::{Session, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
