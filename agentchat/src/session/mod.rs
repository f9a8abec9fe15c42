//! In-process session storage.

mod store;

pub use store::{SessionHandle, SessionStore, DEFAULT_SESSION_ID};
