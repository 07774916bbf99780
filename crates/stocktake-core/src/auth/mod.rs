//! Authentication state.
//!
//! `Session` holds the bearer token issued by `POST /login`. It lives only in
//! memory for as long as the owning client does.

pub mod session;

pub use session::{Session, SessionData};
