//! Account System Module
//!
//! Flat-file user accounts:
//! - SHA-256 hex password hashes
//! - A line-oriented text file and a JSON mirror kept in sync
//! - An explicit login session owned by the caller

pub mod types;
pub mod auth;
pub mod backend;
pub mod session;
pub mod store;

pub use types::{Account, AccountError};
pub use auth::{hash_password, verify_password};
pub use backend::{CredentialStore, JsonStore, TextStore};
pub use session::Session;
pub use store::AccountStore;
