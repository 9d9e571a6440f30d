//! Locally persisted credential store.
//!
//! This is a stand-in for a real authentication service, not a security
//! boundary: credentials are kept as a plaintext JSON blob on disk so a
//! fresh checkout works with no backing service. Registration and login
//! failures are recoverable outcomes (`Ok(false)`), never errors; errors are
//! reserved for storage I/O and parse problems.

pub mod error;
pub mod storage;
pub mod store;

pub use error::AuthError;
pub use storage::{AuthBlob, CredentialStorage, JsonFileStorage, MemoryStorage};
pub use store::{AuthStore, NewUser, User};
