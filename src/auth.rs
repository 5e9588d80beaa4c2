//! Auth-domain identifiers, redacted secrets, and credential pairs.

pub mod credentials;
pub mod id;
pub mod secret;

pub use credentials::*;
pub use id::*;
pub use secret::*;
