//! Authorization gate for metric access

pub mod errors;
pub mod implementations;
pub mod traits;

pub use errors::AccessError;
pub use implementations::{OpenGate, ScopedGate};
pub use traits::{AccessGrant, AuthGate};
