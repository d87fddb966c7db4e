//! Bridge Data Models
//!
//! Payloads exchanged with the Mini App host.

pub mod contact;
pub mod launch;
pub mod user;

pub use contact::*;
pub use launch::*;
pub use user::*;
