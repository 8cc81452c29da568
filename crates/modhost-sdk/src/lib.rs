//! Modhost Extension SDK
//!
//! This crate defines the hook contract a mod compiles against. A mod is an
//! ordinary Rust value implementing [`Extension`]: it reports a display name,
//! declares which hooks it wants out of the fixed capability set, and
//! overrides the matching trait methods. Everything else is optional and
//! defaults to a no-op.
//!
//! The hook set is versioned through [`HOOK_API_VERSION`]. The API is young
//! and still iterating, so expect it to grow between releases.
//!
//! # Quick Start
//!
//! ```rust
//! use modhost_sdk::{Capability, Extension, HookResult};
//!
//! struct Greeter;
//!
//! impl Extension for Greeter {
//!     fn name(&self) -> &str {
//!         "Greeter"
//!     }
//!
//!     fn capabilities(&self) -> &[Capability] {
//!         &[Capability::Update]
//!     }
//!
//!     fn update(&mut self, payload: &serde_json::Value) -> HookResult<()> {
//!         println!("Hello, World! {payload}");
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{HookError, HookResult};
pub use types::{Capability, Extension, HOOK_API_VERSION};

/// Prelude module with the imports every mod needs.
pub mod prelude {
    pub use crate::error::{HookError, HookResult};
    pub use crate::types::{Capability, Extension, HOOK_API_VERSION};
    pub use serde_json::Value;
}
