//! Mod host core for the modhost client.
//!
//! Mods are user-supplied units of code loaded into the running client. The
//! core discovers them, loads each one in its own failure domain, and fans
//! client events out to every loaded mod through a small versioned hook
//! contract (see `modhost-sdk`).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                     ModHost                      │
//! │  - constructs the log sink first                 │
//! │  - triggers discovery on startup                 │
//! │  - exposes dispatch / chat interception          │
//! └──────────────────────────────────────────────────┘
//!          │                │                 │
//!          ▼                ▼                 ▼
//!   ┌────────────┐   ┌──────────────┐  ┌─────────────────┐
//!   │  ModLoader │──▶│  ModRegistry │◀─│ HookDispatcher /│
//!   │ (async, per│   │ (append-only,│  │ ChatInterceptor │
//!   │  candidate)│   │  load order) │  │ (sync fan-out)  │
//!   └────────────┘   └──────────────┘  └─────────────────┘
//! ```
//!
//! Failure containment is the point of the design: a mod that fails to load
//! is absent from the registry and nothing else; a mod that fails inside a
//! hook is logged and skipped for that call only. The one global failure is
//! the loading mechanism itself breaking during discovery, which latches the
//! fatal flag and turns all future dispatch into no-ops.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use modhost_core::{HostConfig, LogSink, ModHost, StaticModuleLoader};
//!
//! let config = HostConfig::load("modhost.toml".as_ref())?;
//! let sink = Arc::new(LogSink::new());
//! let modules = Arc::new(StaticModuleLoader::new()
//!     .with_factory("examplemod", || Box::new(ExampleMod::default())));
//!
//! let host = ModHost::new(config, sink, modules);
//!
//! // As client events arrive:
//! host.dispatch("gameLoaded", &serde_json::Value::Null);
//! host.dispatch("update", &delta);
//! if host.intercept(&line) {
//!     send_chat(&line);
//! }
//! ```

pub mod chat;
pub mod config;
pub mod dispatch;
pub mod host;
pub mod loader;
pub mod logging;
pub mod registry;

pub use chat::{ChatInterceptor, COMMAND_PREFIX};
pub use config::HostConfig;
pub use dispatch::{HookDispatcher, KNOWN_HOOKS};
pub use host::{HostContext, ModHost};
pub use loader::{
    ExtensionFactory, LoadError, ModLoader, ModSources, ModuleLoader, StaticModuleLoader,
    MOD_SUFFIX,
};
pub use logging::{LogLevel, LogSink};
pub use registry::{DynExtension, ModRegistry};
