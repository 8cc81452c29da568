//! Mod discovery and loading.
//!
//! Candidates come from a static name list or a directory scan. Every
//! candidate is loaded independently in its own spawned task, so one broken
//! mod delays nothing and fails nothing but itself. The loader distinguishes
//! three outcomes per candidate:
//!
//! 1. Success: the loaded unit has registered itself; logged at INFO.
//! 2. Load failure (the returned future resolves to an error): logged at
//!    ERROR with the candidate and reason, then forgotten. No registry
//!    entry, no placeholder.
//! 3. Mechanism failure (`begin_load` itself returns an error
//!    synchronously): the loading machinery is broken, not the mod. Logged
//!    at ERROR and latches the fatal flag.
//!
//! Failing to enumerate candidates at all is also fatal, since it is
//! indistinguishable from the mechanism being broken.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use modhost_sdk::Extension;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::host::HostContext;
use crate::registry::ModRegistry;

/// Directory-scan naming convention: a candidate's file stem must end with
/// this marker (`examplemod.so`, `minimapmod.wasm`, ...).
pub const MOD_SUFFIX: &str = "mod";

/// Errors raised while discovering or loading mods.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The candidate source location could not be enumerated.
    #[error("cannot enumerate mod sources: {0}")]
    Discovery(#[from] std::io::Error),

    /// No loadable unit exists for the given source identifier.
    #[error("unknown mod source '{0}'")]
    Unresolved(String),

    /// The mod was found but failed while loading or initializing.
    #[error("mod failed to initialize: {0}")]
    Init(String),

    /// The loading mechanism itself failed before the load even started.
    #[error("module loading mechanism failed: {0}")]
    Mechanism(String),
}

/// Module-loading collaborator.
///
/// Given a source identifier, yields a future that performs the actual load.
/// On success the future is responsible for registering the loaded unit into
/// `registry` itself; the loader never inspects what was loaded. A failure
/// of the individual mod travels through the future's error channel. The
/// synchronous `Err` channel is reserved for the mechanism itself being
/// broken and is treated as fatal by the loader.
pub trait ModuleLoader: Send + Sync {
    fn begin_load(
        &self,
        source: &str,
        registry: Arc<ModRegistry>,
    ) -> Result<BoxFuture<'static, Result<(), LoadError>>, LoadError>;
}

/// Where candidate mod sources come from.
#[derive(Debug, Clone)]
pub enum ModSources {
    /// A fixed list of declared source identifiers.
    List(Vec<String>),
    /// A directory scanned for entries matching the [`MOD_SUFFIX`] naming
    /// convention.
    Dir(PathBuf),
}

/// Discovers candidates and fires independent load tasks for each.
pub struct ModLoader {
    ctx: Arc<HostContext>,
    modules: Arc<dyn ModuleLoader>,
    sources: ModSources,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl ModLoader {
    pub fn new(ctx: Arc<HostContext>, modules: Arc<dyn ModuleLoader>, sources: ModSources) -> Self {
        Self {
            ctx,
            modules,
            sources,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Enumerate candidates and start loading each one.
    ///
    /// Returns as soon as all loads are started; completion order is
    /// unspecified and the registry fills in behind the caller's back.
    pub fn discover(&self) {
        let candidates = match &self.sources {
            ModSources::List(names) => names.clone(),
            ModSources::Dir(dir) => match scan_mod_dir(dir) {
                Ok(candidates) => candidates,
                Err(err) => {
                    self.ctx.sink().error(&format!(
                        "FATAL: failed to scan mod directory {}: {err}",
                        dir.display()
                    ));
                    self.ctx.set_fatal();
                    return;
                }
            },
        };

        for source in candidates {
            match self.modules.begin_load(&source, self.ctx.registry().clone()) {
                Ok(load) => {
                    let sink = self.ctx.sink().clone();
                    let handle = tokio::spawn(async move {
                        match load.await {
                            Ok(()) => sink.info(&format!("Successfully loaded {source}")),
                            Err(err) => sink.error(&format!(
                                "Failed to load mod '{source}'. Reason: {err}"
                            )),
                        }
                    });
                    self.pending.lock().push(handle);
                }
                Err(err) => {
                    // This should basically be impossible.
                    self.ctx
                        .sink()
                        .error(&format!("FATAL: failed in loading mods. {err}"));
                    self.ctx.set_fatal();
                }
            }
        }
    }

    /// Await all load tasks started so far.
    pub async fn join_pending(&self) {
        let handles: Vec<JoinHandle<()>> = std::mem::take(&mut *self.pending.lock());
        for handle in handles {
            let _ = handle.await;
        }
    }
}

/// List candidate sources in `dir` whose file stem ends with [`MOD_SUFFIX`].
fn scan_mod_dir(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut candidates = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_candidate = path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(MOD_SUFFIX));
        if is_candidate {
            candidates.push(path.display().to_string());
        }
    }
    Ok(candidates)
}

/// Factory producing a fresh mod instance.
pub type ExtensionFactory = Arc<dyn Fn() -> Box<dyn Extension> + Send + Sync>;

/// [`ModuleLoader`] for mods declared by name and linked into the host.
///
/// Each known source name maps to a factory; loading a name runs the factory
/// and lets the new instance register itself. Unknown names fail through the
/// future, like any other missing resource.
#[derive(Default)]
pub struct StaticModuleLoader {
    factories: HashMap<String, ExtensionFactory>,
}

impl StaticModuleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_factory(
        mut self,
        source: impl Into<String>,
        factory: impl Fn() -> Box<dyn Extension> + Send + Sync + 'static,
    ) -> Self {
        self.factories.insert(source.into(), Arc::new(factory));
        self
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn begin_load(
        &self,
        source: &str,
        registry: Arc<ModRegistry>,
    ) -> Result<BoxFuture<'static, Result<(), LoadError>>, LoadError> {
        let factory = self.factories.get(source).cloned();
        let source = source.to_string();
        Ok(Box::pin(async move {
            match factory {
                Some(factory) => {
                    registry.register(factory());
                    Ok(())
                }
                None => Err(LoadError::Unresolved(source)),
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_matches_mod_suffix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("examplemod.so"), b"").unwrap();
        std::fs::write(dir.path().join("minimapmod.wasm"), b"").unwrap();
        std::fs::write(dir.path().join("readme.txt"), b"").unwrap();
        std::fs::write(dir.path().join("modlike.so"), b"").unwrap();

        let mut found = scan_mod_dir(dir.path()).unwrap();
        found.sort();
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with("examplemod.so"));
        assert!(found[1].ends_with("minimapmod.wasm"));
    }

    #[test]
    fn test_scan_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no-such-dir");
        assert!(scan_mod_dir(&missing).is_err());
    }
}
