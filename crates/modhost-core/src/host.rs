//! Host context and bootstrap.
//!
//! `HostContext` is the explicitly constructed state every component shares:
//! the log sink, the mod registry, and the fatal latch. It is passed by
//! `Arc` into the loader and both dispatch paths; there are no ambient
//! globals to recover it from.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::chat::ChatInterceptor;
use crate::config::HostConfig;
use crate::dispatch::HookDispatcher;
use crate::loader::{ModLoader, ModuleLoader};
use crate::logging::LogSink;
use crate::registry::ModRegistry;

/// Shared state of the running mod host.
pub struct HostContext {
    registry: Arc<ModRegistry>,
    sink: Arc<LogSink>,
    /// One-way latch. Set only when the load mechanism itself breaks during
    /// discovery; never by an individual mod failing.
    fatal: AtomicBool,
}

impl HostContext {
    /// Create a context around an already-constructed sink.
    ///
    /// The sink comes first so that everything after it, including a loader
    /// that fails immediately, has somewhere to report to.
    pub fn new(sink: Arc<LogSink>) -> Arc<Self> {
        Arc::new(Self {
            registry: Arc::new(ModRegistry::new()),
            sink,
            fatal: AtomicBool::new(false),
        })
    }

    pub fn registry(&self) -> &Arc<ModRegistry> {
        &self.registry
    }

    pub fn sink(&self) -> &Arc<LogSink> {
        &self.sink
    }

    /// Latch the fatal flag. There is no way to clear it.
    pub fn set_fatal(&self) {
        self.fatal.store(true, Ordering::SeqCst);
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal.load(Ordering::SeqCst)
    }
}

/// The assembled mod host.
///
/// Construction triggers discovery; the registry fills in asynchronously
/// afterwards, so an immediately following dispatch may legitimately see no
/// mods yet.
pub struct ModHost {
    ctx: Arc<HostContext>,
    loader: ModLoader,
    dispatcher: HookDispatcher,
    interceptor: ChatInterceptor,
}

impl ModHost {
    /// Wire up the host and kick off mod discovery.
    ///
    /// Must be called from within a tokio runtime; candidate loads run as
    /// independent spawned tasks. If the config names a log file, attaching
    /// it also happens off the startup path, and the sink works in
    /// console-only mode until (and unless) that completes.
    pub fn new(
        config: HostConfig,
        sink: Arc<LogSink>,
        modules: Arc<dyn ModuleLoader>,
    ) -> Self {
        let ctx = HostContext::new(sink);

        if let Some(path) = config.log_file.clone() {
            let sink = ctx.sink().clone();
            tokio::spawn(async move {
                if let Err(err) = sink.attach_file(&path) {
                    tracing::error!(
                        category = "mods",
                        path = %path.display(),
                        error = %err,
                        "could not attach log file, continuing console-only"
                    );
                }
            });
        }

        let loader = ModLoader::new(ctx.clone(), modules, config.sources());
        loader.discover();

        Self {
            dispatcher: HookDispatcher::new(ctx.clone()),
            interceptor: ChatInterceptor::new(ctx.clone()),
            loader,
            ctx,
        }
    }

    /// Broadcast a hook to every capable mod. See [`HookDispatcher::dispatch`].
    pub fn dispatch(&self, hook_name: &str, payload: &serde_json::Value) {
        self.dispatcher.dispatch(hook_name, payload);
    }

    /// Offer a user-entered chat line to command-handling mods. Returns
    /// `true` if the line should still be sent as ordinary chat. See
    /// [`ChatInterceptor::intercept`].
    pub fn intercept(&self, line: &str) -> bool {
        self.interceptor.intercept(line)
    }

    pub fn registry(&self) -> &Arc<ModRegistry> {
        self.ctx.registry()
    }

    pub fn context(&self) -> &Arc<HostContext> {
        &self.ctx
    }

    /// Wait for all in-flight candidate loads to settle. Startup never needs
    /// this; tests and orderly shutdown do.
    pub async fn join_pending(&self) {
        self.loader.join_pending().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_flag_is_one_way() {
        let ctx = HostContext::new(Arc::new(LogSink::new()));
        assert!(!ctx.is_fatal());
        ctx.set_fatal();
        assert!(ctx.is_fatal());
        ctx.set_fatal();
        assert!(ctx.is_fatal());
    }
}
