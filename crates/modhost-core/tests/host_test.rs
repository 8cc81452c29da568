//! End-to-end tests: config in, bootstrap, dispatch and interception out.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use modhost_core::{HostConfig, LogSink, ModHost, StaticModuleLoader};
use modhost_sdk::{Capability, Extension, HookResult};

/// Counts updates and claims the `ping` command.
struct CounterMod {
    updates: Arc<AtomicUsize>,
}

impl Extension for CounterMod {
    fn name(&self) -> &str {
        "CounterMod"
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::Update, Capability::ChatMessage]
    }

    fn update(&mut self, _payload: &serde_json::Value) -> HookResult<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn chat_message(&mut self, command: &str) -> HookResult<bool> {
        Ok(command == "ping")
    }
}

#[tokio::test]
async fn test_bootstrap_dispatch_and_intercept() {
    let updates = Arc::new(AtomicUsize::new(0));
    let factory_updates = updates.clone();
    let modules = Arc::new(StaticModuleLoader::new().with_factory("countermod", move || {
        Box::new(CounterMod {
            updates: factory_updates.clone(),
        })
    }));
    let config = HostConfig::from_toml_str(r#"mods = ["countermod"]"#).unwrap();

    let host = ModHost::new(config, Arc::new(LogSink::new()), modules);
    host.join_pending().await;

    assert_eq!(host.registry().count(), 1);

    host.dispatch("update", &serde_json::json!({"tick": 1}));
    host.dispatch("update", &serde_json::json!({"tick": 2}));
    assert_eq!(updates.load(Ordering::SeqCst), 2);

    assert!(!host.intercept("/ping"));
    assert!(host.intercept("/unrelated"));
    assert!(host.intercept("just chatting"));
}

#[tokio::test]
async fn test_log_file_attaches_after_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("modhost.log");
    let config = HostConfig {
        log_file: Some(path.clone()),
        ..Default::default()
    };

    let host = ModHost::new(config, Arc::new(LogSink::new()), Arc::new(StaticModuleLoader::new()));
    host.join_pending().await;

    // Attachment happens off the startup path; wait for it to land.
    for _ in 0..100 {
        if host.context().sink().has_file() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(host.context().sink().has_file());

    host.context().sink().info("host is up");
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[INFO] host is up"));
}

#[tokio::test]
async fn test_host_with_no_mods_is_inert_but_healthy() {
    let config = HostConfig::default();
    let host = ModHost::new(
        config,
        Arc::new(LogSink::new()),
        Arc::new(StaticModuleLoader::new()),
    );
    host.join_pending().await;

    assert!(host.registry().is_empty());
    assert!(!host.context().is_fatal());
    host.dispatch("update", &serde_json::Value::Null);
    assert!(host.intercept("/help"));
}
