//! Broadcast hook dispatch.
//!
//! Fire-and-forget fan-out: every mod declaring the hook's capability is
//! invoked in registry order, each inside its own failure boundary. Nothing
//! is aggregated and nothing propagates to the caller.

use std::sync::Arc;

use modhost_sdk::Capability;

use crate::host::HostContext;

/// The hooks generic dispatch will ever invoke.
///
/// Anything else, including a method a mod happens to expose under the same
/// name, is silently never dispatched. `ChatMessage` is excluded on purpose:
/// chat interception is its own path with its own result semantics.
pub const KNOWN_HOOKS: &[Capability] = &[Capability::GameLoaded, Capability::Update];

/// Fans hooks out to every capable mod in the registry.
pub struct HookDispatcher {
    ctx: Arc<HostContext>,
}

impl HookDispatcher {
    pub fn new(ctx: Arc<HostContext>) -> Self {
        Self { ctx }
    }

    /// Deliver `payload` to every mod implementing `hook_name`.
    ///
    /// No-op when the fatal flag is latched or when `hook_name` is not in
    /// [`KNOWN_HOOKS`]. A mod that does not declare the capability is
    /// skipped silently; a mod whose hook returns an error is logged and
    /// skipped for this call only, and fan-out continues.
    pub fn dispatch(&self, hook_name: &str, payload: &serde_json::Value) {
        // If something terrible happened while loading mods, process none of them.
        if self.ctx.is_fatal() {
            return;
        }

        let Some(hook) = KNOWN_HOOKS
            .iter()
            .copied()
            .find(|cap| cap.hook_name() == hook_name)
        else {
            return;
        };

        for entry in self.ctx.registry().snapshot() {
            let mut ext = entry.write();
            if !ext.capabilities().contains(&hook) {
                continue;
            }

            let outcome = match hook {
                Capability::GameLoaded => ext.game_loaded(),
                Capability::Update => ext.update(payload),
                // Unreachable through KNOWN_HOOKS; kept as a no-op so the
                // match stays exhaustive.
                Capability::ChatMessage => Ok(()),
            };

            if let Err(err) = outcome {
                self.ctx.sink().error(&format!(
                    "Error dispatching hook '{hook_name}' for mod {}. {err}",
                    ext.name()
                ));
            }
        }
    }
}
