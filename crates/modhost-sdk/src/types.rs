//! Core types of the mod hook contract.

use serde::{Deserialize, Serialize};

use crate::error::HookResult;

/// Version of the hook contract.
///
/// Incremented when a breaking change is made to the hook set or to a hook
/// signature. Mods are compiled against a specific version.
pub const HOOK_API_VERSION: u32 = 1;

/// A hook a mod can opt into.
///
/// The host dispatches a hook to a mod only when the mod declares the
/// matching capability, so a mod that keeps the default method body and
/// declares nothing is never called. Serialized names are the wire-level
/// hook names the host dispatches by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// The game finished its init setup for a session. Not fired when the
    /// client application itself starts, so mods that must wait for a live
    /// game can use this instead of doing work in their constructor.
    GameLoaded,
    /// An incremental game-state update arrived from the server. Fired
    /// before the client processes the update.
    Update,
    /// The user submitted a chat line that looks like a command. Handled by
    /// the chat interception path, never by generic dispatch.
    ChatMessage,
}

impl Capability {
    /// The wire-level hook name used for dispatch.
    pub fn hook_name(&self) -> &'static str {
        match self {
            Capability::GameLoaded => "gameLoaded",
            Capability::Update => "update",
            Capability::ChatMessage => "chatMessage",
        }
    }
}

/// A loaded mod.
///
/// All hook methods take `&mut self` so a mod can keep its own state between
/// invocations; the host never mutates a mod otherwise. Hook failures are
/// returned as [`HookResult`] errors and contained by the host: an `Err`
/// from one mod is logged and never reaches other mods or the caller.
pub trait Extension: Send + Sync {
    /// Display name used in log messages.
    fn name(&self) -> &str;

    /// The hooks this mod implements.
    fn capabilities(&self) -> &[Capability];

    /// Called once after a game session has finished initializing.
    fn game_loaded(&mut self) -> HookResult<()> {
        Ok(())
    }

    /// Called for every incremental state update, with the raw update
    /// payload, before the client applies it.
    fn update(&mut self, _payload: &serde_json::Value) -> HookResult<()> {
        Ok(())
    }

    /// Called with the body of a user-entered `/command` line (prefix
    /// already stripped).
    ///
    /// Return `Ok(true)` if the command at least partially matched this
    /// mod's command structure and was processed; `Ok(false)` if the line
    /// was not meant for this mod. When any mod returns `Ok(true)` the host
    /// suppresses normal chat transmission of the line.
    fn chat_message(&mut self, _command: &str) -> HookResult<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_api_version() {
        assert_eq!(HOOK_API_VERSION, 1);
    }

    #[test]
    fn test_capability_hook_names() {
        assert_eq!(Capability::GameLoaded.hook_name(), "gameLoaded");
        assert_eq!(Capability::Update.hook_name(), "update");
        assert_eq!(Capability::ChatMessage.hook_name(), "chatMessage");
    }

    #[test]
    fn test_capability_serializes_to_hook_name() {
        let json = serde_json::to_string(&Capability::GameLoaded).unwrap();
        assert_eq!(json, "\"gameLoaded\"");
        let cap: Capability = serde_json::from_str("\"chatMessage\"").unwrap();
        assert_eq!(cap, Capability::ChatMessage);
    }

    #[test]
    fn test_default_hook_bodies_are_noops() {
        struct Bare;
        impl Extension for Bare {
            fn name(&self) -> &str {
                "Bare"
            }
            fn capabilities(&self) -> &[Capability] {
                &[]
            }
        }

        let mut bare = Bare;
        assert!(bare.game_loaded().is_ok());
        assert!(bare.update(&serde_json::Value::Null).is_ok());
        assert_eq!(bare.chat_message("help").unwrap(), false);
    }
}
