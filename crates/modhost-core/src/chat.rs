//! Chat command interception.
//!
//! The one dispatch path where mods get a vote: a user-entered line starting
//! with the command prefix is offered to every command-capable mod, and if
//! any of them claims it, normal chat transmission is suppressed.

use std::sync::Arc;

use modhost_sdk::Capability;

use crate::host::HostContext;

/// First character of a command line.
pub const COMMAND_PREFIX: char = '/';

/// Offers user chat lines to command-handling mods.
pub struct ChatInterceptor {
    ctx: Arc<HostContext>,
}

impl ChatInterceptor {
    pub fn new(ctx: Arc<HostContext>) -> Self {
        Self { ctx }
    }

    /// Inspect a user-entered chat line.
    ///
    /// Returns `true` when the line should still be transmitted as ordinary
    /// chat: the fatal flag is latched, the line is too short to be a
    /// command, it lacks the prefix, or no mod claimed it. A line that at
    /// least one mod claims (`Ok(true)` from its chat hook) returns `false`.
    ///
    /// A prefixed line nobody claims is deliberately still sent as literal
    /// chat rather than dropped, so a user whose command mod failed to load
    /// sees their text go out instead of vanishing.
    pub fn intercept(&self, line: &str) -> bool {
        if self.ctx.is_fatal() {
            return true;
        }
        // Too short to be prefix + command body.
        if line.chars().count() < 2 {
            return true;
        }
        let mut chars = line.chars();
        if chars.next() != Some(COMMAND_PREFIX) {
            return true;
        }
        let body = chars.as_str();

        let mut handled = false;
        for entry in self.ctx.registry().snapshot() {
            let mut ext = entry.write();
            if !ext.capabilities().contains(&Capability::ChatMessage) {
                continue;
            }
            match ext.chat_message(body) {
                Ok(claimed) => handled |= claimed,
                // A failing handler counts as not-handled but never stops
                // the remaining mods from seeing the command.
                Err(err) => self.ctx.sink().error(&format!(
                    "Error dispatching chat command for mod {}. {err}",
                    ext.name()
                )),
            }
        }

        !handled
    }
}
