//! Slash-command parsing and dispatch.
//!
//! Commands are registered by token, so new moderation commands plug in
//! without touching the dispatcher.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;

use crate::domain::{Session, UserName};

use super::{context::PresenceContext, error::PresenceError, kick::KickParticipantUseCase};

/// A command body split into its token and single argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Token including the leading slash, e.g. `/kick`
    pub name: &'a str,
    /// Everything after the first whitespace run, trimmed
    pub argument: Option<&'a str>,
}

/// Split a message body into command token and argument.
///
/// Returns `None` when the body is not a command.
pub fn parse_command(body: &str) -> Option<ParsedCommand<'_>> {
    if !body.starts_with('/') {
        return None;
    }
    let (name, rest) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    };
    Some(ParsedCommand {
        name,
        argument: (!rest.is_empty()).then_some(rest),
    })
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(
        &self,
        ctx: &PresenceContext,
        requester: &Session,
        argument: Option<&str>,
    ) -> Result<(), PresenceError>;
}

/// What happened to a command body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Executed(String),
    /// No handler is registered for the token
    Unknown(String),
}

#[derive(Default)]
pub struct CommandDispatcher {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    /// Dispatcher with no commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher with the built-in moderation commands (`/kick`).
    pub fn with_builtin_commands() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register("/kick", Arc::new(KickCommand));
        dispatcher
    }

    /// Register (or replace) the handler for a token.
    pub fn register(&mut self, token: impl Into<String>, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(token.into(), handler);
    }

    pub fn is_registered(&self, token: &str) -> bool {
        self.handlers.contains_key(token)
    }

    /// Route a command body to its handler. Unknown tokens are not an error.
    pub async fn dispatch(
        &self,
        ctx: &PresenceContext,
        requester: &Session,
        body: &str,
    ) -> Result<DispatchOutcome, PresenceError> {
        let Some(command) = parse_command(body) else {
            return Ok(DispatchOutcome::Unknown(body.to_string()));
        };
        match self.handlers.get(command.name) {
            Some(handler) => {
                handler.handle(ctx, requester, command.argument).await?;
                Ok(DispatchOutcome::Executed(command.name.to_string()))
            }
            None => {
                tracing::debug!("Ignoring unknown command '{}'", command.name);
                Ok(DispatchOutcome::Unknown(command.name.to_string()))
            }
        }
    }
}

/// `/kick <name>`
pub struct KickCommand;

#[async_trait]
impl CommandHandler for KickCommand {
    async fn handle(
        &self,
        ctx: &PresenceContext,
        requester: &Session,
        argument: Option<&str>,
    ) -> Result<(), PresenceError> {
        let target = UserName::new(argument.unwrap_or_default().to_string())?;
        KickParticipantUseCase::new(ctx.clone())
            .execute(&requester.connection_id, &target)
            .await?;
        Ok(())
    }
}
