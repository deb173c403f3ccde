//! Slash command handlers and the registry that dispatches to them.
//!
//! Commands are registered explicitly at startup; there is no dynamic
//! discovery. Each invocation is a single stateless request/response exchange.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serenity::async_trait;
use serenity::builder::CreateCommand;

use crate::config::Settings;
use crate::db::Database;
use crate::error::CommandError;

pub mod help;
pub mod test;

/// Everything a handler may look at for one invocation.
pub struct Request<'a> {
    pub settings: &'a Settings,
    /// Absent when no DATABASE_URL is configured.
    pub db: Option<&'a Database>,
    pub guild_id: Option<u64>,
    pub user_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Error,
}

/// What a handler sends back. Always delivered as an ephemeral embed; the
/// outcome picks the configured success or error colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub title: String,
    pub description: String,
    pub outcome: Outcome,
}

impl Reply {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            outcome: Outcome::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            outcome: Outcome::Error,
        }
    }

    pub fn colour(&self, settings: &Settings) -> u32 {
        match self.outcome {
            Outcome::Success => settings.success_color,
            Outcome::Error => settings.error_color,
        }
    }
}

#[async_trait]
pub trait Command: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Restrict this command to the configured bot owners.
    fn owner_only(&self) -> bool {
        false
    }

    /// Minimum time between invocations per user.
    fn cooldown(&self) -> Option<Duration> {
        None
    }

    /// The payload used to register this command with the platform.
    fn build(&self) -> CreateCommand {
        CreateCommand::new(self.name()).description(self.description())
    }

    async fn run(&self, request: &Request<'_>) -> Result<Reply, CommandError>;
}

/// Explicit name-to-handler registry, populated once at startup.
#[derive(Default)]
pub struct Registry {
    commands: BTreeMap<&'static str, Box<dyn Command>>,
    cooldowns: Mutex<BTreeMap<(&'static str, u64), Instant>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: impl Command + 'static) {
        self.commands.insert(command.name(), Box::new(command));
    }

    /// Snapshot the registered commands into a generated help command.
    ///
    /// Call this last so every command gets an entry.
    pub fn install_help(&mut self) {
        let entries = self
            .commands
            .values()
            .map(|command| (command.name().to_string(), command.description().to_string()))
            .collect();

        self.register(help::Help { entries });
    }

    /// Registration payloads for every command, in name order.
    pub fn create_commands(&self) -> Vec<CreateCommand> {
        self.commands.values().map(|command| command.build()).collect()
    }

    /// Run the named command, applying the owner and cooldown gates first.
    pub async fn dispatch(&self, name: &str, request: &Request<'_>) -> Result<Reply, CommandError> {
        let command = self
            .commands
            .get(name)
            .ok_or_else(|| CommandError::Unknown(name.to_string()))?;

        if command.owner_only() && !request.settings.owner.contains(&request.user_id) {
            return Err(CommandError::NotOwner);
        }

        if let Some(window) = command.cooldown() {
            self.check_cooldown(command.name(), request.user_id, window)?;
        }

        command.run(request).await
    }

    fn check_cooldown(
        &self,
        name: &'static str,
        user_id: u64,
        window: Duration,
    ) -> Result<(), CommandError> {
        let mut used = self.cooldowns.lock().expect("cooldown table poisoned");
        let now = Instant::now();

        if let Some(last) = used.get(&(name, user_id)) {
            let elapsed = now.duration_since(*last);
            if elapsed < window {
                return Err(CommandError::OnCooldown {
                    retry_after: (window - elapsed).as_secs_f64(),
                });
            }
        }

        used.insert((name, user_id), now);

        Ok(())
    }
}

/// Every command the bot ships, plus the generated help entry.
pub fn all() -> Registry {
    let mut registry = Registry::new();
    registry.register(test::Test);
    registry.install_help();
    registry
}
