use serenity::async_trait;

use super::{Command, Reply, Request};
use crate::error::CommandError;

/// Generated from the registry snapshot by [`Registry::install_help`].
///
/// [`Registry::install_help`]: super::Registry::install_help
pub struct Help {
    pub(super) entries: Vec<(String, String)>,
}

#[async_trait]
impl Command for Help {
    fn name(&self) -> &'static str {
        "help"
    }

    fn description(&self) -> &'static str {
        "List the available commands."
    }

    async fn run(&self, _: &Request<'_>) -> Result<Reply, CommandError> {
        let listing = self
            .entries
            .iter()
            .map(|(name, description)| format!("/{name}: {description}"))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(Reply::success("Commands", listing))
    }
}
