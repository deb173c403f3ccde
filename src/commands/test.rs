use serenity::async_trait;

use super::{Command, Reply, Request};
use crate::error::CommandError;

/// The example command: succeeds only in the first allow-listed server.
pub struct Test;

#[async_trait]
impl Command for Test {
    fn name(&self) -> &'static str {
        "test"
    }

    fn description(&self) -> &'static str {
        "This is a test command."
    }

    async fn run(&self, request: &Request<'_>) -> Result<Reply, CommandError> {
        Ok(evaluate(request.guild_id, &request.settings.servers))
    }
}

/// Walk the (message, guard) pairs in order; the first failing guard wins.
fn evaluate(guild_id: Option<u64>, allowed: &[u64]) -> Reply {
    let guards = [(
        "This command is not available in this server!",
        guild_id != allowed.first().copied(),
    )];

    for (message, failed) in guards {
        if failed {
            return Reply::error("Error!", message);
        }
    }

    Reply::success("Success!", "This is a test command")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Outcome;

    #[test]
    fn allowed_server_succeeds() {
        let reply = evaluate(Some(111), &[111]);
        assert_eq!(reply.outcome, Outcome::Success);
        assert_eq!(reply.title, "Success!");
    }

    #[test]
    fn other_servers_are_rejected() {
        let reply = evaluate(Some(222), &[111]);
        assert_eq!(reply.outcome, Outcome::Error);
        assert_eq!(reply.description, "This command is not available in this server!");
    }

    #[test]
    fn no_guild_or_no_allow_list_is_rejected() {
        assert_eq!(evaluate(None, &[111]).outcome, Outcome::Error);
        assert_eq!(evaluate(Some(111), &[]).outcome, Outcome::Error);
    }
}
