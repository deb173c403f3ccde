use thiserror::Error;

/// Ways a command invocation can fail.
///
/// `user_message` decides which of these produce a reply; everything it maps
/// to `None` is deliberately left unhandled so the only trace is a log line.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("command invocation failed: {0}")]
    Invocation(#[from] anyhow::Error),
    #[error("caller is not a bot owner")]
    NotOwner,
    #[error("command is on cooldown for another {retry_after:.2}s")]
    OnCooldown { retry_after: f64 },
    #[error("no command named {0:?} is registered")]
    Unknown(String),
}

impl CommandError {
    /// The user-facing description for this failure, or `None` when no reply
    /// should be sent at all.
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::Invocation(_) => Some("Something went wrong!".to_string()),
            Self::NotOwner => Some("You aren't the owner of the bot!".to_string()),
            Self::OnCooldown { retry_after } => Some(format!(
                "You are on cooldown!\nCome back in: {}",
                format_retry_after(*retry_after)
            )),
            Self::Unknown(_) => None,
        }
    }
}

/// Break a cooldown remainder into hours, minutes and seconds.
fn format_retry_after(secs: f64) -> String {
    let minutes = (secs / 60.0).floor();
    let seconds = secs - minutes * 60.0;
    let hours = (minutes / 60.0).floor();
    let minutes = minutes - hours * 60.0;

    format!("{hours:.2} hours, {minutes:.2} minutes, {seconds:.2} seconds")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_remainder_breaks_into_hours_minutes_seconds() {
        assert_eq!(
            format_retry_after(3661.0),
            "1.00 hours, 1.00 minutes, 1.00 seconds"
        );
        assert_eq!(
            format_retry_after(59.5),
            "0.00 hours, 0.00 minutes, 59.50 seconds"
        );
    }

    #[test]
    fn cooldown_reply_contains_the_remainder() {
        let err = CommandError::OnCooldown { retry_after: 3661.0 };
        let message = err.user_message().unwrap();
        assert!(message.contains("1.00 hours, 1.00 minutes"));
    }

    #[test]
    fn invocation_and_owner_failures_have_friendly_replies() {
        let err = CommandError::Invocation(anyhow::anyhow!("store exploded"));
        assert_eq!(err.user_message().as_deref(), Some("Something went wrong!"));
        assert_eq!(
            CommandError::NotOwner.user_message().as_deref(),
            Some("You aren't the owner of the bot!")
        );
    }

    #[test]
    fn unknown_failures_are_explicitly_unhandled() {
        assert!(CommandError::Unknown("missing".to_string())
            .user_message()
            .is_none());
    }
}
