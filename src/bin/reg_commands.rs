//! Upload the global slash-command set. Run once after changing commands.

use serenity::http::Http;
use serenity::model::application::Command;

use quill::{commands, config::Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;
    anyhow::ensure!(
        !settings.token.is_empty(),
        "TOKEN environment variable not set"
    );

    let http = Http::new(&settings.token);
    let created = Command::set_global_commands(&http, commands::all().create_commands()).await?;

    for command in &created {
        println!("registered /{}", command.name);
    }

    Ok(())
}
