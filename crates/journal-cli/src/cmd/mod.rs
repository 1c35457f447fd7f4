use anyhow::Result;

use crate::args::{Cli, Command};
use crate::context::AppContext;

mod create;
mod delete;
mod doctor;
mod fetch;
mod list;
mod status;
mod update;
mod write;

pub async fn dispatch(cli: Cli) -> Result<()> {
    if let Command::Doctor = cli.command {
        return doctor::run(&cli).await;
    }

    let ctx = AppContext::build(&cli)?;
    match cli.command {
        Command::Status => status::run(&ctx).await,
        Command::List => list::run(&ctx).await,
        Command::Fetch { address, title, owner } => {
            fetch::run(&ctx, address.as_deref(), title.as_deref(), owner.as_deref()).await
        }
        Command::Create { title, message } => create::run(&ctx, &title, &message).await,
        Command::Update { title, message } => update::run(&ctx, &title, &message).await,
        Command::Delete { title, yes } => delete::run(&ctx, &title, yes).await,
        Command::Doctor => doctor::run(&cli).await,
    }
}
