use anyhow::Result;
use journal_core::views::{ListView, QueryState};

use crate::context::AppContext;
use crate::{output, render};

pub async fn run(ctx: &AppContext) -> Result<()> {
    let program: QueryState<_> = ctx.repo.fetch_program_status(&ctx.session).await.into();

    // The list query only runs once the program is known to be deployed.
    let entries = match &program {
        QueryState::Ready(status) if status.deployed => ctx.repo.list_entries(&ctx.session).await.into(),
        _ => QueryState::Loading,
    };

    let view = ListView::render(&ctx.session, &program, &entries);
    if output::is_json() {
        output::print(&view)?;
    } else {
        output::lines(&render::list_lines(&view));
    }

    if let ListView::Error { message } = &view {
        anyhow::bail!("failed to list entries: {message}");
    }
    Ok(())
}
