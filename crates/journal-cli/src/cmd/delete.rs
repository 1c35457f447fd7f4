use std::io::{self, BufRead, Write};

use anyhow::Result;
use journal_core::views::DeleteControl;

use crate::cmd::write;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, title: &str, yes: bool) -> Result<()> {
    let control = DeleteControl::new(title);
    write::check_control(control.control(&ctx.repo, &ctx.session), "title must not be empty")?;

    let confirmed = yes || confirm(&format!("Delete entry `{}`? [y/N] ", title.trim()))?;
    if !confirmed {
        crate::output::eprintln_line("aborted");
        return Ok(());
    }

    let outcome = write::with_spinner("deleting entry", control.submit(&ctx.repo, &ctx.session, true)).await;
    write::report(ctx, "delete", title, outcome)
}

fn confirm(prompt: &str) -> Result<bool> {
    let mut err = io::stderr();
    write!(err, "{prompt}")?;
    err.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
