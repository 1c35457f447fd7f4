use anyhow::Result;
use journal_core::views::CreateEntryForm;

use crate::cmd::write;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, title: &str, message: &str) -> Result<()> {
    let mut form = CreateEntryForm::new(title, message);
    write::check_control(form.control(&ctx.repo, &ctx.session), "title and message must not be empty")?;

    // Creating is disabled while the program is missing on this cluster.
    ctx.repo.require_deployed(&ctx.session).await?;

    let outcome = write::with_spinner("creating entry", form.submit(&ctx.repo, &ctx.session)).await;
    write::report(ctx, "create", title, outcome)
}
