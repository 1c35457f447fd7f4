use anyhow::Result;
use journal_core::views::UpdateEntryForm;

use crate::cmd::write;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, title: &str, message: &str) -> Result<()> {
    let mut form = UpdateEntryForm::new(title);
    form.message = message.to_string();
    write::check_control(form.control(&ctx.repo, &ctx.session), "title and message must not be empty")?;

    let outcome = write::with_spinner("updating entry", form.submit(&ctx.repo, &ctx.session)).await;
    write::report(ctx, "update", title, outcome)
}
