use anyhow::{anyhow, Result};
use journal_core::client::ProgramClient;
use journal_core::model::Address;
use journal_core::views::{EntryCardView, QueryState};

use crate::context::AppContext;
use crate::{output, render};

pub async fn run(ctx: &AppContext, address: Option<&str>, title: Option<&str>, owner: Option<&str>) -> Result<()> {
    let address: Address = match (address, title) {
        (Some(a), _) => a.parse()?,
        (None, Some(t)) => {
            let owner: Address = match owner {
                Some(o) => o.parse()?,
                None => ctx
                    .session
                    .identity
                    .ok_or_else(|| anyhow!("pass --owner or connect a wallet to look up by title"))?,
            };
            ctx.repo.client().entry_address(&owner, t.trim())?
        }
        (None, None) => return Err(anyhow!("either --address or --title is required")),
    };

    let entry: QueryState<_> = if ctx.session.is_connected() {
        ctx.repo.fetch_entry(&ctx.session, &address).await.into()
    } else {
        QueryState::Loading
    };

    let view = EntryCardView::render(&ctx.session, address, &entry);
    if output::is_json() {
        output::print(&view)?;
    } else {
        output::lines(&render::card_view_lines(&view));
    }

    if let EntryCardView::Error { message } = &view {
        anyhow::bail!("failed to fetch entry: {message}");
    }
    Ok(())
}
