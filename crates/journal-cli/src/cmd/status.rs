use anyhow::Result;
use journal_core::model::{Address, ProgramMetadata};
use serde::Serialize;

use crate::context::AppContext;
use crate::output;

#[derive(Debug, Serialize)]
pub struct StatusOut {
    pub cluster: String,
    pub endpoint: String,
    pub commitment: &'static str,
    pub program_id: Address,
    pub deployed: bool,
    pub metadata: Option<ProgramMetadata>,
    pub wallet: Option<Address>,
}

pub async fn run(ctx: &AppContext) -> Result<()> {
    let status = ctx.repo.fetch_program_status(&ctx.session).await?;

    let out = StatusOut {
        cluster: ctx.session.cluster.to_string(),
        endpoint: ctx.session.cluster.endpoint().to_string(),
        commitment: ctx.config.commitment.as_str(),
        program_id: status.program_id,
        deployed: status.deployed,
        metadata: status.metadata,
        wallet: ctx.session.identity,
    };

    if output::is_json() {
        return output::print(&out);
    }

    let mut lines = vec![
        format!("cluster:    {} ({}, {})", out.cluster, out.endpoint, out.commitment),
        format!("program:    {}", out.program_id),
        format!("deployed:   {}", if out.deployed { "yes" } else { "no" }),
    ];
    if let Some(meta) = &out.metadata {
        lines.push(format!("loader:     {}", meta.owner));
        lines.push(format!("lamports:   {}", meta.lamports));
        lines.push(format!("data bytes: {}", meta.data_len));
    }
    lines.push(match out.wallet {
        Some(w) => format!("wallet:     {w}"),
        None => "wallet:     not connected".to_string(),
    });
    output::lines(&lines);
    Ok(())
}
