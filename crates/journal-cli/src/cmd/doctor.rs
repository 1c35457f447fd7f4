use anyhow::Result;
use journal_core::client::ProgramClient;
use serde::Serialize;

use crate::args::Cli;
use crate::context::AppContext;
use crate::output;

#[derive(Debug, Serialize)]
pub struct Check {
    pub name: String,
    pub ok: bool,
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DoctorOut {
    pub ok: bool,
    pub checks: Vec<Check>,
}

pub async fn run(cli: &Cli) -> Result<()> {
    let mut checks = Vec::new();

    // Configuration errors end the run: nothing else can be checked.
    let ctx = match AppContext::build(cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            checks.push(Check { name: "config".to_string(), ok: false, detail: format!("{e:#}") });
            return finish(checks);
        }
    };
    checks.push(Check {
        name: "config".to_string(),
        ok: true,
        detail: format!("cluster {} at {}", ctx.session.cluster, ctx.session.cluster.endpoint()),
    });

    // A wallet is optional for reads but required for writes.
    let keypair = &ctx.keypair_path;
    checks.push(Check {
        name: "wallet".to_string(),
        ok: ctx.session.is_connected(),
        detail: match ctx.session.identity {
            Some(id) => format!("{id} ({})", keypair.display()),
            None => format!("optional (no keypair at {}; required for writes)", keypair.display()),
        },
    });

    let rpc = ctx.repo.client().node_version().await;
    let reachable = rpc.is_ok();
    checks.push(Check {
        name: "rpc".to_string(),
        ok: reachable,
        detail: match rpc {
            Ok(v) => format!("solana-core {v}"),
            Err(e) => e.to_string(),
        },
    });

    if reachable {
        let program_id = ctx.repo.client().program_id();
        checks.push(match ctx.repo.fetch_program_status(&ctx.session).await {
            Ok(s) => Check {
                name: "program".to_string(),
                ok: s.deployed,
                detail: if s.deployed {
                    format!("{program_id} deployed")
                } else {
                    format!("{program_id} not deployed on {}", ctx.session.cluster)
                },
            },
            Err(e) => Check { name: "program".to_string(), ok: false, detail: e.to_string() },
        });
    }

    finish(checks)
}

fn finish(checks: Vec<Check>) -> Result<()> {
    let ok = checks.iter().all(|c| c.ok || c.name == "wallet");
    output::print(&DoctorOut { ok, checks })?;
    if !ok {
        anyhow::bail!("doctor found problems");
    }
    Ok(())
}
