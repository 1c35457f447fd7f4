//! Shared plumbing for the write commands.

use std::future::Future;
use std::time::Duration;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use journal_core::views::{FormOutcome, SubmitControl, CONNECT_PROMPT};
use serde::Serialize;
use termcolor::Color;

use crate::context::AppContext;
use crate::output;

#[derive(Debug, Serialize)]
pub struct WriteOut {
    pub ok: bool,
    pub action: &'static str,
    pub title: String,
    pub signature: Option<String>,
    pub explorer_url: Option<String>,
    pub error: Option<String>,
    pub error_code: Option<&'static str>,
}

/// Refuse to submit when the control would not be enabled. No network call
/// happens on this path.
pub fn check_control(control: SubmitControl, invalid_msg: &str) -> Result<()> {
    match control {
        SubmitControl::Enabled => Ok(()),
        SubmitControl::ConnectPrompt => {
            output::eprintln_line(CONNECT_PROMPT);
            bail!("no wallet connected")
        }
        SubmitControl::Disabled => bail!("{invalid_msg}"),
    }
}

/// Run `fut` under a spinner, the CLI's "pending" state.
pub async fn with_spinner<F: Future>(msg: &str, fut: F) -> F::Output {
    let pb = if output::is_json() {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(80));
    pb.set_message(msg.to_string());

    let out = fut.await;
    pb.finish_and_clear();
    out
}

/// Report a settled write. Network failures were already shown by the notifier.
pub fn report(ctx: &AppContext, action: &'static str, title: &str, outcome: FormOutcome) -> Result<()> {
    let mut out = WriteOut {
        ok: false,
        action,
        title: title.trim().to_string(),
        signature: None,
        explorer_url: None,
        error: None,
        error_code: None,
    };

    match outcome {
        FormOutcome::Submitted(sig) => {
            out.ok = true;
            out.explorer_url = Some(ctx.session.cluster.explorer_tx_url(sig.as_str()));
            out.signature = Some(sig.to_string());
        }
        FormOutcome::Failed(e) => {
            // Rejections raised before the network never reach the notifier.
            if e.is_client_side() && !output::is_json() {
                output::notice(Color::Red, "error:", &e.to_string());
            }
            out.error_code = Some(e.code());
            out.error = Some(e.to_string());
        }
        FormOutcome::ConnectPrompt => out.error = Some(CONNECT_PROMPT.to_string()),
        FormOutcome::Invalid => out.error = Some("input rejected".to_string()),
        FormOutcome::Busy => out.error = Some("a request for this entry is already pending".to_string()),
    }

    if output::is_json() {
        output::print(&out)?;
    } else if let Some(sig) = &out.signature {
        output::lines(&[format!("{action}d `{}`: {sig}", out.title)]);
    }

    if !out.ok {
        bail!("{action} failed");
    }
    Ok(())
}
