use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Print a value as pretty JSON on stdout.
pub fn print<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

/// Print human-readable lines on stdout.
pub fn lines(lines: &[String]) {
    let mut out = io::stdout().lock();
    for l in lines {
        let _ = writeln!(out, "{l}");
    }
}

/// Colored notice on stderr; stdout stays clean for JSON consumers.
pub fn notice(color: Color, label: &str, msg: &str) {
    let mut err = StandardStream::stderr(ColorChoice::Auto);
    let _ = err.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(err, "{label}");
    let _ = err.reset();
    let _ = writeln!(err, " {msg}");
}

pub fn eprintln_line(msg: &str) {
    let _ = writeln!(io::stderr(), "{msg}");
}
