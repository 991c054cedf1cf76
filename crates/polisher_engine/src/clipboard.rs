use std::io::Write;
use std::process::{Command, Stdio};

use app_logging::app_debug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> Result<(), ClipboardError>;
}

/// System clipboard with two mechanisms: arboard first, then the platform
/// copy utility fed through a short-lived child process. Nothing persists
/// once the copy has settled; failure of both is non-fatal to the session.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn copy(&self, text: &str) -> Result<(), ClipboardError> {
        let primary = match copy_via_arboard(text) {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };
        app_debug!("primary clipboard mechanism failed: {primary}");
        copy_via_command(text).map_err(|fallback| {
            ClipboardError::WriteFailed(format!("{primary}; fallback: {fallback}"))
        })
    }
}

fn copy_via_arboard(text: &str) -> Result<(), String> {
    let mut clipboard = arboard::Clipboard::new().map_err(|err| err.to_string())?;
    clipboard.set_text(text).map_err(|err| err.to_string())
}

fn copy_via_command(text: &str) -> Result<(), String> {
    for (program, args) in candidate_commands() {
        let spawned = Command::new(program)
            .args(*args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(_) => continue,
        };
        let wrote = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()).is_ok(),
            None => false,
        };
        if !wrote {
            let _ = child.kill();
            let _ = child.wait();
            continue;
        }
        match child.wait() {
            Ok(status) if status.success() => return Ok(()),
            _ => continue,
        }
    }
    Err("no clipboard utility available".to_string())
}

#[cfg(target_os = "macos")]
fn candidate_commands() -> &'static [(&'static str, &'static [&'static str])] {
    &[("pbcopy", &[])]
}

#[cfg(target_os = "windows")]
fn candidate_commands() -> &'static [(&'static str, &'static [&'static str])] {
    &[("clip", &[])]
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn candidate_commands() -> &'static [(&'static str, &'static [&'static str])] {
    &[
        ("wl-copy", &[]),
        ("xclip", &["-selection", "clipboard"]),
        ("xsel", &["--clipboard", "--input"]),
    ]
}
