//! Playback sinks
//!
//! The player never decodes media itself; it hands a video's URL to a sink.
//! Sink failures are reported as warnings and never abort a command.

use anyhow::{anyhow, Result};
use std::process::{Command, Stdio};

/// Receiver of playback URLs
pub trait PlaybackSink {
    /// Open `url` for viewing
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs in the system browser
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSink;

impl BrowserSink {
    pub fn new() -> Self {
        Self
    }

    fn command(url: &str) -> Command {
        #[cfg(target_os = "macos")]
        let cmd = {
            let mut cmd = Command::new("open");
            cmd.arg(url);
            cmd
        };
        #[cfg(target_os = "windows")]
        let cmd = {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "start", "", url]);
            cmd
        };
        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        let cmd = {
            let mut cmd = Command::new("xdg-open");
            cmd.arg(url);
            cmd
        };
        cmd
    }
}

impl PlaybackSink for BrowserSink {
    fn open(&self, url: &str) -> Result<()> {
        let mut child = Self::command(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| anyhow!("could not launch a browser: {}", e))?;

        // Reap in the background so the REPL never waits on the browser
        std::thread::spawn(move || {
            let _ = child.wait();
        });

        log::debug!("Opened {} in browser", url);
        Ok(())
    }
}

/// Sink that only logs, for headless runs and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NullSink {
    pub fn new() -> Self {
        Self
    }
}

impl PlaybackSink for NullSink {
    fn open(&self, url: &str) -> Result<()> {
        log::debug!("Playback sink disabled, not opening {}", url);
        Ok(())
    }
}
