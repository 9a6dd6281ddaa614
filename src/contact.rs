use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};

use anyhow::{Context, Result};
use log::{debug, info};

/// Opens an external link, such as the support chat.
pub trait LinkOpener {
    fn open(&mut self, url: &str) -> Result<()>;
}

/// Hands the link to the platform's default handler without waiting for it.
#[derive(Debug, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&mut self, url: &str) -> Result<()> {
        launch(opener_command(url))
            .with_context(|| format!("Failed to launch opener for {url}"))?;
        info!("Opened {}", url);
        Ok(())
    }
}

/// Spawns `command` detached from the terminal and reaps it on a helper
/// thread so it never lingers as a zombie.
fn launch(mut command: Command) -> std::io::Result<JoinHandle<()>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => debug!("Opener exited with {}", status),
        Err(err) => debug!("Could not wait for opener: {}", err),
    }))
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}
