//! Installer delegation
//!
//! The template ships its own installer under `SETUP/_install`: a package
//! manifest plus an `install.js` entry point. This module enters that
//! directory, installs its packages, and runs the script with the terminal
//! inherited so the script can ask its own questions. Child exit codes are
//! logged but not acted on.

use camino::Utf8Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::{INSTALL_DIR, STAGING_DIR};

/// Name of the secondary installer script inside `_install`.
const INSTALL_SCRIPT: &str = "install.js";

/// Inputs for the installer hand-off
#[derive(Debug, Clone)]
pub struct InstallContext<'a> {
    /// Project handle, forwarded to the installer script
    pub handle: &'a str,

    /// Absolute project directory
    pub project_dir: &'a Utf8Path,

    /// Version reported to the installer script
    pub version: &'a str,

    /// Package manager executed inside the install directory
    pub installer: &'a str,

    /// Forward `--dev` to the installer script
    pub dev: bool,

    /// Forward `--verbose` to the installer script
    pub verbose: bool,
}

/// Enter `<project>/SETUP/_install`, install its packages, then run the
/// installer script. Both children inherit the terminal and are awaited.
pub async fn run(ctx: &InstallContext<'_>) -> Result<()> {
    let install_dir = ctx.project_dir.join(STAGING_DIR).join(INSTALL_DIR);
    std::env::set_current_dir(&install_dir)
        .map_err(|e| Error::install_dir_unavailable(install_dir.as_str(), e))?;
    debug!("working directory is now {}", install_dir);

    let status = Command::new(ctx.installer)
        .arg("install")
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;
    if !status.success() {
        warn!("{} install exited with {}", ctx.installer, status);
    }

    let args = installer_args(ctx);
    debug!("running node {}", args.join(" "));

    let status = Command::new("node")
        .args(&args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;
    if !status.success() {
        warn!("installer script exited with {}", status);
    }

    Ok(())
}

/// Argument vector for the installer script invocation.
pub fn installer_args(ctx: &InstallContext<'_>) -> Vec<String> {
    let mut args = vec![
        INSTALL_SCRIPT.to_string(),
        format!("--handle={}", ctx.handle),
        format!("--project-dir={}", ctx.project_dir),
        format!("--version={}", ctx.version),
    ];
    if ctx.dev {
        args.push("--dev".to_string());
    }
    if ctx.verbose {
        args.push("--verbose".to_string());
    }
    args
}
