//! Template source acquisition
//!
//! A template comes from one of two places:
//! - a branch tarball of the starter repository, downloaded and extracted
//!   into the project's staging directory
//! - a local checkout, whose relevant subdirectories are copied into the
//!   staging directory (no network involved)
//!
//! Either way the result is a staged source root that [`crate::arrange`]
//! relocates into the final project layout.

use camino::{Utf8Path, Utf8PathBuf};
use flate2::read::GzDecoder;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::Write;
use tar::Archive;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::{INSTALL_DIR, STAGING_DIR, WORKBENCH_DIR};

const MAIN_ARCHIVE_URL: &str =
    "https://github.com/workbench-kit/starter/archive/refs/heads/main.tar.gz";
const DEV_ARCHIVE_URL: &str =
    "https://github.com/workbench-kit/starter/archive/refs/heads/dev.tar.gz";

/// Top-level directory inside the branch tarballs (GitHub names it
/// `<repo>-<branch>`).
const MAIN_ARCHIVE_ROOT: &str = "starter-main";
const DEV_ARCHIVE_ROOT: &str = "starter-dev";

/// File name the downloaded tarball is staged under.
const ARCHIVE_FILE: &str = "template.tar.gz";

/// Staged root used for local checkouts.
const LOCAL_ROOT: &str = "local";

/// Where a template is acquired from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Copy from a checkout on disk
    Local { path: Utf8PathBuf },

    /// Download and extract a branch tarball
    Remote { url: String, root: String },
}

impl TemplateSource {
    /// Remote source for the branch selected by the dev flag
    pub fn remote(dev: bool) -> Self {
        let (url, root) = if dev {
            (DEV_ARCHIVE_URL, DEV_ARCHIVE_ROOT)
        } else {
            (MAIN_ARCHIVE_URL, MAIN_ARCHIVE_ROOT)
        };
        Self::Remote {
            url: url.to_string(),
            root: root.to_string(),
        }
    }

    /// Pick the source from CLI options: a local checkout wins over the
    /// remote archive.
    pub fn from_options(local: Option<&Utf8Path>, dev: bool) -> Self {
        match local {
            Some(path) => Self::Local {
                path: path.to_path_buf(),
            },
            None => Self::remote(dev),
        }
    }

    /// Materialize the template under `<project_dir>/SETUP` and return the
    /// staged source root.
    ///
    /// Failures are terminal for the run; nothing already written to the
    /// staging directory is cleaned up here.
    pub async fn fetch(&self, project_dir: &Utf8Path) -> Result<Utf8PathBuf> {
        let staging = project_dir.join(STAGING_DIR);
        fs::create_dir_all(&staging)?;

        match self {
            Self::Local { path } => {
                info!("Copying template from {}", path);
                stage_local(path, &staging)
            }
            Self::Remote { url, root } => {
                let archive = staging.join(ARCHIVE_FILE);
                download_archive(url, &archive).await?;
                extract_archive(&archive, &staging)?;
                fs::remove_file(&archive)?;

                let source_root = staging.join(root);
                if !source_root.is_dir() {
                    return Err(Error::malformed_archive(root.as_str()));
                }
                Ok(source_root)
            }
        }
    }
}

/// Copy the template subdirectories of a local checkout into the staging
/// directory. A subdirectory the checkout does not have is skipped.
fn stage_local(checkout: &Utf8Path, staging: &Utf8Path) -> Result<Utf8PathBuf> {
    if !checkout.is_dir() {
        return Err(Error::source_not_found(checkout.as_str()));
    }

    let root = staging.join(LOCAL_ROOT);
    fs::create_dir_all(&root)?;

    for name in [INSTALL_DIR, WORKBENCH_DIR] {
        let src = checkout.join(name);
        if src.is_dir() {
            copy_dir_recursive(&src, &root.join(name))?;
            debug!("copied {} from local checkout", name);
        } else {
            debug!("local checkout has no {}, skipping", name);
        }
    }

    Ok(root)
}

/// Stream the archive at `url` to `dest`, writing through a `.part` file
/// that is renamed once the body is fully received.
async fn download_archive(url: &str, dest: &Utf8Path) -> Result<()> {
    info!("Downloading template from {}", url);

    let client = reqwest::Client::builder()
        .user_agent(concat!("wb-create/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(Error::download_failed(response.status().as_u16(), url));
    }

    let progress = download_progress(response.content_length());
    let part = Utf8PathBuf::from(format!("{dest}.part"));

    let mut file = File::create(&part)?;
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk: bytes::Bytes = chunk?;
        file.write_all(&chunk)?;
        downloaded += chunk.len() as u64;
        progress.set_position(downloaded);
    }

    progress.finish_and_clear();
    fs::rename(&part, dest)?;

    debug!("Template downloaded ({} bytes)", downloaded);
    Ok(())
}

/// Progress bar for the download: byte-rate bar when the server announced a
/// length, spinner otherwise.
fn download_progress(total: Option<u64>) -> ProgressBar {
    match total {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::with_template(
                    "{spinner:.green} [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})",
                )
                .expect("Invalid progress bar template")
                .progress_chars("#>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::with_template("{spinner:.blue} {bytes} downloaded")
                    .expect("Invalid progress bar template"),
            );
            pb.enable_steady_tick(std::time::Duration::from_millis(100));
            pb
        }
    }
}

fn extract_archive(archive_path: &Utf8Path, dest: &Utf8Path) -> Result<()> {
    debug!("Extracting {} into {}", archive_path, dest);

    let file = File::open(archive_path)?;
    let decoder = GzDecoder::new(file);
    let mut archive = Archive::new(decoder);
    archive.unpack(dest)?;

    Ok(())
}

fn copy_dir_recursive(src: &Utf8Path, dst: &Utf8Path) -> Result<()> {
    fs::create_dir_all(dst)?;

    for entry in src.read_dir_utf8()? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}
