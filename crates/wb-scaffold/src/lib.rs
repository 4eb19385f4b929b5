//! Scaffolding library for the wb-create CLI
//!
//! Covers the three filesystem-facing stages of project creation:
//! - [`source`]: fetch the starter template (remote tarball or local checkout)
//!   into the project's staging directory
//! - [`arrange`]: move the template's directories to their final locations
//! - [`install`]: hand off to the template's own installer script

pub mod arrange;
pub mod error;
pub mod install;
pub mod source;

pub use arrange::{arrange, Arranged};
pub use error::{Error, Result};
pub use install::InstallContext;
pub use source::TemplateSource;

/// Name of the staging directory created under the project directory.
pub const STAGING_DIR: &str = "SETUP";

/// Template subdirectory holding the installer and its assets.
pub const INSTALL_DIR: &str = "_install";

/// Template subdirectory holding the workbench runtime files.
pub const WORKBENCH_DIR: &str = "_wb";
