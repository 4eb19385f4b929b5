//! Final placement of template directories
//!
//! Moves the staged template's `_install` and `_wb` subdirectories into
//! their destinations relative to the project directory, then removes the
//! emptied staging root. A subdirectory the template does not ship is
//! skipped without error.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tracing::debug;

use crate::error::Result;
use crate::{INSTALL_DIR, STAGING_DIR, WORKBENCH_DIR};

/// What arrangement actually moved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arranged {
    /// `<project>/SETUP/_install`, when the template shipped an `_install`
    pub install_dir: Option<Utf8PathBuf>,

    /// `<project>/_wb`, when the template shipped a `_wb`
    pub workbench_dir: Option<Utf8PathBuf>,
}

/// Relocate `_install` and `_wb` from the staged source root.
///
/// Destinations:
/// - `<source_root>/_install` → `<project_dir>/SETUP/_install`
/// - `<source_root>/_wb` → `<project_dir>/_wb`
pub fn arrange(project_dir: &Utf8Path, source_root: &Utf8Path) -> Result<Arranged> {
    let install_dir = relocate(
        &source_root.join(INSTALL_DIR),
        &project_dir.join(STAGING_DIR).join(INSTALL_DIR),
    )?;
    let workbench_dir = relocate(
        &source_root.join(WORKBENCH_DIR),
        &project_dir.join(WORKBENCH_DIR),
    )?;

    fs::remove_dir_all(source_root)?;
    debug!("removed staged source root {}", source_root);

    Ok(Arranged {
        install_dir,
        workbench_dir,
    })
}

fn relocate(src: &Utf8Path, dest: &Utf8Path) -> Result<Option<Utf8PathBuf>> {
    if !src.is_dir() {
        debug!("template has no {}, skipping", src.file_name().unwrap_or("?"));
        return Ok(None);
    }

    fs::rename(src, dest)?;
    debug!("moved {} -> {}", src, dest);
    Ok(Some(dest.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Project dir with a staged source root containing the named subdirs,
    /// each holding one marker file.
    fn staged_project(subdirs: &[&str]) -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
        let dir = TempDir::new().unwrap();
        let project = Utf8PathBuf::from(dir.path().to_str().unwrap());
        let root = project.join(STAGING_DIR).join("starter-main");
        for name in subdirs {
            fs::create_dir_all(root.join(name)).unwrap();
            fs::write(root.join(name).join("marker"), name).unwrap();
        }
        (dir, project, root)
    }

    #[test]
    fn test_arrange_moves_both_dirs() {
        let (_dir, project, root) = staged_project(&["_install", "_wb"]);

        let arranged = arrange(&project, &root).unwrap();

        assert_eq!(
            arranged.install_dir.as_deref(),
            Some(project.join("SETUP/_install").as_path())
        );
        assert_eq!(
            arranged.workbench_dir.as_deref(),
            Some(project.join("_wb").as_path())
        );
        assert!(project.join("SETUP/_install/marker").is_file());
        assert!(project.join("_wb/marker").is_file());
    }

    #[test]
    fn test_arrange_skips_missing_workbench_dir() {
        let (_dir, project, root) = staged_project(&["_install"]);

        let arranged = arrange(&project, &root).unwrap();

        assert!(arranged.install_dir.is_some());
        assert_eq!(arranged.workbench_dir, None);
        assert!(!project.join("_wb").exists());
    }

    #[test]
    fn test_arrange_skips_missing_install_dir() {
        let (_dir, project, root) = staged_project(&["_wb"]);

        let arranged = arrange(&project, &root).unwrap();

        assert_eq!(arranged.install_dir, None);
        assert!(arranged.workbench_dir.is_some());
    }

    #[test]
    fn test_arrange_removes_source_root() {
        let (_dir, project, root) = staged_project(&["_install", "_wb"]);

        arrange(&project, &root).unwrap();

        assert!(!root.exists());
        // the staging dir itself stays, it now holds _install
        assert!(project.join(STAGING_DIR).is_dir());
    }
}
