//! wb-create - scaffold a new Workbench project
//!
//! Linear pipeline: prompt for a project handle, fetch the starter template
//! (remote tarball or local checkout), arrange its files under the new
//! project directory, then hand off to the template's installer script.

mod argv;
mod output;
mod prompts;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fs;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use argv::{Argv, Options};
use prompts::Answers;
use wb_scaffold::{arrange, install, InstallContext, TemplateSource};

#[tokio::main]
async fn main() {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let argv = Argv::from_env();
    let opts = Options::from_argv(&argv);

    init_tracing(opts.verbose);

    output::banner("Create a new Workbench project");

    if let Err(e) = run(&opts).await {
        output::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(opts: &Options) -> Result<()> {
    debug!("options: {:?}", opts);

    let answers = gather_answers()?;
    debug!(
        "answers: handle={} enable_install={}",
        answers.handle, answers.enable_install
    );

    if !answers.enable_install {
        output::info("Existing directory left untouched. Nothing was created.");
        return Ok(());
    }

    let project_dir = Utf8PathBuf::from(format!("./{}", answers.handle));
    let source = TemplateSource::from_options(opts.local.as_deref(), opts.dev);

    output::kv("Project handle", &answers.handle);
    output::kv("Location", project_dir.as_str());
    match &source {
        TemplateSource::Local { path } => output::kv("Template", path.as_str()),
        TemplateSource::Remote { url, .. } => output::kv("Template", url),
    }
    println!();

    fs::create_dir_all(&project_dir)
        .with_context(|| format!("Failed to create project directory {project_dir}"))?;

    let source_root = source.fetch(&project_dir).await?;

    output::header("Moving files");
    let arranged = arrange(&project_dir, &source_root)?;
    if let Some(dir) = &arranged.install_dir {
        output::success(&format!("Installer staged at {dir}"));
    }
    if let Some(dir) = &arranged.workbench_dir {
        output::success(&format!("Workbench files at {dir}"));
    }

    output::header("Starting install");
    let abs_project_dir = project_dir
        .canonicalize_utf8()
        .with_context(|| format!("Failed to resolve project directory {project_dir}"))?;

    install::run(&InstallContext {
        handle: &answers.handle,
        project_dir: &abs_project_dir,
        version: env!("CARGO_PKG_VERSION"),
        installer: &opts.installer,
        dev: opts.dev,
        verbose: opts.verbose,
    })
    .await?;

    println!();
    output::banner(&format!(
        "New Workbench project '{}' created",
        answers.handle
    ));
    output::info(&format!("Next: cd {}", answers.handle));

    Ok(())
}

/// Prompt for the handle, then for overwrite confirmation when the target
/// directory already exists.
fn gather_answers() -> Result<Answers> {
    let handle = prompts::project_handle()?;

    let enable_install = if Utf8PathBuf::from(format!("./{handle}")).exists() {
        prompts::confirm_existing(&handle)?
    } else {
        true
    };

    Ok(Answers {
        handle,
        enable_install,
    })
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
