//! `specify init` command handler

use anyhow::{Context, Result};
use console::style;
use dialoguer::Confirm;
use specify_core::{HierarchicalConfigLoader, RuntimeConfig};
use specify_projects::git::{check_git_available, init_repository, is_git_repo};
use specify_projects::{
    copy_local_templates, ensure_executable_scripts, resolve_local_source, validate_local_repo,
    Error as ProjectError, ProgressSink, ProjectTarget,
};
use specify_release::{extract_tarball, FetchOptions, ReleaseManager};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::cli::InitArgs;
use crate::output;
use crate::tracker::StepTracker;

/// CLI of the AI agent the templates target
const AGENT_TOOL: &str = "claude";

/// Slash commands the templates install, in the order a project uses them
const SLASH_COMMANDS: [(&str, &str); 5] = [
    ("/constitution", "Establish project principles"),
    ("/specify", "Create baseline specification"),
    ("/plan", "Create implementation plan"),
    ("/tasks", "Generate actionable tasks"),
    ("/implement", "Execute implementation"),
];

/// Initialize a project from the latest template release or a local checkout
pub async fn run(args: InitArgs) -> Result<()> {
    let config = HierarchicalConfigLoader::new()?
        .load_runtime_config()
        .context("Failed to load ~/.specify/config.yaml")?;
    if !config.display.color_enabled {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let target = ProjectTarget::resolve(args.project_name.as_deref(), args.here, &cwd)?;

    output::header("Specify Project Setup");
    output::kv("Project", &target.name);
    output::kv("Path", &target.path.display().to_string());
    match &args.local {
        Some(local) => output::kv("Template source", &local.display().to_string()),
        None => output::kv(
            "Template source",
            &format!("{} (latest release)", config.github.slug()),
        ),
    }

    if target.is_current_dir && !confirm_merge(&target, args.force)? {
        output::info("Operation cancelled");
        return Ok(());
    }

    let mut tracker = StepTracker::new("Initialize Specify Project");
    precheck(&mut tracker, args.no_git, args.ignore_agent_tools, |tool| {
        which::which(tool).ok()
    })?;

    if !target.is_current_dir {
        target.ensure_exists()?;
    }

    match &args.local {
        Some(local) => {
            if ignores_network_flags(&args) {
                debug!("--skip-tls, --debug and --github-token have no effect with --local");
            }
            install_from_local(local, &target, &mut tracker)?;
        }
        None => install_from_release(&config, &target, &args, &mut tracker).await?,
    }

    ensure_executable_scripts(&target.path, Some(&mut tracker));
    initialize_git(&config, &target, args.no_git, &mut tracker).await;

    tracker.add("final", "Finalize");
    tracker.complete("final", "project ready");

    println!();
    output::success("Project ready.");
    show_next_steps(&target);
    Ok(())
}

/// Title for the error panel of a failed `init`
pub fn failure_title(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<ProjectError>() {
        return match e {
            ProjectError::PathNotFound { .. } => "Local Path Not Found",
            ProjectError::NotADirectory { .. } => "Invalid Local Path",
            ProjectError::InvalidStructure { .. } => "Invalid Repository",
            ProjectError::CopyFailure { .. } => "Copy Failed",
            ProjectError::ProjectExists { .. } => "Directory Conflict",
            ProjectError::InvalidTarget { .. } => "Invalid Arguments",
            ProjectError::AgentToolNotFound { .. } => "Agent Detection Failed",
            _ => "Initialization Failed",
        };
    }
    if err.downcast_ref::<specify_release::Error>().is_some() {
        return "Template Download Failed";
    }
    "Error"
}

fn confirm_merge(target: &ProjectTarget, force: bool) -> Result<bool> {
    let existing = target.existing_entries()?;
    if existing == 0 {
        return Ok(true);
    }

    output::warning(&format!(
        "Current directory is not empty ({} items)",
        existing
    ));
    output::warning("Template files will be merged with existing content and may overwrite existing files");

    if force {
        info!("--force given, merging without confirmation");
        return Ok(true);
    }

    let confirmed = Confirm::new()
        .with_prompt("Do you want to continue?")
        .default(false)
        .interact()?;
    Ok(confirmed)
}

fn ignores_network_flags(args: &InitArgs) -> bool {
    args.skip_tls || args.debug || args.github_token.is_some()
}

/// Check for git and the agent CLI; `lookup` resolves a tool on PATH.
///
/// A missing git only changes the report. A missing agent CLI is fatal
/// unless `ignore_agent_tools` is set.
fn precheck(
    tracker: &mut StepTracker,
    no_git: bool,
    ignore_agent_tools: bool,
    lookup: impl Fn(&str) -> Option<PathBuf>,
) -> Result<()> {
    tracker.add("precheck", "Check required tools");
    tracker.start("precheck");

    let git = if no_git {
        "git not required".to_string()
    } else {
        match lookup("git") {
            Some(_) => "git found".to_string(),
            None => "git not found".to_string(),
        }
    };

    let agent = if ignore_agent_tools {
        format!("{} check skipped", AGENT_TOOL)
    } else {
        match lookup(AGENT_TOOL) {
            Some(path) => {
                debug!("{} found at {}", AGENT_TOOL, path.display());
                format!("{} found", AGENT_TOOL)
            }
            None => {
                tracker.error("precheck", &format!("{} not found", AGENT_TOOL));
                return Err(ProjectError::agent_tool_not_found(AGENT_TOOL).into());
            }
        }
    };

    tracker.complete("precheck", &format!("{}, {}", git, agent));
    Ok(())
}

/// Report a step result on the tracker and hand it back unchanged
fn finish_step<T, E: Display>(
    tracker: &mut StepTracker,
    key: &str,
    result: std::result::Result<T, E>,
    detail: impl FnOnce(&T) -> String,
) -> std::result::Result<T, E> {
    match &result {
        Ok(value) => tracker.complete(key, &detail(value)),
        Err(e) => tracker.error(key, &e.to_string()),
    }
    result
}

fn install_from_local(raw: &Path, target: &ProjectTarget, tracker: &mut StepTracker) -> Result<()> {
    tracker.add("local", "Resolve local template source");
    tracker.start("local");
    let source = finish_step(tracker, "local", resolve_local_source(raw), |p| {
        p.display().to_string()
    })?;

    install_templates(&source, target, tracker)
}

async fn install_from_release(
    config: &RuntimeConfig,
    target: &ProjectTarget,
    args: &InitArgs,
    tracker: &mut StepTracker,
) -> Result<()> {
    let options = FetchOptions {
        github_token: FetchOptions::resolve_token(args.github_token.clone()),
        skip_tls: args.skip_tls,
        debug: args.debug,
    };
    let manager = ReleaseManager::new(config, &options)?;

    tracker.add("fetch", "Fetch latest release");
    tracker.start("fetch");
    let spinner = output::spinner(&format!("Fetching latest release of {}", config.github.slug()));
    let fetched = manager.get_latest().await;
    spinner.finish_and_clear();
    let release = finish_step(tracker, "fetch", fetched, |r| r.tag_name.clone())?;

    let workdir = tempfile::Builder::new()
        .prefix("specify-")
        .tempdir()
        .context("Failed to create temporary download directory")?;

    tracker.add("download", "Download template");
    tracker.start("download");
    let downloaded = manager
        .download_tarball(&release, workdir.path(), true)
        .await;
    let archive = finish_step(tracker, "download", downloaded, |p| {
        p.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    })?;

    tracker.add("extract", "Extract template");
    tracker.start("extract");
    let extracted = extract_tarball(&archive, &workdir.path().join("source"));
    let source = finish_step(tracker, "extract", extracted, |_| "done".to_string())?;

    install_templates(&source, target, tracker)
}

/// Validate a template tree and merge it into the project
fn install_templates(source: &Path, target: &ProjectTarget, tracker: &mut StepTracker) -> Result<()> {
    tracker.add("validate", "Validate template repository");
    tracker.start("validate");
    let report = validate_local_repo(source);
    if let Some(message) = report.error_message() {
        tracker.error(
            "validate",
            &format!("{} missing", report.missing.join(", ")),
        );
        return Err(ProjectError::invalid_structure(message).into());
    }
    tracker.complete("validate", &format!("{} directories", report.found.len()));

    let summary = copy_local_templates(&target.path, source, target.is_current_dir, Some(tracker))?;
    debug!("Copied {} files", summary.total_files);
    Ok(())
}

async fn initialize_git(
    config: &RuntimeConfig,
    target: &ProjectTarget,
    no_git: bool,
    tracker: &mut StepTracker,
) {
    tracker.add("git", "Initialize git repository");

    if no_git {
        tracker.skip("git", "--no-git flag");
        return;
    }
    if is_git_repo(&target.path).await {
        tracker.skip("git", "existing repo detected");
        return;
    }
    if check_git_available().await.is_err() {
        tracker.skip("git", "git not found");
        return;
    }

    tracker.start("git");
    match init_repository(&target.path, &config.git_workflow.initial_commit_message).await {
        Ok(()) => tracker.complete("git", "initialized"),
        Err(e) => {
            tracker.error("git", "init failed");
            output::warning(&format!("Git initialization failed: {}", e));
        }
    }
}

fn show_next_steps(target: &ProjectTarget) {
    println!();
    output::info("Next steps:");

    let mut step = 1;
    if !target.is_current_dir {
        println!("   {}. cd {}", step, style(&target.name).cyan());
        step += 1;
    }
    println!("   {}. Start using slash commands with your AI agent:", step);
    for (command, description) in SLASH_COMMANDS {
        println!("      {} - {}", style(command).cyan(), description);
    }
}
