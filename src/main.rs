use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use git_bump::cli::{apply_bump, prepare_bump, BumpWorkflowArgs};
use git_bump::config;
use git_bump::domain::BumpKind;
use git_bump::git::{Git2Repository, TagCreation};
use git_bump::ui::{self, Confirmation};
use git_bump::{BumpError, DeciderConfig, VersionBumpDecider};

#[derive(clap::Parser)]
#[command(
    name = "git-bump",
    about = "Bump the semantic version from the latest tag, then create and push the new tag"
)]
struct Args {
    #[arg(short, long, value_name = "KIND", help = "Version component to bump: major, minor or patch")]
    bump: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Source file whose embedded version must match the new version")]
    source: Option<PathBuf>,

    #[arg(short, long, help = "Remote to sync with and push to (default from config: origin)")]
    remote: Option<String>,

    #[arg(short, long, help = "Skip the confirmation prompt")]
    force: bool,

    #[arg(long, help = "Show the computed version without creating a tag")]
    dry_run: bool,

    #[arg(long, help = "Do not fetch and pull before deciding")]
    no_fetch: bool,

    #[arg(long, help = "Create the tag locally but do not push it")]
    no_push: bool,

    #[arg(short = 'V', long, help = "Print version information")]
    version: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        let code = e
            .downcast_ref::<BumpError>()
            .map(BumpError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    if args.version {
        println!("git-bump {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // No bump requested: show usage and exit successfully
    let Some(bump) = args.bump.as_deref() else {
        Args::command().print_help()?;
        return Ok(());
    };

    let kind = match bump.parse::<BumpKind>() {
        Ok(kind) => kind,
        Err(e) => {
            Args::command().print_help()?;
            return Err(e.into());
        }
    };

    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let decider = VersionBumpDecider::new(DeciderConfig::from_config(&config)?);
    let remote = args.remote.clone().unwrap_or_else(|| config.remote.clone());

    let workflow_args = BumpWorkflowArgs {
        kind,
        remote: remote.clone(),
        source_path: args.source.clone().or_else(|| config.source.path.clone()),
        fetch: !args.no_fetch,
    };

    let repo = Git2Repository::open(".").context("Not in a git repository")?;

    if workflow_args.fetch {
        ui::display_status(&format!("Fetching latest data from '{}'...", remote));
    }

    let plan = prepare_bump(&repo, &decider, &workflow_args, &mut |warning| {
        ui::display_boundary_warning(&warning)
    })?;

    if let Some(source) = &plan.source {
        ui::display_success(&format!(
            "{} declares {}",
            source.path.display(),
            plan.decision.next
        ));
    }

    ui::display_version_update(
        &plan.decision.previous,
        &plan.decision.next,
        &plan.decision.tag_name,
    );

    if args.dry_run {
        ui::display_status("Dry run: no tag created");
        return Ok(());
    }

    if !args.force {
        match ui::confirm_version_update()? {
            Confirmation::Accepted => {}
            Confirmation::Declined => {
                println!("Aborted by user.");
                return Ok(());
            }
            Confirmation::Invalid(answer) => {
                return Err(BumpError::invalid_input(format!(
                    "'{}' - expected y or n, aborting",
                    answer
                ))
                .into());
            }
        }
    }

    ui::display_status(&format!("Creating tag: {}", plan.decision.tag_name));
    let result = apply_bump(&repo, &plan, &remote, !args.no_push)?;

    match result.creation {
        TagCreation::Created => ui::display_success(&format!("Created tag: {}", result.tag)),
        TagCreation::AlreadyPresent => {
            ui::display_status(&format!("Tag {} already at HEAD, reusing it", result.tag))
        }
    }

    if result.pushed {
        ui::display_success(&format!("Pushed tag: {} to {}", result.tag, remote));
    } else {
        ui::display_manual_push_instruction(&result.tag, &remote);
    }

    println!("Success");
    Ok(())
}
