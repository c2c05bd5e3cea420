use std::path::PathBuf;

use anyhow::Result;
use chrono::Datelike;
use clap::{ArgAction, Parser, Subcommand};

use actions_starter::cli::{
    remote_page, run_edit_workflow, run_init_workflow, run_open_workflow, run_publish_workflow,
    InitWorkflowArgs, PublishWorkflowArgs,
};
use actions_starter::config::{self, Config};
use actions_starter::git::Git2Repository;
use actions_starter::launch::SystemLauncher;
use actions_starter::package::NpmClient;
use actions_starter::ui;

mod logging;

#[derive(Parser)]
#[command(
    name = "actions-starter",
    version,
    about = "Generate starter GitHub Actions projects and publish them with version tags"
)]
struct Args {
    #[arg(
        short = 'C',
        long,
        global = true,
        default_value = ".",
        help = "Project directory to operate in"
    )]
    cwd: PathBuf,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Initialize a new GitHub Action project in an empty directory
    Init(InitArgs),
    /// Bump the version, tag the release and push it
    Publish(PublishArgs),
    /// Open the project's repository page in the browser
    Open(OpenArgs),
    /// Open the project in an editor
    Edit(EditArgs),
}

#[derive(clap::Args)]
struct InitArgs {
    #[arg(short, long, help = "The name of the project (default: directory name)")]
    project: Option<String>,

    #[arg(short, long, help = "The package author (default: git user.name)")]
    author: Option<String>,

    #[arg(short, long, help = "The license to use (default: ISC)")]
    license: Option<String>,

    #[arg(short, long, help = "A short description of the action")]
    description: Option<String>,

    #[arg(long, help = "The initial version (default: 1.0.0)")]
    initial_version: Option<String>,

    #[arg(short, long, help = "The test framework: jest or mocha (default: jest)")]
    test: Option<String>,

    #[arg(short, long, help = "Remote repository URL to add as origin")]
    repo: Option<String>,

    #[arg(long, help = "Write files without running npm install")]
    skip_install: bool,
}

#[derive(clap::Args)]
struct PublishArgs {
    #[arg(
        value_name = "VERSION",
        help = "major|minor|patch|premajor|preminor|prepatch|prerelease or an explicit version (default: current version)"
    )]
    version: Option<String>,

    #[arg(short, long, help = "Also create or move the 'latest' tag")]
    latest: bool,

    #[arg(long, help = "Pre-release identifier for pre* bumps (e.g. beta)")]
    preid: Option<String>,

    #[arg(long, help = "Remote to push to (default: origin)")]
    remote: Option<String>,

    #[arg(long, help = "Preview what would happen without making changes")]
    dry_run: bool,
}

#[derive(clap::Args)]
struct OpenArgs {
    #[arg(long, help = "Remote whose page to open (default: origin)")]
    remote: Option<String>,

    #[arg(long, help = "Print the URL instead of opening a browser")]
    print: bool,
}

#[derive(clap::Args)]
struct EditArgs {
    #[arg(short, long, help = "Editor executable (default: code)")]
    editor: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init_logging(args.verbose) {
        eprintln!("{}", e);
    }

    let config = match config::load_config(args.config.as_deref(), &args.cwd) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let outcome = match args.command {
        Command::Init(init) => init_project(&args.cwd, init, &config),
        Command::Publish(publish) => publish_release(&args.cwd, publish, &config),
        Command::Open(open) => open_page(&args.cwd, open, &config),
        Command::Edit(edit) => {
            let editor = edit.editor.unwrap_or_else(|| config.edit.editor.clone());
            run_edit_workflow(&args.cwd, &SystemLauncher::new(), &editor)
        }
    };

    if let Err(e) = outcome {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }

    Ok(())
}

fn init_project(dir: &std::path::Path, args: InitArgs, config: &Config) -> actions_starter::Result<()> {
    let workflow_args = InitWorkflowArgs {
        project: args.project,
        author: args.author,
        license: args.license,
        description: args.description,
        initial_version: args.initial_version,
        test: args.test,
        repo: args.repo,
        skip_install: args.skip_install,
    };

    let npm = NpmClient::new(dir);
    let year = chrono::Local::now().year();
    let result = run_init_workflow(dir, &workflow_args, &config.init, &npm, year)?;

    ui::display_heading("Your new Action is ready! To publish:");
    let steps = ui::init_next_steps(
        result.project.repository_url.is_some(),
        result.branch.as_deref(),
        &result.project.initial_version.to_string(),
    );
    ui::display_next_steps(&steps);
    Ok(())
}

fn publish_release(
    dir: &std::path::Path,
    args: PublishArgs,
    config: &Config,
) -> actions_starter::Result<()> {
    let workflow_args = PublishWorkflowArgs {
        version: args.version,
        latest: args.latest || config.publish.latest,
        preid: args.preid.or_else(|| config.publish.preid.clone()),
        remote: args
            .remote
            .unwrap_or_else(|| config.publish.remote.clone()),
        dry_run: args.dry_run,
    };

    let repo = Git2Repository::open(dir)?;
    let npm = NpmClient::new(dir);
    let result = run_publish_workflow(&repo, &npm, &workflow_args)?;

    if !result.dry_run {
        println!(
            "\n{} Published version {}\n",
            console::style("✓").green(),
            result.version
        );
    }
    Ok(())
}

fn open_page(dir: &std::path::Path, args: OpenArgs, config: &Config) -> actions_starter::Result<()> {
    let remote = args
        .remote
        .unwrap_or_else(|| config.publish.remote.clone());
    let repo = Git2Repository::open(dir)?;

    if args.print {
        println!("{}", remote_page(&repo, &remote)?);
        return Ok(());
    }

    run_open_workflow(&repo, &SystemLauncher::new(), &remote)?;
    Ok(())
}
