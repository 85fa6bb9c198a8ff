use clap::Parser;
use release_helper::application::dto::{OutputFormat, ReportGoal};
use release_helper::config::Overrides;
use std::path::PathBuf;

/// Report SNAPSHOT parents, dependencies and properties of a Maven reactor
#[derive(Parser, Debug)]
#[command(name = "release-helper")]
#[command(version)]
#[command(
    about = "Report SNAPSHOT parents, dependencies and properties of a Maven reactor",
    long_about = None
)]
pub struct Args {
    /// Path to the directory containing the root pom.xml (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format: json or markdown
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Report to produce: helper or project-info
    #[arg(short, long)]
    pub goal: Option<ReportGoal>,

    /// Config file path (defaults to release-helper.config.yml in the project directory)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Version suffix that marks a pre-release build
    #[arg(long, value_name = "SUFFIX", allow_hyphen_values = true)]
    pub snapshot_marker: Option<String>,

    /// Also report non-root modules that have a release version
    #[arg(long)]
    pub all_modules: bool,

    /// Local repository directory (defaults to ~/.m2/repository)
    #[arg(long, value_name = "DIR")]
    pub local_repository: Option<String>,

    /// Remote repository base URL. Can be specified multiple times
    #[arg(long = "remote-repository", value_name = "URL")]
    pub remote_repositories: Vec<String>,

    /// Never contact remote repositories
    #[arg(long)]
    pub offline: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            goal: self.goal,
            format: self.format,
            output: self.output.as_ref().map(PathBuf::from),
            snapshot_marker: self.snapshot_marker.clone(),
            all_modules: self.all_modules,
            local_repository: self.local_repository.as_ref().map(PathBuf::from),
            remote_repositories: self.remote_repositories.clone(),
            offline: self.offline,
        }
    }
}
