mod cli;

use cli::Args;
use release_helper::adapters::outbound::console::{init_logging, StderrProgressReporter};
use release_helper::adapters::outbound::maven::{MavenModuleResolver, MavenWorkspaceReader};
use release_helper::adapters::outbound::repository::{
    CachingRepository, LocalRepository, RemoteRepository, RepositoryChain,
};
use release_helper::application::dto::ReportRequest;
use release_helper::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use release_helper::application::use_cases::GenerateReportUseCase;
use release_helper::config::{self, ConfigFile, Settings};
use release_helper::shared::error::{ExitCode, ReleaseHelperError};
use release_helper::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};

fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args) {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

fn run(args: Args) -> Result<()> {
    let project_path = PathBuf::from(args.path.as_deref().unwrap_or("."));
    validate_project_path(&project_path)?;

    let config = load_config(&args, &project_path)?;
    let settings = Settings::resolve(args.overrides(), config.as_ref())?;
    debug!("effective settings: {:?}", settings);

    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    // Create adapters (Dependency Injection)
    let repositories = build_repository_chain(&settings)?;
    let resolver = MavenModuleResolver::new(CachingRepository::new(repositories));
    let workspace_reader = MavenWorkspaceReader::new(&resolver);

    let use_case = GenerateReportUseCase::new(workspace_reader, &resolver, progress_reporter);

    let request = ReportRequest::builder()
        .project_path(project_path)
        .goal(settings.goal)
        .snapshot_marker(settings.snapshot_marker.clone())
        .snapshot_modules_only(settings.snapshot_modules_only)
        .build()?;

    let response = use_case.execute(request)?;

    if !args.quiet {
        eprintln!("{}", FormatterFactory::progress_message(settings.format));
    }
    let formatter = FormatterFactory::create(settings.format);
    let formatted_output = formatter.format(&response.document)?;

    let presenter = PresenterFactory::create(PresenterType::from(settings.output));
    presenter.present(&formatted_output)?;

    Ok(())
}

fn load_config(args: &Args, project_path: &Path) -> Result<Option<ConfigFile>> {
    if let Some(path) = args.config.as_deref() {
        let config = config::load_config_from_path(Path::new(path))?;
        if !args.quiet {
            eprintln!("⚙️  Loaded config from: {}", path);
        }
        return Ok(Some(config));
    }

    let config = config::discover_config(project_path)?;
    if config.is_some() && !args.quiet {
        eprintln!(
            "⚙️  Auto-discovered config file: {}",
            project_path.join(config::CONFIG_FILENAME).display()
        );
    }
    Ok(config)
}

/// Local repository first, then each remote in order unless offline.
fn build_repository_chain(settings: &Settings) -> Result<RepositoryChain> {
    let mut chain = RepositoryChain::new();

    if let Some(root) = settings.local_repository.as_ref() {
        info!("using local repository {}", root.display());
        chain = chain.with_repository(Box::new(LocalRepository::new(root.clone())));
    }

    if settings.offline {
        info!("offline: remote repositories disabled");
    } else {
        for url in &settings.remote_repositories {
            info!("using remote repository {}", url);
            let remote = RemoteRepository::new(url)?;
            chain = chain.with_repository(Box::new(CachingRepository::new(remote)));
        }
    }

    Ok(chain)
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ReleaseHelperError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| ReleaseHelperError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(ReleaseHelperError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(ReleaseHelperError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
