use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor a verbosity flag says otherwise
fn default_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global tracing subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `-v` raises the level one step per
/// occurrence and `-q` restricts output to errors. Calling this twice is a
/// no-op.
pub fn init_logging(verbosity: u8, quiet: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_directive(verbosity, quiet))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
