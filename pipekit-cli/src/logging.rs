//! Logger setup shared by both binaries

use log::LevelFilter;

/// Environment variable holding an env_logger filter spec
pub const LOG_ENV: &str = "PIPEKIT_LOG";

/// Default filter: `info`, or `debug` when verbose. `PIPEKIT_LOG` wins when set.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Initialise the global logger. Later calls keep the logger already
/// installed.
pub fn init(verbose: bool) {
    let installed = env_logger::Builder::default()
        .filter_level(LevelFilter::Info)
        .parse_env(env_logger::Env::default().filter_or(LOG_ENV, default_filter(verbose)))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
    if let Err(e) = installed {
        log::debug!("logger already initialised: {}", e);
    }
}
