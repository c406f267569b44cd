//! Terminal logging for the whole workspace.
//!
//! Every crate logs through the `log` facade (`repo-auth` through `tracing`
//! with its `log` feature), so one `simplelog` terminal logger covers them all.

use crate::config::{Config, RustEnv};
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// HTTP stack crates whose records are hidden below TRACE.
const NOISY_MODULES: &[&str] = &[
    "hyper",
    "hyper_util",
    "reqwest",
    "rustls",
    "tower",
    "tower_http",
    "tower_sessions",
    "tower_sessions_core",
    "axum",
    "mio",
];

pub struct Logger {}

impl Logger {
    /// Install the global terminal logger at the configured level.
    ///
    /// Fails if a global logger has already been installed.
    pub fn init_logger(config: &Config) -> Result<(), log::SetLoggerError> {
        let runtime_env = config.runtime_env();

        TermLogger::init(
            config.log_level_filter,
            Self::log_config(config.log_level_filter, &runtime_env),
            TerminalMode::Mixed,
            Self::color_choice(&runtime_env),
        )
    }

    fn log_config(level: LevelFilter, runtime_env: &RustEnv) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        // Deployed logs go to a collector that tags threads itself.
        if *runtime_env != RustEnv::Development {
            builder.set_thread_level(LevelFilter::Off);
        }

        for module in Self::hidden_modules(level) {
            builder.add_filter_ignore_str(module);
        }

        builder.build()
    }

    /// Modules whose records are dropped at `level`. Nothing is hidden at TRACE.
    fn hidden_modules(level: LevelFilter) -> &'static [&'static str] {
        if level == LevelFilter::Trace {
            &[]
        } else {
            NOISY_MODULES
        }
    }

    fn color_choice(runtime_env: &RustEnv) -> ColorChoice {
        match runtime_env {
            RustEnv::Development => ColorChoice::Auto,
            RustEnv::Staging | RustEnv::Production => ColorChoice::Never,
        }
    }
}
