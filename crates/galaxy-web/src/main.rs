//! Skill Galaxy - desktop entry point
//!
//! Opens the galaxy in a native window. The browser build uses the library's
//! wasm start function instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::Result;
    use bevy::app::AppExit;
    use clap::Parser;
    use std::path::PathBuf;
    use tracing::{info, Level};
    use tracing_subscriber::FmtSubscriber;

    #[derive(Parser, Debug)]
    #[command(name = "skill-galaxy")]
    #[command(about = "Interactive 3D galaxy of skills")]
    #[command(version)]
    struct Args {
        /// Path to configuration file
        #[arg(short, long, default_value = "galaxy.toml")]
        config: PathBuf,

        /// Log level (trace, debug, info, warn, error)
        #[arg(short, long, default_value = "info")]
        log_level: String,
    }

    pub fn main() -> Result<()> {
        let args = Args::parse();

        // Initialize logging
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_target(true)
            .finish();

        tracing::subscriber::set_global_default(subscriber)?;

        info!("Skill Galaxy v{}", env!("CARGO_PKG_VERSION"));

        let config = galaxy_core::load_config(&args.config)?;
        info!(
            skills = config.skills.len(),
            breakpoint = config.layout.breakpoint_px,
            "Configuration loaded"
        );

        match galaxy_web::app::run(config) {
            AppExit::Success => Ok(()),
            AppExit::Error(code) => anyhow::bail!("Skill galaxy exited with code {}", code),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::main()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
