//! Server command - start the HTTP API server
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: (delegated to hextri-server crate)
//! - Level 4: configuration validation

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use hextri_core::Threshold;
use hextri_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Directory containing static files for the UI
    #[arg(long, default_value = "hextri/ui")]
    pub static_dir: PathBuf,

    /// Directory to save the board in (in-memory only if omitted)
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Flag cells covered by exactly three sources instead of three or more
    #[arg(long)]
    pub exact: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs) -> Result<()> {
    let config = configure_server(&args)?;

    tracing::info!(
        "Starting HEXTRI server on port {} ({:?})",
        config.port,
        config.threshold
    );

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        state_dir: args.state_dir.clone(),
        threshold: threshold_for(args.exact),
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Intersection rule selected by the `--exact` flag
pub fn threshold_for(exact: bool) -> Threshold {
    if exact {
        Threshold::exact()
    } else {
        Threshold::default()
    }
}

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but may not serve files.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_server_defaults() {
        let args = ServerArgs {
            port: 8003,
            static_dir: PathBuf::from("test_static"),
            state_dir: None,
            exact: false,
        };

        let config = configure_server(&args).unwrap();
        assert_eq!(config.port, 8003);
        assert_eq!(config.static_dir, "test_static");
        assert_eq!(config.threshold, Threshold::AtLeast(3));
        assert!(config.state_dir.is_none());
    }

    #[test]
    fn test_configure_server_exact() {
        let args = ServerArgs {
            port: 9000,
            static_dir: PathBuf::from("test_static"),
            state_dir: Some(PathBuf::from("saved")),
            exact: true,
        };

        let config = configure_server(&args).unwrap();
        assert_eq!(config.threshold, Threshold::Exactly(3));
        assert_eq!(config.state_dir, Some(PathBuf::from("saved")));
    }

    #[test]
    fn test_validate_static_dir_nonexistent() {
        // Should not error, just warn
        let result = validate_static_dir(Path::new("/nonexistent/path"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_static_dir_rejects_file() {
        let file = std::env::temp_dir().join(format!("hextri-static-{}", std::process::id()));
        std::fs::write(&file, "x").unwrap();
        assert!(validate_static_dir(&file).is_err());
        let _ = std::fs::remove_file(&file);
    }
}
