use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use crate::errors::BrowserError;
use crate::types::AppState;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HOST: &str = "0.0.0.0";

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Browse a directory of photos and videos over HTTP", long_about = None)]
pub struct Args {
    /// Root directory of the file browser
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub root: PathBuf,

    /// Directory holding icons and other static assets
    #[arg(long, value_name = "DIR", default_value = "assets")]
    pub assets: PathBuf,

    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,
}

/// Application configuration, fixed at startup
pub struct Config {
    pub root_dir: Arc<PathBuf>,
    pub assets_dir: Arc<PathBuf>,
    pub port: u16,
    pub host: String,
}

impl Config {
    /// Build the configuration from parsed arguments.
    ///
    /// The root is canonicalized so every resolved path shares its prefix.
    pub fn from_args(args: Args) -> Result<Self, BrowserError> {
        let root_dir = args.root.canonicalize().map_err(|e| {
            log::error!("Root directory {:?} is not accessible: {}", args.root, e);
            BrowserError::NotFound
        })?;
        if !root_dir.is_dir() {
            log::error!("Root {:?} is not a directory", root_dir);
            return Err(BrowserError::NotFound);
        }
        Ok(Self {
            root_dir: Arc::new(root_dir),
            assets_dir: Arc::new(args.assets),
            port: args.port,
            host: args.host,
        })
    }

    /// Get the address string for binding
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Shared handler state derived from this configuration
    pub fn state(&self) -> AppState {
        AppState {
            root_dir: Arc::clone(&self.root_dir),
            assets_dir: Arc::clone(&self.assets_dir),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_the_original_port() {
        let args = Args::parse_from(["vitrine"]);
        assert_eq!(args.port, 8000);
        assert_eq!(args.root, PathBuf::from("."));
    }

    #[test]
    fn from_args_canonicalizes_root() {
        let tmp = tempfile::TempDir::new().unwrap();
        let args = Args::parse_from(["vitrine", "--root", tmp.path().to_str().unwrap(), "-p", "9000"]);
        let config = Config::from_args(args).unwrap();
        assert_eq!(*config.root_dir, tmp.path().canonicalize().unwrap());
        assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    }

    #[test]
    fn missing_root_is_rejected() {
        let args = Args::parse_from(["vitrine", "-r", "/definitely/not/here"]);
        assert!(matches!(Config::from_args(args), Err(BrowserError::NotFound)));
    }
}
