// Configuration module entry point
// Builds the immutable server configuration from positional arguments, environment and defaults

mod state;
mod types;

use path_absolutize::Absolutize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig};

pub use config::ConfigError;

/// Environment variable prefix, e.g. `STATIC_ROOT_SERVER__WORKERS=8`
const ENV_PREFIX: &str = "STATIC_ROOT";

impl Config {
    /// Load configuration from the process arguments (program name already skipped).
    ///
    /// Usage: `static_root [port] [root_dir]`. Positional arguments win over
    /// `STATIC_ROOT_*` environment variables, which win over built-in defaults.
    pub fn from_args<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let port = args.next().map(|arg| parse_port(&arg)).transpose()?;
        let root = args.next().map(PathBuf::from);

        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.root", ".")?
            .set_default("server.workers", 4)?
            .set_default("logging.level", "info")?
            .set_override_option("server.port", port.map(i64::from))?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        if let Some(root) = root {
            cfg.server.root = root;
        }
        cfg.server.root = normalize_root(&cfg.server.root)?;

        if cfg.server.workers == 0 {
            return Err(ConfigError::Message(
                "server.workers must be at least 1".to_string(),
            ));
        }
        if cfg.performance.max_connections == Some(0) {
            return Err(ConfigError::Message(
                "performance.max_connections must be at least 1".to_string(),
            ));
        }

        Ok(cfg)
    }

    /// Connections served at once; `max_connections` if set, else one per worker
    pub fn max_concurrency(&self) -> usize {
        self.performance
            .max_connections
            .map_or(self.server.workers, |max| {
                usize::try_from(max).unwrap_or(usize::MAX)
            })
            .clamp(1, tokio::sync::Semaphore::MAX_PERMITS)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|e| format!("Invalid host '{}': {e}", self.server.host))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

fn parse_port(arg: &str) -> Result<u16, ConfigError> {
    arg.parse()
        .map_err(|e| ConfigError::Message(format!("Invalid port '{arg}': {e}")))
}

/// Make the root absolute and resolve `.`/`..` without touching the filesystem
fn normalize_root(root: &std::path::Path) -> Result<PathBuf, ConfigError> {
    root.absolutize()
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| {
            ConfigError::Message(format!(
                "Cannot resolve root directory '{}': {e}",
                root.display()
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::from_args(Vec::new()).unwrap();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.workers, 4);
        assert!(cfg.server.root.is_absolute());
        assert_eq!(
            cfg.server.root,
            std::env::current_dir().unwrap().absolutize().unwrap()
        );
        assert!(cfg.performance.max_connections.is_none());
    }

    #[test]
    fn test_positional_port_and_root() {
        let cfg = Config::from_args(args(&["9090", "/srv/www/../www/./site"])).unwrap();
        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.root, PathBuf::from("/srv/www/site"));
    }

    #[test]
    fn test_relative_root_becomes_absolute() {
        let cfg = Config::from_args(args(&["8000", "public"])).unwrap();
        assert!(cfg.server.root.is_absolute());
        assert!(cfg.server.root.ends_with("public"));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let err = Config::from_args(args(&["http"])).unwrap_err();
        assert!(err.to_string().contains("Invalid port 'http'"));

        assert!(Config::from_args(args(&["70000"])).is_err());
        assert!(Config::from_args(args(&["-1"])).is_err());
    }

    #[test]
    fn test_max_concurrency() {
        let mut cfg = Config::from_args(Vec::new()).unwrap();
        assert_eq!(cfg.max_concurrency(), 4);

        cfg.server.workers = 2;
        assert_eq!(cfg.max_concurrency(), 2);

        cfg.performance.max_connections = Some(64);
        assert_eq!(cfg.max_concurrency(), 64);

        cfg.performance.max_connections = Some(u64::MAX);
        assert_eq!(cfg.max_concurrency(), tokio::sync::Semaphore::MAX_PERMITS);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = Config::from_args(args(&["8123"])).unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8123);
        assert!(addr.ip().is_unspecified());
    }

    #[test]
    fn test_invalid_host() {
        let mut cfg = Config::from_args(Vec::new()).unwrap();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.get_socket_addr().is_err());
    }
}
