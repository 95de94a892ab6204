//! Configuration management for the EPUB Reader server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 3003;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Base URL written into manifests (self links, reading order)
    pub public_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryConfig {
    /// Directory holding the EPUB files and other static assets
    pub public_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
                public_base_url: format!("http://localhost:{}", DEFAULT_PORT),
            },
            library: LibraryConfig {
                public_dir: PathBuf::from("./public"),
            },
        }
    }
}

impl Config {
    /// Read from the environment, keeping defaults for unset or invalid keys
    pub fn from_env() -> Self {
        let port = env::var("SERVER_PORT")
            .ok()
            .map_or(DEFAULT_PORT, |value| parse_port(&value));

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
                public_base_url: env::var("PUBLIC_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or_else(|_| format!("http://localhost:{}", port)),
            },
            library: LibraryConfig {
                public_dir: env::var("PUBLIC_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from("./public")),
            },
        }
    }

    /// Socket address string the listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_port(value: &str) -> u16 {
    value.trim().parse().unwrap_or_else(|_| {
        tracing::warn!(value, default = DEFAULT_PORT, "Invalid SERVER_PORT, using default");
        DEFAULT_PORT
    })
}
