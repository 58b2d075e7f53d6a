use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Where prediction records live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Database {
    Memory,
    File(PathBuf),
}

/// Service configuration, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub model_path: PathBuf,
    pub database: Database,
    pub static_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let host = match lookup("HOST") {
            Some(h) => h
                .parse()
                .map_err(|e| eyre::eyre!("invalid HOST {h:?}: {e}"))?,
            None => IpAddr::from([0, 0, 0, 0]),
        };
        let port = match lookup("PORT") {
            Some(p) => p
                .parse()
                .map_err(|e| eyre::eyre!("invalid PORT {p:?}: {e}"))?,
            None => 5000,
        };
        let model_path = lookup("MODEL_PATH")
            .unwrap_or_else(|| "full_linear_rf_model.json".to_string())
            .into();
        let database = parse_database_url(
            &lookup("DATABASE_URL").unwrap_or_else(|| "predictions.db".to_string()),
        );
        let static_dir = lookup("STATIC_DIR")
            .unwrap_or_else(|| "build".to_string())
            .into();

        Ok(Self {
            host,
            port,
            model_path,
            database,
            static_dir,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Accepts a bare path, `sqlite://path`, `sqlite:path`, or `:memory:`.
pub fn parse_database_url(url: &str) -> Database {
    let path = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
        .unwrap_or(url);

    if path == ":memory:" {
        Database::Memory
    } else {
        Database::File(PathBuf::from(path))
    }
}
