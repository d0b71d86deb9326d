use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_DATABASE_PATH: &str = "mail.db";
pub const DEFAULT_LETTERS_DIR: &str = "letters";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub port: u16,
    pub database_path: String,
    pub letters_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database_path: DEFAULT_DATABASE_PATH.into(),
            letters_dir: DEFAULT_LETTERS_DIR.into(),
        }
    }
}

impl Settings {
    /// Defaults, then `letterbox.toml` if present, then `PORT`,
    /// `DATABASE_PATH` and `LETTERS_DIR` from the environment.
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("database_path", DEFAULT_DATABASE_PATH)?
            .set_default("letters_dir", DEFAULT_LETTERS_DIR)?
            .add_source(
                File::with_name("letterbox.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        config.try_deserialize()
    }

    pub fn load() -> Self {
        Self::new().unwrap_or_else(|err| {
            warn!("Invalid configuration, using defaults: {err}");
            Self::default()
        })
    }

    pub fn address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
