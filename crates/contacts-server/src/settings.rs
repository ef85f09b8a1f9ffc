//! Runtime configuration.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML file,
//! `CONTACTS_*` environment variables, the bare `PORT` / `DATABASE_URL`
//! variables, and finally the `--port` command-line flag.

use std::{env, path::Path};

use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// Store location: a path, `sqlite://<path>` or `:memory:`.
  pub database_url:    String,
  /// `production` hides panic details from clients.
  pub environment:     String,
  /// Base URLs advertised in the OpenAPI document.
  #[serde(default)]
  pub servers:         Vec<String>,
  pub cors_permissive: bool,
}

impl ServerConfig {
  /// Load configuration from every source.
  pub fn load(path: &Path, port: Option<u16>) -> Result<Self, ConfigError> {
    base(path)?
      .add_source(Environment::with_prefix("CONTACTS"))
      .set_override_option("port", env::var("PORT").ok())?
      .set_override_option("database_url", env::var("DATABASE_URL").ok())?
      .set_override_option("port", port.map(i64::from))?
      .build()?
      .try_deserialize()
  }

  /// Defaults plus the TOML file only; ignores the process environment.
  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    base(path)?.build()?.try_deserialize()
  }

  pub fn is_production(&self) -> bool {
    self.environment.eq_ignore_ascii_case("production")
  }

  pub fn bind_address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

fn base(path: &Path) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
  Ok(
    Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 3000_i64)?
      .set_default("database_url", "contacts.db")?
      .set_default("environment", "development")?
      .set_default("cors_permissive", true)?
      .add_source(File::from(path).required(false)),
  )
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(location: &str) -> String {
  if let Some(rest) = location.strip_prefix("~/")
    && let Ok(home) = env::var("HOME")
  {
    return format!("{}/{rest}", home.trim_end_matches('/'));
  }
  location.to_owned()
}
