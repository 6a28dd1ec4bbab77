//! Application settings loaded via OrthoConfig.
//!
//! Values come from `APP_*` environment variables, configuration files and
//! command-line flags, layered by `ortho_config`.

use std::env;
use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

/// Address the HTTP server binds to unless overridden.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Plain environment variable consulted when `APP_DATABASE_URL` is unset.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Errors raised while resolving settings into runtime values.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The layered loader rejected its inputs.
    #[error("failed to load settings: {message}")]
    Load {
        /// Loader diagnostic.
        message: String,
    },
    /// Neither `APP_DATABASE_URL` nor `DATABASE_URL` holds a value.
    #[error("database URL is not configured; set APP_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    /// The bind address is not a socket address.
    #[error("invalid bind address `{value}`: {source}")]
    InvalidBindAddr {
        /// Offending value.
        value: String,
        /// Parser failure.
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Startup configuration for the users service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
    /// Insert the example users when the table is empty.
    #[ortho_config(default = false)]
    pub seed_example_users: bool,
}

impl AppSettings {
    /// Load settings from the process environment and arguments.
    ///
    /// # Errors
    /// Returns [`SettingsError::Load`] when a layer cannot be parsed.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::load_from_iter(env::args_os()).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })
    }

    /// Resolve the database URL, falling back to `DATABASE_URL`.
    ///
    /// Blank values count as missing.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingDatabaseUrl`] when neither source is set.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        non_blank(self.database_url.clone())
            .or_else(|| non_blank(env::var(DATABASE_URL_ENV).ok()))
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Parse the configured bind address, defaulting to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Errors
    /// Returns [`SettingsError::InvalidBindAddr`] for malformed addresses.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self
            .bind_addr
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and resolution.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "APP_DATABASE_URL",
        "APP_BIND_ADDR",
        "APP_RUN_MIGRATIONS",
        "APP_SEED_EXAMPLE_USERS",
        DATABASE_URL_ENV,
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("crud-backend")]).expect("config should load")
    }

    fn cleared_env_with(
        overrides: &[(&'static str, &str)],
    ) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_environment_is_empty() {
        let _guard = lock_env(cleared_env_with(&[]));

        let settings = load_from_empty_args();

        assert!(settings.run_migrations);
        assert!(!settings.seed_example_users);
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
        assert!(matches!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        ));
    }

    #[rstest]
    fn prefixed_environment_overrides_are_respected() {
        let _guard = lock_env(cleared_env_with(&[
            ("APP_DATABASE_URL", "postgres://app@localhost/users"),
            ("APP_BIND_ADDR", "127.0.0.1:9000"),
            ("APP_RUN_MIGRATIONS", "false"),
            ("APP_SEED_EXAMPLE_USERS", "true"),
            (DATABASE_URL_ENV, "postgres://ignored@localhost/other"),
        ]));

        let settings = load_from_empty_args();

        assert!(!settings.run_migrations);
        assert!(settings.seed_example_users);
        assert_eq!(
            settings.database_url().expect("configured URL"),
            "postgres://app@localhost/users"
        );
        assert_eq!(
            settings.bind_addr().expect("configured address").port(),
            9000
        );
    }

    #[rstest]
    #[case::unset(None)]
    #[case::blank(Some("   "))]
    fn plain_database_url_is_the_fallback(#[case] prefixed: Option<&str>) {
        let mut overrides = vec![(DATABASE_URL_ENV, "postgres://plain@localhost/users")];
        if let Some(value) = prefixed {
            overrides.push(("APP_DATABASE_URL", value));
        }
        let _guard = lock_env(cleared_env_with(&overrides));

        let settings = load_from_empty_args();

        assert_eq!(
            settings.database_url().expect("fallback URL"),
            "postgres://plain@localhost/users"
        );
    }

    #[rstest]
    #[case("localhost")]
    #[case("0.0.0.0:notaport")]
    fn malformed_bind_addresses_are_rejected(#[case] value: &str) {
        let settings = AppSettings {
            database_url: None,
            bind_addr: Some(value.to_owned()),
            run_migrations: true,
            seed_example_users: false,
        };

        let err = settings.bind_addr().expect_err("invalid address");

        assert!(matches!(err, SettingsError::InvalidBindAddr { .. }));
        assert!(err.to_string().contains(value));
    }
}
