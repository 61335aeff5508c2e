use crate::errors::{ErrorKind, FrotaError, FrotaResult};
use std::time::Duration;

/// Default endpoint used when nothing else is configured.
pub const DEFAULT_URI: &str = "mongodb://localhost:27017";
/// Default logical database name.
pub const DEFAULT_DATABASE: &str = "frota";

pub const ENV_URI: &str = "FROTA_MONGODB_URI";
pub const ENV_DATABASE: &str = "FROTA_DATABASE";
pub const ENV_CONNECT_TIMEOUT_MS: &str = "FROTA_CONNECT_TIMEOUT_MS";
pub const ENV_SERVER_SELECTION_TIMEOUT_MS: &str = "FROTA_SERVER_SELECTION_TIMEOUT_MS";
pub const ENV_APP_NAME: &str = "FROTA_APP_NAME";

const INVALID_DATABASE_CHARS: &[char] = &['/', '\\', '.', ' ', '"', '$', '\0'];
const MAX_DATABASE_NAME_LEN: usize = 63;

/// Connection settings for a document store.
///
/// Holds the endpoint and the logical database name, plus the driver timeouts
/// that are passed through unchanged. A `StoreConfig` is immutable once built;
/// use [StoreConfig::builder] or [StoreConfig::from_env] to create one.
///
/// # Examples
///
/// ```rust
/// use frota::config::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::builder()
///     .uri("mongodb://db.internal:27017")
///     .database("fleet")
///     .server_selection_timeout(Duration::from_secs(2))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.database(), "fleet");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    uri: String,
    database: String,
    app_name: Option<String>,
    connect_timeout: Option<Duration>,
    server_selection_timeout: Option<Duration>,
    verify_connection: bool,
}

impl StoreConfig {
    /// Creates a builder seeded with [DEFAULT_URI] and [DEFAULT_DATABASE].
    #[inline]
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::new()
    }

    /// Builds a configuration from `FROTA_*` environment variables, falling
    /// back to the defaults for anything unset.
    pub fn from_env() -> FrotaResult<StoreConfig> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> FrotaResult<StoreConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = StoreConfigBuilder::new();
        if let Some(uri) = lookup(ENV_URI) {
            builder = builder.uri(&uri);
        }
        if let Some(database) = lookup(ENV_DATABASE) {
            builder = builder.database(&database);
        }
        if let Some(app_name) = lookup(ENV_APP_NAME) {
            builder = builder.app_name(&app_name);
        }
        if let Some(millis) = lookup(ENV_CONNECT_TIMEOUT_MS) {
            builder = builder.connect_timeout(parse_millis(ENV_CONNECT_TIMEOUT_MS, &millis)?);
        }
        if let Some(millis) = lookup(ENV_SERVER_SELECTION_TIMEOUT_MS) {
            builder = builder
                .server_selection_timeout(parse_millis(ENV_SERVER_SELECTION_TIMEOUT_MS, &millis)?);
        }
        builder.build()
    }

    #[inline]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    #[inline]
    pub fn database(&self) -> &str {
        &self.database
    }

    #[inline]
    pub fn app_name(&self) -> Option<&str> {
        self.app_name.as_deref()
    }

    #[inline]
    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout
    }

    #[inline]
    pub fn server_selection_timeout(&self) -> Option<Duration> {
        self.server_selection_timeout
    }

    /// Whether a store should round-trip to the server while connecting, so
    /// that an unreachable endpoint fails at construction instead of on the
    /// first operation.
    #[inline]
    pub fn verify_connection(&self) -> bool {
        self.verify_connection
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            uri: DEFAULT_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            app_name: None,
            connect_timeout: None,
            server_selection_timeout: None,
            verify_connection: true,
        }
    }
}

/// Fluent builder for [StoreConfig].
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    #[inline]
    pub fn new() -> StoreConfigBuilder {
        StoreConfigBuilder {
            config: StoreConfig::default(),
        }
    }

    pub fn uri(mut self, uri: &str) -> Self {
        self.config.uri = uri.trim().to_string();
        self
    }

    pub fn database(mut self, database: &str) -> Self {
        self.config.database = database.trim().to_string();
        self
    }

    pub fn app_name(mut self, app_name: &str) -> Self {
        self.config.app_name = Some(app_name.to_string());
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    pub fn server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.config.server_selection_timeout = Some(timeout);
        self
    }

    pub fn verify_connection(mut self, verify: bool) -> Self {
        self.config.verify_connection = verify;
        self
    }

    /// Validates the settings and returns the finished configuration.
    pub fn build(self) -> FrotaResult<StoreConfig> {
        if self.config.uri.is_empty() {
            log::error!("Store uri cannot be empty");
            return Err(FrotaError::new(
                "Store uri cannot be empty",
                ErrorKind::ValidationError,
            ));
        }
        validate_database_name(&self.config.database)?;
        Ok(self.config)
    }
}

impl Default for StoreConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_database_name(name: &str) -> FrotaResult<()> {
    if name.is_empty() {
        log::error!("Database name cannot be empty");
        return Err(FrotaError::new(
            "Database name cannot be empty",
            ErrorKind::ValidationError,
        ));
    }

    if name.len() > MAX_DATABASE_NAME_LEN {
        log::error!("Database name {} is longer than {} bytes", name, MAX_DATABASE_NAME_LEN);
        return Err(FrotaError::new(
            &format!("Database name {} is too long", name),
            ErrorKind::ValidationError,
        ));
    }

    if name.contains(INVALID_DATABASE_CHARS) {
        log::error!("{} is not a valid database name", name);
        return Err(FrotaError::new(
            &format!("{} is not a valid database name", name),
            ErrorKind::ValidationError,
        ));
    }
    Ok(())
}

fn parse_millis(variable: &str, value: &str) -> FrotaResult<Duration> {
    let millis = value.trim().parse::<u64>().map_err(|err| {
        log::error!("{} must be a number of milliseconds, got {}", variable, value);
        FrotaError::new_with_cause(
            &format!("{} must be a number of milliseconds", variable),
            ErrorKind::ValidationError,
            err.into(),
        )
    })?;
    Ok(Duration::from_millis(millis))
}
