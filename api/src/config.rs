//! Start-up configuration loading
//!
//! Layers, later ones winning:
//! 1. per-environment defaults from [`AppConfig::for_environment`]
//! 2. optional `config.<environment>.toml` in the working directory
//! 3. `PROFILE_*` variables, nested with `__` (`PROFILE_SERVER__PORT=8080`)
//! 4. the conventional `DATABASE_URL` / `PG*` and `JWT_SECRET` / `JWT_KEY`

use ::config::{Config, ConfigError, Environment as EnvSource, File};
use ps_shared::config::{AppConfig, DatabaseConfig, Environment, JwtConfig};

/// Prefix of the structured environment overrides
pub const ENV_PREFIX: &str = "PROFILE";

/// Load configuration for the environment named in `ENVIRONMENT`
pub fn load() -> Result<AppConfig, ConfigError> {
    load_with(Environment::from_env(), |key| std::env::var(key).ok())
}

/// Load configuration for `environment`, resolving conventional variables
/// through `lookup`
pub fn load_with<F>(environment: Environment, lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = AppConfig::for_environment(environment);

    let mut config: AppConfig = Config::builder()
        .add_source(Config::try_from(&defaults)?)
        .add_source(File::with_name(&environment.config_file()).required(false))
        .add_source(
            EnvSource::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;

    apply_conventional_variables(&mut config, &lookup);

    config.validate().map_err(ConfigError::Message)?;
    Ok(config)
}

fn apply_conventional_variables<F>(config: &mut AppConfig, lookup: &F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = DatabaseConfig::url_from_lookup(lookup) {
        config.database.url = url;
    }
    if let Some(secret) = JwtConfig::secret_from_lookup(lookup) {
        config.auth.jwt.secret = secret;
    }
}
