//! Configuration for Products API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::path::PathBuf;

pub use core_config::Environment;

/// Directory uploaded product images are written to
pub const DEFAULT_STATIC_PRODUCTS_DIR: &str = "./static/products";

/// Where uploaded product images live
#[derive(Clone, Debug)]
pub struct AssetConfig {
    pub products_dir: PathBuf,
}

impl FromEnv for AssetConfig {
    /// - STATIC_PRODUCTS_DIR: defaults to ./static/products
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            products_dir: env_or_default("STATIC_PRODUCTS_DIR", DEFAULT_STATIC_PRODUCTS_DIR).into(),
        })
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub database: PostgresConfig,
    pub server: ServerConfig,
    pub assets: AssetConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let server = ServerConfig::from_env()?;
        let assets = AssetConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            database,
            server,
            assets,
            environment,
        })
    }
}
