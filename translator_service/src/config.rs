// Copyright (c) 2024-present Sonatype, Inc. All rights reserved.
// "Sonatype" is a trademark of Sonatype, Inc.

use config::{Config, Environment};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct AppConfig {
    pub app_port: u16,
    pub downstream_url: String,
    /// Prefix for the `url` reported in error bodies, e.g. when running behind a proxy
    pub public_base_url: Option<String>,
}

impl AppConfig {
    pub fn load() -> eyre::Result<Self> {
        Self::from_environment(Environment::with_prefix("translator_service"))
    }

    fn from_environment(env_source: Environment) -> eyre::Result<Self> {
        let app_config = Config::builder()
            .set_default("app_port", 2727_u16)?
            .set_default("downstream_url", "http://localhost:8081")?
            .add_source(env_source.try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(app_config)
    }
}
