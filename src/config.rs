use serde::Deserialize;

pub const ENV_PREFIX: &str = "LOG_INGEST";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub file_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub logs: LogSettings,
}

impl ServerConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from("config")
    }

    /// Defaults, then the optional file `name` (any extension the `config`
    /// crate knows), then `LOG_INGEST__SECTION__KEY` environment variables.
    pub fn load_from(name: &str) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .set_default("server.bind_addr", "0.0.0.0:3000")?
            .set_default("logs.file_path", "logs/combined.log")?
            .add_source(config::File::with_name(name).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<ServerConfig>()?;

        Ok(settings)
    }
}
