use serde::Deserialize;

use crate::error::Result;

#[derive(Debug, PartialEq, Deserialize)]
pub struct Config {
    /// Whether qualifiers are pushed down to the external source at all.
    pub filter_pushdown: bool,
    pub log_level: String,
}

impl Config {
    pub fn new(file: &str) -> Result<Config> {
        let mut cfg = config::Config::builder()
            .set_default("filter_pushdown", true)?
            .set_default("log_level", "info")?;
        if !file.is_empty() {
            cfg = cfg.add_source(config::File::with_name(file))
        }
        cfg = cfg.add_source(config::Environment::with_prefix("FILTERPUSH"));
        Ok(cfg.build()?.try_deserialize()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config { filter_pushdown: true, log_level: "info".to_string() }
    }
}
