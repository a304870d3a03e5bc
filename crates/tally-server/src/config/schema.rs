use serde::Deserialize;
use tally_core::error::{Result, TallyError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub store: StoreSection,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            server: ServerSection::default(),
            store: StoreSection::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::Config(format!(
                "unsupported config version: {}",
                self.version
            )));
        }
        self.server.validate()?;
        self.store.validate()?;
        Ok(())
    }

    /// The required store credential. Only call after `validate()`.
    pub fn connection_string(&self) -> &str {
        self.store.connection_string.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.listen.is_empty() {
            return Err(TallyError::Config("server.listen must not be empty".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Opaque credential locating the table store. Never read from the
    /// config file; populated from `TALLY_CONNECTION_STRING`.
    #[serde(skip)]
    pub connection_string: Option<String>,

    #[serde(default = "default_table_name")]
    pub table_name: String,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            connection_string: None,
            table_name: default_table_name(),
        }
    }
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        match self.connection_string.as_deref() {
            None | Some("") => {
                return Err(TallyError::Config(format!(
                    "{} is required",
                    super::ENV_CONNECTION_STRING
                )))
            }
            Some(_) => {}
        }
        if self.table_name.is_empty() {
            return Err(TallyError::Config("store.table_name must not be empty".into()));
        }
        Ok(())
    }
}

fn default_version() -> u32 {
    1
}
fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_table_name() -> String {
    "counter".into()
}
