use anyhow::{Context, Result};
use jury_client::{ClientConfig, JuryIdentity, Session};

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub access_token: String,
    pub jury_id: Option<i64>,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
}

/// Values given on the command line; they win over the environment.
#[derive(Debug, Clone, clap::Args)]
pub struct Overrides {
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(long, global = true)]
    pub access_token: Option<String>,

    #[arg(long, global = true)]
    pub jury_id: Option<i64>,
}

impl Config {
    /// Environment values with command-line overrides applied on top.
    pub fn from_env(overrides: &Overrides) -> Result<Self> {
        let api_url = match &overrides.api_url {
            Some(url) => url.clone(),
            None => std::env::var("API_URL").context("Cannot load API_URL env variable")?,
        };
        let access_token = match &overrides.access_token {
            Some(token) => token.clone(),
            None => std::env::var("ACCESS_TOKEN")
                .context("Cannot load ACCESS_TOKEN env variable")?,
        };
        let jury_id = match overrides.jury_id {
            Some(id) => Some(id),
            None => optional_var("JURY_ID")
                .map(|v| v.parse())
                .transpose()
                .context("JURY_ID must be a number")?,
        };

        Ok(Self {
            api_url,
            access_token,
            jury_id,
            request_timeout_secs: optional_var("REQUEST_TIMEOUT_SECS")
                .map(|v| v.parse())
                .transpose()
                .context("REQUEST_TIMEOUT_SECS must be a number")?
                .unwrap_or(30),
            max_retries: optional_var("MAX_RETRIES")
                .map(|v| v.parse())
                .transpose()
                .context("MAX_RETRIES must be a number")?
                .unwrap_or(2),
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_url.clone())
            .with_timeout_secs(self.request_timeout_secs)
            .with_max_retries(self.max_retries)
    }

    pub fn session(&self) -> Session {
        let session = Session::new(self.access_token.clone());
        match self.jury_id {
            Some(id) => session.with_jury(JuryIdentity { id, name: None }),
            None => session,
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
