// Configuration loading: defaults, optional config.toml, then APP_* environment variables

use anyhow::{Result, bail};
use config::{Config, Environment, File};
use serde::Deserialize;

// Values shipped in the storefront's .env template; treated as "not configured".
const PLACEHOLDERS: [&str; 2] = ["your-supabase-url", "your-supabase-anon-key"];

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server_address: String,
    pub inventory_path: String,
    pub page_size: usize,
    pub page_size_max: usize,

    // Hosted identity provider (Supabase)
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub supabase_jwt_secret: Option<String>,
    pub session_cookie: String,
    pub protected_routes: Vec<String>,
}

impl Settings {
    pub fn new() -> Result<Self> {
        dotenv::dotenv().ok(); // Load .env file if present

        let builder = Self::with_defaults(Config::builder())?
            .add_source(File::with_name("config").required(false))
            // e.g. APP_SERVER_ADDRESS, APP_PAGE_SIZE, APP_SUPABASE_JWT_SECRET
            .add_source(
                Environment::with_prefix("APP")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("protected_routes"),
            );

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(builder
            .set_default("server_address", "127.0.0.1:3000")?
            .set_default("inventory_path", "data/vehicles.json")?
            .set_default("page_size", 12)?
            .set_default("page_size_max", 48)?
            .set_default("session_cookie", "sb-access-token")?
            .set_default("protected_routes", vec!["/dashboard"])?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.page_size_max < self.page_size {
            bail!(
                "page_size_max ({}) must not be smaller than page_size ({})",
                self.page_size_max,
                self.page_size
            );
        }

        if let Some(url) = &self.supabase_url {
            check_not_placeholder("supabase_url", url)?;
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                bail!("supabase_url must be an http(s) URL, e.g. https://project-ref.supabase.co");
            }
        }
        if let Some(key) = &self.supabase_anon_key {
            check_not_placeholder("supabase_anon_key", key)?;
        }
        if let Some(secret) = &self.supabase_jwt_secret {
            check_not_placeholder("supabase_jwt_secret", secret)?;
        }
        Ok(())
    }
}

fn check_not_placeholder(name: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("undefined")
        || PLACEHOLDERS.contains(&trimmed)
    {
        bail!(
            "{} is empty, a placeholder, or the string \"undefined\"; set a real value from the Supabase project settings",
            name
        );
    }
    Ok(())
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server_address: "127.0.0.1:3000".to_string(),
            inventory_path: "data/vehicles.json".to_string(),
            page_size: 12,
            page_size_max: 48,
            supabase_url: None,
            supabase_anon_key: None,
            supabase_jwt_secret: None,
            session_cookie: "sb-access-token".to_string(),
            protected_routes: vec!["/dashboard".to_string()],
        }
    }
}
