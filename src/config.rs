use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use url::Url;

const CONFIG_FILE: &str = "roster";
const ENV_PREFIX: &str = "ROSTER";

/// Process-wide settings: built-in defaults, then `roster.toml`, then `ROSTER_*` env vars.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub chapter_path: String,
    pub chapter_id: String,
    pub region_id: String,
    pub website_id: String,
    pub website_type: String,
    pub locale: String,
    pub locale_id: u32,
    pub language_name: String,
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
    pub output: String,
    pub debug_listing: String,
    pub title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: "https://bni-riviereliguri.it".into(),
            chapter_path: "17-riviere-liguri-corsaro-nero".into(),
            chapter_id: "36677".into(),
            region_id: "13076".into(),
            website_id: "20473".into(),
            website_type: "3".into(),
            locale: "it".into(),
            locale_id: 14,
            language_name: "Italiano".into(),
            request_delay_ms: 400,
            timeout_secs: 30,
            output: "bni_sanremo_members.html".into(),
            debug_listing: "debug_list.html".into(),
            title: "BNI Sanremo – Corsaro Nero | Membri".into(),
        }
    }
}

impl Settings {
    /// Load settings. `file` overrides the default `roster.{toml,json,yaml}` lookup
    /// and must exist when given.
    pub fn load(file: Option<&str>) -> Result<Self> {
        let source = match file {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(CONFIG_FILE).required(false),
        };
        let settings = Config::builder()
            .add_source(source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize::<Settings>()
            .context("Invalid configuration")?;
        Ok(settings)
    }

    pub fn site(&self) -> Result<Site> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("base_url is not a valid URL: {}", self.base_url))?;
        Ok(Site {
            base,
            chapter_path: self.chapter_path.trim_matches('/').to_string(),
            locale: self.locale.clone(),
        })
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Public member list page; sent as Referer and inside the languages payload.
    pub fn memberlist_page(&self) -> String {
        format!(
            "{}/{}/{}/memberlist",
            self.base_url.trim_end_matches('/'),
            self.chapter_path.trim_matches('/'),
            self.locale
        )
    }
}

/// The slice of configuration the normalizer needs: where relative URLs resolve
/// and how public detail links are built.
#[derive(Debug, Clone)]
pub struct Site {
    pub base: Url,
    pub chapter_path: String,
    pub locale: String,
}

impl Site {
    /// Resolve a `src`/`href` against the base origin. Absolute URLs pass through.
    pub fn resolve(&self, raw: &str) -> Option<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        self.base.join(raw).ok().map(String::from)
    }

    pub fn detail_url(&self, query_pair: &str) -> String {
        let origin = self.base.as_str().trim_end_matches('/');
        format!(
            "{}/{}/{}/memberdetails?{}",
            origin, self.chapter_path, self.locale, query_pair
        )
    }
}
