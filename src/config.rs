use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::Deserialize;

/// Everything configurable is fixed at startup; there are no runtime
/// knobs beyond these.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub page_count: u32,
    pub schedule_at: String,
    pub db_path: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let cfg = config::Config::builder()
            .set_default("base_url", "https://www.actuarylist.com/")?
            .set_default("page_count", 19)?
            .set_default("schedule_at", "09:00")?
            .set_default("db_path", "data/jobs.sqlite")?
            .add_source(config::Environment::with_prefix("SCRAPER").try_parsing(true))
            .build()?;
        Ok(cfg.try_deserialize()?)
    }

    /// Wall-clock time of day for the daily trigger.
    pub fn schedule_time(&self) -> Result<NaiveTime> {
        NaiveTime::parse_from_str(&self.schedule_at, "%H:%M").with_context(|| {
            format!("invalid schedule_at `{}` (expected HH:MM)", self.schedule_at)
        })
    }
}
