//! Process-wide configuration, loaded once at startup and never mutated.

pub mod thresholds;

pub use thresholds::{PillarThresholds, ThresholdTable};

use std::env;
use std::path::Path;
use std::time::Duration;

use url::Url;

use crate::errors::EngineError;
use crate::models::pillar::Pillar;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_SCORER_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_BATCH_CONCURRENCY: usize = 8;

/// Deployment environment name (`ENVIRONMENT`, defaults to "sandbox")
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

pub fn is_production(environment: &str) -> bool {
    matches!(environment, "production" | "prod")
}

/// Settings the aggregation engine needs at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Uniform per-call deadline for every pillar's scorer
    pub scorer_timeout: Duration,
    pub thresholds: ThresholdTable,
    /// Applicants of one batch evaluated at the same time (each costs three scorer calls)
    pub batch_concurrency: usize,
}

impl EngineConfig {
    pub fn new(scorer_timeout: Duration, thresholds: ThresholdTable) -> Self {
        Self {
            scorer_timeout,
            thresholds,
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }

    pub fn with_batch_concurrency(mut self, batch_concurrency: usize) -> Self {
        self.batch_concurrency = batch_concurrency;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.scorer_timeout.is_zero() {
            return Err(EngineError::config(
                "SCORER_TIMEOUT_MS",
                "scorer timeout must be greater than zero",
            ));
        }
        if self.batch_concurrency == 0 {
            return Err(EngineError::config(
                "BATCH_CONCURRENCY",
                "batch concurrency must be greater than zero",
            ));
        }
        self.thresholds.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(
            Duration::from_millis(DEFAULT_SCORER_TIMEOUT_MS),
            ThresholdTable::default(),
        )
    }
}

/// Base URLs of the three scoring collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerEndpoints {
    pub credit: Url,
    pub fraud: Url,
    pub aml: Url,
}

impl ScorerEndpoints {
    pub fn get(&self, pillar: Pillar) -> &Url {
        match pillar {
            Pillar::Credit => &self.credit,
            Pillar::Fraud => &self.fraud,
            Pillar::Aml => &self.aml,
        }
    }
}

/// Full service configuration for the `api-server` binary
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub environment: String,
    pub port: u16,
    pub endpoints: ScorerEndpoints,
    pub engine: EngineConfig,
}

impl ServiceConfig {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, EngineError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load using an arbitrary variable source, then validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, EngineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "sandbox".to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| EngineError::config("PORT", e.to_string()))?,
            None => DEFAULT_PORT,
        };

        let endpoints = ScorerEndpoints {
            credit: scorer_url(&lookup, Pillar::Credit)?,
            fraud: scorer_url(&lookup, Pillar::Fraud)?,
            aml: scorer_url(&lookup, Pillar::Aml)?,
        };

        let timeout_ms = match lookup("SCORER_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| EngineError::config("SCORER_TIMEOUT_MS", e.to_string()))?,
            None => DEFAULT_SCORER_TIMEOUT_MS,
        };

        let batch_concurrency = match lookup("BATCH_CONCURRENCY") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map_err(|e| EngineError::config("BATCH_CONCURRENCY", e.to_string()))?,
            None => DEFAULT_BATCH_CONCURRENCY,
        };

        let thresholds = load_thresholds(&lookup)?;
        let engine = EngineConfig::new(Duration::from_millis(timeout_ms), thresholds)
            .with_batch_concurrency(batch_concurrency);
        engine.validate()?;

        Ok(Self {
            environment,
            port,
            endpoints,
            engine,
        })
    }
}

fn env_prefix(pillar: Pillar) -> &'static str {
    match pillar {
        Pillar::Credit => "CREDIT",
        Pillar::Fraud => "FRAUD",
        Pillar::Aml => "AML",
    }
}

fn scorer_url<F>(lookup: &F, pillar: Pillar) -> Result<Url, EngineError>
where
    F: Fn(&str) -> Option<String>,
{
    let key = format!("{}_SCORER_URL", env_prefix(pillar));
    let raw = lookup(&key).ok_or_else(|| EngineError::config(&key, "missing required variable"))?;
    Url::parse(raw.trim()).map_err(|e| EngineError::config(&key, e.to_string()))
}

/// Thresholds come from `RISK_THRESHOLDS_PATH` when set, otherwise from the
/// per-pillar `<PILLAR>_GREEN_MAX` / `<PILLAR>_YELLOW_MAX` variables layered
/// over the defaults.
fn load_thresholds<F>(lookup: &F) -> Result<ThresholdTable, EngineError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup("RISK_THRESHOLDS_PATH") {
        return load_thresholds_file(Path::new(path.trim()));
    }

    let mut table = ThresholdTable::default();
    for pillar in Pillar::REVIEW_ORDER {
        let prefix = env_prefix(pillar);
        let entry = table.get_mut(pillar);
        if let Some(value) = parse_threshold(lookup, &format!("{}_GREEN_MAX", prefix))? {
            entry.green_max = value;
        }
        if let Some(value) = parse_threshold(lookup, &format!("{}_YELLOW_MAX", prefix))? {
            entry.yellow_max = value;
        }
    }
    Ok(table)
}

fn parse_threshold<F>(lookup: &F, key: &str) -> Result<Option<f64>, EngineError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<f64>()
                .map_err(|e| EngineError::config(key, e.to_string()))
        })
        .transpose()
}

pub fn load_thresholds_file(path: &Path) -> Result<ThresholdTable, EngineError> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        EngineError::config("RISK_THRESHOLDS_PATH", format!("{}: {}", path.display(), e))
    })?;
    serde_json::from_str(&contents)
        .map_err(|e| EngineError::config("RISK_THRESHOLDS_PATH", format!("{}: {}", path.display(), e)))
}
