 use anyhow::Result;
 use config::{builder::DefaultState, ConfigBuilder};
 use serde::Deserialize;

 #[derive(Debug, Deserialize, Clone)]
 #[serde(default)]
 pub struct RuntimeConfig {
     pub environment: String,
 }

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
        }
    }
}

/// Dust and noise cut-offs. The normalizer and the balance walk apply their
/// own thresholds independently of each other.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Thresholds {
    /// Native transfers below this many SOL are left out of the activity list.
    pub transfer_dust_sol: f64,
    /// Token transfers valued below this many USD are left out of the activity list.
    pub token_dust_usd: f64,
    /// Balance walk ignores events that move the balance by less than this.
    pub balance_change_epsilon: f64,
    /// Swap amounts below this render in exponential notation.
    pub swap_fixed_point_min: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            transfer_dust_sol: 0.000_01,
            token_dust_usd: 0.01,
            balance_change_epsilon: 1e-6,
            swap_fixed_point_min: 0.001,
        }
    }
}

 #[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
 #[serde(default)]
 pub struct ChartConfig {
     pub default_window_days: u32,
     /// Gaps wider than this get an interpolated midpoint.
     pub interpolation_gap_ms: i64,
 }

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_window_days: 1,
            interpolation_gap_ms: 2 * 60 * 60 * 1000,
        }
    }
}

 #[derive(Debug, Deserialize, Clone, Default)]
 pub struct LedgerConfig {
     #[serde(default)]
     pub runtime: RuntimeConfig,
     #[serde(default)]
     pub thresholds: Thresholds,
     #[serde(default)]
     pub chart: ChartConfig,
 }

 impl LedgerConfig {
     pub fn from_env() -> Result<Self> {
        // Base config from `config/default.(toml|yaml|json)` relative to the
        // current working directory, overridden by `LEDGER__...` environment variables.
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("LEDGER")
                    .separator("__")
                    .try_parsing(true),
            );

        Self::build(builder)
     }

     fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings = builder.build()?;
        settings.try_deserialize().map_err(Into::into)
     }
 }
