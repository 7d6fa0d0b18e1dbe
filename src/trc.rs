//! Tracing configuration and initialization.

use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{
    EnvFilter,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

const LOG_ENV_VAR: &str = "AE_LOG";

/// Filter used when no environment filter is set. Info for this binary, warnings elsewhere.
const DEFAULT_FILTER: &str = concat!("warn,", env!("CARGO_CRATE_NAME"), "=info");

enum TrcMode {
    /// Compact output with a spinner per open span.
    Pretty,
    /// Plain, verbose output for scripts and debugging.
    Ugly,
}

pub struct Trc {
    mode: TrcMode,
    env_filter: EnvFilter,
}

impl Default for Trc {
    fn default() -> Self {
        let maybe_env_filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).or_else(|_| EnvFilter::try_from_default_env());

        match maybe_env_filter {
            // Whoever sets a filter wants the raw log lines, not spinners.
            Ok(env_filter) => Self {
                mode: TrcMode::Ugly,
                env_filter,
            },
            Err(_) => Self {
                mode: TrcMode::Pretty,
                env_filter: EnvFilter::new(DEFAULT_FILTER),
            },
        }
    }
}

impl Trc {
    /// Force plain output, e.g. when stdout is piped into another tool.
    #[must_use]
    pub fn plain(mut self, plain: bool) -> Self {
        if plain {
            self.mode = TrcMode::Ugly;
        }
        self
    }

    pub fn init(self) -> Result<(), TryInitError> {
        match self.mode {
            TrcMode::Ugly => self.init_ugly_mode(),
            TrcMode::Pretty => self.init_pretty_mode(),
        }
    }

    fn init_ugly_mode(self) -> Result<(), TryInitError> {
        tracing_subscriber::registry()
            .with(self.env_filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    }

    fn init_pretty_mode(self) -> Result<(), TryInitError> {
        let indicatif_layer = IndicatifLayer::new();
        tracing_subscriber::registry()
            .with(self.env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(indicatif_layer.get_stderr_writer())
                    .with_target(false)
                    .without_time()
                    .compact(),
            )
            .with(indicatif_layer)
            .try_init()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_names_this_binary() {
        let target = module_path!().split("::").next().unwrap_or_default();
        assert!(
            DEFAULT_FILTER
                .split(',')
                .any(|directive| directive == format!("{target}=info")),
            "{DEFAULT_FILTER} does not enable info for {target}"
        );
    }
}
