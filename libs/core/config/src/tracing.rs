use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the color-eyre report and panic hooks.
///
/// Environment variables are left out of reports because they carry database credentials.
/// Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_directives(environment: &Environment) -> &'static str {
    match environment {
        Environment::Production => "warn,catalog_api=info",
        Environment::Development => "info,tower_http=debug,mongodb=warn",
    }
}

/// `RUST_LOG` when set and valid, otherwise [`default_directives`].
pub fn env_filter(environment: &Environment) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)))
}

/// Install the global subscriber.
///
/// Production emits flattened JSON lines without targets; development uses the pretty
/// formatter. `RUST_LOG` replaces [`default_directives`]. An `ErrorLayer` is always
/// present so eyre reports carry span traces. A second call leaves the first subscriber
/// in place.
pub fn init_tracing(environment: &Environment) {
    let filter = env_filter(environment);

    let production = environment.is_production();
    let json = production.then(|| {
        fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true)
    });
    let pretty = (!production).then(|| fmt::layer().with_target(true).pretty());

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .with(tracing_error::ErrorLayer::default())
        .try_init();

    if installed.is_ok() {
        info!(?environment, "Tracing initialized");
    } else {
        debug!("Tracing subscriber already set");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_per_environment() {
        assert_eq!(
            default_directives(&Environment::Production),
            "warn,catalog_api=info"
        );
        assert!(default_directives(&Environment::Development).starts_with("info"));
    }

    #[test]
    fn test_env_filter_falls_back_to_defaults() {
        temp_env::with_var_unset("RUST_LOG", || {
            let filter = env_filter(&Environment::Production).to_string();
            assert!(filter.contains("catalog_api=info"), "{filter}");
            assert!(filter.contains("warn"), "{filter}");
        });
    }

    #[test]
    fn test_env_filter_honours_rust_log() {
        temp_env::with_var("RUST_LOG", Some("debug"), || {
            let filter = env_filter(&Environment::Production).to_string();
            assert_eq!(filter, "debug");
        });
    }

    #[test]
    fn test_init_tracing_installs_global_subscriber_once() {
        init_tracing(&Environment::Development);
        assert!(tracing::dispatcher::has_been_set());

        // The second call must not panic and keeps the first subscriber.
        init_tracing(&Environment::Production);
        assert!(tracing::dispatcher::has_been_set());
    }
}
