use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::settings::AppEnv;

/// Installs the global subscriber. `RUST_LOG` overrides the per-env default.
pub fn init(app_env: AppEnv) {
    let default_directive = match app_env {
        AppEnv::Local => "filmoteka=debug,tower_http=debug,sqlx=info",
        AppEnv::Dev => "filmoteka=info,tower_http=info,sqlx=warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    match app_env {
        AppEnv::Local => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init(),
        AppEnv::Dev => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init(),
    }
}
