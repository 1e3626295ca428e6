//! Shared application state

use sqlx::PgPool;
use time::Duration;

use crate::auth::TokenCodec;
use crate::config::Config;
use crate::directory::PgDirectory;
use crate::service::AuthService;

/// State handed to every request handler. Cheap to clone: the pool and the
/// codec keys are shared.
#[derive(Clone)]
pub struct AppState {
    pub service: AuthService<PgDirectory>,
    pub pool: PgPool,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        let tokens = TokenCodec::new(
            &config.jwt_secret,
            Duration::seconds(config.token_ttl_secs),
        );
        let service = AuthService::new(PgDirectory::new(pool.clone()), tokens);
        Self {
            service,
            pool,
            config,
        }
    }
}
