use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::i18n::Localizer;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: Config,
    pub localizer: Arc<Localizer>,
}

impl AppState {
    pub fn new(db: PgPool, env: Config, localizer: Arc<Localizer>) -> Self {
        Self { db, env, localizer }
    }
}
