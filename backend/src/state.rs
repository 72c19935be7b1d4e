use std::sync::Arc;

use crate::{config::Config, db::connection::DbPool, services::insight::InsightClient};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Config,
    pub insight: Arc<dyn InsightClient>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config, insight: Arc<dyn InsightClient>) -> Self {
        Self {
            pool,
            config,
            insight,
        }
    }
}
