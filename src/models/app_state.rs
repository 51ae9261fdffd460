use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::{models::error::ServerError, service::registry::SessionRegistry};

#[derive(Clone)]
pub struct AppState {
    pool: Pool<Postgres>,
    registry: Arc<SessionRegistry>,
}

impl AppState {
    pub async fn from_connection_string(connection_string: &str) -> Result<Arc<Self>, ServerError> {
        let pool = Pool::<Postgres>::connect(connection_string).await?;
        let registry = Arc::new(SessionRegistry::new());

        Ok(Arc::new(Self { pool, registry }))
    }

    pub fn get_pool(&self) -> &Pool<Postgres> {
        &self.pool
    }

    pub fn get_registry(&self) -> &SessionRegistry {
        &self.registry
    }
}
