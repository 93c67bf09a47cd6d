use crate::config::Config;
use crate::database::PostgresDatabase;
use crate::external::FlowClient;

/// Persistence backend selected once at startup; handlers dispatch on it per request.
pub enum Backend {
    Database(PostgresDatabase),
    Flow(FlowClient),
}

pub struct AppState {
    pub backend: Backend,
    pub config: Config,
}
