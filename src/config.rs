use std::env;

/// The five Power Automate webhook URLs, one per CRUD operation.
#[derive(Debug, Clone)]
pub struct FlowUrls {
    pub create: String,
    pub read_all: String,
    pub read_one: String,
    pub update: String,
    pub delete: String,
}

/// Persistence backend selected through the `BACKEND` environment variable.
#[derive(Debug, Clone)]
pub enum BackendConfig {
    /// Direct PostgreSQL table (local instance or a hosted service such as Supabase).
    Database { db_url: String },
    /// Power Automate flows fronting a SharePoint list.
    Flow(FlowUrls),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub environment: String,
    pub frontend_url: Option<String>,
    pub backend: BackendConfig,
}

impl Config {
    /// Reads the configuration from the environment. Missing required variables
    /// for the selected backend abort startup.
    pub fn init() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(3001);
        let environment =
            env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let frontend_url = env::var("FRONTEND_URL").ok();

        let backend = match env::var("BACKEND").as_deref() {
            Ok("flow") => BackendConfig::Flow(FlowUrls {
                create: required("FLOW_CREATE_URL"),
                read_all: required("FLOW_READ_ALL_URL"),
                read_one: required("FLOW_READ_ONE_URL"),
                update: required("FLOW_UPDATE_URL"),
                delete: required("FLOW_DELETE_URL"),
            }),
            _ => BackendConfig::Database {
                db_url: required("DATABASE_URL"),
            },
        };

        Config {
            port,
            environment,
            frontend_url,
            backend,
        }
    }

    /// Production mode redacts error details and quiets the request log.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn required(name: &str) -> String {
    env::var(name).unwrap_or_else(|_| panic!("{name} must be set"))
}
