pub mod dato;
pub mod health;
pub mod message;
pub use dato::*;
pub use health::*;
pub use message::ErrorMessage;

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(components(schemas(
    NewDato,
    UpdateDato,
    DatoData,
    DatoListResponse,
    DatoResponse,
    DeletedResponse,
    ServiceStatus,
    HealthStatus,
    ErrorMessage,
)))]
/// Captures OpenAPI schemas and canned responses defined in the DTO module
pub struct OpenApiSchemas;
