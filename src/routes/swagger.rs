use crate::models::dto;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(info(
    title = "API de sincronización de datos",
    description = "CRUD backend persisting dato records to PostgreSQL or to a SharePoint list behind Power Automate flows",
))]
struct Api;

/// Constructs the route on the API that renders the swagger UI and returns the OpenAPI schema.
/// Merges in OpenAPI definitions from other locations in the app, such as the [dto] package
/// and the route modules.
pub fn build_documentation() -> SwaggerUi {
    let mut api_docs = Api::openapi();
    api_docs.merge(dto::OpenApiSchemas::openapi());
    api_docs.merge(super::health::HealthApi::openapi());
    api_docs.merge(super::datos::DatosApi::openapi());

    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api_docs)
}
