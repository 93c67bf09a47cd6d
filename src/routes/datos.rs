use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use utoipa::OpenApi;

use crate::{
    external::map_list_item,
    models::{
        dto::{
            DatoData, DatoListResponse, DatoResponse, DeletedResponse, ErrorMessage, NewDato,
            UpdateDato,
        },
        Dato, Error,
    },
    AppState, Backend,
};

/// Defines the OpenAPI spec for dato endpoints
#[derive(OpenApi)]
#[openapi(paths(
    list_datos_handler,
    create_dato_handler,
    get_dato_handler,
    update_dato_handler,
    delete_dato_handler
))]
pub struct DatosApi;

/// Used to group dato endpoints together in the OpenAPI documentation
pub const DATOS_API_GROUP: &str = "DATOS";

/// Builds a router for all the dato routes
pub fn datos_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_datos_handler))
        .route("/", post(create_dato_handler))
        .route("/:id", get(get_dato_handler))
        .route("/:id", put(update_dato_handler))
        .route("/:id", delete(delete_dato_handler))
}

/// List datos handler function
#[utoipa::path(
    get,
    path = "/api/datos",
    tag = DATOS_API_GROUP,
    responses(
        (status = 200, description = "All datos, newest first on the database backend", body = DatoListResponse),
        (status = 500, description = "Backend failure", body = ErrorMessage),
    )
)]
pub async fn list_datos_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatoListResponse>, Error> {
    let data: Vec<DatoData> = match &state.backend {
        Backend::Database(db) => {
            let datos = db
                .list_datos()
                .await
                .map_err(|err| Error::backend(&state.config, err))?;
            datos.into_iter().map(DatoData::from).collect()
        }
        Backend::Flow(flow) => {
            debug!("GET /api/datos - obteniendo todos los items");
            let result = flow
                .read_all()
                .await
                .map_err(|err| Error::backend(&state.config, err))?;
            // the flow answers with a bare array; anything else counts as empty
            let items = result.as_array().map(Vec::as_slice).unwrap_or(&[]);
            items.iter().map(map_list_item).collect()
        }
    };
    info!("{} items obtenidos", data.len());
    Ok(Json(DatoListResponse::new(data)))
}

/// Create dato handler function
#[utoipa::path(
    post,
    path = "/api/datos",
    tag = DATOS_API_GROUP,
    request_body = NewDato,
    responses(
        (status = 201, description = "Dato successfully created", body = DatoResponse),
        (status = 400, description = "Missing nombre or descripcion", body = ErrorMessage),
        (status = 500, description = "Backend failure", body = ErrorMessage),
    )
)]
pub async fn create_dato_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewDato>,
) -> Result<(StatusCode, Json<DatoResponse>), Error> {
    // Both fields must be present and non-empty; nothing is persisted otherwise
    let (nombre, descripcion) = match (non_empty(body.nombre), non_empty(body.descripcion)) {
        (Some(nombre), Some(descripcion)) => (nombre, descripcion),
        _ => {
            return Err(Error::new(
                StatusCode::BAD_REQUEST,
                "Nombre y descripción son requeridos",
            ))
        }
    };
    let timestamp = body
        .timestamp
        .unwrap_or_else(|| Utc::now().to_rfc3339());

    let data = match &state.backend {
        Backend::Database(db) => {
            let new_dato = Dato {
                nombre,
                descripcion,
                timestamp,
                client_id: body.id,
                ..Default::default()
            };
            let dato = db
                .create_dato(&new_dato)
                .await
                .map_err(|err| Error::backend(&state.config, err))?;
            info!("✓ Dato sincronizado: {} (ID: {})", dato.nombre, dato.id);
            DatoData::from(dato)
        }
        Backend::Flow(flow) => {
            info!("POST /api/datos - creando: {nombre}");
            let client_id = body.id.unwrap_or_else(|| Utc::now().timestamp_millis());
            let payload = json!({
                "nombre": nombre,
                "descripcion": descripcion,
                "timestamp": timestamp,
                "client_id": client_id,
            });
            let result = flow
                .create(payload)
                .await
                .map_err(|err| Error::backend(&state.config, err))?;
            let mapped = map_list_item(&result);
            info!("Item creado con ID: {}", mapped.id);
            mapped
        }
    };
    Ok((StatusCode::CREATED, Json(DatoResponse::new(data))))
}

/// Get dato by ID handler function
#[utoipa::path(
    get,
    path = "/api/datos/{id}",
    tag = DATOS_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the dato to fetch")
    ),
    responses(
        (status = 200, description = "Dato successfully fetched", body = DatoResponse),
        (status = 404, description = "Dato not found", body = ErrorMessage),
        (status = 500, description = "Backend failure", body = ErrorMessage),
    )
)]
pub async fn get_dato_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<DatoResponse>, Error> {
    let data = match &state.backend {
        Backend::Database(db) => {
            let dato = db
                .get_dato_by_id(id)
                .await
                .map_err(|err| Error::backend(&state.config, err))?;
            let dato = dato.ok_or((StatusCode::NOT_FOUND, "Dato no encontrado"))?;
            DatoData::from(dato)
        }
        Backend::Flow(flow) => {
            debug!("GET /api/datos/{id}");
            // the flow has no distinct missing-item answer, so any failure maps to 404
            let result = flow
                .read_one(i64::from(id))
                .await
                .map_err(|_| Error::new(StatusCode::NOT_FOUND, "Dato no encontrado"))?;
            map_list_item(&result)
        }
    };
    Ok(Json(DatoResponse::new(data)))
}

/// Update dato handler function
#[utoipa::path(
    put,
    path = "/api/datos/{id}",
    tag = DATOS_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the dato to update")
    ),
    request_body = UpdateDato,
    responses(
        (status = 200, description = "Dato successfully updated", body = DatoResponse),
        (status = 500, description = "Backend failure", body = ErrorMessage),
    )
)]
pub async fn update_dato_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateDato>,
) -> Result<Json<DatoResponse>, Error> {
    let data = match &state.backend {
        Backend::Database(db) => {
            let dato = db
                .update_dato(id, body.nombre.as_deref(), body.descripcion.as_deref())
                .await
                .map_err(|err| Error::backend(&state.config, err))?;
            DatoData::from(dato)
        }
        Backend::Flow(flow) => {
            info!("PUT /api/datos/{id}");
            let payload = json!({
                "id": id,
                "nombre": body.nombre,
                "descripcion": body.descripcion,
            });
            let result = flow
                .update(payload)
                .await
                .map_err(|err| Error::backend(&state.config, err))?;
            map_list_item(&result)
        }
    };
    info!("Item {id} actualizado");
    Ok(Json(DatoResponse::with_message(
        data,
        "Dato actualizado correctamente",
    )))
}

/// Delete dato handler function
#[utoipa::path(
    delete,
    path = "/api/datos/{id}",
    tag = DATOS_API_GROUP,
    params(
        ("id" = i32, Path, description = "The ID of the dato to delete")
    ),
    responses(
        (status = 200, description = "Dato successfully deleted", body = DeletedResponse),
        (status = 500, description = "Backend failure", body = ErrorMessage),
    )
)]
pub async fn delete_dato_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<DeletedResponse>, Error> {
    match &state.backend {
        Backend::Database(db) => {
            db.delete_dato(id)
                .await
                .map_err(|err| Error::backend(&state.config, err))?;
        }
        Backend::Flow(flow) => {
            info!("DELETE /api/datos/{id}");
            flow.delete(i64::from(id))
                .await
                .map_err(|err| Error::backend(&state.config, err))?;
        }
    }
    info!("Item {id} eliminado");
    Ok(Json(DeletedResponse::new("Dato eliminado correctamente")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::routes::test_app;

    async fn post_datos(body: &str) -> (StatusCode, Value) {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/datos")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn create_without_nombre_is_rejected() {
        let (status, json) = post_datos(r#"{"descripcion":"solo descripcion"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Nombre y descripción son requeridos");
    }

    #[tokio::test]
    async fn create_without_descripcion_is_rejected() {
        let (status, json) = post_datos(r#"{"nombre":"solo nombre"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn create_with_empty_fields_is_rejected() {
        let (status, json) = post_datos(r#"{"nombre":"","descripcion":"algo"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Nombre y descripción son requeridos");
    }
}
