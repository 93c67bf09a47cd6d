use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Dato;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewDato {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub timestamp: Option<String>,
    /// Client-side correlation id, echoed back as `client_id`.
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateDato {
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
}

/// Canonical wire shape of a dato, shared by both backends. `updated_at` is
/// only tracked by the SharePoint list, so the database variant omits it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DatoData {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub timestamp: String,
    pub client_id: Option<i64>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<Dato> for DatoData {
    fn from(dato: Dato) -> Self {
        Self {
            id: i64::from(dato.id),
            nombre: dato.nombre,
            descripcion: dato.descripcion,
            timestamp: dato.timestamp,
            client_id: dato.client_id,
            created_at: dato.created_at.to_rfc3339(),
            updated_at: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DatoListResponse {
    pub success: bool,
    pub data: Vec<DatoData>,
}

impl DatoListResponse {
    pub fn new(data: Vec<DatoData>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DatoResponse {
    pub success: bool,
    pub data: DatoData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DatoResponse {
    pub fn new(data: DatoData) -> Self {
        Self {
            success: true,
            data,
            message: None,
        }
    }

    pub fn with_message(data: DatoData, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub success: bool,
    pub message: String,
}

impl DeletedResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_rows_serialize_without_updated_at() {
        let dato = Dato {
            id: 7,
            nombre: "A".to_string(),
            descripcion: "B".to_string(),
            timestamp: "2026-08-06T10:00:00Z".to_string(),
            client_id: None,
            ..Default::default()
        };
        let json = serde_json::to_value(DatoData::from(dato)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["nombre"], "A");
        assert_eq!(json["client_id"], serde_json::Value::Null);
        assert!(json.get("updated_at").is_none());
    }

    #[test]
    fn update_response_carries_confirmation_message() {
        let dato = Dato::default();
        let response =
            DatoResponse::with_message(DatoData::from(dato), "Dato actualizado correctamente");
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Dato actualizado correctamente");
    }
}
