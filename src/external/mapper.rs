use serde_json::Value;

use crate::models::dto::DatoData;

/// Canonicalizes a SharePoint list item. The list reports `ID`/`Id` and
/// `Title` where the API speaks `id` and `nombre`; `Created`/`Modified` carry
/// the server timestamps. Missing or mistyped fields take defaults instead of
/// failing, so this never rejects an item.
pub fn map_list_item(item: &Value) -> DatoData {
    let created_at = string_field(item, &["Created"]);
    let modified = string_field(item, &["Modified"]);
    let updated_at = if modified.is_empty() {
        created_at.clone()
    } else {
        modified
    };
    DatoData {
        id: int_field(item, &["ID", "Id"]),
        nombre: string_field(item, &["nombre", "Title"]),
        descripcion: string_field(item, &["descripcion"]),
        timestamp: string_field(item, &["timestamp"]),
        client_id: Some(int_field(item, &["client_id"])),
        created_at,
        updated_at: Some(updated_at),
    }
}

/// First non-empty string among the candidate keys, `""` otherwise.
fn string_field(item: &Value, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| {
            item.get(*key)
                .and_then(Value::as_str)
                .filter(|value| !value.is_empty())
        })
        .unwrap_or("")
        .to_string()
}

/// First integer among the candidate keys, `0` otherwise.
fn int_field(item: &Value, keys: &[&str]) -> i64 {
    keys.iter()
        .find_map(|key| item.get(*key).and_then(Value::as_i64))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_a_complete_item() {
        let item = json!({
            "ID": 12,
            "nombre": "sensor",
            "descripcion": "lectura de temperatura",
            "timestamp": "2026-08-06T10:00:00Z",
            "client_id": 1754474400000i64,
            "Created": "2026-08-06T10:00:01Z",
            "Modified": "2026-08-06T11:30:00Z"
        });
        let dato = map_list_item(&item);
        assert_eq!(dato.id, 12);
        assert_eq!(dato.nombre, "sensor");
        assert_eq!(dato.descripcion, "lectura de temperatura");
        assert_eq!(dato.timestamp, "2026-08-06T10:00:00Z");
        assert_eq!(dato.client_id, Some(1754474400000));
        assert_eq!(dato.created_at, "2026-08-06T10:00:01Z");
        assert_eq!(dato.updated_at.as_deref(), Some("2026-08-06T11:30:00Z"));
    }

    #[test]
    fn falls_back_to_sharepoint_key_casing() {
        let item = json!({ "Id": 3, "Title": "desde la lista" });
        let dato = map_list_item(&item);
        assert_eq!(dato.id, 3);
        assert_eq!(dato.nombre, "desde la lista");
    }

    #[test]
    fn uppercase_id_wins_over_mixed_case() {
        let item = json!({ "ID": 5, "Id": 9 });
        assert_eq!(map_list_item(&item).id, 5);
    }

    #[test]
    fn empty_nombre_falls_through_to_title() {
        let item = json!({ "nombre": "", "Title": "titulo" });
        assert_eq!(map_list_item(&item).nombre, "titulo");
    }

    #[test]
    fn empty_item_takes_all_defaults() {
        let dato = map_list_item(&json!({}));
        assert_eq!(dato.id, 0);
        assert_eq!(dato.nombre, "");
        assert_eq!(dato.descripcion, "");
        assert_eq!(dato.timestamp, "");
        assert_eq!(dato.client_id, Some(0));
        assert_eq!(dato.created_at, "");
        assert_eq!(dato.updated_at.as_deref(), Some(""));
    }

    #[test]
    fn modified_falls_back_to_created() {
        let item = json!({ "ID": 1, "Created": "2026-08-01T00:00:00Z" });
        let dato = map_list_item(&item);
        assert_eq!(dato.updated_at.as_deref(), Some("2026-08-01T00:00:00Z"));
    }

    #[test]
    fn mistyped_fields_do_not_fail() {
        let item = json!({ "ID": "doce", "nombre": 42, "client_id": "x" });
        let dato = map_list_item(&item);
        assert_eq!(dato.id, 0);
        assert_eq!(dato.nombre, "");
        assert_eq!(dato.client_id, Some(0));
    }
}
