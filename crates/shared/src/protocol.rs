use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Attendance, GuestId, GuestRecord};

/// Acknowledgement the update endpoint sends back when the write went through.
pub const UPDATE_SUCCESS_MESSAGE: &str = "Invitados updated successfully";

/// Body of `GET /api/data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestListResponse {
    pub invitados: Vec<GuestEntry>,
}

/// A directory row. Columns the form does not use are kept in `extra` so the guest panel can
/// display and filter on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestEntry {
    pub invitado_id: GuestId,
    pub nombre_invitado: String,
    #[serde(default)]
    pub numero_de_invitados_max: u32,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl GuestEntry {
    /// Display string of a column, or `None` when the row has no such column.
    pub fn column(&self, key: &str) -> Option<String> {
        match key {
            "invitado_id" => Some(self.invitado_id.to_string()),
            "nombre_invitado" => Some(self.nombre_invitado.clone()),
            "numero_de_invitados_max" => Some(self.numero_de_invitados_max.to_string()),
            other => self.extra.get(other).map(|value| match value {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                value => value.to_string(),
            }),
        }
    }

    /// Column names in display order: the known columns first, then the extras sorted by key.
    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec![
            "invitado_id".to_string(),
            "nombre_invitado".to_string(),
            "numero_de_invitados_max".to_string(),
        ];
        names.extend(self.extra.keys().cloned());
        names
    }
}

impl From<GuestEntry> for GuestRecord {
    fn from(entry: GuestEntry) -> Self {
        Self {
            id: entry.invitado_id,
            display_name: entry.nombre_invitado,
            max_party_size: entry.numero_de_invitados_max,
        }
    }
}

/// Body of `POST /api/updateInvitados`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGuestRequest {
    #[serde(rename = "invitadoIdToUpdate")]
    pub guest_id: GuestId,
    #[serde(rename = "asistencia")]
    pub attendance: Attendance,
    #[serde(rename = "numero_de_invitados")]
    pub party_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGuestResponse {
    #[serde(default)]
    pub message: String,
}

impl UpdateGuestResponse {
    pub fn is_success(&self) -> bool {
        self.message == UPDATE_SUCCESS_MESSAGE
    }
}

/// Body of `POST /api/send-message` on the messaging service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageRequest {
    pub to: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_request_uses_endpoint_field_names() {
        let body = serde_json::to_value(UpdateGuestRequest {
            guest_id: GuestId(1),
            attendance: Attendance::Yes,
            party_size: 1,
        })
        .expect("serialize");

        assert_eq!(
            body,
            json!({"invitadoIdToUpdate": 1, "asistencia": "SI", "numero_de_invitados": 1})
        );
    }

    #[test]
    fn guest_listing_keeps_unknown_columns() {
        let listing: GuestListResponse = serde_json::from_value(json!({
            "invitados": [
                {"invitado_id": 4, "nombre_invitado": "Ana Lopez", "numero_de_invitados_max": 2, "asistencia": "NO", "mesa": 7},
                {"invitado_id": 5, "nombre_invitado": "Luis Diaz"}
            ]
        }))
        .expect("listing");

        let ana = &listing.invitados[0];
        assert_eq!(ana.column("asistencia").as_deref(), Some("NO"));
        assert_eq!(ana.column("mesa").as_deref(), Some("7"));
        assert_eq!(ana.column("telefono"), None);

        let luis = GuestRecord::from(listing.invitados[1].clone());
        assert_eq!(luis.max_party_size, 0);
        assert_eq!(luis.display_name, "Luis Diaz");
    }

    #[test]
    fn only_the_literal_acknowledgement_counts_as_success() {
        assert!(UpdateGuestResponse {
            message: UPDATE_SUCCESS_MESSAGE.to_string()
        }
        .is_success());
        assert!(!UpdateGuestResponse {
            message: "error".to_string()
        }
        .is_success());
    }
}
