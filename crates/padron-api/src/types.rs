//! Wire types for the persona directory API.
//!
//! The remote service speaks JSON with Spanish field names; the structs
//! keep those names so they map onto the wire format directly.

use serde::{Deserialize, Serialize};

/// One directory entry.
///
/// `id` is assigned by the server on create and absent on unsaved drafts;
/// it is skipped during serialization when absent so create payloads do
/// not carry an empty id field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub telefono: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::Persona;

    #[test]
    fn draft_serializes_without_id() {
        let draft = Persona {
            id: None,
            nombre: "Ana".into(),
            direccion: "Calle 7".into(),
            telefono: "555-0101".into(),
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["nombre"], "Ana");
    }

    #[test]
    fn deserializes_with_missing_fields() {
        let p: Persona = serde_json::from_str(r#"{"id":"42","nombre":"Luz"}"#).unwrap();
        assert_eq!(p.id.as_deref(), Some("42"));
        assert_eq!(p.nombre, "Luz");
        assert_eq!(p.direccion, "");
        assert_eq!(p.telefono, "");
    }
}
