//! Client (customer) records (`administracion/clientes/`).

use serde::{Deserialize, Serialize};

use crate::types::{CityId, ClientId};

/// A store client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city_id: Option<CityId>,
    #[serde(rename = "ciudad_nombre", default)]
    pub city_name: Option<String>,
    #[serde(rename = "nit", default)]
    pub tax_id: Option<String>,
}

impl Client {
    /// Full display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {last}", self.first_name),
            None => self.first_name.clone(),
        }
    }
}

/// Writable client fields for create/update calls.
#[derive(Debug, Clone, Serialize)]
pub struct ClientInput {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    pub city_id: Option<CityId>,
    #[serde(rename = "nit", skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_display_name() {
        let json = r#"{"id": 2, "nombre": "Luis", "apellido": "Rojas", "ciudad": 1}"#;
        let client: Client = serde_json::from_str(json).expect("deserialize");
        assert_eq!(client.display_name(), "Luis Rojas");
        assert_eq!(client.city_id, Some(CityId::new(1)));
    }
}
