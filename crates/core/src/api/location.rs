//! Location records (`administracion/departamentos/`, `administracion/ciudades/`).

use serde::{Deserialize, Serialize};

use crate::types::{CityId, DepartmentId};

/// A department (top-level region).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    #[serde(rename = "nombre")]
    pub name: String,
}

/// A city, scoped to a department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: CityId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "departamento")]
    pub department_id: DepartmentId,
}
