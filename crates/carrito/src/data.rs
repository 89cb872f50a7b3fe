//! Test-data records for the practice form.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::result::{CarritoError, CarritoResult};

/// One data-driven submission of the practice form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    /// Full name
    pub name: String,
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
    /// Whether to tick the ice-cream checkbox
    pub likes_ice_cream: bool,
    /// Visible text of the gender option to select
    pub gender: String,
    /// Employment status: "Student", "Employed", or "Entrepreneur"
    pub employment_status: String,
    /// Date of birth, as typed into the date field
    pub dob: String,
}

/// Load form records from a JSON array file.
///
/// # Errors
///
/// Fails with [`CarritoError::Data`] when the file cannot be read, and with
/// [`CarritoError::Json`] when it is not a valid record array.
pub fn load_records(path: impl AsRef<Path>) -> CarritoResult<Vec<FormRecord>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|err| CarritoError::Data {
        message: format!("cannot read test data '{}': {err}", path.display()),
    })?;
    Ok(serde_json::from_str(&raw)?)
}
