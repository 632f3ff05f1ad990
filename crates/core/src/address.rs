//! Delivery addresses.

use serde::{Deserialize, Serialize};

use crate::types::AddressId;

/// A customer delivery address.
///
/// At most one address per customer has `is_default == true`; the client's
/// address mirror unsets all others before setting a new default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: AddressId,
    /// Short label ("집", "회사").
    pub label: String,
    pub full_address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub is_default: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flag_defaults_to_false() {
        let addr: Address = serde_json::from_str(
            r#"{"id": 1, "label": "집", "fullAddress": "서울시 강남구 1-1",
                "latitude": 37.49, "longitude": 127.03}"#,
        )
        .expect("deserialize");
        assert!(!addr.is_default);
    }
}
