//! The user record exchanged with the remote API and edited by the form.
//!
//! Every field has a default so that a partially populated JSON object still
//! yields a record with a complete `address` and `company`. Explicit `null`s
//! decode to the same defaults as missing keys.
use serde::{Deserialize, Deserializer, Serialize};

/// Placeholder shown by the detail view for blank optional fields.
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    /// Assigned by the remote store; `None` until the record is created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(deserialize_with = "null_as_default")]
    pub website: String,
    #[serde(deserialize_with = "null_as_default")]
    pub address: Address,
    #[serde(deserialize_with = "null_as_default")]
    pub company: Company,
}

/// Only `street` and `city` are kept; other address keys are dropped on decode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_default")]
    pub street: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl UserRecord {
    /// An all-blank template, used by the form in create mode.
    pub fn blank() -> Self {
        Self::default()
    }

    /// `USER-<first word of name>`, where the first word ends at the first space.
    pub fn synthesized_username(name: &str) -> String {
        let first = name.split(' ').next().unwrap_or("");
        format!("USER-{first}")
    }
}

/// `value`, or [`NOT_AVAILABLE`] when it is empty.
pub fn or_not_available(value: &str) -> &str {
    if value.is_empty() { NOT_AVAILABLE } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn synthesized_username_uses_first_word() {
        assert_eq!(UserRecord::synthesized_username("Jane Doe"), "USER-Jane");
        assert_eq!(UserRecord::synthesized_username("Cher"), "USER-Cher");
        assert_eq!(UserRecord::synthesized_username(""), "USER-");
    }

    #[test]
    fn decode_fills_missing_nested_objects() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": 4,
            "name": "Patricia Lebsack",
            "email": "Julianne.OConner@kory.org"
        }))
        .unwrap();
        assert_eq!(user.id, Some(4));
        assert_eq!(user.address, Address::default());
        assert_eq!(user.company.name, "");
        assert_eq!(user.website, "");
    }

    #[test]
    fn decode_ignores_extra_address_fields() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": 1,
            "name": "Leanne Graham",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "company": { "name": "Romaguera-Crona", "catchPhrase": "x", "bs": "y" }
        }))
        .unwrap();
        assert_eq!(user.address.street, "Kulas Light");
        assert_eq!(user.address.city, "Gwenborough");
        assert_eq!(user.company.name, "Romaguera-Crona");
    }

    #[test]
    fn decode_treats_null_fields_as_blank() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": 5,
            "name": "Chelsey Dietrich",
            "email": "Lucio_Hettinger@annie.ca",
            "phone": null,
            "username": null,
            "website": null,
            "address": null,
            "company": null
        }))
        .unwrap();
        assert_eq!(user.id, Some(5));
        assert_eq!(user.phone, "");
        assert_eq!(user.username, "");
        assert_eq!(user.address, Address::default());
        assert_eq!(or_not_available(&user.website), "N/A");
        assert_eq!(or_not_available(&user.company.name), "N/A");

        let user: UserRecord = serde_json::from_value(json!({
            "id": 6,
            "name": null,
            "address": { "street": null, "city": "McKenziehaven" },
            "company": { "name": null }
        }))
        .unwrap();
        assert_eq!(user.name, "");
        assert_eq!(user.address.street, "");
        assert_eq!(user.address.city, "McKenziehaven");
        assert_eq!(user.company.name, "");
    }

    #[test]
    fn new_record_serializes_without_id() {
        let mut user = UserRecord::blank();
        user.name = "Ann Lee".into();
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["address"]["city"], "");

        user.id = Some(7);
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["id"], 7);
    }

    #[test]
    fn blank_values_render_as_not_available() {
        assert_eq!(or_not_available(""), "N/A");
        assert_eq!(or_not_available("hildegard.org"), "hildegard.org");
    }
}
