//! The envelope every credential version arrives in.
//!
//! The server wraps each version in the same shape (id, name, type tag,
//! creation timestamp, value). The value stays untyped here; callers pick a
//! variant through `decode_typed` or `Credential::decode_value`.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::values::CredentialValue;
use crate::errors::Result;

/// Type tag carried in the envelope's `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CredentialType {
    Password,
    Value,
    Json,
    Certificate,
    Ssh,
    Rsa,
    User,
    /// Any tag this client does not know about. Decoded as a generic mapping.
    Other(String),
}

impl CredentialType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Password => "password",
            Self::Value => "value",
            Self::Json => "json",
            Self::Certificate => "certificate",
            Self::Ssh => "ssh",
            Self::Rsa => "rsa",
            Self::User => "user",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for CredentialType {
    fn from(tag: &str) -> Self {
        match tag {
            "password" => Self::Password,
            "value" => Self::Value,
            "json" => Self::Json,
            "certificate" => Self::Certificate,
            "ssh" => Self::Ssh,
            "rsa" => Self::Rsa,
            "user" => Self::User,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CredentialType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<CredentialType> for String {
    fn from(kind: CredentialType) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One version of a credential.
///
/// `V` is the decoded value. The untyped envelope produced by the response
/// decoder is `Credential<serde_json::Value>`; typed getters return
/// `Credential<Password>`, `Credential<Certificate>` and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential<V = JsonValue> {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub credential_type: CredentialType,
    pub value: V,
    pub version_created_at: String,
}

impl<V> Credential<V> {
    /// Swap the value while keeping the metadata.
    pub fn with_value<U>(self, value: U) -> Credential<U> {
        Credential {
            id: self.id,
            name: self.name,
            credential_type: self.credential_type,
            value,
            version_created_at: self.version_created_at,
        }
    }
}

impl Credential {
    /// Decode the raw value into whichever variant the type tag selects.
    pub fn decode_value(&self) -> Result<CredentialValue> {
        CredentialValue::decode(&self.credential_type, &self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_tags_round_trip_through_strings() {
        for tag in [
            "password",
            "value",
            "json",
            "certificate",
            "ssh",
            "rsa",
            "user",
        ] {
            let kind = CredentialType::from(tag);
            assert!(!matches!(kind, CredentialType::Other(_)), "{tag}");
            assert_eq!(kind.as_str(), tag);
        }
    }

    #[test]
    fn unknown_tag_is_kept_verbatim() {
        let kind = CredentialType::from("x509-bundle");
        assert_eq!(kind, CredentialType::Other("x509-bundle".into()));
        assert_eq!(kind.to_string(), "x509-bundle");
    }

    #[test]
    fn envelope_uses_wire_field_names() {
        let cred: Credential = serde_json::from_value(json!({
            "id": "some-id",
            "name": "/example",
            "type": "value",
            "value": "v",
            "version_created_at": "2017-01-05T01:01:01Z"
        }))
        .unwrap();

        assert_eq!(cred.credential_type, CredentialType::Value);

        let back = serde_json::to_value(&cred).unwrap();
        assert_eq!(back["type"], "value");
        assert_eq!(back["version_created_at"], "2017-01-05T01:01:01Z");
    }

    #[test]
    fn with_value_keeps_metadata() {
        let cred = Credential {
            id: "id".into(),
            name: "/n".into(),
            credential_type: CredentialType::Password,
            value: json!("secret"),
            version_created_at: "2017-01-05T01:01:01Z".into(),
        };

        let typed = cred.with_value(42_u8);
        assert_eq!(typed.name, "/n");
        assert_eq!(typed.credential_type, CredentialType::Password);
        assert_eq!(typed.value, 42);
    }
}
