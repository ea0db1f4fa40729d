//! Typed credential values.
//!
//! Each variant has its own decoder that checks the JSON shape of the raw
//! value before accepting it. Nothing is coerced across variants.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::envelope::CredentialType;
use crate::errors::{CredHubError, Result};

/// A value shape that can be decoded from the envelope of a fixed type tag.
pub trait TypedValue: Sized {
    /// The only type tag this value may be decoded from.
    const KIND: CredentialType;

    /// Validate the shape of `raw` and build the value.
    fn from_raw(raw: &JsonValue) -> Result<Self>;
}

/// `password` credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

impl TypedValue for Password {
    const KIND: CredentialType = CredentialType::Password;

    fn from_raw(raw: &JsonValue) -> Result<Self> {
        decode_scalar(&Self::KIND, raw).map(Self)
    }
}

/// `value` credential: an arbitrary non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(String);

impl Value {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TypedValue for Value {
    const KIND: CredentialType = CredentialType::Value;

    fn from_raw(raw: &JsonValue) -> Result<Self> {
        decode_scalar(&Self::KIND, raw).map(Self)
    }
}

/// `json` credential. The document is kept verbatim, key order included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Json(JsonValue);

impl Json {
    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    pub fn into_inner(self) -> JsonValue {
        self.0
    }
}

impl TypedValue for Json {
    const KIND: CredentialType = CredentialType::Json;

    fn from_raw(raw: &JsonValue) -> Result<Self> {
        Ok(Self(raw.clone()))
    }
}

/// `certificate` credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl TypedValue for Certificate {
    const KIND: CredentialType = CredentialType::Certificate;

    fn from_raw(raw: &JsonValue) -> Result<Self> {
        decode_object(&Self::KIND, raw)
    }
}

/// `ssh` credential. The fingerprint is computed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ssh {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key_fingerprint: Option<String>,
}

impl TypedValue for Ssh {
    const KIND: CredentialType = CredentialType::Ssh;

    fn from_raw(raw: &JsonValue) -> Result<Self> {
        decode_object(&Self::KIND, raw)
    }
}

/// `rsa` credential.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rsa {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl TypedValue for Rsa {
    const KIND: CredentialType = CredentialType::Rsa;

    fn from_raw(raw: &JsonValue) -> Result<Self> {
        decode_object(&Self::KIND, raw)
    }
}

/// `user` credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl TypedValue for User {
    const KIND: CredentialType = CredentialType::User;

    fn from_raw(raw: &JsonValue) -> Result<Self> {
        decode_object(&Self::KIND, raw)
    }
}

/// Key/value mapping for credential types without a dedicated shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Generic(Map<String, JsonValue>);

impl Generic {
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, JsonValue> {
        &self.0
    }

    fn from_raw(kind: &CredentialType, raw: &JsonValue) -> Result<Self> {
        match raw {
            JsonValue::Object(map) => Ok(Self(map.clone())),
            other => Err(shape_mismatch(kind, "an object", other)),
        }
    }
}

/// Every value shape, selected by the envelope's type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialValue {
    Password(Password),
    Value(Value),
    Json(Json),
    Certificate(Certificate),
    Ssh(Ssh),
    Rsa(Rsa),
    User(User),
    Generic(Generic),
}

impl CredentialValue {
    /// Run the decoder that belongs to `kind` against `raw`.
    pub fn decode(kind: &CredentialType, raw: &JsonValue) -> Result<Self> {
        Ok(match kind {
            CredentialType::Password => Self::Password(Password::from_raw(raw)?),
            CredentialType::Value => Self::Value(Value::from_raw(raw)?),
            CredentialType::Json => Self::Json(Json::from_raw(raw)?),
            CredentialType::Certificate => Self::Certificate(Certificate::from_raw(raw)?),
            CredentialType::Ssh => Self::Ssh(Ssh::from_raw(raw)?),
            CredentialType::Rsa => Self::Rsa(Rsa::from_raw(raw)?),
            CredentialType::User => Self::User(User::from_raw(raw)?),
            CredentialType::Other(_) => Self::Generic(Generic::from_raw(kind, raw)?),
        })
    }
}

// ── Shape checks ─────────────────────────────────────────────────────

fn decode_scalar(kind: &CredentialType, raw: &JsonValue) -> Result<String> {
    match raw {
        JsonValue::String(s) if s.is_empty() => Err(CredHubError::Decode(format!(
            "{kind} credential has an empty value"
        ))),
        JsonValue::String(s) => Ok(s.clone()),
        other => Err(shape_mismatch(kind, "a string", other)),
    }
}

fn decode_object<T: DeserializeOwned>(kind: &CredentialType, raw: &JsonValue) -> Result<T> {
    if !raw.is_object() {
        return Err(shape_mismatch(kind, "an object", raw));
    }
    T::deserialize(raw)
        .map_err(|e| CredHubError::Decode(format!("invalid {kind} credential value: {e}")))
}

fn shape_mismatch(kind: &CredentialType, expected: &str, found: &JsonValue) -> CredHubError {
    let found = match found {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    };
    CredHubError::Decode(format!(
        "{kind} credential value must be {expected}, found {found}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn password_decodes_from_string() {
        let pw = Password::from_raw(&json!("some-password")).unwrap();
        assert_eq!(pw.as_str(), "some-password");
    }

    #[test]
    fn password_rejects_empty_and_non_string() {
        assert!(matches!(
            Password::from_raw(&json!("")),
            Err(CredHubError::Decode(_))
        ));
        assert!(matches!(
            Password::from_raw(&json!({"password": "x"})),
            Err(CredHubError::Decode(_))
        ));
    }

    #[test]
    fn password_debug_is_redacted() {
        let pw = Password::new("hunter2");
        assert_eq!(format!("{pw:?}"), "Password(***)");
    }

    #[test]
    fn certificate_rejects_bare_string() {
        let err = Certificate::from_raw(&json!("-----BEGIN CERTIFICATE-----")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("must be an object, found a string"));
    }

    #[test]
    fn certificate_fields_are_optional() {
        let cert = Certificate::from_raw(&json!({"certificate": "cert"})).unwrap();
        assert_eq!(cert.ca, None);
        assert_eq!(cert.certificate.as_deref(), Some("cert"));
        assert_eq!(cert.private_key, None);
    }

    #[test]
    fn certificate_rejects_wrongly_typed_field() {
        let result = Certificate::from_raw(&json!({"ca": 12}));
        assert!(matches!(result, Err(CredHubError::Decode(_))));
    }

    #[test]
    fn user_requires_username() {
        let result = User::from_raw(&json!({"password": "p"}));
        assert!(matches!(result, Err(CredHubError::Decode(_))));

        let user = User::from_raw(&json!({"username": "u", "password_hash": "h"})).unwrap();
        assert_eq!(user.password, None);
        assert_eq!(user.password_hash.as_deref(), Some("h"));
    }

    #[test]
    fn json_preserves_document_order() {
        let raw = json!({"zeta": 1, "alpha": [true, null], "mid": {"b": 2, "a": 1}});
        let doc = Json::from_raw(&raw).unwrap();
        assert_eq!(
            serde_json::to_string(doc.as_value()).unwrap(),
            r#"{"zeta":1,"alpha":[true,null],"mid":{"b":2,"a":1}}"#
        );
    }

    #[test]
    fn json_accepts_any_document_including_null() {
        let doc = Json::from_raw(&JsonValue::Null).unwrap();
        assert!(doc.as_value().is_null());

        let doc = Json::from_raw(&json!([1, 2])).unwrap();
        assert_eq!(doc.into_inner(), json!([1, 2]));
    }

    #[test]
    fn dispatch_follows_type_tag() {
        let value = CredentialValue::decode(
            &CredentialType::Rsa,
            &json!({"public_key": "pub", "private_key": "priv"}),
        )
        .unwrap();
        assert_eq!(
            value,
            CredentialValue::Rsa(Rsa {
                public_key: Some("pub".into()),
                private_key: Some("priv".into()),
            })
        );
    }

    #[test]
    fn unknown_tag_decodes_as_generic_mapping() {
        let kind = CredentialType::Other("custom".into());
        let value = CredentialValue::decode(&kind, &json!({"a": {"b": 1}})).unwrap();
        match value {
            CredentialValue::Generic(map) => assert_eq!(map.get("a"), Some(&json!({"b": 1}))),
            other => panic!("expected generic, got {other:?}"),
        }

        assert!(CredentialValue::decode(&kind, &json!("scalar")).is_err());
    }
}
