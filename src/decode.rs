//! Response decoding: raw response bodies to credential envelopes.
//!
//! Retrieval endpoints answer with `{"data": [envelope, ...]}`. An empty
//! `data` list is always reported as `CredHubError::EmptyResult`, never as
//! an empty success. Envelope order is whatever the server sent.

use serde::Deserialize;

use crate::credentials::{Credential, CredentialPath, FoundCredential, TypedValue};
use crate::errors::{CredHubError, Result};

#[derive(Deserialize)]
struct DataDocument {
    data: Vec<Credential>,
}

#[derive(Deserialize)]
struct FindDocument {
    credentials: Vec<FoundCredential>,
}

#[derive(Deserialize)]
struct PathsDocument {
    paths: Vec<CredentialPath>,
}

#[derive(Deserialize)]
struct ErrorDocument {
    error: String,
}

/// Decode a `{"data": [...]}` body into envelopes, in server order.
pub fn decode_envelopes(body: &str) -> Result<Vec<Credential>> {
    let document: DataDocument = parse(body)?;

    if document.data.is_empty() {
        return Err(CredHubError::EmptyResult);
    }

    for envelope in &document.data {
        validate_envelope(envelope)?;
    }

    Ok(document.data)
}

/// Decode a body holding a single bare envelope (the by-id endpoint).
pub fn decode_envelope(body: &str) -> Result<Credential> {
    let envelope: Credential = parse(body)?;
    validate_envelope(&envelope)?;
    Ok(envelope)
}

/// Convert an untyped envelope into `Credential<T>`.
///
/// The envelope's type tag must be exactly `T::KIND`; a `certificate`
/// envelope never satisfies a password request.
pub fn decode_typed<T: TypedValue>(envelope: Credential) -> Result<Credential<T>> {
    if envelope.credential_type != T::KIND {
        return Err(CredHubError::Decode(format!(
            "expected a {} credential but '{}' is of type {}",
            T::KIND,
            envelope.name,
            envelope.credential_type
        )));
    }

    let value = T::from_raw(&envelope.value)?;
    Ok(envelope.with_value(value))
}

/// Decode a `{"credentials": [...]}` search result. Empty is a valid answer.
pub fn decode_found(body: &str) -> Result<Vec<FoundCredential>> {
    let document: FindDocument = parse(body)?;
    Ok(document.credentials)
}

/// Decode a `{"paths": [...]}` listing.
pub fn decode_paths(body: &str) -> Result<Vec<CredentialPath>> {
    let document: PathsDocument = parse(body)?;
    Ok(document.paths)
}

/// Pull the message out of a `{"error": "..."}` body, if that is what it is.
pub fn decode_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorDocument>(body)
        .ok()
        .map(|doc| doc.error)
}

fn parse<'a, T: Deserialize<'a>>(body: &'a str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| CredHubError::Decode(e.to_string()))
}

fn validate_envelope(envelope: &Credential) -> Result<()> {
    if envelope.name.is_empty() {
        return Err(CredHubError::Decode(format!(
            "credential '{}' has an empty name",
            envelope.id
        )));
    }
    if envelope.credential_type.as_str().is_empty() {
        return Err(CredHubError::Decode(format!(
            "credential '{}' has an empty type",
            envelope.name
        )));
    }
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Certificate, CredentialType, Password, User};

    const PASSWORD_BODY: &str = r#"{
      "data": [
        {
          "id": "some-id",
          "name": "/example-password",
          "type": "password",
          "value": "some-password",
          "version_created_at": "2017-01-05T01:01:01Z"
        }
      ]
    }"#;

    #[test]
    fn decodes_single_envelope() {
        let creds = decode_envelopes(PASSWORD_BODY).unwrap();
        assert_eq!(creds.len(), 1);
        assert_eq!(creds[0].id, "some-id");
        assert_eq!(creds[0].name, "/example-password");
        assert_eq!(creds[0].credential_type, CredentialType::Password);
        assert_eq!(creds[0].value, "some-password");
        assert_eq!(creds[0].version_created_at, "2017-01-05T01:01:01Z");
    }

    #[test]
    fn empty_data_is_its_own_error() {
        let err = decode_envelopes(r#"{"data":[]}"#).unwrap_err();
        assert!(matches!(err, CredHubError::EmptyResult));
        assert_eq!(err.to_string(), "response did not contain any credentials");
    }

    #[test]
    fn invalid_json_is_decode_error() {
        assert!(matches!(
            decode_envelopes("something-invalid"),
            Err(CredHubError::Decode(_))
        ));
        assert!(matches!(decode_envelopes(""), Err(CredHubError::Decode(_))));
    }

    #[test]
    fn missing_data_array_is_decode_error() {
        assert!(matches!(
            decode_envelopes(r#"{"credentials":[]}"#),
            Err(CredHubError::Decode(_))
        ));
        assert!(matches!(
            decode_envelopes(r#"{"data":{}}"#),
            Err(CredHubError::Decode(_))
        ));
    }

    #[test]
    fn envelope_without_name_is_rejected() {
        let body = r#"{"data":[{"id":"1","name":"","type":"value","value":"v","version_created_at":"t"}]}"#;
        assert!(matches!(
            decode_envelopes(body),
            Err(CredHubError::Decode(_))
        ));

        let body =
            r#"{"data":[{"id":"1","name":"/n","type":"","value":"v","version_created_at":"t"}]}"#;
        assert!(matches!(
            decode_envelopes(body),
            Err(CredHubError::Decode(_))
        ));
    }

    #[test]
    fn keeps_server_order() {
        let body = r#"{"data":[
            {"id":"2","name":"/n","type":"value","value":"newer","version_created_at":"t2"},
            {"id":"1","name":"/n","type":"value","value":"older","version_created_at":"t1"}
        ]}"#;
        let ids: Vec<_> = decode_envelopes(body)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, ["2", "1"]);
    }

    #[test]
    fn typed_decode_refuses_other_tags() {
        let body = r#"{"data":[{"id":"1","name":"/c","type":"certificate",
            "value":{"certificate":"c"},"version_created_at":"t"}]}"#;
        let envelope = decode_envelopes(body).unwrap().remove(0);

        let err = decode_typed::<Password>(envelope.clone()).unwrap_err();
        assert!(matches!(err, CredHubError::Decode(_)));
        assert!(err.to_string().contains("expected a password credential"));

        let cert = decode_typed::<Certificate>(envelope).unwrap();
        assert_eq!(cert.value.certificate.as_deref(), Some("c"));
    }

    #[test]
    fn typed_decode_checks_value_shape() {
        let body = r#"{"data":[{"id":"1","name":"/u","type":"user",
            "value":"not-an-object","version_created_at":"t"}]}"#;
        let envelope = decode_envelopes(body).unwrap().remove(0);
        assert!(matches!(
            decode_typed::<User>(envelope),
            Err(CredHubError::Decode(_))
        ));
    }

    #[test]
    fn single_envelope_body() {
        let body =
            r#"{"id":"abc","name":"/n","type":"value","value":"v","version_created_at":"t"}"#;
        let cred = decode_envelope(body).unwrap();
        assert_eq!(cred.id, "abc");
    }

    #[test]
    fn search_results_may_be_empty() {
        assert!(decode_found(r#"{"credentials":[]}"#).unwrap().is_empty());

        let found =
            decode_found(r#"{"credentials":[{"name":"/a","version_created_at":"t"}]}"#).unwrap();
        assert_eq!(found[0].name, "/a");
    }

    #[test]
    fn path_listing() {
        let paths = decode_paths(r#"{"paths":[{"path":"/deploy/"},{"path":"/"}]}"#).unwrap();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].path, "/deploy/");
    }

    #[test]
    fn error_message_extraction() {
        assert_eq!(
            decode_error_message(r#"{"error":"credential does not exist"}"#).as_deref(),
            Some("credential does not exist")
        );
        assert_eq!(decode_error_message(r#"{"data":[]}"#), None);
        assert_eq!(decode_error_message("<html>"), None);
    }
}
