// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fmt;
use thiserror::Error;

/// Failure of a call against the remote collection API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("cannot reach {url} -- check [api].base_url and that the shop API is up ({detail})")]
    Network { url: String, detail: String },

    #[error("{}", server_message(.status, .detail))]
    Server { status: Option<u16>, detail: String },
}

impl ApiError {
    pub fn network(url: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self::Network {
            url: url.into(),
            detail: detail.to_string(),
        }
    }

    pub fn server(status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::Server {
            status,
            detail: detail.into(),
        }
    }

    pub fn malformed(detail: impl fmt::Display) -> Self {
        Self::Server {
            status: None,
            detail: format!("malformed response: {detail}"),
        }
    }
}

fn server_message(status: &Option<u16>, detail: &str) -> String {
    match (*status, detail.is_empty()) {
        (Some(status), true) => format!("server returned {status}"),
        (Some(status), false) => format!("server error ({status}): {detail}"),
        (None, _) => format!("server error: {detail}"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub key: &'static str,
    pub reason: String,
}

/// A draft that cannot be submitted yet. Fields are named by their wire key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
    pub invalid: Vec<InvalidField>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }

    pub fn is_missing(&self, key: &str) -> bool {
        self.missing.iter().any(|missing| *missing == key)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if !self.missing.is_empty() {
            parts.push(format!(
                "missing required fields: {}",
                self.missing.join(", ")
            ));
        }
        for field in &self.invalid {
            parts.push(format!("invalid {}: {}", field.key, field.reason));
        }
        if parts.is_empty() {
            return f.write_str("draft is invalid");
        }
        write!(f, "{} -- fix the draft and submit again", parts.join("; "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("nothing to {0} -- {1}")]
    NotReady(&'static str, &'static str),

    #[error("{kind} {id} is not in the current list -- run `list` and retry")]
    UnknownItem { kind: &'static str, id: String },

    #[error("{kind} has no field {key:?} -- expected one of: {expected}")]
    UnknownField {
        kind: &'static str,
        key: String,
        expected: String,
    },
}

#[cfg(test)]
mod tests {
    use super::{ApiError, InvalidField, ValidationError};

    #[test]
    fn validation_message_lists_missing_and_invalid_fields() {
        let error = ValidationError {
            missing: vec!["nome", "custo"],
            invalid: vec![InvalidField {
                key: "quantidade",
                reason: "expected a whole number".to_owned(),
            }],
        };
        let message = error.to_string();
        assert!(message.contains("missing required fields: nome, custo"));
        assert!(message.contains("invalid quantidade: expected a whole number"));
        assert!(error.is_missing("nome"));
        assert!(!error.is_missing("fabricante"));
    }

    #[test]
    fn server_error_message_includes_status_when_known() {
        assert_eq!(
            ApiError::server(Some(500), "boom").to_string(),
            "server error (500): boom"
        );
        assert_eq!(ApiError::server(Some(502), "").to_string(), "server returned 502");
        assert!(ApiError::malformed("missing key").to_string().contains("malformed response"));
    }

    #[test]
    fn network_error_message_is_actionable() {
        let message = ApiError::network("http://shop.test/api", "connection refused").to_string();
        assert!(message.contains("cannot reach http://shop.test/api"));
        assert!(message.contains("[api].base_url"));
    }
}
