// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `hue_bridge` library.
//!
//! This module provides the error hierarchy for the library: value
//! validation, transport failures, payload decoding, and rejections reported
//! by the bridge itself.

use thiserror::Error;

use crate::resource::ResourceKind;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A value could not be validated or parsed (hex colors, enum strings).
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// Error occurred while talking to the bridge.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Error occurred while decoding a bridge payload.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The device cannot perform the operation, or the bridge refused it.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),

    /// A sensor does not report a value with the requested name.
    #[error("sensor value {0:?} does not exist")]
    ValueNotFound(String),

    /// A sensor value exists but has a different type.
    #[error("sensor value {name:?} is not a {expected}")]
    ValueNotType {
        /// The requested value name.
        name: String,
        /// The type that was requested.
        expected: &'static str,
    },
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A hex color string is malformed.
    #[error("hex value {0:?} is invalid")]
    InvalidHexColor(String),

    /// A string does not name a known variant of an enumeration.
    #[error("invalid {kind} value {value:?}")]
    InvalidVariant {
        /// The enumeration being parsed.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Two gamut vertices coincide or all three are collinear.
    #[error("gamut triangle is degenerate")]
    DegenerateGamut,
}

/// Errors related to bridge communication.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Connection to the bridge failed or returned an unexpected status.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// Invalid URL or address.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The bridge refused the API key.
    #[error("authentication failed")]
    AuthenticationFailed,
}

/// Errors related to decoding bridge payloads.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Expected field is missing from the payload.
    #[error("missing field in response: {0}")]
    MissingField(String),

    /// Unexpected payload format.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    /// Failed to parse a specific value.
    #[error("failed to parse {field}: {message}")]
    InvalidValue {
        /// The field that failed to parse.
        field: String,
        /// Description of the parsing failure.
        message: String,
    },

    /// A single resource entry of a listing could not be decoded.
    #[error("could not decode {kind} {id:?}: {source}")]
    Resource {
        /// Kind of the resource.
        kind: ResourceKind,
        /// Identifier of the entry.
        id: String,
        /// Underlying failure.
        #[source]
        source: Box<Error>,
    },
}

/// Errors related to device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Device does not support the requested capability.
    #[error("device does not support {capability}")]
    UnsupportedCapability {
        /// The capability that is not supported.
        capability: String,
    },

    /// The bridge rejected a field of a request.
    #[error("error returned from {address:?}: {description}")]
    Rejected {
        /// Resource address of the failing field.
        address: String,
        /// Description supplied by the bridge.
        description: String,
    },
}

impl DeviceError {
    pub(crate) fn no_color() -> Self {
        Self::UnsupportedCapability {
            capability: "color".to_string(),
        }
    }
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::InvalidHexColor("GG8000".to_string());
        assert_eq!(err.to_string(), "hex value \"GG8000\" is invalid");
    }

    #[test]
    fn error_from_value_error() {
        let err: Error = ValueError::DegenerateGamut.into();
        assert!(matches!(err, Error::Value(ValueError::DegenerateGamut)));
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::MissingField("name".to_string());
        assert_eq!(err.to_string(), "missing field in response: name");
    }

    #[test]
    fn resource_parse_error_names_entry() {
        let err = ParseError::Resource {
            kind: ResourceKind::Sensor,
            id: "7".to_string(),
            source: Box::new(ParseError::MissingField("config".to_string()).into()),
        };
        assert_eq!(
            err.to_string(),
            "could not decode sensor \"7\": parse error: missing field in response: config"
        );
    }

    #[test]
    fn device_error_display() {
        let err = DeviceError::Rejected {
            address: "/lights/1/state/bri".to_string(),
            description: "invalid value, 300, for parameter, bri".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "error returned from \"/lights/1/state/bri\": invalid value, 300, for parameter, bri"
        );
        assert_eq!(
            DeviceError::no_color().to_string(),
            "device does not support color"
        );
    }
}
