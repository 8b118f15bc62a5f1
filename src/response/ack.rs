// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bridge acknowledgements.
//!
//! Writes are answered with one entry per field:
//!
//! ```json
//! [
//!     {"success": {"/lights/1/state/bri": 200}},
//!     {"error": {"type": 7, "address": "/lights/1/state/sat", "description": "invalid value"}}
//! ]
//! ```
//!
//! Requests the bridge refuses as a whole (for example with an unknown API
//! key) are answered with the same array holding a single error, even for
//! reads. Some firmware sends a bare `{"error": {...}}` object instead.

use serde_json::Value;

use crate::error::{DeviceError, Error, ParseError};

/// Decodes a response body and fails on the first embedded error.
///
/// Successes next to an error are ignored: one rejected field fails the
/// whole request.
pub(crate) fn parse(body: &[u8]) -> Result<Value, Error> {
    let value: Value = serde_json::from_slice(body).map_err(ParseError::from)?;
    check(&value)?;
    Ok(value)
}

/// Checks the acknowledgement of a write. An empty body counts as success.
pub(crate) fn check_write(body: &[u8]) -> Result<(), Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    parse(body).map(drop)
}

fn check(value: &Value) -> Result<(), Error> {
    match value {
        Value::Array(entries) => {
            for entry in entries {
                if entry.get("success").is_some() {
                    continue;
                }
                let Some(error) = entry.get("error") else {
                    return Err(ParseError::UnexpectedFormat(format!(
                        "acknowledgement entry is neither success nor error: {entry}"
                    ))
                    .into());
                };
                return Err(rejection(error).into());
            }
            Ok(())
        }
        Value::Object(map) => match map.get("error") {
            Some(error) => Err(rejection(error).into()),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

fn rejection(error: &Value) -> DeviceError {
    let address = error
        .get("address")
        .and_then(Value::as_str)
        .unwrap_or("unknown URL")
        .to_string();
    let description = error
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("unknown error")
        .to_string();

    tracing::warn!(address = %address, description = %description, "Bridge rejected request");

    DeviceError::Rejected {
        address,
        description,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(result: Result<(), Error>) -> (String, String) {
        match result {
            Err(Error::Device(DeviceError::Rejected {
                address,
                description,
            })) => (address, description),
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn all_successes_pass() {
        let body = br#"[{"success":{"/lights/1/state/on":true}},{"success":{"/lights/1/state/bri":10}}]"#;
        assert!(check_write(body).is_ok());
    }

    #[test]
    fn empty_write_body_passes() {
        assert!(check_write(b"").is_ok());
        assert!(check_write(b" \n").is_ok());
    }

    #[test]
    fn first_error_wins_over_successes() {
        let body = br#"[
            {"success":{"/lights/1/state/on":true}},
            {"error":{"type":7,"address":"/lights/1/state/bri","description":"invalid value, 300, for parameter, bri"}},
            {"error":{"type":7,"address":"/lights/1/state/sat","description":"other"}}
        ]"#;
        let (address, description) = rejected(check_write(body));
        assert_eq!(address, "/lights/1/state/bri");
        assert_eq!(description, "invalid value, 300, for parameter, bri");
    }

    #[test]
    fn single_error_object() {
        let body = br#"{"error":{"type":1,"address":"/","description":"unauthorized user"}}"#;
        let (address, description) = rejected(parse(body).map(drop));
        assert_eq!(address, "/");
        assert_eq!(description, "unauthorized user");
    }

    #[test]
    fn error_without_details_uses_placeholders() {
        let (address, description) = rejected(check_write(br#"[{"error":{}}]"#));
        assert_eq!(address, "unknown URL");
        assert_eq!(description, "unknown error");
    }

    #[test]
    fn unknown_entries_are_rejected() {
        let result = check_write(br#"[{"warning":{}}]"#);
        assert!(matches!(
            result,
            Err(Error::Parse(ParseError::UnexpectedFormat(_)))
        ));
    }

    #[test]
    fn listings_pass_through() {
        let value = parse(br#"{"1":{"name":"Desk"}}"#).unwrap();
        assert_eq!(value["1"]["name"], "Desk");
        assert!(matches!(parse(b"{oops"), Err(Error::Parse(ParseError::Json(_)))));
    }
}
