// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport layer for talking to a bridge.
//!
//! The rest of the crate only needs a way to send a request with a method, a
//! path below the API root and an optional JSON body, and get the raw response
//! body back. That capability is the [`Transport`] trait.
//!
//! # Transports
//!
//! - [`HttpTransport`]: reqwest-based HTTP(S) transport (feature `http`)
//!
//! Custom transports can be plugged into [`Bridge::new`](crate::Bridge::new).

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpConfig, HttpTransport};

use std::fmt;

use crate::error::ProtocolError;

/// HTTP method of a bridge request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read a resource.
    Get,
    /// Write a (partial) resource.
    Put,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait for transports that can carry requests to a bridge.
///
/// Paths are relative to the authenticated API root, e.g. `/lights/1/state`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a request and returns the raw response body.
    ///
    /// # Arguments
    ///
    /// * `method` - The request method
    /// * `path` - Path below the API root, starting with `/`
    /// * `body` - JSON body for writes
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the request cannot be delivered, times out
    /// or the bridge answers with a non-success status.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, ProtocolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Put.as_str(), "PUT");
    }
}
