// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use crate::error::ProtocolError;
use crate::protocol::{Method, Transport};
use crate::sync::Synchronizer;

/// A request seen by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Answers requests from a fixed table and records them.
///
/// Unscripted writes are acknowledged with an empty success list;
/// unscripted reads fail.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), Option<Value>>>,
    log: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Answers `method path` with `body`.
    pub(crate) fn reply(&self, method: Method, path: &str, body: Value) -> &Self {
        self.routes
            .lock()
            .insert((method, path.to_string()), Some(body));
        self
    }

    /// Makes `method path` fail at the transport level.
    pub(crate) fn fail(&self, method: Method, path: &str) -> &Self {
        self.routes.lock().insert((method, path.to_string()), None);
        self
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.log.lock().clone()
    }

    pub(crate) fn paths(&self) -> Vec<String> {
        self.log
            .lock()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }

    pub(crate) fn clear_log(&self) {
        self.log.lock().clear();
    }
}

impl Transport for ScriptedTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&[u8]>,
    ) -> Result<Vec<u8>, ProtocolError> {
        let body = body.map(|b| serde_json::from_slice(b).unwrap_or(Value::Null));
        self.log.lock().push(Request {
            method,
            path: path.to_string(),
            body,
        });

        match self.routes.lock().get(&(method, path.to_string())) {
            Some(Some(reply)) => Ok(reply.to_string().into_bytes()),
            Some(None) => Err(ProtocolError::ConnectionFailed(format!("{method} {path}"))),
            None if method == Method::Put => Ok(b"[]".to_vec()),
            None => Err(ProtocolError::ConnectionFailed(format!(
                "no route for {method} {path}"
            ))),
        }
    }
}

pub(crate) fn synchronizer(transport: &Arc<ScriptedTransport>) -> Synchronizer<ScriptedTransport> {
    Synchronizer::new(Arc::clone(transport))
}
