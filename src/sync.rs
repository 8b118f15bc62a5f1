// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Synchronization of records with the bridge.
//!
//! A record with no pending edits is re-fetched. A record with pending edits
//! pushes them in at most two writes: name and startup behavior go to the
//! resource root, everything else goes to its state sub-resource. Only the
//! edited fields are sent.
//!
//! Bits are cleared only after the bridge acknowledged the write that carried
//! them. When the root write succeeds and the state write fails, the
//! identity bits stay cleared and the next sync resumes with the state write.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{Error, ParseError};
use crate::protocol::{Method, Transport};
use crate::resource::Resource;
use crate::response::ack;

/// Handle records use to reach the bridge.
///
/// Cloning is cheap; every record of a bridge holds a clone.
pub struct Synchronizer<T> {
    transport: Arc<T>,
}

impl<T> Synchronizer<T> {
    pub(crate) fn new(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl<T> Clone for Synchronizer<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T> fmt::Debug for Synchronizer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Synchronizer").finish_non_exhaustive()
    }
}

impl<T: Transport> Synchronizer<T> {
    /// Reads a resource and checks it for an embedded error.
    pub(crate) async fn get(&self, path: &str) -> Result<Value, Error> {
        let body = self.transport.request(Method::Get, path, None).await?;
        ack::parse(&body)
    }

    /// Writes a partial resource and checks the acknowledgement.
    pub(crate) async fn put(&self, path: &str, payload: &Value) -> Result<(), Error> {
        let body = serde_json::to_vec(payload).map_err(ParseError::from)?;
        let response = self
            .transport
            .request(Method::Put, path, Some(&body))
            .await?;
        ack::check_write(&response)
    }

    /// Brings `record` and the bridge in line.
    ///
    /// # Errors
    ///
    /// Returns the transport, decode or rejection error of the first request
    /// that failed. Bits of writes that succeeded before it stay cleared.
    pub(crate) async fn sync<R: Resource>(&self, record: &mut R) -> Result<(), Error> {
        let kind = record.kind();
        let root = format!(
            "/{}/{}",
            kind.collection(),
            urlencoding::encode(record.id())
        );

        if record.mask().is_empty() {
            tracing::debug!(%kind, id = record.id(), "Re-fetching clean record");
            let value = self.get(&root).await?;
            return record.refresh(value);
        }

        if record.mask().has_identity() {
            tracing::debug!(%kind, id = record.id(), pending = %record.mask(), "Pushing identity");
            self.put(&root, &record.identity_payload()).await?;
            record.mask_mut().clear_identity();
            if record.mask().is_empty() {
                return Ok(());
            }
        }

        tracing::debug!(%kind, id = record.id(), pending = %record.mask(), "Pushing state");
        let path = format!("{root}/{}", kind.state_resource());
        self.put(&path, &record.state_payload()).await?;
        record.mask_mut().clear();
        Ok(())
    }
}
