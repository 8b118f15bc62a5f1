// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switchable devices without light control.

use super::device::DeviceCore;
use super::switchable::delegate_switchable;

/// A switchable device such as a smart plug.
///
/// All operations come from [`Switchable`](super::Switchable).
#[derive(Debug)]
pub struct Control<T> {
    pub(crate) core: DeviceCore<T>,
}

impl<T> Control<T> {
    pub(crate) fn new(core: DeviceCore<T>) -> Self {
        Self { core }
    }
}

delegate_switchable!(Control);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DeviceError, Error};
    use crate::protocol::Method;
    use crate::resource::{Device, Switchable};
    use crate::state::Attribute;
    use crate::testing::{ScriptedTransport, synchronizer};
    use crate::types::{Alert, StartupMode};
    use serde_json::{Value, json};
    use std::sync::Arc;

    fn plug_json(on: bool) -> Value {
        json!({
            "name": "Coffee maker",
            "uniqueid": "7c:b0:3e:aa:00:a3:65:5c-03",
            "type": "On/Off plug-in unit",
            "modelid": "Plug 01",
            "state": {"on": on, "alert": "none", "reachable": true}
        })
    }

    fn plug(transport: &Arc<ScriptedTransport>) -> Control<ScriptedTransport> {
        match Device::decode("4", plug_json(false), &synchronizer(transport)).unwrap() {
            Device::Control(control) => control,
            Device::Light(_) => panic!("expected a control"),
        }
    }

    #[tokio::test]
    async fn set_on_pushes_state_immediately() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut control = plug(&transport);

        control.on().await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].path, "/lights/4/state");
        assert_eq!(
            requests[0].body,
            Some(json!({"on": true, "transitiontime": 0}))
        );
        assert!(control.is_on());
        assert!(control.dirty().is_empty());
    }

    #[tokio::test]
    async fn identity_then_state() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut control = plug(&transport);
        control.set_manual(true);

        control.set_name("Kettle").await.unwrap();
        control.set_startup(StartupMode::Resume).await.unwrap();
        control.set_alert(Alert::Select).await.unwrap();
        assert!(transport.requests().is_empty());

        control.update().await.unwrap();

        let requests = transport.requests();
        assert_eq!(transport.paths(), ["PUT /lights/4", "PUT /lights/4/state"]);
        assert_eq!(
            requests[0].body,
            Some(json!({"name": "Kettle", "config": {"startup": {"mode": "powerfail"}}}))
        );
        assert_eq!(
            requests[1].body,
            Some(json!({"alert": "select", "transitiontime": 0}))
        );
        assert!(control.dirty().is_empty());
    }

    #[tokio::test]
    async fn name_only_skips_state_write() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut control = plug(&transport);

        control.set_name("Kettle").await.unwrap();

        assert_eq!(transport.paths(), ["PUT /lights/4"]);
        assert_eq!(control.name(), "Kettle");
    }

    #[tokio::test]
    async fn clean_update_refetches() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(Method::Get, "/lights/4", plug_json(true));
        let mut control = plug(&transport);
        assert!(!control.is_on());

        control.update().await.unwrap();

        assert_eq!(transport.paths(), ["GET /lights/4"]);
        assert!(control.is_on());
    }

    #[tokio::test]
    async fn partial_failure_keeps_state_bits() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.reply(
            Method::Put,
            "/lights/4/state",
            json!([{"error": {"type": 201, "address": "/lights/4/state/on", "description": "device is not reachable"}}]),
        );
        let mut control = plug(&transport);
        control.set_manual(true);
        control.set_name("Kettle").await.unwrap();
        control.on().await.unwrap();

        let err = control.update().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Device(DeviceError::Rejected { ref address, .. }) if address == "/lights/4/state/on"
        ));
        assert!(!control.dirty().contains(Attribute::Name));
        assert!(control.dirty().contains(Attribute::On));

        // Resumes with the state write only
        transport.reply(Method::Put, "/lights/4/state", json!([{"success": {}}]));
        transport.clear_log();
        control.update().await.unwrap();
        assert_eq!(transport.paths(), ["PUT /lights/4/state"]);
        assert!(control.dirty().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_leaves_mask() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.fail(Method::Put, "/lights/4/state");
        let mut control = plug(&transport);

        assert!(matches!(control.on().await, Err(Error::Protocol(_))));
        assert!(control.dirty().contains(Attribute::On));
        assert!(control.is_on());
    }
}
