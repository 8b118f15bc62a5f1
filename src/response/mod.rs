// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for bridge JSON bodies.
//!
//! `ack` turns acknowledgements into errors; `wire` holds the shapes of
//! resource listings before they are validated into records.

pub(crate) mod ack;
pub(crate) mod wire;
