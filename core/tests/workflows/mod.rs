// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the davcal-core crate.
//!
//! These tests drive the orchestrator against an in-memory spy transport and
//! check both the results and the calls that reached the server.

mod calendars;
mod event_lifecycle;
mod requests;
mod session;
mod validation;
