// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - Test data factories (fixtures)
//! - An in-memory spy transport recording every call

mod fixtures;
mod spy;

#[allow(unused_imports)]
pub use fixtures::{event_ics, test_config, test_input, ts};
pub use spy::{Call, SpyTransport};
