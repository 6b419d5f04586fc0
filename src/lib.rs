// Copyright 2026 Slotpulse Contributors
// SPDX-License-Identifier: Apache-2.0

//! Slotpulse library — district availability snapshot pipeline.
//!
//! This library crate exposes the core modules for integration testing.

#![allow(dead_code, unused_imports)]

pub mod acquisition;
pub mod cli;
pub mod consolidation;
pub mod error;
pub mod model;
pub mod snapshot;
