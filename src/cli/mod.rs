// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for the polyprox binary

pub mod points;
pub mod reporter;

pub use points::{parse_point, parse_points};
pub use reporter::Reporter;
