// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! I/O module - mesh loading

mod importer;
mod obj;
mod stl;

pub use importer::import_mesh;
pub use obj::parse_obj;
pub use stl::read_stl;
