// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Inside/outside classification from local feature normals

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Which side of the surface a query point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Outside,
    Inside,
}

impl Side {
    /// `1.0` outside, `-1.0` inside
    pub fn signum(self) -> f64 {
        match self {
            Self::Outside => 1.0,
            Self::Inside => -1.0,
        }
    }

    pub fn is_inside(self) -> bool {
        self == Self::Inside
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outside => write!(f, "outside"),
            Self::Inside => write!(f, "inside"),
        }
    }
}

/// Classify `point` against the feature at `reference` with outward `normal`.
///
/// Points on the tangent plane (zero dot product) count as outside. Only the
/// direction of `normal` matters, so it need not be unit length.
pub fn classify(point: &Point3<f64>, reference: &Point3<f64>, normal: &Vector3<f64>) -> Side {
    if (point - reference).dot(normal) >= 0.0 {
        Side::Outside
    } else {
        Side::Inside
    }
}
