use std::ops::Mul;

use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Rigid local transform: a rotation followed by a translation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position)
    }

    /// Maps a point from this transform's space into its parent space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.position
    }

    pub fn inverse(&self) -> Self {
        let rotation = self.rotation.inverse();

        Self {
            position: -(rotation * self.position),
            rotation,
        }
    }
}

/// Hierarchical composition: `parent * child` maps child-local
/// coordinates through the child, then through the parent.
impl Mul for Transform {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            position: self.rotation * rhs.position + self.position,
            rotation: self.rotation * rhs.rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_a() -> Transform {
        Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(0.7),
        }
    }

    fn sample_b() -> Transform {
        Transform {
            position: Vec3::new(-4.0, 0.5, 2.0),
            rotation: Quat::from_rotation_x(-1.2),
        }
    }

    #[test]
    fn composition_matches_matrix_product() {
        let composed = (sample_a() * sample_b()).matrix();
        let expected = sample_a().matrix() * sample_b().matrix();

        assert!(composed.abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn inverse_undoes_the_transform() {
        let round_trip = sample_a() * sample_a().inverse();

        assert!(round_trip.matrix().abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn transform_point_matches_matrix() {
        let point = Vec3::new(0.3, -2.0, 5.0);

        let direct = sample_b().transform_point(point);
        let via_matrix = sample_b().matrix().transform_point3(point);

        assert!((direct - via_matrix).length() < 1e-5);
    }
}
