//! Hashing of geometry inputs.

use std::hash::{Hash, Hasher};

use glam::Vec3;

/// Hash a single [`Vec3`] by converting each component to bits.
fn hash_vec3(v: &Vec3, hasher: &mut impl Hasher) {
    v.x.to_bits().hash(hasher);
    v.y.to_bits().hash(hasher);
    v.z.to_bits().hash(hasher);
}

/// Hash every point of a [`Vec3`] slice, returning a `u64` digest.
///
/// Used to compare generated point sequences bit-for-bit (e.g. to confirm
/// a cached curve matches a fresh build).
#[must_use]
pub fn hash_vec3_slice(slice: &[Vec3]) -> u64 {
    let mut hasher = rustc_hash::FxHasher::default();
    slice.len().hash(&mut hasher);
    for v in slice {
        hash_vec3(v, &mut hasher);
    }
    hasher.finish()
}

/// Cache key for an angle. `-0.0` and `0.0` map to the same key.
#[must_use]
pub fn angle_key(radians: f32) -> u32 {
    if radians == 0.0 {
        0.0_f32.to_bits()
    } else {
        radians.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_slices_hash_equal() {
        let a = vec![Vec3::X, Vec3::new(0.5, 1.0, -2.0)];
        let b = a.clone();
        assert_eq!(hash_vec3_slice(&a), hash_vec3_slice(&b));
    }

    #[test]
    fn any_component_change_changes_hash() {
        let a = vec![Vec3::ZERO, Vec3::ONE, Vec3::Y];
        let mut b = a.clone();
        b[1].z = 1.000_001;
        assert_ne!(hash_vec3_slice(&a), hash_vec3_slice(&b));
        assert_ne!(hash_vec3_slice(&a), hash_vec3_slice(&a[..2]));
    }

    #[test]
    fn signed_zero_shares_a_key() {
        assert_eq!(angle_key(0.0), angle_key(-0.0));
        assert_ne!(angle_key(0.0), angle_key(std::f32::consts::PI));
    }
}
