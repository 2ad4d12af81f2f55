use glam::DVec3;

/// Orthonormal basis built from a single reference axis.
///
/// Directional samplers draw vectors in a canonical frame where +Z is the
/// reference direction, then map them into world space through this basis.
#[derive(Debug, Clone, Copy)]
pub struct Onb {
    u: DVec3,
    v: DVec3,
    w: DVec3,
}

impl Onb {
    /// Build a basis whose w axis is the unit vector along `n`.
    pub fn from_w(n: DVec3) -> Self {
        let w = n.normalize();
        // Pick a helper axis that is guaranteed not to be parallel to w
        let helper = if w.x.abs() > 0.9 { DVec3::Y } else { DVec3::X };
        let v = w.cross(helper).normalize();
        let u = w.cross(v);
        Self { u, v, w }
    }

    pub fn u(&self) -> DVec3 {
        self.u
    }

    pub fn v(&self) -> DVec3 {
        self.v
    }

    pub fn w(&self) -> DVec3 {
        self.w
    }

    /// Map a vector expressed in this basis into world coordinates.
    pub fn local(&self, a: DVec3) -> DVec3 {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onb_axes_are_orthonormal() {
        let onb = Onb::from_w(DVec3::new(1.0, 2.0, 3.0));

        assert!((onb.u().length() - 1.0).abs() < 1e-12);
        assert!((onb.v().length() - 1.0).abs() < 1e-12);
        assert!((onb.w().length() - 1.0).abs() < 1e-12);

        assert!(onb.u().dot(onb.v()).abs() < 1e-12);
        assert!(onb.u().dot(onb.w()).abs() < 1e-12);
        assert!(onb.v().dot(onb.w()).abs() < 1e-12);
    }

    #[test]
    fn test_onb_w_follows_input() {
        let n = DVec3::new(0.0, 5.0, 0.0);
        let onb = Onb::from_w(n);
        assert!((onb.w() - DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn test_onb_local_maps_z_to_w() {
        let onb = Onb::from_w(DVec3::new(1.0, 1.0, 0.0));
        let mapped = onb.local(DVec3::Z);
        assert!((mapped - onb.w()).length() < 1e-12);
    }

    #[test]
    fn test_onb_handles_x_dominant_axis() {
        // The helper-axis switch keeps the cross product well defined
        let onb = Onb::from_w(DVec3::X);
        assert!((onb.w() - DVec3::X).length() < 1e-12);
        assert!(onb.u().length() > 0.9);
    }
}
