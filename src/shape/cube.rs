use crate::colors;
use crate::error::GeometryError;
use crate::math::{Line, Radians, Vec3};

use super::{EntityId, Intersection, Quad, SurfaceColors};

/// A box built from six quads, centered on the origin.
///
/// `width` runs along J, `height` along K and `depth` along I.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    id: EntityId,
    faces: Vec<Quad>,
}

impl Cube {
    /// Colors used by [`Cube::new`]: solid fill with black edges.
    pub const DEFAULT_COLORS: SurfaceColors = SurfaceColors::outlined(colors::FILL, colors::EDGE);

    pub fn new(width: f64, height: f64, depth: f64) -> Result<Self, GeometryError> {
        Self::with_colors(width, height, depth, Self::DEFAULT_COLORS)
    }

    pub fn with_colors(
        width: f64,
        height: f64,
        depth: f64,
        colors: SurfaceColors,
    ) -> Result<Self, GeometryError> {
        let w = Vec3::J * (width / 2.0);
        let h = Vec3::K * (height / 2.0);
        let d = Vec3::I * (depth / 2.0);

        // (face center, first half-extent, second half-extent)
        let layout = [(h, w, d), (-h, w, d), (d, w, h), (-d, w, h), (w, h, d), (-w, h, d)];

        let mut faces = Vec::with_capacity(layout.len());
        for (center, a, b) in layout {
            faces.push(Quad::new(
                center + a + b,
                center - a + b,
                center + a - b,
                center - a - b,
                colors,
            )?);
        }

        Ok(Self {
            id: EntityId::new(),
            faces,
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn faces(&self) -> &[Quad] {
        &self.faces
    }

    pub fn translate(&self, delta: Vec3) -> Self {
        Self {
            id: EntityId::new(),
            faces: self.faces.iter().map(|face| face.translate(delta)).collect(),
        }
    }

    pub fn rotate(&self, axis: &Line, angle: Radians) -> Self {
        Self {
            id: EntityId::new(),
            faces: self.faces.iter().map(|face| face.rotate(axis, angle)).collect(),
        }
    }

    /// Returns the face hit with the smallest signed distance.
    pub fn intersect(&self, ray: &Line) -> Option<Intersection> {
        self.faces
            .iter()
            .filter_map(|face| face.intersect(ray))
            .min_by(|a, b| a.signed_distance.total_cmp(&b.signed_distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Degrees;
    use crate::shape::HitKind;
    use approx::assert_abs_diff_eq;

    fn slab() -> Cube {
        Cube::new(2.0, 1.0, 3.0).expect("valid cube")
    }

    #[test]
    fn has_six_faces() {
        assert_eq!(slab().faces().len(), 6);
    }

    #[test]
    fn nearest_face_wins() {
        let ray = Line::new(Vec3::I * -5.0, Vec3::I);
        let hit = slab().intersect(&ray).expect("hit");

        assert_abs_diff_eq!(hit.point, Vec3::I * -1.5, epsilon = 1e-9);
        assert_abs_diff_eq!(hit.signed_distance, 3.5, epsilon = 1e-9);
        // Dead center is the front face's diagonal seam.
        assert_eq!(hit.color, colors::FILL);
    }

    #[test]
    fn off_center_hit_is_filled() {
        let ray = Line::new(Vec3::new(-5.0, 0.4, 0.1), Vec3::I);
        let hit = slab().intersect(&ray).expect("hit");
        assert_eq!(hit.kind, HitKind::Inside);
        assert_eq!(hit.color, colors::FILL);
    }

    #[test]
    fn silhouette_edge_is_outlined() {
        let ray = Line::new(Vec3::new(-5.0, 1.0, 0.0), Vec3::I);
        let hit = slab().intersect(&ray).expect("hit");
        assert!(hit.kind.is_boundary());
        assert_eq!(hit.color, colors::EDGE);
    }

    #[test]
    fn corner_is_outlined() {
        let origin = Vec3::I * -5.0;
        let ray = Line::new(origin, Vec3::new(-1.5, 1.0, 0.5) - origin);
        let hit = slab().intersect(&ray).expect("hit");
        assert!(hit.kind.is_boundary());
        assert_eq!(hit.color, colors::EDGE);
    }

    #[test]
    fn ray_beside_the_cube_misses() {
        let ray = Line::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::I);
        assert!(slab().intersect(&ray).is_none());
    }

    #[test]
    fn custom_colors_apply_to_every_face() {
        let cube = Cube::with_colors(1.0, 1.0, 1.0, SurfaceColors::solid(colors::GREEN))
            .expect("valid cube");
        assert!(cube
            .faces()
            .iter()
            .all(|face| face.colors() == SurfaceColors::solid(colors::GREEN)));
    }

    #[test]
    fn flat_cube_is_degenerate() {
        assert!(Cube::new(1.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn rotated_cube_presents_its_side() {
        // A quarter turn about K swaps depth (I) and width (J).
        let cube = slab().rotate(&Line::new(Vec3::ZERO, Vec3::K), Degrees(90.0).into());
        let ray = Line::new(Vec3::I * -5.0, Vec3::I);
        let hit = cube.intersect(&ray).expect("hit");
        assert_abs_diff_eq!(hit.signed_distance, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn translated_cube_moves_away() {
        let cube = slab().translate(Vec3::I * 2.0);
        let ray = Line::new(Vec3::I * -5.0, Vec3::I);
        let hit = cube.intersect(&ray).expect("hit");
        assert_abs_diff_eq!(hit.signed_distance, 5.5, epsilon = 1e-9);
        assert_ne!(cube.id(), slab().id());
    }
}
