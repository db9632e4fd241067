use crate::error::GeometryError;
use crate::math::{Line, Radians, Vec3};

use super::{EntityId, HitKind, Intersection, SurfaceColors, Triangle};

/// Four roughly coplanar points drawn as two triangles.
///
/// The point farthest from `p0` becomes the pivot of the second triangle
/// and the two remaining points form the shared diagonal, so the halves
/// never overlap whatever order the corners are given in.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    id: EntityId,
    halves: [Triangle; 2],
}

impl Quad {
    pub fn new(
        p0: Vec3,
        p1: Vec3,
        p2: Vec3,
        p3: Vec3,
        colors: SurfaceColors,
    ) -> Result<Self, GeometryError> {
        let mut farthest = 0;
        let mut best = 0.0;
        for (idx, p) in [p1, p2, p3].iter().enumerate() {
            let distance = (p0 - *p).magnitude();
            if distance > best {
                best = distance;
                farthest = idx;
            }
        }
        let (pivot, d0, d1) = match farthest {
            0 => (p1, p2, p3),
            1 => (p2, p1, p3),
            _ => (p3, p1, p2),
        };

        Ok(Self {
            id: EntityId::new(),
            halves: [
                Triangle::new(p0, d0, d1, colors)?,
                Triangle::new(pivot, d0, d1, colors)?,
            ],
        })
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn halves(&self) -> &[Triangle; 2] {
        &self.halves
    }

    pub fn colors(&self) -> SurfaceColors {
        self.halves[0].colors()
    }

    pub fn translate(&self, delta: Vec3) -> Self {
        Self {
            id: EntityId::new(),
            halves: [
                self.halves[0].translate(delta),
                self.halves[1].translate(delta),
            ],
        }
    }

    pub fn rotate(&self, axis: &Line, angle: Radians) -> Self {
        Self {
            id: EntityId::new(),
            halves: [
                self.halves[0].rotate(axis, angle),
                self.halves[1].rotate(axis, angle),
            ],
        }
    }

    /// Intersects both halves and merges the results.
    ///
    /// An inside hit on either half wins. When both halves only touch the
    /// ray on an edge, that edge is the internal diagonal and is drawn with
    /// the fill color.
    pub fn intersect(&self, ray: &Line) -> Option<Intersection> {
        let first = self.halves[0].intersect(ray);
        let second = self.halves[1].intersect(ray);

        match (first, second) {
            (Some(hit), _) if hit.kind == HitKind::Inside => Some(hit),
            (_, Some(hit)) if hit.kind == HitKind::Inside => Some(hit),
            (None, other) | (other, None) => other,
            (Some(a), Some(b)) if a.kind == HitKind::Edge && b.kind == HitKind::Edge => {
                Some(Intersection {
                    color: self.colors().fill,
                    ..a
                })
            }
            (first, _) => first,
        }
    }
}
