//! The world: a camera observing a set of shapes.
//!
//! The [`Engine`] is shared between whoever moves the camera (an input
//! handler) and whoever requests frames (a render loop), possibly on
//! different threads, so all of its methods take `&self`.
//!
//! # Locking
//!
//! The camera and the entity map each sit behind a mutex. [`Engine::render`]
//! copies the camera and collects the shapes while holding the locks, then
//! releases them before tracing. A reposition that lands during a render
//! shows up in the next frame; it can never affect the frame in flight.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use image::RgbaImage;
use tracing::{debug, trace};

use crate::camera::Camera;
use crate::error::RenderError;
use crate::frame::Frame;
use crate::render::RenderConfig;
use crate::shape::{EntityId, Shape};

pub struct Engine {
    camera: Mutex<Camera>,
    // Ordered by id so every frame tests shapes in the same order.
    entities: Mutex<BTreeMap<EntityId, Arc<Shape>>>,
    config: RenderConfig,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// The guarded values are only ever replaced whole, so a panic while
/// holding a lock cannot leave them half-written.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Engine {
    /// An empty world with the camera at the origin looking along +X with
    /// a 45 degree horizontal field of view.
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            camera: Mutex::new(Camera::default()),
            entities: Mutex::new(BTreeMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// A snapshot of the current camera.
    pub fn camera(&self) -> Camera {
        *lock(&self.camera)
    }

    /// Replaces the camera frame with `transform(current frame)`.
    ///
    /// The transform runs while the camera lock is held, so concurrent
    /// repositions apply one after the other.
    pub fn reposition_camera<F>(&self, transform: F)
    where
        F: FnOnce(Frame) -> Frame,
    {
        let mut camera = lock(&self.camera);
        *camera = camera.with_frame(transform(camera.frame));
        trace!(origin = ?camera.frame.origin, "camera repositioned");
    }

    /// Adds a shape and returns its id.
    pub fn add(&self, shape: impl Into<Shape>) -> EntityId {
        let shape = shape.into();
        let id = shape.id();
        lock(&self.entities).insert(id, Arc::new(shape));
        debug!(%id, "entity added");
        id
    }

    pub fn add_all<I>(&self, shapes: I) -> Vec<EntityId>
    where
        I: IntoIterator,
        I::Item: Into<Shape>,
    {
        shapes.into_iter().map(|shape| self.add(shape)).collect()
    }

    /// Removes a shape, returning it if it was present.
    pub fn remove(&self, id: EntityId) -> Option<Shape> {
        let removed = lock(&self.entities).remove(&id)?;
        debug!(%id, "entity removed");
        Some(Arc::unwrap_or_clone(removed))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        lock(&self.entities).contains_key(&id)
    }

    pub fn len(&self) -> usize {
        lock(&self.entities).len()
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.entities).is_empty()
    }

    /// Renders the world as seen from the camera at the time of the call.
    pub fn render(&self, width: u32, ratio: f64) -> Result<RgbaImage, RenderError> {
        let shapes: Vec<Arc<Shape>> = lock(&self.entities).values().cloned().collect();
        let camera = self.camera();
        camera.render_perspective(width, ratio, &shapes, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::math::Vec3;
    use crate::shape::{Cube, SurfaceColors, Triangle};

    fn unit_cube() -> Cube {
        Cube::new(1.0, 1.0, 1.0).expect("cube")
    }

    #[test]
    fn new_engine_is_empty_with_default_camera() {
        let engine = Engine::new();
        assert!(engine.is_empty());
        assert_eq!(engine.camera(), Camera::default());
        assert_eq!(engine.config(), &RenderConfig::default());
    }

    #[test]
    fn add_and_remove_by_id() {
        let engine = Engine::new();
        let cube = unit_cube();
        let cube_id = cube.id();

        assert_eq!(engine.add(cube.clone()), cube_id);
        assert!(engine.contains(cube_id));
        assert_eq!(engine.len(), 1);

        assert_eq!(engine.remove(cube_id), Some(Shape::Cube(cube)));
        assert!(!engine.contains(cube_id));
        assert_eq!(engine.remove(cube_id), None);
    }

    #[test]
    fn add_all_keeps_every_shape() {
        let engine = Engine::new();
        let ids = engine.add_all((0..4).map(|n| unit_cube().translate(Vec3::J * n as f64)));
        assert_eq!(ids.len(), 4);
        assert_eq!(engine.len(), 4);
    }

    #[test]
    fn adding_the_same_shape_twice_keeps_one_entry() {
        let engine = Engine::new();
        let triangle = Triangle::new(Vec3::I, Vec3::J, Vec3::K, SurfaceColors::default())
            .expect("triangle");
        engine.add(triangle.clone());
        engine.add(triangle);
        assert_eq!(engine.len(), 1);
    }

    #[test]
    fn reposition_applies_transform_to_frame() {
        let engine = Engine::new();
        engine.reposition_camera(|frame| frame.translate(Vec3::I * -5.0));
        engine.reposition_camera(|frame| frame.translate(Vec3::K));
        assert_eq!(engine.camera().frame.origin, Vec3::new(-5.0, 0.0, 1.0));
    }

    #[test]
    fn render_sees_added_shapes_and_forgets_removed_ones() {
        let engine = Engine::with_config(RenderConfig::default().with_workers(4));
        engine.reposition_camera(|frame| frame.translate(Vec3::I * -3.0));
        let id = engine.add(unit_cube());

        let frame = engine.render(32, 1.0).expect("render");
        assert_eq!(*frame.get_pixel(16, 16), colors::FILL);

        engine.remove(id);
        let frame = engine.render(32, 1.0).expect("render");
        assert!(frame.pixels().all(|p| *p == colors::TRANSPARENT));
    }

    #[test]
    fn render_rejects_bad_ratio() {
        let engine = Engine::new();
        assert_eq!(
            engine.render(32, 0.0),
            Err(RenderError::InvalidViewport {
                width: 32,
                ratio: 0.0
            })
        );
    }
}
