//! Row-parallel raster fill.
//!
//! A frame is split into image rows. Each call builds its own rayon pool
//! of [`RenderConfig::workers`] threads, hands every row to it as one job
//! and drops the pool once all rows are written, so nothing outlives the
//! call. Rows are disjoint slices of the raster, so pixels are never
//! contended and the result does not depend on scheduling order.

use std::borrow::Borrow;
use std::panic::{self, AssertUnwindSafe};

use image::RgbaImage;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{error, warn};

use crate::colors::{self, Color};
use crate::math::Line;
use crate::shape::{Intersection, Shape};

/// Rendering knobs shared by every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Worker threads per frame. `0` lets rayon pick one per core.
    pub workers: usize,
    /// Distance from the eye to the image plane. Hits at or closer than
    /// this are discarded.
    pub focal_distance: f64,
    /// Color of pixels whose ray hits nothing.
    pub background: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            workers: 16,
            focal_distance: 0.03,
            background: colors::TRANSPARENT,
        }
    }
}

impl RenderConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_focal_distance(mut self, focal_distance: f64) -> Self {
        self.focal_distance = focal_distance;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }
}

/// Returns the closest hit farther than `min_distance` along the ray.
///
/// Every shape is tested; ties keep the earliest shape.
pub fn nearest_hit<S: Borrow<Shape>>(
    ray: &Line,
    shapes: &[S],
    min_distance: f64,
) -> Option<Intersection> {
    let mut nearest: Option<Intersection> = None;
    for shape in shapes {
        let Some(hit) = shape.borrow().intersect(ray) else {
            continue;
        };
        // Behind the eye or in front of the image plane.
        if hit.signed_distance <= min_distance {
            continue;
        }
        if nearest.map_or(true, |best| hit.signed_distance < best.signed_distance) {
            nearest = Some(hit);
        }
    }
    nearest
}

/// Fills a `width` x `height` raster, asking `shade` for each pixel.
///
/// `None` leaves the background. A row whose shading panics is reset to
/// the background and logged; the other rows are unaffected.
pub(crate) fn render_rows<F>(width: u32, height: u32, config: &RenderConfig, shade: F) -> RgbaImage
where
    F: Fn(u32, u32) -> Option<Color> + Sync,
{
    let mut raster = RgbaImage::from_pixel(width, height, config.background);
    let row_len = width as usize * 4;

    let fill = |raster: &mut RgbaImage| {
        raster
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(row, pixels)| {
                let row = row as u32;
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                    shade_row(row, pixels, &shade);
                }));
                if outcome.is_err() {
                    error!(row, "row shading panicked, leaving background");
                    fill_row(pixels, config.background);
                }
            });
    };

    match ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|idx| format!("render-{idx}"))
        .build()
    {
        Ok(pool) => pool.install(|| fill(&mut raster)),
        Err(err) => {
            warn!(%err, "could not build render pool, using the global pool");
            fill(&mut raster);
        }
    }

    raster
}

#[inline]
fn shade_row<F>(row: u32, pixels: &mut [u8], shade: &F)
where
    F: Fn(u32, u32) -> Option<Color>,
{
    for (col, pixel) in pixels.chunks_exact_mut(4).enumerate() {
        if let Some(color) = shade(col as u32, row) {
            pixel.copy_from_slice(&color.0);
        }
    }
}

fn fill_row(pixels: &mut [u8], color: Color) {
    for pixel in pixels.chunks_exact_mut(4) {
        pixel.copy_from_slice(&color.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::shape::{Cube, SurfaceColors, Triangle};

    #[test]
    fn every_pixel_is_shaded_once() {
        let config = RenderConfig::default().with_workers(3);
        let raster = render_rows(7, 5, &config, |col, row| {
            Some(image::Rgba([col as u8, row as u8, 0, 255]))
        });

        assert_eq!(raster.dimensions(), (7, 5));
        for (col, row, pixel) in raster.enumerate_pixels() {
            assert_eq!(pixel.0, [col as u8, row as u8, 0, 255]);
        }
    }

    #[test]
    fn unshaded_pixels_keep_background() {
        let config = RenderConfig::default().with_background(colors::WHITE);
        let raster = render_rows(4, 4, &config, |col, _| (col == 0).then_some(colors::RED));

        assert_eq!(*raster.get_pixel(0, 3), colors::RED);
        assert_eq!(*raster.get_pixel(1, 3), colors::WHITE);
    }

    #[test]
    fn panicking_row_falls_back_to_background() {
        let config = RenderConfig::default().with_workers(2);
        let raster = render_rows(3, 4, &config, |_, row| {
            if row == 2 {
                panic!("shader failure");
            }
            Some(colors::BLUE)
        });

        for (_, row, pixel) in raster.enumerate_pixels() {
            let expected = if row == 2 { colors::TRANSPARENT } else { colors::BLUE };
            assert_eq!(*pixel, expected);
        }
    }

    #[test]
    fn automatic_worker_count_renders() {
        let config = RenderConfig::default().with_workers(0);
        let raster = render_rows(2, 2, &config, |_, _| Some(colors::GREEN));
        assert!(raster.pixels().all(|p| *p == colors::GREEN));
    }

    #[test]
    fn nearest_hit_prefers_closest_shape() {
        let near = Cube::with_colors(1.0, 1.0, 1.0, SurfaceColors::solid(colors::GREEN))
            .expect("cube")
            .translate(Vec3::I * 3.0);
        let far = Cube::with_colors(4.0, 4.0, 1.0, SurfaceColors::solid(colors::BLUE))
            .expect("cube")
            .translate(Vec3::I * 6.0);
        let shapes: Vec<Shape> = vec![far.into(), near.into()];

        let ray = Line::new(Vec3::ZERO, Vec3::new(1.0, 0.1, 0.05));
        let hit = nearest_hit(&ray, &shapes, 0.03).expect("hit");
        assert_eq!(hit.color, colors::GREEN);
    }

    #[test]
    fn nearest_hit_skips_hits_inside_focal_distance() {
        let triangle = Triangle::new(
            Vec3::new(0.01, 0.0, 1.0),
            Vec3::new(0.01, 1.0, -1.0),
            Vec3::new(0.01, -1.0, -1.0),
            SurfaceColors::solid(colors::RED),
        )
        .expect("triangle");
        let shapes = [Shape::from(triangle)];
        let ray = Line::new(Vec3::ZERO, Vec3::I);

        assert!(nearest_hit(&ray, &shapes, 0.03).is_none());
        assert!(nearest_hit(&ray, &shapes, 0.0).is_some());
    }

    #[test]
    fn nearest_hit_ignores_shapes_behind() {
        let behind = Cube::new(1.0, 1.0, 1.0).expect("cube").translate(Vec3::I * -4.0);
        let shapes = [Shape::from(behind)];
        assert!(nearest_hit(&Line::new(Vec3::ZERO, Vec3::I), &shapes, 0.03).is_none());
    }
}
