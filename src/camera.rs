//! Perspective camera.
//!
//! # Coordinate System
//!
//! The camera looks along its frame's `i` axis, with `j` pointing left and
//! `k` pointing up. Pixel `(0, 0)` is the top-left corner of the image.
//!
//! # Ray Generation
//!
//! A virtual image plane sits at the focal distance in front of the eye,
//! sized so its edges lie exactly on the field of view. Each pixel is a
//! point on that plane and its ray runs from the eye through the point.
//! The focal distance only changes which hits count as "too close", not
//! the framing.

use std::borrow::Borrow;
use std::f64::consts::{FRAC_PI_4, PI};

use image::RgbaImage;
use tracing::debug;

use crate::error::RenderError;
use crate::frame::Frame;
use crate::math::{Line, Radians, Vec3};
use crate::render::{self, RenderConfig};
use crate::shape::Shape;

/// Largest raster side, in pixels, a viewport accepts.
pub const MAX_DIMENSION: u32 = 16_384;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub frame: Frame,
    /// Horizontal field of view.
    pub hfov: Radians,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Frame::ZERO, Radians(FRAC_PI_4))
    }
}

/// Per-frame ray generator: the image plane laid out for one raster size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: u32,
    height: u32,
    eye: Vec3,
    top_left: Vec3,
    /// Image-plane offset of one pixel to the right.
    col_step: Vec3,
    /// Image-plane offset of one pixel down.
    row_step: Vec3,
}

impl Viewport {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The ray from the eye through pixel `(col, row)`.
    pub fn ray(&self, col: u32, row: u32) -> Line {
        let point = self.top_left + self.col_step * col as f64 + self.row_step * row as f64;
        Line::new(self.eye, point - self.eye)
    }
}

impl Camera {
    pub fn new(frame: Frame, hfov: Radians) -> Self {
        Self { frame, hfov }
    }

    pub fn with_frame(&self, frame: Frame) -> Self {
        Self { frame, ..*self }
    }

    pub fn translate(&self, delta: Vec3) -> Self {
        self.with_frame(self.frame.translate(delta))
    }

    pub fn rotate(&self, axis: &Line, angle: Radians) -> Self {
        self.with_frame(self.frame.rotate(axis, angle))
    }

    /// Lays out the image plane for a raster `width` pixels wide.
    ///
    /// The height is `width / ratio`, truncated, and the vertical field of
    /// view is the horizontal one divided by `ratio`. Both sides must lie
    /// in `1..=MAX_DIMENSION`, both fields of view in `(0, pi)` and the
    /// focal distance must be positive.
    pub fn viewport(
        &self,
        width: u32,
        ratio: f64,
        focal_distance: f64,
    ) -> Result<Viewport, RenderError> {
        let invalid = RenderError::InvalidViewport { width, ratio };
        if width == 0 || width > MAX_DIMENSION || !ratio.is_finite() || ratio <= 0.0 {
            return Err(invalid);
        }
        let height = (width as f64 / ratio).trunc();
        if height < 1.0 || height > MAX_DIMENSION as f64 {
            return Err(invalid);
        }
        let height = height as u32;

        if !focal_distance.is_finite() || focal_distance <= 0.0 {
            return Err(RenderError::InvalidFocalDistance { focal_distance });
        }
        for fov in [self.hfov, self.hfov / ratio] {
            if !(fov.value() > 0.0 && fov.value() < PI) {
                return Err(RenderError::InvalidFieldOfView { fov: fov.value() });
            }
        }

        let vfov = self.hfov / ratio;
        let (w, h) = (width as f64, height as f64);
        let col_offset = focal_distance * (self.hfov / 2.0).tan() / (w / 2.0);
        let row_offset = focal_distance * (vfov / 2.0).tan() / (h / 2.0);

        let Frame { i, j, k, origin } = self.frame;
        let top_left = origin
            + i * focal_distance
            + k * (row_offset * h / 2.0)
            + j * (col_offset * w / 2.0);

        Ok(Viewport {
            width,
            height,
            eye: origin,
            top_left,
            col_step: -j * col_offset,
            row_step: -k * row_offset,
        })
    }

    /// Ray-traces `shapes` into a `width` x `width / ratio` raster.
    ///
    /// Each pixel takes the color of the nearest hit beyond the focal
    /// distance; pixels without one keep the configured background.
    pub fn render_perspective<S>(
        &self,
        width: u32,
        ratio: f64,
        shapes: &[S],
        config: &RenderConfig,
    ) -> Result<RgbaImage, RenderError>
    where
        S: Borrow<Shape> + Sync,
    {
        let viewport = self.viewport(width, ratio, config.focal_distance)?;
        debug!(
            width,
            height = viewport.height(),
            shapes = shapes.len(),
            workers = config.workers,
            "rendering perspective frame"
        );

        Ok(render::render_rows(
            viewport.width(),
            viewport.height(),
            config,
            |col, row| {
                let ray = viewport.ray(col, row);
                render::nearest_hit(&ray, shapes, config.focal_distance).map(|hit| hit.color)
            },
        ))
    }
}
