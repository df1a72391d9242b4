//! Placement transforms
//!
//! Turns an [`AppliedBox`] into the affine matrix used to draw a page onto
//! its sheet. Matrices follow the PDF `cm` convention `[a b c d e f]`:
//!
//! ```text
//! x' = a*x + c*y + e
//! y' = b*x + d*y + f
//! ```

use crate::layout::{AppliedBox, Rect};

/// A 2D affine transform in PDF matrix order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn translate(dx: f32, dy: f32) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::identity()
        }
    }

    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Clockwise rotation about the origin.
    ///
    /// Quarter turns are exact so rotated pages land on whole coordinates.
    pub fn rotate_cw(degrees: f32) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let (sin, cos) = match normalized {
            n if n == 0.0 => (0.0, 1.0),
            n if n == 90.0 => (1.0, 0.0),
            n if n == 180.0 => (0.0, -1.0),
            n if n == 270.0 => (-1.0, 0.0),
            n => n.to_radians().sin_cos(),
        };
        Self {
            a: cos,
            b: -sin,
            c: sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Apply `self` first, then `next`
    pub fn then(self, next: Transform) -> Self {
        Self {
            a: self.a * next.a + self.b * next.c,
            b: self.a * next.b + self.b * next.d,
            c: self.c * next.a + self.d * next.c,
            d: self.c * next.b + self.d * next.d,
            e: self.e * next.a + self.f * next.c + next.e,
            f: self.e * next.b + self.f * next.d + next.f,
        }
    }

    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Axis-aligned bounds of the rectangle `(0, 0, width, height)` after transforming
    pub fn bounds(&self, width: f32, height: f32) -> Rect {
        let corners = [
            self.apply(0.0, 0.0),
            self.apply(width, 0.0),
            self.apply(0.0, height),
            self.apply(width, height),
        ];
        let (mut min_x, mut min_y) = corners[0];
        let (mut max_x, mut max_y) = corners[0];
        for &(x, y) in &corners[1..] {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// The content stream operator that installs this transform
    pub fn to_pdf_operator(&self) -> String {
        format!(
            "{} {} {} {} {} {} cm",
            self.a, self.b, self.c, self.d, self.e, self.f
        )
    }
}

/// Compile a placement into one transform.
///
/// Applied in this order: scale (negated on each mirrored axis), clockwise
/// rotation about the origin, then translation to `position`. A mirrored
/// axis is shifted by the unscaled page extent so the reflection lands back
/// on the placement instead of across the axis.
pub fn compile_transform(
    position: (f32, f32),
    scale: f32,
    rotation: f32,
    mirror_horizontal: bool,
    mirror_vertical: bool,
    page_width: f32,
    page_height: f32,
) -> Transform {
    let sx = if mirror_horizontal { -scale } else { scale };
    let sy = if mirror_vertical { -scale } else { scale };
    let compensate_x = if mirror_horizontal { page_width } else { 0.0 };
    let compensate_y = if mirror_vertical { page_height } else { 0.0 };

    Transform::scale(sx, sy)
        .then(Transform::rotate_cw(rotation))
        .then(Transform::translate(
            position.0 + compensate_x,
            position.1 + compensate_y,
        ))
}

/// Transform that draws a page so its footprint starts at the placement's
/// `position`.
///
/// [`compile_transform`] rotates about the origin, which moves a turned
/// page off its slot; this shifts the result back onto it.
pub fn placement_transform(applied: &AppliedBox, page_width: f32, page_height: f32) -> Transform {
    let compiled = compile_transform(
        applied.position,
        applied.scale,
        applied.rotation,
        applied.mirror_horizontal,
        applied.mirror_vertical,
        page_width,
        page_height,
    );
    let bounds = compiled.bounds(page_width, page_height);
    compiled.then(Transform::translate(
        applied.position.0 - bounds.x,
        applied.position.1 - bounds.y,
    ))
}
