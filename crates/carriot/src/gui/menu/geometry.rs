use super::model::MenuError;
use super::{
    HIT_MARGIN, LABEL_FONT_GROWTH, LABEL_FONT_SIZE, LABEL_RADIUS_FACTOR, MAX_GROWTH, MAX_SHIFT,
};
use std::f64::consts::FRAC_PI_2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `radius` along `angle` (radians, canvas orientation: y grows downwards).
    pub fn polar(radius: f64, angle: f64) -> Self {
        Self::new(radius * angle.cos(), radius * angle.sin())
    }

    pub fn offset(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Where a pointer falls on the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// Inside the dead zone, reserved for the center control.
    Center,
    Segment(usize),
    Outside,
}

impl Zone {
    pub fn segment(self) -> Option<usize> {
        match self {
            Self::Segment(idx) => Some(idx),
            Self::Center | Self::Outside => None,
        }
    }
}

/// Angular and radial layout of a wheel of equally sized segments.
///
/// Angles are in degrees, measured like `atan2` on canvas coordinates. `angle_offset`
/// rotates the wheel so that segment 0 is centered on it (-90 puts it at the top).
#[derive(Debug, Clone, PartialEq)]
pub struct WheelGeometry {
    count: usize,
    inner_radius: f64,
    outer_radius: f64,
    angle_offset: f64,
}

impl WheelGeometry {
    pub fn new(
        count: usize,
        inner_radius: f64,
        outer_radius: f64,
        angle_offset: f64,
    ) -> Result<Self, MenuError> {
        if count == 0 {
            return Err(MenuError::NoSegments);
        }
        let valid_radii = inner_radius.is_finite()
            && outer_radius.is_finite()
            && inner_radius >= 0.0
            && inner_radius < outer_radius;
        if !valid_radii {
            return Err(MenuError::InvalidRadii {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        if !angle_offset.is_finite() {
            return Err(MenuError::InvalidOffset(angle_offset));
        }

        Ok(Self {
            count,
            inner_radius,
            outer_radius,
            angle_offset,
        })
    }

    pub fn segment_count(&self) -> usize {
        self.count
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    pub fn angle_offset(&self) -> f64 {
        self.angle_offset
    }

    pub fn segment_width(&self) -> f64 {
        360.0 / self.count as f64
    }

    /// Farthest distance still resolved to a segment: leaves room for a fully
    /// extended segment.
    pub fn hit_radius(&self) -> f64 {
        self.outer_radius + MAX_SHIFT + MAX_GROWTH + HIT_MARGIN
    }

    /// Center angle of segment `index`, in degrees.
    pub fn bisector(&self, index: usize) -> f64 {
        index as f64 * self.segment_width() + self.angle_offset
    }

    pub fn locate(&self, pointer: Point, canvas: Size) -> Zone {
        let center = canvas.center();
        let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);
        let distance = dx.hypot(dy);

        if distance <= self.inner_radius {
            return Zone::Center;
        }
        if distance.is_nan() || distance > self.hit_radius() {
            return Zone::Outside;
        }

        Zone::Segment(self.segment_at_angle(dy.atan2(dx).to_degrees()))
    }

    pub fn segment_at_angle(&self, degrees: f64) -> usize {
        let width = self.segment_width();
        let normalized = (degrees - self.angle_offset).rem_euclid(360.0);
        // shift by half a segment so boundaries sit between neighbouring centers
        let adjusted = (normalized + width / 2.0) % 360.0;
        (adjusted / width).floor() as usize % self.count
    }

    /// Drawing layout of segment `index` at hover `progress` (0 = resting, 1 = hovered).
    pub fn layout(&self, index: usize, progress: f64) -> SegmentLayout {
        let progress = progress.clamp(0.0, 1.0);
        let half_width = self.segment_width() / 2.0;
        let bisector_deg = self.bisector(index);
        let bisector = bisector_deg.to_radians();

        let outer_radius = self.outer_radius + progress * MAX_GROWTH;
        let label_radius =
            self.inner_radius + (outer_radius - self.inner_radius) * LABEL_RADIUS_FACTOR;

        SegmentLayout {
            start_angle: (bisector_deg - half_width).to_radians(),
            end_angle: (bisector_deg + half_width).to_radians(),
            bisector,
            shift: Point::polar(progress * MAX_SHIFT, bisector),
            inner_radius: self.inner_radius,
            outer_radius,
            label_anchor: Point::polar(label_radius, bisector),
            label_rotation: bisector + FRAC_PI_2,
            font_size: LABEL_FONT_SIZE + LABEL_FONT_GROWTH * progress,
        }
    }
}

/// Resolved drawing parameters for one segment. Angles in radians, positions
/// relative to the wheel center.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLayout {
    pub start_angle: f64,
    pub end_angle: f64,
    pub bisector: f64,
    pub shift: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub label_anchor: Point,
    pub label_rotation: f64,
    pub font_size: f64,
}
