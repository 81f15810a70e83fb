pub mod animation;
pub mod geometry;
pub mod model;
pub mod view;

pub use animation::AnimationState;
pub use geometry::{Point, SegmentLayout, Size, WheelGeometry, Zone};
pub use model::{MenuError, RadialMenu, Segment};
pub use view::draw;

pub const CANVAS_SIZE: i32 = 480;
pub const HOVER_EPSILON: f64 = 0.001; // snap-to-target distance
pub const MAX_SHIFT: f64 = 25.0; // outward displacement of a fully hovered segment
pub const MAX_GROWTH: f64 = 10.0; // radius growth of a fully hovered segment
pub const HIT_MARGIN: f64 = 5.0;
pub const LABEL_RADIUS_FACTOR: f64 = 0.65;
pub const LABEL_LINE_HEIGHT: f64 = 14.0;
pub const LABEL_FONT_SIZE: f64 = 11.0;
pub const LABEL_FONT_GROWTH: f64 = 3.0;
pub const SEPARATOR_WIDTH: f64 = 2.0;
pub const SHADOW_OFFSET: f64 = 10.0;
pub const CENTER_RING_WIDTH: f64 = 3.0;
pub const CENTER_LABEL: &str = "STOP";
