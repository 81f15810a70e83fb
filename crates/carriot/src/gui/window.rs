use crate::gui::menu::{Point, Size, Zone};
use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;

pub fn canvas_size(area: &gtk::DrawingArea) -> Size {
    Size::new(area.width() as f64, area.height() as f64)
}

/// Pointer position relative to `widget`, if the pointer is over its surface.
pub fn get_cursor_position(widget: &impl IsA<gtk::Widget>) -> Option<Point> {
    let native = widget.native()?;
    let (x, y, _) = gdk::Display::default()
        .and_then(|d| d.default_seat())
        .and_then(|s| s.pointer())
        .zip(native.surface())
        .and_then(|(p, s)| s.device_position(&p))?;

    let (offset_x, offset_y) = native.surface_transform();
    let origin = widget.compute_point(&native, &gtk::graphene::Point::new(0.0, 0.0))?;
    Some(Point::new(
        x - offset_x - origin.x() as f64,
        y - offset_y - origin.y() as f64,
    ))
}

/// Hand cursor over anything clickable on the wheel.
pub fn update_cursor(area: &gtk::DrawingArea, zone: Zone) {
    let name = match zone {
        Zone::Outside => "default",
        Zone::Center | Zone::Segment(_) => "pointer",
    };
    area.set_cursor_from_name(Some(name));
}
