use super::model::{RadialMenu, Segment};
use super::{
    CENTER_LABEL, CENTER_RING_WIDTH, LABEL_LINE_HEIGHT, Point, SEPARATOR_WIDTH, SHADOW_OFFSET,
    SegmentLayout, Size,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct SegmentRenderer<'a> {
    segment: &'a Segment,
    layout: SegmentLayout,
    center: Point,
    hovered: bool,
}

impl<'a> SegmentRenderer<'a> {
    fn new(segment: &'a Segment, layout: SegmentLayout, center: Point, hovered: bool) -> Self {
        Self {
            segment,
            layout,
            center,
            hovered,
        }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.translate(self.layout.shift.x, self.layout.shift.y);

        if self.hovered {
            self.draw_shadow(cr, colors)?;
        }
        self.draw_slice(cr, colors)?;
        self.draw_label(cr, colors)?;

        cr.restore()
    }

    fn trace_slice(&self, cr: &Context) {
        let (cx, cy) = (self.center.x, self.center.y);
        cr.new_path();
        cr.arc(
            cx,
            cy,
            self.layout.outer_radius,
            self.layout.start_angle,
            self.layout.end_angle,
        );
        cr.arc_negative(
            cx,
            cy,
            self.layout.inner_radius,
            self.layout.end_angle,
            self.layout.start_angle,
        );
        cr.close_path();
    }

    // cairo has no blur; an offset translucent copy stands in for the drop shadow
    fn draw_shadow(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.translate(SHADOW_OFFSET, SHADOW_OFFSET);
        self.trace_slice(cr);
        set_color(cr, colors.shadow);
        cr.fill()?;
        cr.restore()
    }

    fn draw_slice(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.trace_slice(cr);
        let fill = if self.hovered {
            colors.highlighted
        } else {
            colors.segment(self.segment.index)
        };
        set_color(cr, fill);
        cr.fill_preserve()?;

        set_color(cr, colors.separator);
        cr.set_line_width(SEPARATOR_WIDTH);
        cr.stroke()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let lines = self.segment.label_lines();
        if lines.is_empty() {
            return Ok(());
        }

        cr.save()?;
        cr.translate(
            self.center.x + self.layout.label_anchor.x,
            self.center.y + self.layout.label_anchor.y,
        );
        cr.rotate(self.layout.label_rotation);

        set_color(
            cr,
            if self.hovered {
                colors.label_highlighted
            } else {
                colors.label
            },
        );
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(self.layout.font_size);

        let first_line = -(lines.len() as f64 - 1.0) * LABEL_LINE_HEIGHT / 2.0;
        for (i, line) in lines.iter().enumerate() {
            let y = first_line + i as f64 * LABEL_LINE_HEIGHT;
            show_centered(cr, line, 0.0, y)?;
        }

        cr.restore()
    }
}

/// Draws `text` with its ink box centered on (x, y).
fn show_centered(cr: &Context, text: &str, x: f64, y: f64) -> Result<(), cairo::Error> {
    let ext = cr.text_extents(text)?;
    cr.move_to(
        x - ext.width() / 2.0 - ext.x_bearing(),
        y - ext.height() / 2.0 - ext.y_bearing(),
    );
    cr.show_text(text)
}

pub fn draw(
    cr: &Context,
    menu: &RadialMenu,
    canvas: Size,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let center = canvas.center();

    for idx in menu.draw_order() {
        let Some(segment) = menu.segments().get(idx) else {
            continue;
        };
        SegmentRenderer::new(
            segment,
            menu.layout(idx),
            center,
            menu.hover_index() == Some(idx),
        )
        .draw(cr, colors)?;
    }

    draw_center(cr, menu, center, colors)
}

fn draw_center(
    cr: &Context,
    menu: &RadialMenu,
    center: Point,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let radius = menu.geometry().inner_radius();
    if radius <= 0.0 {
        return Ok(());
    }

    cr.new_path();
    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    set_color(cr, colors.center);
    cr.fill_preserve()?;
    set_color(cr, colors.center_ring);
    cr.set_line_width(CENTER_RING_WIDTH);
    cr.stroke()?;

    set_color(cr, colors.label);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size((radius * 0.35).min(16.0));
    show_centered(cr, CENTER_LABEL, center.x, center.y)
}
