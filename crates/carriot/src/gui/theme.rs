use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::{Srgb, Srgba, WithAlpha};

pub struct ThemeColors {
    pub segment_even: Srgba<f64>,
    pub segment_odd: Srgba<f64>,
    pub highlighted: Srgba<f64>,
    pub shadow: Srgba<f64>,
    pub separator: Srgba<f64>,
    pub label: Srgba<f64>,
    pub label_highlighted: Srgba<f64>,
    pub center: Srgba<f64>,
    pub center_ring: Srgba<f64>,
}

fn rgb(r: u8, g: u8, b: u8) -> Srgba<f64> {
    Srgb::new(r, g, b).into_format::<f64>().with_alpha(1.0)
}

impl Default for ThemeColors {
    /// Gruvbox dark.
    fn default() -> Self {
        Self {
            segment_even: rgb(0x3c, 0x38, 0x36),
            segment_odd: rgb(0x50, 0x49, 0x45),
            highlighted: rgb(0xfe, 0x80, 0x19),
            shadow: Srgba::new(0.0, 0.0, 0.0, 0.6),
            separator: rgb(0x28, 0x28, 0x28),
            label: rgb(0xeb, 0xdb, 0xb2),
            label_highlighted: rgb(0x28, 0x28, 0x28),
            center: rgb(0xcc, 0x24, 0x1d),
            center_ring: rgb(0x92, 0x83, 0x74),
        }
    }
}

impl ThemeColors {
    /// Resolves the `@define-color` names from [`load_css`], falling back to the
    /// built-in palette.
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            segment_even: Self::lookup_color(context, "carriot_segment_even", fallback.segment_even),
            segment_odd: Self::lookup_color(context, "carriot_segment_odd", fallback.segment_odd),
            highlighted: Self::lookup_color(context, "carriot_highlight", fallback.highlighted),
            shadow: fallback.shadow,
            separator: Self::lookup_color(context, "carriot_separator", fallback.separator),
            label: Self::lookup_color(context, "carriot_label", fallback.label),
            label_highlighted: Self::lookup_color(
                context,
                "carriot_label_highlight",
                fallback.label_highlighted,
            ),
            center: Self::lookup_color(context, "carriot_stop", fallback.center),
            center_ring: Self::lookup_color(context, "carriot_ring", fallback.center_ring),
        }
    }

    /// Resting fill: adjacent segments alternate tones.
    pub fn segment(&self, index: usize) -> Srgba<f64> {
        if index % 2 == 0 {
            self.segment_even
        } else {
            self.segment_odd
        }
    }

    fn lookup_color(context: &gtk::StyleContext, name: &str, fallback: Srgba<f64>) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                )
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color carriot_segment_even #3c3836;
@define-color carriot_segment_odd #504945;
@define-color carriot_highlight #fe8019;
@define-color carriot_separator #282828;
@define-color carriot_label #ebdbb2;
@define-color carriot_label_highlight #282828;
@define-color carriot_stop #cc241d;
@define-color carriot_ring #928374;

.carriot-window {
    background-color: #282828;
    color: #ebdbb2;
}
.carriot-wheel {
    background: none;
    background-color: transparent;
}
.carriot-status {
    color: #fabd2f;
    font-weight: bold;
}
.carriot-history {
    font-family: monospace;
    color: #a89984;
}
.carriot-monitor {
    border-left: 1px solid #504945;
    padding-left: 12px;
}
.carriot-heading {
    color: #fe8019;
    font-weight: bold;
}
.carriot-card {
    background-color: #3c3836;
    border-radius: 6px;
    padding: 8px;
    font-size: 1.1em;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resting_tones_alternate() {
        let colors = ThemeColors::default();
        assert_eq!(colors.segment(0), colors.segment(2));
        assert_eq!(colors.segment(1), colors.segment(7));
        assert_ne!(colors.segment(0), colors.segment(1));
        assert_ne!(colors.segment(0), colors.highlighted);
    }
}
