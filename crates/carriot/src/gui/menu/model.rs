use crate::config::WheelConfig;
use crate::gui::menu::{AnimationState, Point, SegmentLayout, Size, WheelGeometry, Zone};
use carriot_link::CommandId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MenuError {
    #[error("The wheel needs at least one segment")]
    NoSegments,
    #[error("Invalid wheel radii: inner {inner} must be non-negative and below outer {outer}")]
    InvalidRadii { inner: f64, outer: f64 },
    #[error("Invalid angle offset: {0}")]
    InvalidOffset(f64),
    #[error("Hover rate must be within (0, 1), got {0}")]
    InvalidHoverRate(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub label: String,
    pub command: CommandId,
}

impl Segment {
    pub fn label_lines(&self) -> Vec<&str> {
        self.label.split_whitespace().collect()
    }
}

/// The control wheel: segments, their geometry, the hovered segment and the hover
/// animation. Pointer events write `hover_index`; [`RadialMenu::tick`] reads it once
/// per frame.
#[derive(Debug, Clone)]
pub struct RadialMenu {
    segments: Vec<Segment>,
    geometry: WheelGeometry,
    animation: AnimationState,
    hover_index: Option<usize>,
    needs_redraw: bool,
}

impl RadialMenu {
    pub fn new(config: &WheelConfig) -> Result<Self, MenuError> {
        let geometry = WheelGeometry::new(
            config.segments.len(),
            config.inner_radius,
            config.outer_radius,
            config.angle_offset,
        )?;
        let animation = AnimationState::new(config.segments.len(), config.hover_rate)?;

        let segments = config
            .segments
            .iter()
            .enumerate()
            .map(|(index, cfg)| Segment {
                index,
                label: cfg.label.clone(),
                command: cfg.command.clone(),
            })
            .collect();

        Ok(Self {
            segments,
            geometry,
            animation,
            hover_index: None,
            needs_redraw: true,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    pub fn animation(&self) -> &AnimationState {
        &self.animation
    }

    pub fn hover_index(&self) -> Option<usize> {
        self.hover_index
    }

    pub fn progress(&self, index: usize) -> f64 {
        self.animation.progress(index)
    }

    pub fn layout(&self, index: usize) -> SegmentLayout {
        self.geometry.layout(index, self.progress(index))
    }

    pub fn locate(&self, pointer: Point, canvas: Size) -> Zone {
        self.geometry.locate(pointer, canvas)
    }

    pub fn hit_test(&self, pointer: Point, canvas: Size) -> Option<usize> {
        self.locate(pointer, canvas).segment()
    }

    /// Returns whether the hovered segment changed.
    pub fn pointer_moved(&mut self, pointer: Point, canvas: Size) -> bool {
        let idx = self.hit_test(pointer, canvas);
        self.set_hover(idx)
    }

    pub fn pointer_left(&mut self) -> bool {
        self.set_hover(None)
    }

    fn set_hover(&mut self, idx: Option<usize>) -> bool {
        let changed = self.hover_index != idx;
        if changed {
            log::debug!("Hover {:?} -> {:?}", self.hover_index, idx);
            self.hover_index = idx;
            self.needs_redraw = true;
        }
        changed
    }

    /// One animation frame. Returns whether the wheel needs repainting.
    pub fn tick(&mut self) -> bool {
        let moved = self.animation.step(self.hover_index);
        moved || std::mem::take(&mut self.needs_redraw)
    }

    /// Resolves the segment under `pointer` at activation time. The dead zone and
    /// everything beyond the wheel yield nothing.
    pub fn activate(&self, pointer: Point, canvas: Size) -> Option<&CommandId> {
        self.hit_test(pointer, canvas)
            .and_then(|idx| self.segments.get(idx))
            .map(|segment| &segment.command)
    }

    /// Paint order: resting segments first, the hovered one last.
    pub fn draw_order(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.segments.len())
            .filter(|&i| self.hover_index != Some(i))
            .chain(self.hover_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SegmentConfig;

    const CANVAS: Size = Size {
        width: 480.0,
        height: 480.0,
    };

    const COMMANDS: [&str; 8] = [
        "adelante",
        "vuelta-adelante-derecha",
        "90-derecha",
        "vuelta-atras-derecha",
        "atras",
        "vuelta-atras-izquierda",
        "90-izquierda",
        "vuelta-adelante-izquierda",
    ];

    fn wheel_config(count: usize) -> WheelConfig {
        WheelConfig {
            inner_radius: 50.0,
            outer_radius: 200.0,
            angle_offset: -90.0,
            hover_rate: 0.12,
            center_command: CommandId::new("detener"),
            segments: COMMANDS
                .iter()
                .cycle()
                .take(count)
                .map(|cmd| SegmentConfig {
                    label: cmd.replace('-', " "),
                    command: CommandId::new(*cmd),
                })
                .collect(),
        }
    }

    fn menu() -> RadialMenu {
        RadialMenu::new(&wheel_config(8)).unwrap()
    }

    fn at(dx: f64, dy: f64) -> Point {
        CANVAS.center().offset(Point::new(dx, dy))
    }

    #[test]
    fn test_construction_validates_config() {
        assert_eq!(
            RadialMenu::new(&wheel_config(0)).unwrap_err(),
            MenuError::NoSegments
        );

        let mut config = wheel_config(8);
        config.inner_radius = 200.0;
        assert!(matches!(
            RadialMenu::new(&config),
            Err(MenuError::InvalidRadii { .. })
        ));

        let mut config = wheel_config(8);
        config.hover_rate = 0.0;
        assert_eq!(
            RadialMenu::new(&config).unwrap_err(),
            MenuError::InvalidHoverRate(0.0)
        );
    }

    #[test]
    fn test_segments_keep_config_order() {
        let menu = menu();
        assert_eq!(menu.segments().len(), 8);
        for (i, segment) in menu.segments().iter().enumerate() {
            assert_eq!(segment.index, i);
            assert_eq!(segment.command.as_str(), COMMANDS[i]);
        }
        assert_eq!(
            menu.segments()[1].label_lines(),
            vec!["vuelta", "adelante", "derecha"]
        );
    }

    #[test]
    fn test_pointer_updates_hover() {
        let mut menu = menu();
        assert_eq!(menu.hover_index(), None);

        assert!(menu.pointer_moved(at(100.0, 0.0), CANVAS));
        assert_eq!(menu.hover_index(), Some(2));
        assert!(!menu.pointer_moved(at(120.0, 5.0), CANVAS));

        assert!(menu.pointer_moved(at(10.0, 10.0), CANVAS));
        assert_eq!(menu.hover_index(), None);

        menu.pointer_moved(at(0.0, -100.0), CANVAS);
        assert!(menu.pointer_left());
        assert_eq!(menu.hover_index(), None);
        assert!(!menu.pointer_left());
    }

    #[test]
    fn test_tick_animates_hovered_segment_only() {
        let mut menu = menu();
        menu.pointer_moved(at(0.0, 100.0), CANVAS);

        assert!(menu.tick());
        assert!((menu.progress(4) - 0.12).abs() < 1e-12);
        assert!((0..8).filter(|&i| i != 4).all(|i| menu.progress(i) == 0.0));

        while menu.tick() {}
        assert_eq!(menu.progress(4), 1.0);
        assert!(!menu.tick());
    }

    #[test]
    fn test_hover_cleared_settles_to_rest() {
        let mut menu = menu();
        menu.pointer_moved(at(100.0, 100.0), CANVAS);
        assert_eq!(menu.hover_index(), Some(3));
        for _ in 0..30 {
            menu.tick();
        }

        menu.pointer_left();
        for _ in 0..60 {
            menu.tick();
        }
        assert!(menu.animation().iter().all(|p| p == 0.0));
    }

    #[test]
    fn test_activation_resolves_click_position() {
        let mut menu = menu();
        // hover elsewhere: activation uses the click position, not the hover state
        menu.pointer_moved(at(-100.0, 0.0), CANVAS);

        assert_eq!(
            menu.activate(at(0.0, -100.0), CANVAS).map(CommandId::as_str),
            Some("adelante")
        );
        assert_eq!(
            menu.activate(at(100.0, 0.0), CANVAS).map(CommandId::as_str),
            Some("90-derecha")
        );
    }

    #[test]
    fn test_activation_in_dead_zone_emits_nothing() {
        let menu = menu();
        assert_eq!(menu.activate(at(0.0, 0.0), CANVAS), None);
        assert_eq!(menu.activate(at(20.0, -20.0), CANVAS), None);
        assert_eq!(menu.locate(at(20.0, -20.0), CANVAS), Zone::Center);
        assert_eq!(menu.activate(Point::new(0.0, 0.0), CANVAS), None);
    }

    #[test]
    fn test_hovered_segment_drawn_last() {
        let mut menu = menu();
        assert_eq!(menu.draw_order().collect::<Vec<_>>(), (0..8).collect::<Vec<_>>());

        menu.pointer_moved(at(100.0, 0.0), CANVAS);
        assert_eq!(
            menu.draw_order().collect::<Vec<_>>(),
            vec![0, 1, 3, 4, 5, 6, 7, 2]
        );
    }
}
