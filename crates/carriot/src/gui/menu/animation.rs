use super::HOVER_EPSILON;
use super::model::MenuError;

/// Moves `current` a fixed fraction `rate` of the way to `target`, snapping once the
/// remaining distance is within [`HOVER_EPSILON`].
pub fn ease(current: f64, target: f64, rate: f64) -> f64 {
    let remaining = target - current;
    if remaining.abs() > HOVER_EPSILON {
        current + remaining * rate
    } else {
        target
    }
}

/// Hover progress of every segment: 0.0 resting, 1.0 fully highlighted.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    progress: Vec<f64>,
    rate: f64,
}

impl AnimationState {
    pub fn new(count: usize, rate: f64) -> Result<Self, MenuError> {
        if !(rate > 0.0 && rate < 1.0) {
            return Err(MenuError::InvalidHoverRate(rate));
        }
        Ok(Self {
            progress: vec![0.0; count],
            rate,
        })
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn progress(&self, index: usize) -> f64 {
        self.progress.get(index).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.progress.iter().copied()
    }

    /// Advances one frame toward `hovered`. Returns whether any segment moved.
    pub fn step(&mut self, hovered: Option<usize>) -> bool {
        let mut moved = false;
        for (i, progress) in self.progress.iter_mut().enumerate() {
            let target = if hovered == Some(i) { 1.0 } else { 0.0 };
            let next = ease(*progress, target, self.rate);
            moved |= next != *progress;
            *progress = next;
        }
        moved
    }

    pub fn is_settled(&self, hovered: Option<usize>) -> bool {
        self.progress
            .iter()
            .enumerate()
            .all(|(i, &p)| p == if hovered == Some(i) { 1.0 } else { 0.0 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tick_closes_fraction_of_gap() {
        assert!((ease(0.0, 1.0, 0.12) - 0.12).abs() < 1e-12);
        assert!((ease(0.5, 0.0, 0.12) - 0.44).abs() < 1e-12);
        assert!((ease(0.3, 1.0, 0.5) - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_snaps_within_epsilon() {
        assert_eq!(ease(0.9995, 1.0, 0.12), 1.0);
        assert_eq!(ease(0.0005, 0.0, 0.12), 0.0);
        assert_eq!(ease(1.0, 1.0, 0.12), 1.0);
    }

    #[test]
    fn test_converges_exactly_without_oscillating() {
        let mut state = AnimationState::new(8, 0.12).unwrap();
        let mut previous = state.progress(2);
        let mut ticks = 0;

        while state.step(Some(2)) {
            let current = state.progress(2);
            assert!(current > previous && current <= 1.0);
            previous = current;
            ticks += 1;
            assert!(ticks < 200, "never settled");
        }

        assert_eq!(state.progress(2), 1.0);
        assert!(state.is_settled(Some(2)));
        assert!((0..8).filter(|&i| i != 2).all(|i| state.progress(i) == 0.0));
        assert!(!state.step(Some(2)));
    }

    #[test]
    fn test_clearing_hover_returns_everything_to_rest() {
        let mut state = AnimationState::new(8, 0.12).unwrap();
        for _ in 0..100 {
            state.step(Some(3));
        }
        assert_eq!(state.progress(3), 1.0);

        for _ in 0..60 {
            state.step(None);
        }
        assert!(state.iter().all(|p| p == 0.0));
        assert!(state.is_settled(None));
    }

    #[test]
    fn test_hover_moves_between_segments() {
        let mut state = AnimationState::new(4, 0.12).unwrap();
        for _ in 0..10 {
            state.step(Some(0));
        }
        let partial = state.progress(0);
        assert!(partial > 0.0 && partial < 1.0);

        state.step(Some(1));
        assert!(state.progress(0) < partial);
        assert!(state.progress(1) > 0.0);
    }

    #[test]
    fn test_rejects_invalid_rate() {
        for rate in [0.0, -0.1, 1.0, 1.5, f64::NAN] {
            assert!(matches!(
                AnimationState::new(8, rate),
                Err(MenuError::InvalidHoverRate(_))
            ));
        }
        assert!(AnimationState::new(8, 0.99).is_ok());
    }

    #[test]
    fn test_out_of_range_index_reads_as_resting() {
        let state = AnimationState::new(2, 0.12).unwrap();
        assert_eq!(state.progress(7), 0.0);
    }
}
