// src/services/purchase_slider.rs
//
// Slide-to-confirm control backing the "Swipe to Buy" gesture.
//
// A drag is a continuous input mapped onto a 0..1 completion ratio of
// the usable track. Releasing at or past the commit threshold settles
// the handle at the end and commits exactly once; releasing short of
// it returns the handle to the start and commits nothing. The return
// animation itself belongs to the presentation layer; this control
// only exposes the settle target.

/// Geometry and threshold of the slider track
#[derive(Debug, Clone)]
pub struct SliderConfig {
    /// Full width of the slider container
    pub track_length: f32,
    /// Width of the draggable handle
    pub handle_width: f32,
    /// Completion ratio at or above which a release commits
    pub commit_threshold: f32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            track_length: 350.0,
            handle_width: 50.0,
            commit_threshold: 0.80,
        }
    }
}

/// Result of releasing the handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideOutcome {
    /// Threshold reached: the buy action fires, once
    Committed,
    /// Released short of the threshold: handle returns to start,
    /// nothing fires
    Reset,
    /// This slide already committed; the release does nothing
    Inert,
}

/// State machine for one slider instance.
///
/// Invariant: at most one `Committed` outcome per slider, no matter
/// how many updates or releases arrive after it.
pub struct PurchaseSlider {
    config: SliderConfig,
    position: f32,
    committed: bool,
}

impl PurchaseSlider {
    pub fn new(config: SliderConfig) -> Self {
        Self {
            config,
            position: 0.0,
            committed: false,
        }
    }

    /// Rightmost position the handle can reach
    fn end_position(&self) -> f32 {
        self.config.track_length - self.config.handle_width
    }

    /// Current completion ratio in 0..1
    pub fn completion_ratio(&self) -> f32 {
        self.position / self.end_position()
    }

    /// Where the handle should settle for rendering
    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Track a drag update. The handle is clamped to the track; moving
    /// past the threshold does NOT commit - only a release does.
    pub fn on_update(&mut self, translation: f32) {
        if self.committed {
            return;
        }
        self.position = translation.clamp(0.0, self.end_position());
    }

    /// Evaluate a release of the handle.
    pub fn on_release(&mut self) -> SlideOutcome {
        if self.committed {
            return SlideOutcome::Inert;
        }

        if self.completion_ratio() >= self.config.commit_threshold {
            self.committed = true;
            self.position = self.end_position();
            SlideOutcome::Committed
        } else {
            self.position = 0.0;
            SlideOutcome::Reset
        }
    }
}

impl Default for PurchaseSlider {
    fn default() -> Self {
        Self::new(SliderConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider() -> PurchaseSlider {
        // 350 wide track, 50 handle: usable travel is 300
        PurchaseSlider::default()
    }

    #[test]
    fn test_release_at_half_track_resets() {
        let mut slider = slider();
        slider.on_update(150.0); // 50% of travel

        assert_eq!(slider.on_release(), SlideOutcome::Reset);
        assert_eq!(slider.position(), 0.0);
        assert!(!slider.is_committed());
    }

    #[test]
    fn test_release_past_threshold_commits_once() {
        let mut slider = slider();
        slider.on_update(255.0); // 85% of travel

        let mut commits = 0;
        if slider.on_release() == SlideOutcome::Committed {
            commits += 1;
        }
        // A second release must not fire again
        if slider.on_release() == SlideOutcome::Committed {
            commits += 1;
        }

        assert_eq!(commits, 1);
        assert_eq!(slider.position(), 300.0);
    }

    #[test]
    fn test_crossing_threshold_without_release_does_not_commit() {
        let mut slider = slider();
        slider.on_update(290.0);
        slider.on_update(295.0);
        slider.on_update(300.0);

        assert!(!slider.is_committed());
    }

    #[test]
    fn test_updates_after_commit_are_inert() {
        let mut slider = slider();
        slider.on_update(260.0);
        assert_eq!(slider.on_release(), SlideOutcome::Committed);

        slider.on_update(0.0);
        assert_eq!(slider.position(), 300.0);
        assert_eq!(slider.on_release(), SlideOutcome::Inert);
    }

    #[test]
    fn test_drag_is_clamped_to_track() {
        let mut slider = slider();

        slider.on_update(-40.0);
        assert_eq!(slider.position(), 0.0);

        slider.on_update(500.0);
        assert_eq!(slider.position(), 300.0);
    }

    #[test]
    fn test_release_exactly_at_threshold_commits() {
        let mut slider = slider();
        slider.on_update(240.0); // exactly 80%

        assert_eq!(slider.on_release(), SlideOutcome::Committed);
    }
}
