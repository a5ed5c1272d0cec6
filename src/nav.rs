//! Navbar state derived from the scroll position.

/// Scroll offset past which the navbar turns solid.
pub const SCROLLED_THRESHOLD_PX: f32 = 50.0;
/// A section becomes active once its top is within this distance of the
/// viewport top. Below this scroll offset nothing is active.
pub const ACTIVE_THRESHOLD_PX: f32 = 200.0;

/// Stable section anchors in page order.
pub const SECTION_IDS: [&str; 8] = [
    "home",
    "about",
    "skills",
    "projects",
    "education",
    "hackathons",
    "blog",
    "contact",
];

/// Sections that can be highlighted, in the order they are checked.
const ACTIVE_SCAN_ORDER: [&str; 7] = [
    "contact",
    "education",
    "blog",
    "hackathons",
    "projects",
    "skills",
    "about",
];

/// Whether the navbar should render in its scrolled style.
#[inline]
pub fn scrolled(scroll_offset: f32) -> bool {
    scroll_offset > SCROLLED_THRESHOLD_PX
}

/// The section to highlight.
///
/// `section_top` returns the top edge of a section in viewport coordinates,
/// or `None` if the page has no such section.
pub fn active_section<F>(scroll_offset: f32, mut section_top: F) -> Option<&'static str>
where
    F: FnMut(&str) -> Option<f32>,
{
    if scroll_offset < ACTIVE_THRESHOLD_PX {
        return None;
    }
    ACTIVE_SCAN_ORDER
        .into_iter()
        .find(|id| section_top(id).is_some_and(|top| top <= ACTIVE_THRESHOLD_PX))
}

/// Navbar state tracked across frames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    pub scrolled: bool,
    pub active: Option<&'static str>,
}

impl NavState {
    /// Recompute from the current scroll offset. Returns true if anything
    /// changed.
    pub fn update<F>(&mut self, scroll_offset: f32, section_top: F) -> bool
    where
        F: FnMut(&str) -> Option<f32>,
    {
        let next = NavState {
            scrolled: scrolled(scroll_offset),
            active: active_section(scroll_offset, section_top),
        };
        if next != *self {
            if next.active != self.active {
                tracing::debug!(active = ?next.active, "active section changed");
            }
            *self = next;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sections 1000px tall laid out in page order, scrolled by `scroll`.
    fn layout(scroll: f32) -> impl Fn(&str) -> Option<f32> {
        move |id| {
            SECTION_IDS
                .iter()
                .position(|s| *s == id)
                .map(|i| i as f32 * 1000.0 - scroll)
        }
    }

    #[test]
    fn test_scrolled_threshold() {
        assert!(!scrolled(0.0));
        assert!(!scrolled(50.0));
        assert!(scrolled(50.5));
    }

    #[test]
    fn test_nothing_active_near_top() {
        assert_eq!(active_section(150.0, layout(150.0)), None);
    }

    #[test]
    fn test_active_follows_scroll() {
        assert_eq!(active_section(900.0, layout(900.0)), Some("about"));
        assert_eq!(active_section(2500.0, layout(2500.0)), Some("skills"));
        assert_eq!(active_section(6850.0, layout(6850.0)), Some("contact"));
    }

    #[test]
    fn test_missing_sections_skipped() {
        let only_about = |id: &str| (id == "about").then_some(-10.0);
        assert_eq!(active_section(5000.0, only_about), Some("about"));
        assert_eq!(active_section(5000.0, |_: &str| None), None);
    }

    #[test]
    fn test_nav_state_reports_changes() {
        let mut nav = NavState::default();
        assert!(!nav.update(0.0, layout(0.0)));
        assert!(nav.update(900.0, layout(900.0)));
        assert_eq!(nav.active, Some("about"));
        assert!(nav.scrolled);
        assert!(!nav.update(910.0, layout(910.0)));
    }
}
