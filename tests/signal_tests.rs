//! Integration tests for the animation bindings.

use std::time::Duration;

use folio::signals::{
    doubled, interpolate, scroll_fraction, section_fraction, Counter, HeroFade, Marquee,
    MarqueeDirection, Rail, Reveal, ScrollProgress, Spring, SpringConfig, Tilt, TiltOutput,
};
use folio::Vec2;

const DT: f32 = 1.0 / 60.0;

fn settle_tilt(tilt: &mut Tilt) {
    for _ in 0..600 {
        tilt.step(DT);
    }
}

// ============================================================================
// Springs
// ============================================================================

#[test]
fn test_spring_reaches_target() {
    let mut spring = Spring::new(SpringConfig::PROGRESS, 0.0);
    spring.set_target(1.0);
    for _ in 0..600 {
        spring.step(DT);
    }
    assert!(spring.is_settled());
    assert!((spring.value() - 1.0).abs() < 1e-3);
}

#[test]
fn test_spring_large_step_stays_finite() {
    let mut spring = Spring::new(SpringConfig::TILT, 0.0);
    spring.set_target(10.0);
    spring.step(5.0);
    assert!(spring.value().is_finite());
}

// ============================================================================
// Tilt
// ============================================================================

#[test]
fn test_tilt_centre_is_neutral() {
    let mut tilt = Tilt::default();
    let offset = Tilt::normalise(Vec2::new(150.0, 100.0), Vec2::new(100.0, 50.0), Vec2::new(100.0, 100.0));
    assert_eq!(offset, Vec2::ZERO);
    tilt.hover(offset);
    settle_tilt(&mut tilt);

    let out = tilt.output();
    assert!(out.rotate_x.abs() < 1e-2 && out.rotate_y.abs() < 1e-2);
    assert!((out.scale - 1.02).abs() < 1e-3);
}

#[test]
fn test_tilt_corner_and_leave() {
    let mut tilt = Tilt::default();
    // Top-right corner
    tilt.hover(Vec2::new(0.5, -0.5));
    settle_tilt(&mut tilt);
    let out = tilt.output();
    assert!((out.rotate_x - 10.0).abs() < 0.05);
    assert!((out.rotate_y - 10.0).abs() < 0.05);

    tilt.leave();
    settle_tilt(&mut tilt);
    let out = tilt.output();
    assert!(out.rotate_x.abs() < 0.05 && out.rotate_y.abs() < 0.05);
    assert!((out.scale - TiltOutput::NEUTRAL.scale).abs() < 1e-3);
}

// ============================================================================
// Reveal
// ============================================================================

#[test]
fn test_reveal_sticky_and_monotonic() {
    let mut reveal = Reveal::new();
    assert!(reveal.observe(300.0, 400.0, 720.0));
    let mut last = 0.0;
    for frame in 0..60 {
        // Scrolled far away again after a few frames
        let top = if frame < 5 { 300.0 } else { 5000.0 };
        assert!(reveal.observe(top, top + 100.0, 720.0));
        reveal.step(DT);
        let opacity = reveal.output().opacity;
        assert!(opacity >= last);
        last = opacity;
    }
    assert_eq!(last, 1.0);
}

// ============================================================================
// Scroll bindings
// ============================================================================

#[test]
fn test_progress_bar_follows_scroll() {
    let mut progress = ScrollProgress::default();
    progress.set_fraction(scroll_fraction(500.0, 1000.0));
    for _ in 0..600 {
        progress.step(DT);
    }
    assert!((progress.scale_x() - 0.5).abs() < 1e-3);
}

#[test]
fn test_hero_fade_range() {
    assert_eq!(HeroFade::at(0.0), HeroFade { opacity: 1.0, scale: 1.0 });
    let mid = HeroFade::at(250.0);
    assert!((mid.opacity - 0.5).abs() < 1e-6);
    assert!((mid.scale - 0.975).abs() < 1e-6);
    assert_eq!(HeroFade::at(5000.0), HeroFade { opacity: 0.0, scale: 0.95 });
}

#[test]
fn test_interpolate_clamps() {
    assert_eq!(interpolate(-10.0, (0.0, 100.0), (1.0, 0.0)), 1.0);
    assert_eq!(interpolate(200.0, (0.0, 100.0), (1.0, 0.0)), 0.0);
}

#[test]
fn test_rail_pan_range() {
    let rail = Rail::default();
    let top = 1000.0;
    let height = 2400.0;
    let vh = 800.0;
    assert_eq!(rail.offset_pct(section_fraction(top, top, height, vh)), 5.0);
    assert_eq!(rail.offset_pct(section_fraction(top + 1600.0, top, height, vh)), -82.0);
    assert_eq!(section_fraction(0.0, top, height, vh), 0.0);
}

// ============================================================================
// Marquee and counter
// ============================================================================

#[test]
fn test_marquee_period_loops() {
    let mut forward = Marquee::new(MarqueeDirection::Forward);
    let mut reverse = Marquee::new(MarqueeDirection::Reverse);
    let start = (forward.offset_fraction(), reverse.offset_fraction());
    for _ in 0..2 {
        forward.step(Duration::from_secs(15));
        reverse.step(Duration::from_secs(15));
    }
    assert!((forward.offset_fraction() - start.0).abs() < 1e-4);
    assert!((reverse.offset_fraction() - start.1).abs() < 1e-4);
    assert_eq!(doubled(&["a", "b"]), vec!["a", "b", "a", "b"]);
}

#[test]
fn test_counter_counts_up_once_started() {
    let mut counter = Counter::new(500);
    counter.tick(Duration::from_secs(1));
    assert_eq!(counter.display(), 0);

    counter.start();
    let mut last = 0;
    for _ in 0..200 {
        counter.tick(Duration::from_millis(16));
        assert!(counter.display() >= last);
        last = counter.display();
    }
    assert!(counter.is_done());
    assert_eq!(counter.display(), 500);
}
