//! The portfolio page: section state and per-frame updates.
//!
//! A [`Page`] owns every animated binding on the page and advances them once
//! per frame from the frame delta and the current [`Input`]. Drawing lives in
//! [`draw`]; geometry in [`layout`].
//!
//! # Frame Order
//!
//! [`Page::update`] runs, in order: clicks, contact field editing, scroll,
//! particle field, scroll progress, navbar, typewriter and cursor, marquees,
//! reveals, counters, card tilt, rail arrows, contact form timer.
//!
//! # Side Effects
//!
//! The page never does I/O. A contact submission is parked until the caller
//! takes it with [`Page::take_submission`] and hands the answer back through
//! [`Page::finish_submission`] on a later frame. Clicked outbound links are
//! collected the same way by [`Page::take_outbound`].

pub mod draw;
pub mod hit;
pub mod layout;

use std::time::Duration;

use glam::Vec2;
use rand::Rng;

use crate::config::FolioConfig;
use crate::contact::{ContactField, ContactForm, SubmitResponse, Submission};
use crate::error::ContactError;
use crate::content::Content;
use crate::field::{Link, ParticleField};
use crate::input::{Input, KeyCode, MouseButton};
use crate::nav::NavState;
use crate::signals::rail::ARROW_STEP_PX;
use crate::signals::{
    scroll_fraction, section_fraction, Counter, HeroFade, Marquee, MarqueeDirection, Rail,
    RailScroll, Reveal, ScrollProgress, Tilt,
};
use crate::typing::{CursorBlink, Typewriter};

pub use hit::{Outbound, Target};
pub use layout::{Block, Counts, Layout, Placed, Rect, Side};

/// Pixels scrolled by an arrow key.
pub const ARROW_SCROLL_PX: f32 = 60.0;
/// Fraction of the viewport scrolled by page keys.
pub const PAGE_SCROLL_FRACTION: f32 = 0.9;
/// Bars in the coding activity graph.
pub const ACTIVITY_BARS: usize = 35;

const ABOUT_STAGGER: f32 = 0.1;
const SKILL_STAGGER: f32 = 0.05;
const PROJECT_STAGGER: f32 = 0.1;
const EDUCATION_STAGGER: f32 = 0.12;
const HACKATHON_STAGGER: f32 = 0.06;
const BLOG_STAGGER: f32 = 0.06;
const CONTACT_DELAYS: [f32; 2] = [0.1, 0.2];

/// Sections with a revealed heading.
const HEADED: [Block; 7] = [
    Block::About,
    Block::Skills,
    Block::Projects,
    Block::Education,
    Block::Hackathons,
    Block::Blog,
    Block::Contact,
];

/// Reveal states of one list of page elements.
#[derive(Debug, Clone, Default)]
pub struct RevealGroup {
    items: Vec<Reveal>,
}

impl RevealGroup {
    pub fn staggered(count: usize, step: f32) -> Self {
        Self {
            items: (0..count).map(|i| Reveal::staggered(i, step)).collect(),
        }
    }

    pub fn with_delays(delays: &[f32]) -> Self {
        Self {
            items: delays.iter().map(|&d| Reveal::with_delay(d)).collect(),
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Reveal> {
        self.items.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Observe every item; `extent(i)` gives item `i`'s viewport top and
    /// bottom.
    fn observe<F: Fn(usize) -> (f32, f32)>(&mut self, viewport_height: f32, extent: F) {
        for (i, reveal) in self.items.iter_mut().enumerate() {
            let (top, bottom) = extent(i);
            reveal.observe(top, bottom, viewport_height);
        }
    }

    fn step(&mut self, dt: f32) {
        for reveal in &mut self.items {
            reveal.step(dt);
        }
    }
}

/// Per-section reveal groups.
#[derive(Debug, Clone, Default)]
pub struct Reveals {
    pub headings: RevealGroup,
    /// Intro, one per stat, activity graph.
    pub about: RevealGroup,
    pub skills: RevealGroup,
    pub projects: RevealGroup,
    pub education: RevealGroup,
    pub hackathons: RevealGroup,
    pub blog: RevealGroup,
    /// Form panel, social links.
    pub contact: RevealGroup,
}

impl Reveals {
    fn for_counts(counts: Counts) -> Self {
        Self {
            headings: RevealGroup::staggered(HEADED.len(), 0.0),
            about: RevealGroup::staggered(counts.stats + 2, ABOUT_STAGGER),
            skills: RevealGroup::staggered(counts.skills, SKILL_STAGGER),
            projects: RevealGroup::staggered(counts.projects, PROJECT_STAGGER),
            education: RevealGroup::staggered(counts.education, EDUCATION_STAGGER),
            hackathons: RevealGroup::staggered(counts.hackathons, HACKATHON_STAGGER),
            blog: RevealGroup::staggered(counts.blog, BLOG_STAGGER),
            contact: RevealGroup::with_delays(&CONTACT_DELAYS),
        }
    }

    fn step(&mut self, dt: f32) {
        for group in [
            &mut self.headings,
            &mut self.about,
            &mut self.skills,
            &mut self.projects,
            &mut self.education,
            &mut self.hackathons,
            &mut self.blog,
            &mut self.contact,
        ] {
            group.step(dt);
        }
    }
}

/// All page state.
#[derive(Debug)]
pub struct Page {
    content: Content,
    layout: Layout,
    scroll: f32,
    pointer: Vec2,
    field: Option<ParticleField>,
    links: Vec<Link>,
    progress: ScrollProgress,
    nav: NavState,
    typewriter: Typewriter,
    cursor: CursorBlink,
    marquees: Vec<Marquee>,
    reveals: Reveals,
    counters: Vec<Counter>,
    project_tilts: Vec<Tilt>,
    terminal_tilt: Tilt,
    rail: Rail,
    rail_scroll: RailScroll,
    activity: Vec<f32>,
    contact: ContactForm,
    focus: Option<ContactField>,
    outbox: Option<Submission>,
    outbound: Vec<Outbound>,
    hovering: bool,
}

impl Page {
    pub fn new(content: Content, config: &FolioConfig, viewport: Vec2) -> Self {
        Self::with_rng(content, config, viewport, &mut rand::thread_rng())
    }

    /// Build the page drawing the field layout and activity graph from
    /// `rng`.
    pub fn with_rng<R: Rng + ?Sized>(
        content: Content,
        config: &FolioConfig,
        viewport: Vec2,
        rng: &mut R,
    ) -> Self {
        let counts = Counts::of(&content);
        let layout = Layout::new(viewport, counts);

        let field = config
            .field
            .enabled
            .then(|| ParticleField::with_rng(config.field.clone(), viewport, rng));

        let marquees = content
            .marquees
            .iter()
            .map(|strip| {
                Marquee::new(if strip.reverse {
                    MarqueeDirection::Reverse
                } else {
                    MarqueeDirection::Forward
                })
            })
            .collect();

        let counters = content.stats.iter().map(|s| Counter::new(s.value)).collect();
        let project_tilts = (0..counts.projects)
            .map(|_| Tilt::new(config.springs.tilt))
            .collect();
        let activity = (0..ACTIVITY_BARS).map(|_| rng.gen::<f32>()).collect();
        let typewriter = Typewriter::new(content.terminal.clone(), config.typing);
        let cursor = CursorBlink::new(Duration::from_millis(config.typing.cursor_interval_ms));

        let rail_scroll = RailScroll::new(layout.rail_overflow());

        Self {
            layout,
            scroll: 0.0,
            pointer: Vec2::ZERO,
            field,
            links: Vec::new(),
            progress: ScrollProgress::new(config.springs.progress),
            nav: NavState::default(),
            typewriter,
            cursor,
            marquees,
            reveals: Reveals::for_counts(counts),
            counters,
            project_tilts,
            terminal_tilt: Tilt::new(config.springs.tilt),
            rail: Rail::default(),
            rail_scroll,
            activity,
            contact: ContactForm::new(config.contact.sent_duration()),
            focus: None,
            outbox: None,
            outbound: Vec::new(),
            hovering: false,
            content,
        }
    }

    #[inline]
    pub fn content(&self) -> &Content {
        &self.content
    }

    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[inline]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    #[inline]
    pub fn field(&self) -> Option<&ParticleField> {
        self.field.as_ref()
    }

    #[inline]
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    #[inline]
    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    #[inline]
    pub fn progress(&self) -> &ScrollProgress {
        &self.progress
    }

    #[inline]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    #[inline]
    pub fn cursor_visible(&self) -> bool {
        self.cursor.visible()
    }

    #[inline]
    pub fn marquees(&self) -> &[Marquee] {
        &self.marquees
    }

    #[inline]
    pub fn reveals(&self) -> &Reveals {
        &self.reveals
    }

    #[inline]
    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    #[inline]
    pub fn project_tilts(&self) -> &[Tilt] {
        &self.project_tilts
    }

    #[inline]
    pub fn terminal_tilt(&self) -> &Tilt {
        &self.terminal_tilt
    }

    /// Activity graph levels in `[0, 1)`.
    #[inline]
    pub fn activity(&self) -> &[f32] {
        &self.activity
    }

    #[inline]
    pub fn contact(&self) -> &ContactForm {
        &self.contact
    }

    #[inline]
    pub fn contact_mut(&mut self) -> &mut ContactForm {
        &mut self.contact
    }

    /// The contact field receiving typed text.
    #[inline]
    pub fn focus(&self) -> Option<ContactField> {
        self.focus
    }

    pub fn set_focus(&mut self, focus: Option<ContactField>) {
        self.focus = focus;
    }

    #[inline]
    pub fn rail_scroll(&self) -> &RailScroll {
        &self.rail_scroll
    }

    /// Whether the pointer rested on a clickable control last frame.
    #[inline]
    pub fn is_hovering_target(&self) -> bool {
        self.hovering
    }

    /// The submission started by the last click or Enter, once.
    pub fn take_submission(&mut self) -> Option<Submission> {
        self.outbox.take()
    }

    /// Apply the answer to the outstanding submission.
    pub fn finish_submission(&mut self, result: Result<SubmitResponse, ContactError>) {
        // The outcome is logged and shown through the form status.
        let _ = self.contact.finish(result);
    }

    /// Links clicked since the last call, oldest first.
    pub fn take_outbound(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.outbound)
    }

    /// Hero opacity and scale at the current scroll.
    pub fn hero_fade(&self) -> HeroFade {
        HeroFade::at(self.scroll)
    }

    /// Re-lay the page for a new viewport size.
    ///
    /// The scroll offset is clamped to the new page height and the field's
    /// wrap bounds follow the viewport.
    pub fn resize(&mut self, viewport: Vec2) {
        self.layout = Layout::new(viewport, self.layout.counts());
        self.scroll = self.scroll.clamp(0.0, self.layout.max_scroll());
        self.rail_scroll.set_max(self.layout.rail_overflow());
        if let Some(field) = &mut self.field {
            field.resize(viewport);
        }
        tracing::debug!(width = viewport.x, height = viewport.y, height_px = self.layout.height(), "page relaid");
    }

    /// Jump to a scroll offset, clamped to the page.
    pub fn scroll_to(&mut self, offset: f32) {
        self.scroll = offset.clamp(0.0, self.layout.max_scroll());
    }

    /// Scroll so the section `id` sits at the viewport top.
    pub fn scroll_to_section(&mut self, id: &str) -> bool {
        match self.layout.section_top(id) {
            Some(top) => {
                self.scroll_to(top);
                true
            }
            None => false,
        }
    }

    /// Top of the pinned project viewport, in viewport coordinates.
    pub fn rail_offset_y(&self) -> f32 {
        match self.layout.block(Block::Projects) {
            Some(p) => {
                let pinned_end = p.bottom() - self.layout.viewport().y;
                self.scroll.clamp(p.top, pinned_end.max(p.top)) - self.scroll
            }
            None => 0.0,
        }
    }

    /// Progress through the project rail, in `[0, 1]`.
    pub fn rail_fraction(&self) -> f32 {
        match self.layout.block(Block::Projects) {
            Some(p) => section_fraction(self.scroll, p.top, p.height, self.layout.viewport().y),
            None => 0.0,
        }
    }

    /// Screen rectangle of project card `index`, untilted.
    pub fn project_card_rect(&self, index: usize) -> Rect {
        let (left, _) = self.layout.container();
        let shift = self
            .rail
            .translate_x(self.rail_fraction(), self.layout.rail_width())
            - self.rail_scroll.offset();
        self.layout
            .rail_card(index)
            .translate(Vec2::new(left + shift, self.rail_offset_y()))
    }

    /// Navbar link hit boxes as `(index into content.nav, rect)`, right
    /// aligned in the container. Links that do not fit are left out.
    pub fn nav_link_rects(&self) -> Vec<(usize, Rect)> {
        let (left, width) = self.layout.container();
        let mut x = left + width;
        let mut rects = Vec::with_capacity(self.content.nav.len());
        for (i, link) in self.content.nav.iter().enumerate().rev() {
            let w = link.label.chars().count() as f32 * 7.0 + 24.0;
            x -= w + 4.0;
            if x < left + 48.0 {
                break;
            }
            rects.push((i, Rect::new(Vec2::new(x, draw::NAV_HEIGHT * 0.5 - 14.0), Vec2::new(w, 28.0))));
        }
        rects
    }

    /// A document-space rectangle in viewport coordinates.
    #[inline]
    pub fn to_screen(&self, rect: Rect) -> Rect {
        rect.translate(Vec2::new(0.0, -self.scroll))
    }

    /// Advance the page by one frame.
    pub fn update(&mut self, dt: Duration, input: &Input) {
        let secs = dt.as_secs_f32();
        let vh = self.layout.viewport().y;

        self.follow_click(input);
        self.edit_contact(input);
        self.apply_scroll(input);
        self.pointer = input.pointer();

        if let Some(field) = &mut self.field {
            field.step(self.pointer);
            field.links_into(&mut self.links);
        }

        self.progress
            .set_fraction(scroll_fraction(self.scroll, self.layout.max_scroll()));
        self.progress.step(secs);

        let scroll = self.scroll;
        let layout = &self.layout;
        self.nav
            .update(scroll, |id| layout.section_top(id).map(|top| top - scroll));

        self.typewriter.tick(dt);
        self.cursor.tick(dt);

        for marquee in &mut self.marquees {
            marquee.step(dt);
        }

        self.observe_reveals(vh);
        self.reveals.step(secs);

        for (i, counter) in self.counters.iter_mut().enumerate() {
            if self.reveals.about.get(i + 1).is_some_and(Reveal::is_revealed) {
                counter.start();
            }
            counter.tick(dt);
        }

        self.update_tilts(input);
        for tilt in &mut self.project_tilts {
            tilt.step(secs);
        }
        self.terminal_tilt.step(secs);
        self.rail_scroll.step(secs);

        self.contact.tick(dt);

        self.hovering = input.pointer_inside() && self.target_at(self.pointer).is_some();
    }

    fn follow_click(&mut self, input: &Input) {
        if !input.mouse_pressed(MouseButton::Left) {
            return;
        }
        let target = self.target_at(input.pointer());
        if !matches!(target, Some(Target::Field(_))) {
            self.focus = None;
        }
        let Some(target) = target else {
            return;
        };

        tracing::debug!(?target, "clicked");
        match target {
            Target::Nav(i) => {
                if let Some(id) = self.content.nav.get(i).map(|link| link.id.clone()) {
                    self.scroll_to_section(&id);
                }
            }
            Target::Jump(id) => {
                self.scroll_to_section(id);
            }
            Target::RailArrow(Side::Left) => self.rail_scroll.scroll_by(-ARROW_STEP_PX),
            Target::RailArrow(Side::Right) => self.rail_scroll.scroll_by(ARROW_STEP_PX),
            Target::Field(field) => self.focus = Some(field),
            Target::Send => self.submit_contact(),
            Target::Link(link) => self.outbound.push(link),
        }
    }

    fn edit_contact(&mut self, input: &Input) {
        let Some(field) = self.focus else {
            return;
        };
        if input.key_pressed(KeyCode::Escape) {
            self.focus = None;
            return;
        }
        if input.key_pressed(KeyCode::Tab) {
            self.focus = Some(field.next());
            return;
        }
        // Fields are locked while a message is in flight
        if self.contact.is_loading() {
            return;
        }

        let value = self.contact.field_mut(field);
        value.push_str(input.text());
        if input.key_pressed(KeyCode::Backspace) {
            value.pop();
        }
        if input.key_pressed(KeyCode::Enter) {
            if field.is_multiline() {
                value.push('\n');
            } else {
                self.submit_contact();
            }
        }
    }

    fn submit_contact(&mut self) {
        match self.contact.begin_submit() {
            Ok(submission) => {
                tracing::info!("contact message queued");
                self.outbox = Some(submission);
            }
            Err(err) => tracing::debug!(error = %err, "contact form not sent"),
        }
    }

    fn apply_scroll(&mut self, input: &Input) {
        let vh = self.layout.viewport().y;
        let mut delta = input.scroll_delta();
        // Keys edit the focused field instead of scrolling
        if self.focus.is_some() {
            self.scroll_to(self.scroll + delta);
            return;
        }
        if input.key_pressed(KeyCode::Down) {
            delta += ARROW_SCROLL_PX;
        }
        if input.key_pressed(KeyCode::Up) {
            delta -= ARROW_SCROLL_PX;
        }
        if input.key_pressed(KeyCode::PageDown) || input.key_pressed(KeyCode::Space) {
            delta += vh * PAGE_SCROLL_FRACTION;
        }
        if input.key_pressed(KeyCode::PageUp) {
            delta -= vh * PAGE_SCROLL_FRACTION;
        }

        let mut target = self.scroll + delta;
        if input.key_pressed(KeyCode::Home) {
            target = 0.0;
        }
        if input.key_pressed(KeyCode::End) {
            target = self.layout.max_scroll();
        }
        self.scroll_to(target);
    }

    fn observe_reveals(&mut self, vh: f32) {
        let scroll = self.scroll;
        let layout = &self.layout;
        let span = |r: Rect| (r.min.y - scroll, r.max().y - scroll);

        self.reveals
            .headings
            .observe(vh, |i| span(layout.heading(HEADED[i])));

        let stats = layout.counts().stats;
        self.reveals.about.observe(vh, |i| {
            if i == 0 {
                span(layout.about_intro())
            } else if i <= stats {
                span(layout.stat_card(i - 1))
            } else {
                span(layout.activity_card())
            }
        });

        self.reveals.skills.observe(vh, |i| span(layout.skill_chip(i)));

        let cards: Vec<(f32, f32)> = (0..self.reveals.projects.len())
            .map(|i| {
                let r = self.project_card_rect(i);
                (r.min.y, r.max().y)
            })
            .collect();
        self.reveals.projects.observe(vh, |i| cards[i]);

        let layout = &self.layout;
        self.reveals
            .education
            .observe(vh, |i| span(layout.education_card(i)));
        self.reveals
            .hackathons
            .observe(vh, |i| span(layout.hackathon_card(i)));
        self.reveals.blog.observe(vh, |i| span(layout.blog_card(i)));
        self.reveals
            .contact
            .observe(vh, |_| span(layout.contact_form()));
    }

    fn update_tilts(&mut self, input: &Input) {
        let pointer = input.pointer();
        let inside = input.pointer_inside();

        for i in 0..self.project_tilts.len() {
            let rect = self.project_card_rect(i);
            let tilt = &mut self.project_tilts[i];
            hover_or_leave(tilt, rect, pointer, inside);
        }

        let terminal = self.to_screen(self.layout.terminal_card());
        hover_or_leave(&mut self.terminal_tilt, terminal, pointer, inside);
    }
}

fn hover_or_leave(tilt: &mut Tilt, rect: Rect, pointer: Vec2, inside: bool) {
    if inside && rect.contains(pointer) {
        tilt.hover(Tilt::normalise(pointer, rect.min, rect.size));
    } else if tilt.is_hovered() {
        tilt.leave();
    }
}
