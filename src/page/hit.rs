//! Click targets.
//!
//! [`Page::target_at`] resolves a screen point to the control under it. The
//! same lookup drives clicks and the hover cursor, so anything drawn as a
//! button answers to the pointer exactly where it is drawn. Reveal offsets
//! and card tilt are ignored; targets sit at their resting rectangles.

use glam::Vec2;

use super::draw::NAV_HEIGHT;
use super::layout::{Rect, Side};
use super::Page;
use crate::contact::ContactField;
use crate::signals::Reveal;

/// Something that opens outside the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// A web or mail link.
    Url(String),
    /// A file relative to the asset root.
    Asset(String),
}

/// A control on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Navbar link, by index into the content's nav list.
    Nav(usize),
    /// In-page button that jumps to a section anchor.
    Jump(&'static str),
    RailArrow(Side),
    Field(ContactField),
    Send,
    Link(Outbound),
}

const LINK_PILL_HEIGHT: f32 = 28.0;

fn url(link: &str) -> Option<Target> {
    (!link.is_empty()).then(|| Target::Link(Outbound::Url(link.to_string())))
}

impl Page {
    /// A hero rectangle in viewport coordinates, scaled with the hero fade.
    pub fn hero_rect(&self, doc: Rect) -> Rect {
        let fade = self.hero_fade();
        let centre = self.layout.viewport() * 0.5;
        let screen = self.to_screen(doc);
        let c = centre + (screen.centre() - centre) * fade.scale;
        let size = screen.size * fade.scale;
        Rect::new(c - size * 0.5, size)
    }

    /// Screen rectangle of a rail arrow button.
    pub fn rail_arrow_rect(&self, side: Side) -> Rect {
        self.layout
            .rail_arrow(side)
            .translate(Vec2::new(0.0, self.rail_offset_y()))
    }

    pub fn rail_arrow_enabled(&self, side: Side) -> bool {
        match side {
            Side::Left => self.rail_scroll.can_scroll_left(),
            Side::Right => self.rail_scroll.can_scroll_right(),
        }
    }

    /// GitHub and live-demo pills of project card `index`, untilted.
    pub fn project_link_rects(&self, index: usize) -> [Rect; 2] {
        let card = self.project_card_rect(index);
        let y = card.max().y - 104.0;
        let github = Rect::new(Vec2::new(card.min.x + 24.0, y), Vec2::new(92.0, LINK_PILL_HEIGHT));
        let live = Rect::new(
            Vec2::new(github.max().x + 8.0, y),
            Vec2::new(72.0, LINK_PILL_HEIGHT),
        );
        [github, live]
    }

    /// The control under `point`, if any.
    pub fn target_at(&self, point: Vec2) -> Option<Target> {
        if point.y < NAV_HEIGHT {
            return self
                .nav_link_rects()
                .into_iter()
                .find(|(_, rect)| rect.contains(point))
                .map(|(i, _)| Target::Nav(i));
        }

        self.rail_target(point)
            .or_else(|| self.hero_target(point))
            .or_else(|| self.project_target(point))
            .or_else(|| self.blog_target(point))
            .or_else(|| self.contact_target(point))
    }

    fn rail_target(&self, point: Vec2) -> Option<Target> {
        let vh = self.layout.viewport().y;
        [Side::Left, Side::Right].into_iter().find_map(|side| {
            let rect = self.rail_arrow_rect(side);
            (rect.overlaps_rows(vh) && rect.contains(point) && self.rail_arrow_enabled(side))
                .then_some(Target::RailArrow(side))
        })
    }

    fn hero_target(&self, point: Vec2) -> Option<Target> {
        if self.hero_fade().opacity <= 0.0 {
            return None;
        }
        let [work, resume] = self.layout.hero_buttons();
        if self.hero_rect(work).contains(point) {
            return Some(Target::Jump("projects"));
        }
        let resume_path = &self.content.profile.resume;
        if !resume_path.is_empty() && self.hero_rect(resume).contains(point) {
            return Some(Target::Link(Outbound::Asset(resume_path.clone())));
        }
        None
    }

    fn project_target(&self, point: Vec2) -> Option<Target> {
        let count = self.content.projects.len();
        let revealed = |i: usize| self.reveals.projects.get(i).is_some_and(Reveal::is_revealed);

        for (i, project) in self.content.projects.iter().enumerate() {
            if !revealed(i) || !self.project_card_rect(i).contains(point) {
                continue;
            }
            let [github, live] = self.project_link_rects(i);
            if github.contains(point) {
                return url(&project.github);
            }
            if live.contains(point) {
                return url(&project.live);
            }
            return None;
        }

        // Call-to-action card after the last project
        let cta_visible = count.checked_sub(1).is_some_and(revealed);
        if cta_visible && self.project_card_rect(count).contains(point) {
            return url(&self.content.profile.projects_url);
        }
        None
    }

    fn blog_target(&self, point: Vec2) -> Option<Target> {
        self.content.blog.iter().enumerate().find_map(|(i, post)| {
            let visible = self.reveals.blog.get(i).is_some_and(Reveal::is_revealed);
            let rect = self.to_screen(self.layout.blog_card(i));
            (visible && rect.contains(point))
                .then(|| url(&post.link))
                .flatten()
        })
    }

    fn contact_target(&self, point: Vec2) -> Option<Target> {
        let form_visible = self.reveals.contact.get(0).is_some_and(Reveal::is_revealed);
        if form_visible {
            for field in ContactField::ALL {
                if self.to_screen(self.layout.contact_field(field)).contains(point) {
                    return Some(Target::Field(field));
                }
            }
            if self.to_screen(self.layout.contact_button()).contains(point) {
                return Some(Target::Send);
            }
        }

        let socials_visible = self.reveals.contact.get(1).is_some_and(Reveal::is_revealed);
        if !socials_visible {
            return None;
        }
        self.content
            .profile
            .socials
            .iter()
            .enumerate()
            .find_map(|(i, social)| {
                let rect = self.to_screen(self.layout.contact_social(i));
                (rect.size.x >= 48.0 && rect.contains(point))
                    .then(|| url(&social.url))
                    .flatten()
            })
    }
}
