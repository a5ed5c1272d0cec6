//! Scene building for the page.
//!
//! Text is not rasterised; every run of text is drawn as a rounded bar of
//! proportional width so layout, colour and motion read correctly.

use glam::Vec2;

use super::layout::{Block, Rect, Side, MARQUEE_HEIGHT};
use super::{Page, HEADED};
use crate::assets::{AssetStore, ImageAsset};
use crate::contact::{ContactField, FormStatus};
use crate::content::parse_hex_color;
use crate::gpu::{ImageDraw, Scene, ShapeBatch};
use crate::signals::{doubled, RevealOutput, TiltOutput};

const BACKGROUND_RGB: [f32; 3] = [10.0 / 255.0, 10.0 / 255.0, 15.0 / 255.0];
pub const BACKGROUND: [f32; 4] = [BACKGROUND_RGB[0], BACKGROUND_RGB[1], BACKGROUND_RGB[2], 1.0];
pub const SURFACE: [f32; 3] = [19.0 / 255.0, 19.0 / 255.0, 26.0 / 255.0];
pub const ACCENT: [f32; 3] = [124.0 / 255.0, 58.0 / 255.0, 237.0 / 255.0];
pub const ACCENT_LIGHT: [f32; 3] = [167.0 / 255.0, 139.0 / 255.0, 250.0 / 255.0];
pub const TEXT: [f32; 3] = [0.93, 0.93, 0.96];
pub const MUTED: [f32; 3] = [0.55, 0.55, 0.62];
const SUCCESS: [f32; 3] = [16.0 / 255.0, 185.0 / 255.0, 129.0 / 255.0];
const DANGER: [f32; 3] = [239.0 / 255.0, 68.0 / 255.0, 68.0 / 255.0];

/// Width of one character of body text.
pub const CHAR_W: f32 = 8.0;
/// Height of the navbar overlay.
pub const NAV_HEIGHT: f32 = 64.0;
/// Height of the scroll progress bar.
pub const PROGRESS_HEIGHT: f32 = 3.0;

const TERMINAL_HEADER: f32 = 36.0;
const TERMINAL_ROW: f32 = 24.0;

#[inline]
fn rgba(rgb: [f32; 3], a: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], a]
}

fn color_or_accent(hex: &str) -> [f32; 3] {
    parse_hex_color(hex).unwrap_or(ACCENT)
}

fn text_width(text: &str, char_w: f32) -> f32 {
    text.chars().count() as f32 * char_w
}

/// A line of text as a bar, clipped to `max_w`.
fn text_bar(batch: &mut ShapeBatch, min: Vec2, text: &str, char_w: f32, height: f32, max_w: f32, color: [f32; 4]) {
    let w = text_width(text, char_w).min(max_w);
    if w > 0.0 {
        batch.push_rect(min, Vec2::new(w, height), color, height * 0.5);
    }
}

/// Wrapped paragraph as a stack of bars. Returns the height used.
fn paragraph(batch: &mut ShapeBatch, min: Vec2, text: &str, width: f32, color: [f32; 4]) -> f32 {
    let per_line = ((width / CHAR_W) as usize).max(1);
    let mut chars = text.chars().count();
    let mut y = 0.0;
    while chars > 0 {
        let n = chars.min(per_line);
        batch.push_rect(min + Vec2::new(0.0, y), Vec2::new(n as f32 * CHAR_W, 8.0), color, 4.0);
        chars -= n;
        y += 16.0;
    }
    y
}

/// Pill-shaped chip sized to its label.
fn chip(batch: &mut ShapeBatch, min: Vec2, label: &str, fill: [f32; 4], ink: [f32; 4]) -> f32 {
    let w = text_width(label, 6.0) + 20.0;
    batch.push_rect(min, Vec2::new(w, 24.0), fill, 12.0);
    text_bar(batch, min + Vec2::new(10.0, 9.0), label, 6.0, 6.0, w, ink);
    w
}

fn revealed(rect: Rect, out: RevealOutput) -> Rect {
    rect.translate(Vec2::new(0.0, out.offset_y))
}

fn hidden() -> RevealOutput {
    RevealOutput {
        opacity: 0.0,
        offset_y: 0.0,
    }
}

impl Page {
    /// Current terminal row with its cursor, for the window title.
    pub fn title_line(&self) -> String {
        let rows = self.typewriter.display_lines();
        let row = rows
            .iter()
            .find(|r| r.is_current)
            .or(rows.last());
        let cursor = if self.cursor.visible() { "▋" } else { " " };
        match row {
            Some(r) => format!("{}{}{}", r.prefix, r.text, cursor),
            None => cursor.to_string(),
        }
    }

    /// Fill `scene` with this frame's draw lists.
    pub fn build(&self, scene: &mut Scene, assets: &mut AssetStore) {
        scene.clear();
        scene.background = BACKGROUND;

        self.draw_field(&mut scene.shapes);
        self.draw_hero(&mut scene.shapes);
        self.draw_marquees(&mut scene.shapes);
        self.draw_headings(&mut scene.shapes);
        self.draw_about(&mut scene.shapes);
        self.draw_skills(&mut scene.shapes);
        self.draw_projects(&mut scene.shapes);
        self.draw_education(&mut scene.shapes);
        self.draw_hackathons(scene, assets);
        self.draw_blog(&mut scene.shapes);
        self.draw_contact(&mut scene.shapes);
        self.draw_footer(&mut scene.shapes);
        self.draw_overlay(&mut scene.overlay);
    }

    fn vh(&self) -> f32 {
        self.layout.viewport().y
    }

    fn on_screen(&self, rect: Rect) -> bool {
        rect.overlaps_rows(self.vh())
    }

    fn draw_field(&self, batch: &mut ShapeBatch) {
        let Some(field) = &self.field else {
            return;
        };
        let fade = self.hero_fade();
        if fade.opacity <= 0.0 {
            return;
        }
        let centre = self.layout.viewport() * 0.5;
        let place = |p: Vec2| centre + (p - centre) * fade.scale;
        let config = field.config();

        for link in &self.links {
            batch.push_line(
                place(link.a),
                place(link.b),
                config.link_width,
                rgba(config.link_color, link.alpha * fade.opacity),
            );
        }
        for p in field.particles() {
            batch.push_circle(
                place(p.position),
                p.radius * fade.scale,
                rgba(config.particle_color, p.opacity * fade.opacity),
            );
        }
    }

    fn draw_hero(&self, batch: &mut ShapeBatch) {
        let fade = self.hero_fade();
        if fade.opacity <= 0.0 {
            return;
        }
        let a = fade.opacity;

        let intro = self.hero_rect(self.layout.hero_intro());
        if self.on_screen(intro) {
            let profile = &self.content.profile;
            let mut y = intro.min.y + 24.0;
            chip(batch, Vec2::new(intro.min.x, y), &profile.badge, rgba(ACCENT, 0.15 * a), rgba(ACCENT_LIGHT, a));
            y += 48.0;
            text_bar(batch, Vec2::new(intro.min.x, y), &profile.name, 26.0, 40.0, intro.size.x, rgba(TEXT, a));
            y += 60.0;
            text_bar(batch, Vec2::new(intro.min.x, y), &profile.role, 12.0, 18.0, intro.size.x, rgba(ACCENT_LIGHT, a));
            y += 36.0;
            paragraph(batch, Vec2::new(intro.min.x, y), &profile.tagline, intro.size.x, rgba(MUTED, a));

            let [work, resume] = self.layout.hero_buttons().map(|r| self.hero_rect(r));
            batch.push_rect(work.min, work.size, rgba(ACCENT, a), work.size.y * 0.5);
            text_bar(batch, work.min + Vec2::new(20.0, 18.0), "See my work", 8.0, 8.0, work.size.x, rgba(TEXT, a));
            if !profile.resume.is_empty() {
                batch.push_rect(resume.min, resume.size, rgba(TEXT, 0.2 * a), resume.size.y * 0.5);
                batch.push_rect(resume.min + Vec2::ONE, resume.size - Vec2::splat(2.0), rgba(SURFACE, a), resume.size.y * 0.5);
                text_bar(batch, resume.min + Vec2::new(20.0, 18.0), "Resume", 8.0, 8.0, resume.size.x, rgba(TEXT, a));
            }
        }

        let card = self.hero_rect(self.layout.terminal_card());
        if !self.on_screen(card) {
            return;
        }
        let tilt = self.terminal_tilt.output();
        let pivot = card.centre();
        let mut rect = |min: Vec2, size: Vec2, color: [f32; 4], radius: f32| {
            batch.push_tilted_rect_about(pivot, min, size, color, radius, tilt);
        };

        rect(card.min, card.size, rgba(SURFACE, 0.95 * a), 16.0);
        rect(card.min, Vec2::new(card.size.x, TERMINAL_HEADER), rgba(TEXT, 0.04 * a), 16.0);
        for (i, dot) in [[1.0, 0.37, 0.34], [1.0, 0.74, 0.18], [0.16, 0.79, 0.25]].into_iter().enumerate() {
            let min = card.min + Vec2::new(14.0 + i as f32 * 20.0, 12.0);
            rect(min, Vec2::splat(12.0), rgba(dot, a), 6.0);
        }

        let left = card.min.x + 20.0;
        let max_w = card.size.x - 40.0;
        for (i, row) in self.typewriter.display_lines().iter().enumerate() {
            let y = card.min.y + TERMINAL_HEADER + 16.0 + i as f32 * TERMINAL_ROW;
            if y + TERMINAL_ROW > card.max().y {
                break;
            }
            let prefix_w = text_width(&row.prefix, CHAR_W);
            let prefix_color = if row.is_output { MUTED } else { SUCCESS };
            rect(Vec2::new(left, y), Vec2::new(prefix_w, 10.0), rgba(prefix_color, a), 3.0);

            let text_w = text_width(&row.text, CHAR_W).min(max_w - prefix_w);
            let ink = if row.is_output { ACCENT_LIGHT } else { TEXT };
            if text_w > 0.0 {
                rect(Vec2::new(left + prefix_w, y), Vec2::new(text_w, 10.0), rgba(ink, a), 3.0);
            }
            if row.is_current && self.cursor.visible() {
                let x = left + prefix_w + text_w + 2.0;
                rect(Vec2::new(x, y - 3.0), Vec2::new(CHAR_W, 16.0), rgba(ACCENT_LIGHT, a), 0.0);
            }
        }
    }

    fn draw_marquees(&self, batch: &mut ShapeBatch) {
        let vw = self.layout.viewport().x;
        for (i, (marquee, strip)) in self.marquees.iter().zip(&self.content.marquees).enumerate() {
            let Some(placed) = self.layout.block(Block::Marquee(i)) else {
                continue;
            };
            let band = self.to_screen(Rect::new(
                Vec2::new(0.0, placed.top),
                Vec2::new(vw, MARQUEE_HEIGHT),
            ));
            if !self.on_screen(band) {
                continue;
            }
            batch.push_rect(band.min, band.size, rgba(ACCENT, 0.06), 0.0);

            let items = doubled(&strip.items);
            let widths: Vec<f32> = items.iter().map(|s| text_width(s, 9.0) + 48.0).collect();
            let strip_width: f32 = widths.iter().sum();
            let mut x = marquee.translate_x(strip_width);
            let y = band.min.y + MARQUEE_HEIGHT * 0.5;

            for (item, w) in items.iter().zip(&widths) {
                if x > vw {
                    break;
                }
                if x + w >= 0.0 {
                    text_bar(batch, Vec2::new(x + 16.0, y - 6.0), item, 9.0, 12.0, *w, rgba(TEXT, 0.7));
                    batch.push_circle(Vec2::new(x + w - 8.0, y), 3.0, rgba(ACCENT_LIGHT, 0.8));
                }
                x += w;
            }
        }
    }

    fn draw_headings(&self, batch: &mut ShapeBatch) {
        let shift_y = self.rail_offset_y();
        for (i, block) in HEADED.iter().enumerate() {
            let out = self.reveals.headings.get(i).map(|r| r.output()).unwrap_or_else(hidden);
            if out.opacity <= 0.0 {
                continue;
            }
            let doc = self.layout.heading(*block);
            let rect = if *block == Block::Projects {
                // Pinned with the rail
                let top = self.layout.block(Block::Projects).map(|p| p.top).unwrap_or(0.0);
                doc.translate(Vec2::new(0.0, shift_y - top))
            } else {
                self.to_screen(doc)
            };
            let rect = revealed(rect, out);
            if !self.on_screen(rect) {
                continue;
            }
            let label = block.id().unwrap_or_default();
            chip(batch, rect.min, label, rgba(ACCENT, 0.15 * out.opacity), rgba(ACCENT_LIGHT, out.opacity));
            batch.push_rect(
                rect.min + Vec2::new(0.0, 34.0),
                Vec2::new(rect.size.x * 0.6, 28.0),
                rgba(TEXT, out.opacity),
                14.0,
            );
        }
    }

    fn card(&self, batch: &mut ShapeBatch, rect: Rect, alpha: f32) {
        batch.push_rect(rect.min, rect.size, rgba(TEXT, 0.06 * alpha), 16.0);
        batch.push_rect(rect.min + Vec2::ONE, rect.size - Vec2::splat(2.0), rgba(SURFACE, alpha), 15.0);
    }

    fn draw_about(&self, batch: &mut ShapeBatch) {
        let about = &self.reveals.about;
        let out = |i: usize| about.get(i).map(|r| r.output()).unwrap_or_else(hidden);

        let intro_out = out(0);
        let intro = revealed(self.to_screen(self.layout.about_intro()), intro_out);
        if self.on_screen(intro) && intro_out.opacity > 0.0 {
            let a = intro_out.opacity;
            self.card(batch, intro, a);
            let inner = intro.inset(24.0);
            let profile = &self.content.profile;
            text_bar(batch, inner.min, &profile.name, 14.0, 20.0, inner.size.x, rgba(TEXT, a));
            let used = paragraph(batch, inner.min + Vec2::new(0.0, 40.0), &profile.tagline, inner.size.x, rgba(MUTED, a));
            text_bar(batch, inner.min + Vec2::new(0.0, 56.0 + used), &profile.location, 7.0, 8.0, inner.size.x, rgba(ACCENT_LIGHT, a));
        }

        for (i, (stat, counter)) in self.content.stats.iter().zip(&self.counters).enumerate() {
            let o = out(i + 1);
            let rect = revealed(self.to_screen(self.layout.stat_card(i)), o);
            if !self.on_screen(rect) || o.opacity <= 0.0 {
                continue;
            }
            self.card(batch, rect, o.opacity);
            let inner = rect.inset(20.0);
            let digits = counter.display().to_string().len() + stat.suffix.chars().count();
            batch.push_rect(inner.min, Vec2::new(digits as f32 * 18.0, 32.0), rgba(TEXT, o.opacity), 8.0);
            let fill = if counter.target() == 0 {
                1.0
            } else {
                counter.display() as f32 / counter.target() as f32
            };
            let track = Rect::new(inner.min + Vec2::new(0.0, 48.0), Vec2::new(inner.size.x, 4.0));
            batch.push_rect(track.min, track.size, rgba(TEXT, 0.08 * o.opacity), 2.0);
            batch.push_rect(track.min, Vec2::new(track.size.x * fill, 4.0), rgba(ACCENT, o.opacity), 2.0);
            text_bar(batch, inner.min + Vec2::new(0.0, 68.0), &stat.label, 7.0, 8.0, inner.size.x, rgba(MUTED, o.opacity));
        }

        let o = out(self.content.stats.len() + 1);
        let rect = revealed(self.to_screen(self.layout.activity_card()), o);
        if !self.on_screen(rect) || o.opacity <= 0.0 {
            return;
        }
        self.card(batch, rect, o.opacity);
        let inner = rect.inset(20.0);
        let n = self.activity.len().max(1) as f32;
        let slot = inner.size.x / n;
        let bottom = inner.max().y;
        for (i, level) in self.activity.iter().enumerate() {
            let h = 8.0 + level * 42.0;
            batch.push_rect(
                Vec2::new(inner.min.x + i as f32 * slot, bottom - h),
                Vec2::new((slot - 3.0).max(1.0), h),
                rgba(ACCENT, (0.2 + level * 0.8) * o.opacity),
                2.0,
            );
        }
    }

    fn draw_skills(&self, batch: &mut ShapeBatch) {
        for (i, skill) in self.content.skills.iter().enumerate() {
            let o = self.reveals.skills.get(i).map(|r| r.output()).unwrap_or_else(hidden);
            let rect = revealed(self.to_screen(self.layout.skill_chip(i)), o);
            if !self.on_screen(rect) || o.opacity <= 0.0 {
                continue;
            }
            let color = color_or_accent(&skill.color);
            batch.push_rect(rect.min, rect.size, rgba(color, 0.12 * o.opacity), 14.0);
            let c = rect.min + Vec2::new(22.0, rect.size.y * 0.5);
            batch.push_circle(c, 7.0, rgba(color, o.opacity));
            text_bar(batch, c + Vec2::new(18.0, -5.0), &skill.name, 8.0, 10.0, rect.size.x - 48.0, rgba(TEXT, o.opacity));
        }
    }

    fn draw_projects(&self, batch: &mut ShapeBatch) {
        let vw = self.layout.viewport().x;
        let count = self.content.projects.len();
        for i in 0..=count {
            let rect = self.project_card_rect(i);
            if rect.max().x < 0.0 || rect.min.x > vw || !self.on_screen(rect) {
                continue;
            }
            let o = if i < count {
                self.reveals.projects.get(i).map(|r| r.output()).unwrap_or_else(hidden)
            } else {
                // Call-to-action card follows the last project
                count
                    .checked_sub(1)
                    .and_then(|last| self.reveals.projects.get(last))
                    .map(|r| r.output())
                    .unwrap_or_else(hidden)
            };
            if o.opacity <= 0.0 {
                continue;
            }
            let rect = revealed(rect, o);
            let a = o.opacity;
            let tilt = self
                .project_tilts
                .get(i)
                .map(|t| t.output())
                .unwrap_or(TiltOutput::NEUTRAL);
            let pivot = rect.centre();
            let mut rect_at = |min: Vec2, size: Vec2, color: [f32; 4], radius: f32| {
                batch.push_tilted_rect_about(pivot, min, size, color, radius, tilt);
            };

            let Some(project) = self.content.projects.get(i) else {
                rect_at(rect.min, rect.size, rgba(ACCENT, 0.12 * a), 20.0);
                rect_at(rect.min + Vec2::splat(2.0), rect.size - Vec2::splat(4.0), rgba(SURFACE, a), 18.0);
                let c = rect.centre();
                rect_at(c - Vec2::new(90.0, 20.0), Vec2::new(180.0, 40.0), rgba(ACCENT, a), 20.0);
                continue;
            };

            let color = color_or_accent(&project.color);
            rect_at(rect.min, rect.size, rgba(color, 0.25 * a), 20.0);
            rect_at(rect.min + Vec2::ONE, rect.size - Vec2::splat(2.0), rgba(SURFACE, a), 19.0);
            rect_at(rect.min + Vec2::ONE, Vec2::new(rect.size.x - 2.0, 180.0), rgba(color, 0.18 * a), 19.0);
            let badge = rect.min + Vec2::new(rect.size.x * 0.5 - 32.0, 58.0);
            rect_at(badge, Vec2::splat(64.0), rgba(color, 0.6 * a), 32.0);

            let left = rect.min.x + 24.0;
            let max_w = rect.size.x - 48.0;
            let mut y = rect.min.y + 204.0;
            let title_w = text_width(&project.title, 12.0).min(max_w);
            rect_at(Vec2::new(left, y), Vec2::new(title_w, 18.0), rgba(TEXT, a), 9.0);
            y += 36.0;

            let per_line = ((max_w / CHAR_W) as usize).max(1);
            let mut chars = project.description.chars().count();
            while chars > 0 && y < rect.max().y - 112.0 {
                let n = chars.min(per_line);
                rect_at(Vec2::new(left, y), Vec2::new(n as f32 * CHAR_W, 8.0), rgba(MUTED, a), 4.0);
                chars -= n;
                y += 16.0;
            }

            let mut x = left;
            let tag_y = rect.max().y - 64.0;
            for tag in &project.tags {
                let w = text_width(tag, 6.0) + 20.0;
                if x + w > left + max_w {
                    break;
                }
                rect_at(Vec2::new(x, tag_y), Vec2::new(w, 24.0), rgba(color, 0.2 * a), 12.0);
                x += w + 8.0;
            }

            let links = [(&project.github, "GitHub"), (&project.live, "Live")];
            for (pill, (link, label)) in self.project_link_rects(i).into_iter().zip(links) {
                if link.is_empty() {
                    continue;
                }
                let pill = revealed(pill, o);
                rect_at(pill.min, pill.size, rgba(TEXT, 0.08 * a), pill.size.y * 0.5);
                rect_at(pill.min + Vec2::new(14.0, 10.0), Vec2::new(text_width(label, 7.0), 8.0), rgba(TEXT, a), 4.0);
            }
        }

        self.draw_rail_arrows(batch);
    }

    fn draw_rail_arrows(&self, batch: &mut ShapeBatch) {
        if self.rail_scroll.max() <= 0.0 {
            return;
        }
        let o = self.reveals.projects.get(0).map(|r| r.output()).unwrap_or_else(hidden);
        for side in [Side::Left, Side::Right] {
            let rect = self.rail_arrow_rect(side);
            if !self.on_screen(rect) || o.opacity <= 0.0 {
                continue;
            }
            let a = if self.rail_arrow_enabled(side) { o.opacity } else { 0.3 * o.opacity };
            let c = rect.centre();
            batch.push_circle(c, rect.size.x * 0.5, rgba(SURFACE, 0.9 * a));
            let (from, to) = match side {
                Side::Left => (c + Vec2::new(5.0, 0.0), c - Vec2::new(5.0, 0.0)),
                Side::Right => (c - Vec2::new(5.0, 0.0), c + Vec2::new(5.0, 0.0)),
            };
            batch.push_line(from + Vec2::new(0.0, -7.0), to, 2.0, rgba(TEXT, a));
            batch.push_line(from + Vec2::new(0.0, 7.0), to, 2.0, rgba(TEXT, a));
        }
    }

    fn draw_education(&self, batch: &mut ShapeBatch) {
        let n = self.content.education.len();
        if n == 0 {
            return;
        }
        let first = self.to_screen(self.layout.education_card(0));
        let last = self.to_screen(self.layout.education_card(n - 1));
        let line_x = first.min.x - 28.0;
        let span = Rect::new(Vec2::new(line_x, first.min.y), Vec2::new(2.0, last.max().y - first.min.y));
        if self.on_screen(span) {
            batch.push_rect(span.min, span.size, rgba(ACCENT, 0.35), 1.0);
        }

        for (i, entry) in self.content.education.iter().enumerate() {
            let o = self.reveals.education.get(i).map(|r| r.output()).unwrap_or_else(hidden);
            let rect = revealed(self.to_screen(self.layout.education_card(i)), o);
            if !self.on_screen(rect) || o.opacity <= 0.0 {
                continue;
            }
            let a = o.opacity;
            batch.push_circle(Vec2::new(line_x + 1.0, rect.min.y + 24.0), 7.0, rgba(ACCENT_LIGHT, a));
            self.card(batch, rect, a);

            let inner = rect.inset(20.0);
            text_bar(batch, inner.min, &entry.period, 7.0, 8.0, inner.size.x, rgba(ACCENT_LIGHT, a));
            text_bar(batch, inner.min + Vec2::new(0.0, 20.0), &entry.title, 11.0, 16.0, inner.size.x, rgba(TEXT, a));
            let mut y = inner.min.y + 48.0;
            for line in [&entry.place, &entry.detail].into_iter().flatten() {
                text_bar(batch, Vec2::new(inner.min.x, y), line, 7.0, 8.0, inner.size.x, rgba(MUTED, a));
                y += 18.0;
            }
            let mut x = inner.min.x;
            for label in &entry.chips {
                if x > inner.max().x - 40.0 {
                    break;
                }
                x += chip(batch, Vec2::new(x, y), label, rgba(ACCENT, 0.12 * a), rgba(ACCENT_LIGHT, a)) + 8.0;
            }
        }
    }

    fn draw_hackathons(&self, scene: &mut Scene, assets: &mut AssetStore) {
        for (i, entry) in self.content.hackathons.iter().enumerate() {
            let o = self.reveals.hackathons.get(i).map(|r| r.output()).unwrap_or_else(hidden);
            let rect = revealed(self.to_screen(self.layout.hackathon_card(i)), o);
            if !self.on_screen(rect) || o.opacity <= 0.0 {
                continue;
            }
            let a = o.opacity;
            self.card(&mut scene.shapes, rect, a);

            let photo = Rect::new(rect.min + Vec2::splat(8.0), Vec2::new(rect.size.x - 16.0, 170.0));
            match assets.image(&entry.image) {
                ImageAsset::Decoded(image) => scene.images.push(ImageDraw {
                    key: entry.image.clone(),
                    min: photo.min,
                    size: photo.size,
                    opacity: a,
                    aspect: image.aspect(),
                }),
                ImageAsset::Placeholder => {
                    scene.shapes.push_rect(photo.min, photo.size, rgba(ACCENT, 0.15 * a), 12.0);
                    scene.shapes.push_circle(photo.centre(), 18.0, rgba(ACCENT_LIGHT, 0.4 * a));
                }
            }

            let inner = Rect::new(
                Vec2::new(rect.min.x + 16.0, photo.max().y + 16.0),
                Vec2::new(rect.size.x - 32.0, rect.max().y - photo.max().y - 24.0),
            );
            let batch = &mut scene.shapes;
            text_bar(batch, inner.min, &entry.name, 10.0, 14.0, inner.size.x, rgba(TEXT, a));
            text_bar(batch, inner.min + Vec2::new(0.0, 26.0), &entry.award, 7.0, 8.0, inner.size.x, rgba(ACCENT_LIGHT, a));
            text_bar(batch, inner.min + Vec2::new(0.0, 44.0), &entry.date, 6.0, 8.0, inner.size.x, rgba(MUTED, a));
        }
    }

    fn draw_blog(&self, batch: &mut ShapeBatch) {
        for (i, post) in self.content.blog.iter().enumerate() {
            let o = self.reveals.blog.get(i).map(|r| r.output()).unwrap_or_else(hidden);
            let rect = revealed(self.to_screen(self.layout.blog_card(i)), o);
            if !self.on_screen(rect) || o.opacity <= 0.0 {
                continue;
            }
            let a = o.opacity;
            self.card(batch, rect, a);
            let inner = rect.inset(20.0);
            text_bar(batch, inner.min, &post.date, 6.0, 8.0, inner.size.x, rgba(MUTED, a));
            text_bar(batch, inner.min + Vec2::new(0.0, 22.0), &post.title, 10.0, 16.0, inner.size.x, rgba(TEXT, a));
            paragraph(batch, inner.min + Vec2::new(0.0, 52.0), &post.description, inner.size.x, rgba(MUTED, a));
            let mut x = inner.min.x;
            let y = inner.max().y - 24.0;
            for tag in &post.tags {
                if x > inner.max().x - 40.0 {
                    break;
                }
                x += chip(batch, Vec2::new(x, y), tag, rgba(ACCENT, 0.12 * a), rgba(ACCENT_LIGHT, a)) + 8.0;
            }
        }
    }

    fn draw_contact(&self, batch: &mut ShapeBatch) {
        let form_out = self.reveals.contact.get(0).map(|r| r.output()).unwrap_or_else(hidden);
        let form = revealed(self.to_screen(self.layout.contact_form()), form_out);
        if self.on_screen(form) && form_out.opacity > 0.0 {
            let a = form_out.opacity;
            self.card(batch, form, a);
            for field in ContactField::ALL {
                let rect = revealed(self.to_screen(self.layout.contact_field(field)), form_out);
                self.draw_contact_field(batch, rect, field, a);
            }

            let status = self.contact.status();
            let button = match status {
                FormStatus::Idle => ACCENT,
                FormStatus::Loading => MUTED,
                FormStatus::Sent => SUCCESS,
                FormStatus::Error(_) => DANGER,
            };
            let send = revealed(self.to_screen(self.layout.contact_button()), form_out);
            batch.push_rect(send.min, send.size, rgba(button, a), 12.0);
            let label = match status {
                FormStatus::Loading => "Sending...",
                FormStatus::Sent => "Sent!",
                _ => "Send message",
            };
            let label_w = text_width(label, 8.0);
            text_bar(batch, Vec2::new(send.centre().x - label_w * 0.5, send.min.y + 18.0), label, 8.0, 8.0, send.size.x, rgba(TEXT, a));
            if let Some(message) = status.message() {
                text_bar(batch, Vec2::new(send.min.x, send.max().y + 12.0), message, 6.0, 8.0, send.size.x, rgba(DANGER, a));
            }
        }

        let side_out = self.reveals.contact.get(1).map(|r| r.output()).unwrap_or_else(hidden);
        if side_out.opacity <= 0.0 {
            return;
        }
        for (i, social) in self.content.profile.socials.iter().enumerate() {
            let rect = revealed(self.to_screen(self.layout.contact_social(i)), side_out);
            if rect.size.x < 48.0 {
                break;
            }
            batch.push_circle(rect.min + Vec2::splat(20.0), 20.0, rgba(ACCENT, 0.2 * side_out.opacity));
            text_bar(batch, rect.min + Vec2::new(52.0, 16.0), &social.label, 7.0, 8.0, rect.size.x - 52.0, rgba(TEXT, side_out.opacity));
        }
    }

    fn draw_contact_field(&self, batch: &mut ShapeBatch, rect: Rect, field: ContactField, a: f32) {
        let focused = self.focus == Some(field);
        if focused {
            batch.push_rect(rect.min - Vec2::splat(2.0), rect.size + Vec2::splat(4.0), rgba(ACCENT, 0.6 * a), 12.0);
        }
        batch.push_rect(rect.min, rect.size, rgba(SURFACE, a), 10.0);
        batch.push_rect(rect.min, rect.size, rgba(TEXT, 0.05 * a), 10.0);

        let max_w = rect.size.x - 28.0;
        let mut caret = Vec2::new(rect.min.x + 14.0, rect.min.y + 18.0);
        for (row, line) in self.contact.field(field).split('\n').enumerate() {
            let y = rect.min.y + 18.0 + row as f32 * 16.0;
            if y + 8.0 > rect.max().y {
                break;
            }
            text_bar(batch, Vec2::new(rect.min.x + 14.0, y), line, CHAR_W, 8.0, max_w, rgba(TEXT, a));
            caret = Vec2::new(rect.min.x + 14.0 + text_width(line, CHAR_W).min(max_w), y);
        }
        if focused && self.cursor.visible() {
            batch.push_rect(caret + Vec2::new(2.0, -4.0), Vec2::new(2.0, 16.0), rgba(ACCENT_LIGHT, a), 0.0);
        }
    }

    fn draw_footer(&self, batch: &mut ShapeBatch) {
        let Some(footer) = self.layout.block(Block::Footer) else {
            return;
        };
        let (left, width) = self.layout.container();
        let rect = self.to_screen(Rect::new(Vec2::new(left, footer.top), Vec2::new(width, footer.height)));
        if !self.on_screen(rect) {
            return;
        }
        batch.push_rect(rect.min, Vec2::new(width, 1.0), rgba(TEXT, 0.08), 0.0);
        text_bar(batch, rect.min + Vec2::new(0.0, 60.0), &self.content.profile.name, 8.0, 10.0, width, rgba(MUTED, 1.0));
    }

    fn draw_overlay(&self, batch: &mut ShapeBatch) {
        let vw = self.layout.viewport().x;
        let (left, _) = self.layout.container();

        if self.nav.scrolled {
            batch.push_rect(Vec2::ZERO, Vec2::new(vw, NAV_HEIGHT), rgba(BACKGROUND_RGB, 0.85), 0.0);
            batch.push_rect(Vec2::new(0.0, NAV_HEIGHT - 1.0), Vec2::new(vw, 1.0), rgba(TEXT, 0.06), 0.0);
        }
        batch.push_circle(Vec2::new(left + 16.0, NAV_HEIGHT * 0.5), 14.0, rgba(ACCENT, 1.0));

        for (i, rect) in self.nav_link_rects() {
            let Some(link) = self.content.nav.get(i) else {
                continue;
            };
            let active = self.nav.active == Some(link.id.as_str());
            if active {
                batch.push_rect(rect.min, rect.size, rgba(ACCENT, 0.18), 14.0);
            }
            let ink = if active { ACCENT_LIGHT } else { MUTED };
            text_bar(batch, rect.min + Vec2::new(12.0, 10.0), &link.label, 7.0, 8.0, rect.size.x, rgba(ink, 1.0));
        }

        let scale = self.progress.scale_x();
        if scale > 0.0 {
            batch.push_rect(Vec2::ZERO, Vec2::new(vw * scale, PROGRESS_HEIGHT), rgba(ACCENT_LIGHT, 1.0), 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetsConfig;
    use crate::config::FolioConfig;
    use crate::content::Content;
    use crate::input::Input;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn page() -> Page {
        let mut rng = StdRng::seed_from_u64(11);
        Page::with_rng(
            Content::embedded().unwrap(),
            &FolioConfig::default(),
            Vec2::new(1280.0, 800.0),
            &mut rng,
        )
    }

    fn missing_assets() -> AssetStore {
        AssetStore::new(&AssetsConfig::default().with_root("/nonexistent/folio-assets"))
    }

    #[test]
    fn test_hero_frame_draws_field() {
        let mut page = page();
        page.update(Duration::from_millis(16), &Input::new());
        let mut scene = Scene::default();
        page.build(&mut scene, &mut missing_assets());

        assert_eq!(scene.background, BACKGROUND);
        // At least one quad per particle
        assert!(scene.shapes.len() >= 60);
        assert!(scene.images.is_empty());
    }

    #[test]
    fn test_progress_bar_tracks_scroll() {
        let mut page = page();
        let mut scene = Scene::default();
        page.build(&mut scene, &mut missing_assets());
        let idle = scene.overlay.len();

        page.scroll_to(page.layout().max_scroll());
        for _ in 0..120 {
            page.update(Duration::from_millis(16), &Input::new());
        }
        page.build(&mut scene, &mut missing_assets());
        assert!(scene.overlay.len() > idle);
        let right = scene
            .overlay
            .vertices()
            .iter()
            .map(|v| v.position[0])
            .fold(0.0, f32::max);
        assert!(right > 1200.0);
    }

    #[test]
    fn test_missing_hackathon_images_use_placeholders() {
        let mut page = page();
        assert!(page.scroll_to_section("hackathons"));
        let mut assets = missing_assets();
        for _ in 0..90 {
            page.update(Duration::from_millis(16), &Input::new());
        }
        let mut scene = Scene::default();
        page.build(&mut scene, &mut assets);

        assert!(scene.images.is_empty());
        assert!(!assets.is_empty());
        let first = &page.content().hackathons[0].image;
        assert!(assets.image(first).is_placeholder());
    }

    #[test]
    fn test_title_line_shows_typed_text() {
        let mut page = page();
        assert_eq!(page.title_line(), format!("{}▋", page.content().terminal[0].prefix));
        // 320 ms into a 60 ms-per-character line
        for _ in 0..20 {
            page.update(Duration::from_millis(16), &Input::new());
        }
        assert!(page.title_line().starts_with("~$ whoa"));
    }

    #[test]
    fn test_text_bar_clips() {
        let mut batch = ShapeBatch::new();
        text_bar(&mut batch, Vec2::ZERO, "abcdefghij", 10.0, 8.0, 40.0, [1.0; 4]);
        let max_x = batch.vertices().iter().map(|v| v.position[0]).fold(0.0, f32::max);
        assert_eq!(max_x, 40.0);

        let mut empty = ShapeBatch::new();
        text_bar(&mut empty, Vec2::ZERO, "", 10.0, 8.0, 40.0, [1.0; 4]);
        assert!(empty.is_empty());
    }
}
