//! Vertical page layout.
//!
//! Blocks are stacked top to bottom in document coordinates (y down, 0 at
//! the top of the page). Element geometry is derived from the viewport and
//! the content counts only, so the update and draw passes agree on where
//! everything is without sharing state.

use glam::Vec2;

use crate::contact::ContactField;
use crate::content::Content;

/// Height of a marquee strip.
pub const MARQUEE_HEIGHT: f32 = 64.0;
/// The pinned project rail scrolls through this many viewport heights.
pub const RAIL_SCREENS: f32 = 3.0;
/// Space above a section's content for its heading.
pub const HEADER_HEIGHT: f32 = 160.0;
/// Widest the content column gets.
pub const MAX_CONTAINER: f32 = 1100.0;
/// Horizontal margin kept on narrow windows.
pub const GUTTER: f32 = 24.0;

pub const SKILL_CHIP: Vec2 = Vec2::new(150.0, 56.0);
pub const PROJECT_CARD: Vec2 = Vec2::new(380.0, 440.0);
pub const CARD_GAP: f32 = 24.0;
pub const EDUCATION_ROW: f32 = 150.0;
pub const HACKATHON_CARD_HEIGHT: f32 = 280.0;
pub const BLOG_CARD_HEIGHT: f32 = 220.0;

pub const FIELD_HEIGHT: f32 = 44.0;
pub const MESSAGE_HEIGHT: f32 = 120.0;
const FIELD_GAP: f32 = 16.0;
const FORM_PADDING: f32 = 24.0;
/// Diameter of the rail's arrow buttons.
pub const ARROW_BUTTON: f32 = 44.0;
pub const HERO_BUTTON_HEIGHT: f32 = 44.0;
const SOCIAL_ROW: f32 = 56.0;

/// Which of the rail's arrow buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    #[inline]
    pub fn centre(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Half-open containment.
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.y >= self.min.y && p.x < max.x && p.y < max.y
    }

    pub fn translate(&self, by: Vec2) -> Rect {
        Rect::new(self.min + by, self.size)
    }

    /// Whether any part lies within `0..height` vertically.
    pub fn overlaps_rows(&self, height: f32) -> bool {
        self.max().y > 0.0 && self.min.y < height
    }

    /// Shrink by `by` on every side.
    pub fn inset(&self, by: f32) -> Rect {
        Rect::new(
            self.min + Vec2::splat(by),
            (self.size - Vec2::splat(2.0 * by)).max(Vec2::ZERO),
        )
    }
}

/// A page block, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    Hero,
    Marquee(usize),
    About,
    Skills,
    Projects,
    Education,
    Hackathons,
    Blog,
    Contact,
    Footer,
}

impl Block {
    /// The anchor id, for blocks that have one.
    pub fn id(self) -> Option<&'static str> {
        match self {
            Block::Hero => Some("home"),
            Block::About => Some("about"),
            Block::Skills => Some("skills"),
            Block::Projects => Some("projects"),
            Block::Education => Some("education"),
            Block::Hackathons => Some("hackathons"),
            Block::Blog => Some("blog"),
            Block::Contact => Some("contact"),
            Block::Marquee(_) | Block::Footer => None,
        }
    }
}

/// A block with its vertical extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placed {
    pub block: Block,
    pub top: f32,
    pub height: f32,
}

impl Placed {
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Counts the layout depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub marquees: usize,
    pub stats: usize,
    pub skills: usize,
    pub projects: usize,
    pub education: usize,
    pub hackathons: usize,
    pub blog: usize,
}

impl Counts {
    pub fn of(content: &Content) -> Self {
        Self {
            marquees: content.marquees.len(),
            stats: content.stats.len(),
            skills: content.skills.len(),
            projects: content.projects.len(),
            education: content.education.len(),
            hackathons: content.hackathons.len(),
            blog: content.blog.len(),
        }
    }
}

/// Positions of every page block for one viewport size.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    viewport: Vec2,
    counts: Counts,
    left: f32,
    width: f32,
    blocks: Vec<Placed>,
    height: f32,
}

impl Layout {
    pub fn new(viewport: Vec2, counts: Counts) -> Self {
        let width = (viewport.x - 2.0 * GUTTER).clamp(1.0, MAX_CONTAINER);
        let left = ((viewport.x - width) * 0.5).max(0.0);
        let mut layout = Self {
            viewport,
            counts,
            left,
            width,
            blocks: Vec::new(),
            height: 0.0,
        };

        let mut order = vec![Block::Hero];
        if counts.marquees > 0 {
            order.push(Block::Marquee(0));
        }
        order.extend([Block::About, Block::Skills]);
        for i in 1..counts.marquees {
            order.push(Block::Marquee(i));
        }
        order.extend([
            Block::Projects,
            Block::Education,
            Block::Hackathons,
            Block::Blog,
            Block::Contact,
            Block::Footer,
        ]);

        let mut top = 0.0;
        for block in order {
            let height = layout.block_height(block);
            layout.blocks.push(Placed { block, top, height });
            top += height;
        }
        layout.height = top;
        layout
    }

    fn block_height(&self, block: Block) -> f32 {
        let vh = self.viewport.y;
        match block {
            Block::Hero => vh.max(560.0),
            Block::Marquee(_) => MARQUEE_HEIGHT,
            Block::About => HEADER_HEIGHT + 520.0,
            Block::Skills => {
                let rows = self.counts.skills.div_ceil(self.skill_columns());
                HEADER_HEIGHT + rows as f32 * (SKILL_CHIP.y + 16.0) + 80.0
            }
            Block::Projects => vh * RAIL_SCREENS,
            Block::Education => HEADER_HEIGHT + self.counts.education as f32 * EDUCATION_ROW + 80.0,
            Block::Hackathons => {
                let rows = self.counts.hackathons.div_ceil(self.grid_columns());
                HEADER_HEIGHT + rows as f32 * (HACKATHON_CARD_HEIGHT + CARD_GAP) + 80.0
            }
            Block::Blog => {
                let rows = self.counts.blog.div_ceil(self.grid_columns());
                HEADER_HEIGHT + rows as f32 * (BLOG_CARD_HEIGHT + CARD_GAP) + 80.0
            }
            Block::Contact => HEADER_HEIGHT + 480.0,
            Block::Footer => 160.0,
        }
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    #[inline]
    pub fn counts(&self) -> Counts {
        self.counts
    }

    /// Total document height.
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Largest useful scroll offset.
    pub fn max_scroll(&self) -> f32 {
        (self.height - self.viewport.y).max(0.0)
    }

    #[inline]
    pub fn blocks(&self) -> &[Placed] {
        &self.blocks
    }

    pub fn block(&self, block: Block) -> Option<&Placed> {
        self.blocks.iter().find(|p| p.block == block)
    }

    /// Document-space top of the section with anchor `id`.
    pub fn section_top(&self, id: &str) -> Option<f32> {
        self.blocks
            .iter()
            .find(|p| p.block.id() == Some(id))
            .map(|p| p.top)
    }

    /// The content column: left edge and width.
    pub fn container(&self) -> (f32, f32) {
        (self.left, self.width)
    }

    fn top_of(&self, block: Block) -> f32 {
        self.block(block).map(|p| p.top).unwrap_or(0.0)
    }

    /// Heading area of a section.
    pub fn heading(&self, block: Block) -> Rect {
        Rect::new(
            Vec2::new(self.left, self.top_of(block) + 56.0),
            Vec2::new(self.width.min(520.0), 64.0),
        )
    }

    pub fn skill_columns(&self) -> usize {
        (((self.width + 16.0) / (SKILL_CHIP.x + 16.0)) as usize).max(1)
    }

    /// Columns for the hackathon and blog grids.
    pub fn grid_columns(&self) -> usize {
        if self.width >= 900.0 {
            3
        } else if self.width >= 560.0 {
            2
        } else {
            1
        }
    }

    fn grid_cell(&self, block: Block, index: usize, height: f32) -> Rect {
        let cols = self.grid_columns();
        let w = (self.width - CARD_GAP * (cols - 1) as f32) / cols as f32;
        let (row, col) = (index / cols, index % cols);
        Rect::new(
            Vec2::new(
                self.left + col as f32 * (w + CARD_GAP),
                self.top_of(block) + HEADER_HEIGHT + row as f32 * (height + CARD_GAP),
            ),
            Vec2::new(w, height),
        )
    }

    /// Hero terminal card.
    pub fn terminal_card(&self) -> Rect {
        let hero = self.top_of(Block::Hero);
        let w = (self.width * 0.45).clamp(280.0, 520.0);
        let h = 300.0;
        let vh = self.block(Block::Hero).map(|p| p.height).unwrap_or(self.viewport.y);
        Rect::new(
            Vec2::new(self.left + self.width - w, hero + (vh - h) * 0.5),
            Vec2::new(w, h),
        )
    }

    /// Hero name and tagline block, left of the terminal.
    pub fn hero_intro(&self) -> Rect {
        let terminal = self.terminal_card();
        let w = (terminal.min.x - self.left - 48.0).max(200.0);
        Rect::new(Vec2::new(self.left, terminal.min.y), Vec2::new(w, terminal.size.y))
    }

    /// "See my work" and "Resume" buttons along the bottom of the intro.
    pub fn hero_buttons(&self) -> [Rect; 2] {
        let intro = self.hero_intro();
        let y = intro.max().y - HERO_BUTTON_HEIGHT;
        let work = Rect::new(Vec2::new(intro.min.x, y), Vec2::new(150.0, HERO_BUTTON_HEIGHT));
        let resume = Rect::new(
            Vec2::new(work.max().x + 12.0, y),
            Vec2::new(120.0, HERO_BUTTON_HEIGHT),
        );
        [work, resume]
    }

    /// One of the about-grid stat cards.
    pub fn stat_card(&self, index: usize) -> Rect {
        let n = self.counts.stats.max(1);
        let w = (self.width * 0.5 - CARD_GAP * (n - 1) as f32) / n as f32;
        Rect::new(
            Vec2::new(
                self.left + self.width * 0.5 + index as f32 * (w + CARD_GAP),
                self.top_of(Block::About) + HEADER_HEIGHT,
            ),
            Vec2::new(w.max(40.0), 140.0),
        )
    }

    /// About-grid intro card.
    pub fn about_intro(&self) -> Rect {
        Rect::new(
            Vec2::new(self.left, self.top_of(Block::About) + HEADER_HEIGHT),
            Vec2::new(self.width * 0.5 - CARD_GAP, 300.0),
        )
    }

    /// About-grid coding activity card.
    pub fn activity_card(&self) -> Rect {
        Rect::new(
            Vec2::new(
                self.left + self.width * 0.5,
                self.top_of(Block::About) + HEADER_HEIGHT + 140.0 + CARD_GAP,
            ),
            Vec2::new(self.width * 0.5, 136.0),
        )
    }

    pub fn skill_chip(&self, index: usize) -> Rect {
        let cols = self.skill_columns();
        let (row, col) = (index / cols, index % cols);
        Rect::new(
            Vec2::new(
                self.left + col as f32 * (SKILL_CHIP.x + 16.0),
                self.top_of(Block::Skills) + HEADER_HEIGHT + row as f32 * (SKILL_CHIP.y + 16.0),
            ),
            SKILL_CHIP,
        )
    }

    /// Width of the project strip, including the trailing call-to-action
    /// card.
    pub fn rail_width(&self) -> f32 {
        let cards = self.counts.projects + 1;
        cards as f32 * PROJECT_CARD.x + (cards.saturating_sub(1)) as f32 * CARD_GAP
    }

    /// Project card `index` in strip coordinates (x from the strip start,
    /// y from the top of the pinned viewport).
    pub fn rail_card(&self, index: usize) -> Rect {
        Rect::new(
            Vec2::new(
                index as f32 * (PROJECT_CARD.x + CARD_GAP),
                ((self.viewport.y - PROJECT_CARD.y) * 0.5).max(HEADER_HEIGHT),
            ),
            PROJECT_CARD,
        )
    }

    /// Arrow button in pinned coordinates: x on screen, y from the top of
    /// the pinned viewport.
    pub fn rail_arrow(&self, side: Side) -> Rect {
        let y = self.rail_card(0).centre().y - ARROW_BUTTON * 0.5;
        let x = match side {
            Side::Left => self.left,
            Side::Right => self.left + self.width - ARROW_BUTTON,
        };
        Rect::new(Vec2::new(x, y), Vec2::splat(ARROW_BUTTON))
    }

    /// How far the strip overflows the content column.
    pub fn rail_overflow(&self) -> f32 {
        (self.rail_width() - self.width).max(0.0)
    }

    pub fn education_card(&self, index: usize) -> Rect {
        let indent = 48.0;
        Rect::new(
            Vec2::new(
                self.left + indent,
                self.top_of(Block::Education) + HEADER_HEIGHT + index as f32 * EDUCATION_ROW,
            ),
            Vec2::new(self.width - indent, EDUCATION_ROW - CARD_GAP),
        )
    }

    pub fn hackathon_card(&self, index: usize) -> Rect {
        self.grid_cell(Block::Hackathons, index, HACKATHON_CARD_HEIGHT)
    }

    pub fn blog_card(&self, index: usize) -> Rect {
        self.grid_cell(Block::Blog, index, BLOG_CARD_HEIGHT)
    }

    /// Contact form panel.
    pub fn contact_form(&self) -> Rect {
        Rect::new(
            Vec2::new(self.left, self.top_of(Block::Contact) + HEADER_HEIGHT),
            Vec2::new(self.width * 0.6, 400.0),
        )
    }

    /// Input box of one form field.
    pub fn contact_field(&self, field: ContactField) -> Rect {
        let inner = self.contact_form().inset(FORM_PADDING);
        let (offset, height) = match field {
            ContactField::Name => (0.0, FIELD_HEIGHT),
            ContactField::Email => (FIELD_HEIGHT + FIELD_GAP, FIELD_HEIGHT),
            ContactField::Message => (2.0 * (FIELD_HEIGHT + FIELD_GAP), MESSAGE_HEIGHT),
        };
        Rect::new(
            Vec2::new(inner.min.x, inner.min.y + offset),
            Vec2::new(inner.size.x, height),
        )
    }

    /// The send button under the message box.
    pub fn contact_button(&self) -> Rect {
        let message = self.contact_field(ContactField::Message);
        Rect::new(
            Vec2::new(message.min.x, message.max().y + FIELD_GAP),
            Vec2::new(message.size.x, FIELD_HEIGHT),
        )
    }

    /// Social link row `index`, right of the form. Empty when the column
    /// has no room for it.
    pub fn contact_social(&self, index: usize) -> Rect {
        let form = self.contact_form();
        let x = form.max().x + 40.0;
        let w = (self.left + self.width - x).max(0.0);
        Rect::new(
            Vec2::new(x, form.min.y + index as f32 * SOCIAL_ROW),
            Vec2::new(w, 40.0),
        )
    }
}
