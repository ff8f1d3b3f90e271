//! Page model and the greedy page-break cursor.
//!
//! Coordinates are millimetres from the top-left corner of an A4 portrait
//! page. Text `y` is the baseline. The renderer flips to PDF user space.

use crate::metrics::{line_height_mm, text_width_mm};

/// A4 width in millimetres.
pub const PAGE_WIDTH: f32 = 210.0;
/// A4 height in millimetres.
pub const PAGE_HEIGHT: f32 = 297.0;
/// Margin on every side, in millimetres.
pub const MARGIN: f32 = 20.0;
/// Lowest baseline allowed for body content.
pub const CONTENT_BOTTOM: f32 = PAGE_HEIGHT - MARGIN;
/// Height between the top and bottom margins.
pub const PRINTABLE_HEIGHT: f32 = CONTENT_BOTTOM - MARGIN;

/// An RGB color with 0..=255 channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb(r, g, b)
    }
}

/// Helvetica face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
}

impl FontStyle {
    /// Base font name of the standard Type1 face.
    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Normal => "Helvetica",
            Self::Bold => "Helvetica-Bold",
            Self::Italic => "Helvetica-Oblique",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// What a text element is, so the document can be inspected without
/// parsing strings back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Title,
    Heading,
    Info,
    ThemeHeader,
    ThemeTally,
    RequirementName,
    Evidence,
    Attachments,
    Footer,
}

/// A drawable item on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        role: TextRole,
        x: f32,
        y: f32,
        lines: Vec<String>,
        size: f32,
        style: FontStyle,
        color: Rgb,
        align: Align,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        fill: Option<Rgb>,
        stroke: Option<Rgb>,
    },
}

impl Element {
    /// Lowest extent of the element (largest `y`), in millimetres.
    pub fn bottom(&self) -> f32 {
        match self {
            Element::Text { y, lines, size, .. } => {
                y + line_height_mm(*size) * lines.len().saturating_sub(1) as f32
            }
            Element::Rect { y, height, .. } => y + height,
        }
    }
}

/// One page of elements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    /// Text elements with the given role.
    pub fn texts(&self, role: TextRole) -> impl Iterator<Item = &[String]> {
        self.elements.iter().filter_map(move |e| match e {
            Element::Text { role: r, lines, .. } if *r == role => Some(lines.as_slice()),
            _ => None,
        })
    }
}

/// The laid-out document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    /// All text elements with the given role, across pages, in order.
    pub fn texts(&self, role: TextRole) -> impl Iterator<Item = &[String]> {
        self.pages.iter().flat_map(move |p| p.texts(role))
    }
}

/// Text appearance shared by consecutive calls.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f32,
    pub style: FontStyle,
    pub color: Rgb,
}

impl TextStyle {
    pub const fn new(size: f32, style: FontStyle, color: Rgb) -> Self {
        Self { size, style, color }
    }
}

/// Writes elements top to bottom, opening pages as needed.
///
/// Page breaks are greedy: before a block of estimated height `h`, a new
/// page starts if `y + h` would pass the bottom margin. There is no
/// lookahead.
#[derive(Debug)]
pub struct Cursor {
    pages: Vec<Page>,
    y: f32,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    /// A document with one empty page and the cursor at the top margin.
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: MARGIN,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    pub fn advance(&mut self, dy: f32) {
        self.y += dy;
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Start a new page if a block of `height` does not fit. Returns
    /// whether a page was added.
    ///
    /// A block taller than the printable area only forces a break when the
    /// cursor is not already at the top; it then has to be written with
    /// [`flow_text`](Self::flow_text).
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.y + height.min(PRINTABLE_HEIGHT) > CONTENT_BOTTOM {
            self.break_page();
            return true;
        }
        false
    }

    /// Open a new page with the cursor at the top margin.
    pub fn break_page(&mut self) {
        self.pages.push(Page::default());
        self.y = MARGIN;
    }

    pub fn push(&mut self, element: Element) {
        if let Some(page) = self.pages.last_mut() {
            page.elements.push(element);
        }
    }

    /// Add text at the cursor's current `y`.
    pub fn text(&mut self, role: TextRole, x: f32, lines: Vec<String>, style: TextStyle) {
        let y = self.y;
        self.text_at(role, x, y, lines, style, Align::Left);
    }

    pub fn text_at(
        &mut self,
        role: TextRole,
        x: f32,
        y: f32,
        lines: Vec<String>,
        style: TextStyle,
        align: Align,
    ) {
        self.push(Element::Text {
            role,
            x,
            y,
            lines,
            size: style.size,
            style: style.style,
            color: style.color,
            align,
        });
    }

    /// Add `lines` one baseline every `step` mm, continuing on new pages
    /// whenever the next baseline would pass the bottom margin. Leaves the
    /// cursor one `step` below the last line.
    pub fn flow_text(&mut self, role: TextRole, x: f32, lines: Vec<String>, style: TextStyle, step: f32) {
        let mut rest = lines.into_iter().peekable();
        while rest.peek().is_some() {
            if self.y > CONTENT_BOTTOM {
                self.break_page();
            }
            let room = ((CONTENT_BOTTOM - self.y) / step).floor() as usize + 1;
            let chunk: Vec<String> = rest.by_ref().take(room).collect();
            let count = chunk.len();
            self.text(role, x, chunk, style);
            self.advance(count as f32 * step);
        }
    }

    /// Add a line of text centred horizontally on the page.
    pub fn centered(&mut self, role: TextRole, y: f32, text: String, style: TextStyle) {
        self.text_at(role, PAGE_WIDTH / 2.0, y, vec![text], style, Align::Center);
    }

    pub fn finish(self) -> Document {
        Document { pages: self.pages }
    }

    /// Add `footer(i, n)` centred near the bottom of every page.
    pub fn finish_with_footer(
        mut self,
        style: TextStyle,
        footer: impl Fn(usize, usize) -> String,
    ) -> Document {
        let total = self.pages.len();
        for (i, page) in self.pages.iter_mut().enumerate() {
            page.elements.push(Element::Text {
                role: TextRole::Footer,
                x: PAGE_WIDTH / 2.0,
                y: PAGE_HEIGHT - 10.0,
                lines: vec![footer(i + 1, total)],
                size: style.size,
                style: style.style,
                color: style.color,
                align: Align::Center,
            });
        }
        self.finish()
    }
}

/// Left edge of a line of text with the given alignment.
pub fn line_start_x(x: f32, line: &str, size: f32, align: Align) -> f32 {
    match align {
        Align::Left => x,
        Align::Center => x - text_width_mm(line, size) / 2.0,
    }
}
