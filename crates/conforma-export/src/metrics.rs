//! Helvetica text metrics, line wrapping and WinAnsi encoding.
//!
//! The document uses the standard Type1 Helvetica family, which every PDF
//! reader ships, so no font is embedded. Widths come from the Helvetica
//! AFM in thousandths of an em; the oblique face shares them.

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.15;

/// Advance widths of ASCII 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const DEFAULT_WIDTH: u16 = 556;

/// Characters WinAnsiEncoding places in 0x80..=0x9F, with their code and
/// Helvetica width.
const WIN_ANSI_HIGH: [(char, u8, u16); 27] = [
    ('€', 0x80, 556),
    ('‚', 0x82, 222),
    ('ƒ', 0x83, 556),
    ('„', 0x84, 333),
    ('…', 0x85, 1000),
    ('†', 0x86, 556),
    ('‡', 0x87, 556),
    ('ˆ', 0x88, 333),
    ('‰', 0x89, 1000),
    ('Š', 0x8A, 667),
    ('‹', 0x8B, 333),
    ('Œ', 0x8C, 1000),
    ('Ž', 0x8E, 611),
    ('‘', 0x91, 222),
    ('’', 0x92, 222),
    ('“', 0x93, 333),
    ('”', 0x94, 333),
    ('•', 0x95, 350),
    ('–', 0x96, 556),
    ('—', 0x97, 1000),
    ('˜', 0x98, 333),
    ('™', 0x99, 1000),
    ('š', 0x9A, 500),
    ('›', 0x9B, 333),
    ('œ', 0x9C, 944),
    ('ž', 0x9E, 500),
    ('Ÿ', 0x9F, 667),
];

fn win_ansi_high(c: char) -> Option<(u8, u16)> {
    WIN_ANSI_HIGH
        .iter()
        .find(|(ch, _, _)| *ch == c)
        .map(|&(_, code, width)| (code, width))
}

fn char_width(c: char) -> u16 {
    let code = c as u32;
    if (32..=126).contains(&code) {
        return HELVETICA_WIDTHS[(code - 32) as usize];
    }
    if let Some((_, width)) = win_ansi_high(c) {
        return width;
    }
    // Accented Latin letters take the width of their base letter.
    let base = match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        'º' | 'ª' => 'o',
        _ => return DEFAULT_WIDTH,
    };
    HELVETICA_WIDTHS[(base as u32 - 32) as usize]
}

/// Rendered width of `text` at `size_pt`, in millimetres.
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    units as f32 / 1000.0 * size_pt * MM_PER_PT
}

/// Distance between consecutive baselines at `size_pt`, in millimetres.
pub fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * LINE_HEIGHT_FACTOR * MM_PER_PT
}

/// Split `text` into lines no wider than `max_width_mm`.
///
/// Breaks at whitespace; a single word wider than the line is split
/// between characters. Never returns an empty vector.
pub fn wrap_text(text: &str, max_width_mm: f32, size_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        wrap_paragraph(paragraph, max_width_mm, size_pt, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_paragraph(paragraph: &str, max_width_mm: f32, size_pt: f32, lines: &mut Vec<String>) {
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if text_width_mm(&candidate, size_pt) <= max_width_mm {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if text_width_mm(word, size_pt) <= max_width_mm {
            current = word.to_string();
            continue;
        }
        for c in word.chars() {
            current.push(c);
            if text_width_mm(&current, size_pt) > max_width_mm && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
}

/// Encode `text` for a WinAnsiEncoding font.
///
/// Latin-1 characters map to their own code, typographic punctuation and
/// the few letters WinAnsi adds map to 0x80..=0x9F, anything else becomes
/// `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ (0x20..=0x7E | 0xA0..=0xFF) => code as u8,
            _ => win_ansi_high(c).map_or(b'?', |(code, _)| code),
        })
        .collect()
}
