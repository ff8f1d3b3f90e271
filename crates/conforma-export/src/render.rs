//! PDF encoding of a laid-out [`Document`] with `lopdf`.
//!
//! Each page gets one content stream. Fonts are the standard Type1
//! Helvetica faces with WinAnsiEncoding, shared by every page through a
//! single resource dictionary.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Object, ObjectId, Stream, StringFormat};

use crate::error::ExportError;
use crate::layout::{line_start_x, Document, Element, FontStyle, Rgb, PAGE_HEIGHT, PAGE_WIDTH};
use crate::metrics::{encode_win_ansi, line_height_mm, MM_PER_PT};

const FACES: [FontStyle; 3] = [FontStyle::Normal, FontStyle::Bold, FontStyle::Italic];

/// Bézier control-point factor for quarter circles.
const KAPPA: f32 = 0.552_284_8;

fn pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

fn real(v: f32) -> Object {
    Object::Real(v)
}

fn font_key(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Normal => "F1",
        FontStyle::Bold => "F2",
        FontStyle::Italic => "F3",
    }
}

fn color_operands(color: Rgb) -> Vec<Object> {
    vec![
        real(f32::from(color.0) / 255.0),
        real(f32::from(color.1) / 255.0),
        real(f32::from(color.2) / 255.0),
    ]
}

/// Encode `document` as PDF bytes.
pub fn render_pdf(document: &Document) -> Result<Vec<u8>, ExportError> {
    let mut doc = lopdf::Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = lopdf::Dictionary::new();
    for face in FACES {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font_key(face), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let content = Content {
            operations: page_operations(&page.elements),
        };
        let bytes = content.encode().map_err(|e| ExportError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, bytes));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), real(pt(PAGE_WIDTH)), real(pt(PAGE_HEIGHT))],
        }),
    );
    let catalog_id: ObjectId = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn page_operations(elements: &[Element]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for element in elements {
        match element {
            Element::Rect {
                x,
                y,
                width,
                height,
                radius,
                fill,
                stroke,
            } => {
                if fill.is_none() && stroke.is_none() {
                    continue;
                }
                if let Some(color) = fill {
                    ops.push(Operation::new("rg", color_operands(*color)));
                }
                if let Some(color) = stroke {
                    ops.push(Operation::new("RG", color_operands(*color)));
                    ops.push(Operation::new("w", vec![real(0.6)]));
                }
                rect_path(&mut ops, *x, *y, *width, *height, *radius);
                let paint = match (fill, stroke) {
                    (Some(_), Some(_)) => "B",
                    (Some(_), None) => "f",
                    _ => "S",
                };
                ops.push(Operation::new(paint, vec![]));
            }
            Element::Text {
                x,
                y,
                lines,
                size,
                style,
                color,
                align,
                ..
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![Object::Name(font_key(*style).as_bytes().to_vec()), real(*size)],
                ));
                ops.push(Operation::new("rg", color_operands(*color)));
                let step = line_height_mm(*size);
                for (i, line) in lines.iter().enumerate() {
                    let line_x = line_start_x(*x, line, *size, *align);
                    let line_y = y + step * i as f32;
                    ops.push(Operation::new(
                        "Tm",
                        vec![
                            1.into(),
                            0.into(),
                            0.into(),
                            1.into(),
                            real(pt(line_x)),
                            real(pt(PAGE_HEIGHT - line_y)),
                        ],
                    ));
                    ops.push(Operation::new(
                        "Tj",
                        vec![Object::String(encode_win_ansi(line), StringFormat::Literal)],
                    ));
                }
                ops.push(Operation::new("ET", vec![]));
            }
        }
    }
    ops
}

/// Append a rectangle path, with rounded corners when `radius > 0`.
fn rect_path(ops: &mut Vec<Operation>, x: f32, y: f32, width: f32, height: f32, radius: f32) {
    let left = pt(x);
    let right = pt(x + width);
    let top = pt(PAGE_HEIGHT - y);
    let bottom = pt(PAGE_HEIGHT - y - height);

    if radius <= 0.0 {
        ops.push(Operation::new(
            "re",
            vec![real(left), real(bottom), real(pt(width)), real(pt(height))],
        ));
        return;
    }

    let r = pt(radius.min(width / 2.0).min(height / 2.0));
    let k = r * KAPPA;
    let mut op = |name: &str, points: &[f32]| {
        ops.push(Operation::new(name, points.iter().copied().map(real).collect()));
    };
    op("m", &[left + r, bottom]);
    op("l", &[right - r, bottom]);
    op("c", &[right - r + k, bottom, right, bottom + r - k, right, bottom + r]);
    op("l", &[right, top - r]);
    op("c", &[right, top - r + k, right - r + k, top, right - r, top]);
    op("l", &[left + r, top]);
    op("c", &[left + r - k, top, left, top - r + k, left, top - r]);
    op("l", &[left, bottom + r]);
    op("c", &[left, bottom + r - k, left + r - k, bottom, left + r, bottom]);
    op("h", &[]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{Cursor, TextRole, TextStyle, MARGIN};

    fn two_page_document() -> Document {
        let style = TextStyle::new(12.0, FontStyle::Normal, Rgb::BLACK);
        let mut cursor = Cursor::new();
        cursor.text(TextRole::Info, MARGIN, vec!["Nome do Projeto: Teste".into()], style);
        cursor.push(Element::Rect {
            x: MARGIN,
            y: 60.0,
            width: 170.0,
            height: 10.0,
            radius: 2.0,
            fill: Some(Rgb(240, 240, 240)),
            stroke: Some(Rgb(200, 200, 200)),
        });
        cursor.set_y(1000.0);
        cursor.ensure_space(1.0);
        cursor.text(TextRole::Info, MARGIN, vec!["Segunda página".into()], style);
        cursor.finish_with_footer(style, |i, n| format!("Página {i} de {n}"))
    }

    #[test]
    fn renders_loadable_pdf_with_all_pages() {
        let bytes = render_pdf(&two_page_document()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn page_text_is_win_ansi_encoded() {
        let bytes = render_pdf(&two_page_document()).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        let second = pages[&2];
        let content = Content::decode(&doc.get_page_content(second).unwrap()).unwrap();
        let shown: Vec<Vec<u8>> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(bytes.clone()),
                _ => None,
            })
            .collect();
        assert!(shown.contains(&encode_win_ansi("Segunda página")));
        assert!(shown.contains(&encode_win_ansi("Página 2 de 2")));
    }

    #[test]
    fn rounded_rect_is_a_closed_curve() {
        let mut ops = Vec::new();
        rect_path(&mut ops, 0.0, 0.0, 10.0, 10.0, 2.0);
        assert_eq!(ops.first().unwrap().operator, "m");
        assert_eq!(ops.last().unwrap().operator, "h");
        assert_eq!(ops.iter().filter(|o| o.operator == "c").count(), 4);
    }

    #[test]
    fn square_rect_uses_re() {
        let mut ops = Vec::new();
        rect_path(&mut ops, 0.0, 0.0, 10.0, 10.0, 0.0);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].operator, "re");
    }
}
