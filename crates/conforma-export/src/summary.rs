//! Layout of the project summary document.
//!
//! One pass over the themes and, inside each, over its requirements, in
//! array order. Figures come from `conforma-score`, so the document shows
//! the same percentages as every other view.

use chrono::NaiveDate;

use conforma_core::{Project, Requirement, Theme};
use conforma_score::{compute_overall_stats, compute_theme_stats, ProgressColor};

use crate::layout::{
    Cursor, Document, Element, FontStyle, Rgb, TextRole, TextStyle, MARGIN, PAGE_WIDTH, PRINTABLE_HEIGHT,
};
use crate::metrics::wrap_text;
use crate::ExportOptions;

const HEADER_BLUE: Rgb = Rgb(41, 128, 185);
const THEME_BLUE: Rgb = Rgb(52, 152, 219);
const CONCLUDED_GREEN: Rgb = Rgb(46, 204, 113);
const PENDING_GRAY: Rgb = Rgb(149, 165, 166);
const BAR_BACKGROUND: Rgb = Rgb(240, 240, 240);
const BAR_BORDER: Rgb = Rgb(200, 200, 200);
const MUTED: Rgb = Rgb(100, 100, 100);
const FOOTER_GRAY: Rgb = Rgb(150, 150, 150);

const HEADER_HEIGHT: f32 = 40.0;
const CONTENT_TOP: f32 = 50.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
/// Width available to requirement names and evidence.
const DETAIL_WIDTH: f32 = PAGE_WIDTH - MARGIN - 50.0;
const BAR_HEIGHT: f32 = 10.0;
const CORNER_RADIUS: f32 = 2.0;
const MARKER_SIZE: f32 = 2.6;

const TITLE: TextStyle = TextStyle::new(24.0, FontStyle::Bold, Rgb::WHITE);
const HEADING: TextStyle = TextStyle::new(16.0, FontStyle::Bold, Rgb::BLACK);
const INFO: TextStyle = TextStyle::new(12.0, FontStyle::Normal, Rgb::BLACK);
const PROGRESS: TextStyle = TextStyle::new(14.0, FontStyle::Bold, Rgb::BLACK);
const THEME_HEADER: TextStyle = TextStyle::new(14.0, FontStyle::Bold, Rgb::WHITE);
const THEME_TALLY: TextStyle = TextStyle::new(11.0, FontStyle::Normal, Rgb::BLACK);
const REQUIREMENT: TextStyle = TextStyle::new(10.0, FontStyle::Normal, Rgb::BLACK);
const EVIDENCE: TextStyle = TextStyle::new(9.0, FontStyle::Italic, MUTED);
const ATTACHMENTS: TextStyle = TextStyle::new(9.0, FontStyle::Normal, MUTED);
const FOOTER: TextStyle = TextStyle::new(9.0, FontStyle::Normal, FOOTER_GRAY);

/// Lay out the summary of `project` as generated on `generated_on`.
pub fn layout_summary(project: &Project, options: &ExportOptions, generated_on: NaiveDate) -> Document {
    let mut cursor = Cursor::new();

    header(&mut cursor);
    general_info(&mut cursor, project, generated_on);
    if options.include_stats {
        overall_stats(&mut cursor, project);
    }

    cursor.ensure_space(30.0);
    cursor.text(TextRole::Heading, MARGIN, vec!["Detalhamento por Temas".into()], HEADING);
    cursor.advance(12.0);

    for (index, theme) in project.temas.iter().enumerate() {
        theme_block(&mut cursor, index + 1, theme, options);
    }

    cursor.finish_with_footer(FOOTER, |page, total| format!("Página {page} de {total}"))
}

fn header(cursor: &mut Cursor) {
    cursor.push(Element::Rect {
        x: 0.0,
        y: 0.0,
        width: PAGE_WIDTH,
        height: HEADER_HEIGHT,
        radius: 0.0,
        fill: Some(HEADER_BLUE),
        stroke: None,
    });
    cursor.centered(TextRole::Title, 25.0, "Resumo do Projeto".into(), TITLE);
    cursor.set_y(CONTENT_TOP);
}

fn general_info(cursor: &mut Cursor, project: &Project, generated_on: NaiveDate) {
    cursor.text(TextRole::Heading, MARGIN, vec!["Informações Gerais".into()], HEADING);
    cursor.advance(10.0);

    let lines = [
        format!("Nome do Projeto: {}", project.nome),
        format!("Data de Geração: {}", generated_on.format("%d/%m/%Y")),
        format!("Total de Temas: {}", project.temas.len()),
    ];
    let last = lines.len() - 1;
    for (i, line) in lines.into_iter().enumerate() {
        cursor.text(TextRole::Info, MARGIN, vec![line], INFO);
        cursor.advance(if i == last { 15.0 } else { 8.0 });
    }
}

fn overall_stats(cursor: &mut Cursor, project: &Project) {
    let stats = compute_overall_stats(project);
    cursor.ensure_space(30.0);

    cursor.text(TextRole::Heading, MARGIN, vec!["Estatísticas Gerais".into()], HEADING);
    cursor.advance(10.0);

    for line in [
        format!("Total de Requisitos: {}", stats.total),
        format!("Requisitos Concluídos: {}", stats.concluded),
        format!("Requisitos Pendentes: {}", stats.pending),
    ] {
        cursor.text(TextRole::Info, MARGIN, vec![line], INFO);
        cursor.advance(8.0);
    }

    cursor.text(
        TextRole::Info,
        MARGIN,
        vec![format!("Progresso Geral: {}%", stats.porcentagem)],
        PROGRESS,
    );
    cursor.advance(8.0);

    progress_bar(cursor, stats.porcentagem, stats.cor);
    cursor.advance(20.0);
}

fn progress_bar(cursor: &mut Cursor, percentage: u8, color: ProgressColor) {
    let y = cursor.y();
    cursor.push(Element::Rect {
        x: MARGIN,
        y,
        width: CONTENT_WIDTH,
        height: BAR_HEIGHT,
        radius: CORNER_RADIUS,
        fill: Some(BAR_BACKGROUND),
        stroke: Some(BAR_BORDER),
    });
    let filled = CONTENT_WIDTH * f32::from(percentage) / 100.0;
    if filled > 0.0 {
        cursor.push(Element::Rect {
            x: MARGIN,
            y,
            width: filled,
            height: BAR_HEIGHT,
            radius: CORNER_RADIUS.min(filled / 2.0),
            fill: Some(color.rgb().into()),
            stroke: None,
        });
    }
}

/// Header band plus tally line, down to where the first requirement starts.
const THEME_HEAD_HEIGHT: f32 = 25.0;
const THEME_GAP: f32 = 8.0;
const NAME_STEP: f32 = 5.0;
const EVIDENCE_STEP: f32 = 4.5;
const ATTACHMENTS_STEP: f32 = 5.0;
const REQUIREMENT_GAP: f32 = 3.0;

fn theme_block(cursor: &mut Cursor, number: usize, theme: &Theme, options: &ExportOptions) {
    let entries: Vec<RequirementLines> = theme
        .requisitos
        .iter()
        .map(|r| RequirementLines::wrap(r, options))
        .collect();

    // The header never ends a page on its own.
    let first = entries.first().map_or(0.0, RequirementLines::reserve);
    cursor.ensure_space(THEME_HEAD_HEIGHT + first);

    let y = cursor.y();
    cursor.push(Element::Rect {
        x: MARGIN,
        y: y - 5.0,
        width: CONTENT_WIDTH,
        height: 12.0,
        radius: CORNER_RADIUS,
        fill: Some(THEME_BLUE),
        stroke: None,
    });
    cursor.set_y(y + 3.0);
    cursor.text(
        TextRole::ThemeHeader,
        MARGIN + 3.0,
        vec![format!("{number}. {}", theme.nome)],
        THEME_HEADER,
    );
    cursor.set_y(y + 15.0);

    let stats = compute_theme_stats(theme);
    cursor.text(
        TextRole::ThemeTally,
        MARGIN + 3.0,
        vec![format!(
            "Requisitos: {}/{} concluídos ({}%)",
            theme.concluded_count(),
            theme.requirement_count(),
            stats.porcentagem
        )],
        THEME_TALLY,
    );
    cursor.set_y(y + THEME_HEAD_HEIGHT);

    for entry in entries {
        entry.write(cursor);
    }
    cursor.advance(THEME_GAP);
}

/// A requirement's wrapped text, measured before anything is placed.
struct RequirementLines {
    concluded: bool,
    name: Vec<String>,
    evidence: Vec<String>,
    attachments: Option<String>,
}

impl RequirementLines {
    fn wrap(requirement: &Requirement, options: &ExportOptions) -> Self {
        let evidence = if options.include_evidence && requirement.has_evidence() {
            wrap_text(
                &format!("Evidência: {}", requirement.evidencia.trim()),
                DETAIL_WIDTH,
                EVIDENCE.size,
            )
        } else {
            Vec::new()
        };
        Self {
            concluded: requirement.is_concluded(),
            name: wrap_text(&requirement.nome, DETAIL_WIDTH, REQUIREMENT.size),
            evidence,
            attachments: (!requirement.anexo.is_empty())
                .then(|| format!("Anexos: {}", requirement.anexo.len())),
        }
    }

    fn height(&self) -> f32 {
        self.name.len() as f32 * NAME_STEP
            + self.evidence.len() as f32 * EVIDENCE_STEP
            + if self.attachments.is_some() { ATTACHMENTS_STEP } else { 0.0 }
            + REQUIREMENT_GAP
    }

    /// Space that must be free before the entry starts. An entry taller
    /// than a page only needs room for its name; the rest flows over.
    fn reserve(&self) -> f32 {
        let height = self.height();
        if height > PRINTABLE_HEIGHT {
            self.name.len() as f32 * NAME_STEP
        } else {
            height
        }
    }

    fn write(self, cursor: &mut Cursor) {
        cursor.ensure_space(self.reserve());
        status_marker(cursor, self.concluded);

        let x = MARGIN + 12.0;
        cursor.flow_text(TextRole::RequirementName, x, self.name, REQUIREMENT, NAME_STEP);
        if !self.evidence.is_empty() {
            cursor.flow_text(TextRole::Evidence, x, self.evidence, EVIDENCE, EVIDENCE_STEP);
        }
        if let Some(line) = self.attachments {
            cursor.flow_text(TextRole::Attachments, x, vec![line], ATTACHMENTS, ATTACHMENTS_STEP);
        }
        cursor.advance(REQUIREMENT_GAP);
    }
}

/// Filled green square for a concluded requirement, outlined gray square
/// for a pending one, sitting on the text baseline.
fn status_marker(cursor: &mut Cursor, concluded: bool) {
    let (fill, stroke) = if concluded {
        (Some(CONCLUDED_GREEN), None)
    } else {
        (None, Some(PENDING_GRAY))
    };
    cursor.push(Element::Rect {
        x: MARGIN + 5.0,
        y: cursor.y() - MARKER_SIZE,
        width: MARKER_SIZE,
        height: MARKER_SIZE,
        radius: 0.0,
        fill,
        stroke,
    });
}
