//! # conforma-export -- Project Summary PDF
//!
//! Renders a [`Project`] as a paginated A4 summary: a header band, general
//! information, optional overall statistics with a progress bar, then
//! every theme with its requirements, and a page counter on every page.
//!
//! The pipeline has three stages:
//!
//! 1. [`summary::layout_summary`] places elements on pages with a greedy
//!    page-break cursor ([`layout::Cursor`]).
//! 2. [`render::render_pdf`] encodes the pages with `lopdf`.
//! 3. [`export_project_summary`] writes the bytes to a temporary file in the
//!    target directory and renames it into place.
//!
//! The document is complete in memory before anything touches the disk, so
//! a failure never leaves a partial file behind.

pub mod error;
pub mod layout;
pub mod metrics;
pub mod naming;
pub mod render;
pub mod summary;

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use conforma_core::Project;

pub use error::ExportError;

/// What the summary includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Print evidence text under concluded requirements.
    pub include_evidence: bool,
    /// Print the overall statistics block.
    pub include_stats: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_evidence: true,
            include_stats: true,
        }
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub file_name: String,
    pub path: PathBuf,
    pub pages: usize,
}

/// Lay out and encode the summary without writing it.
///
/// Returns the PDF bytes and the page count.
pub fn build_summary_pdf(
    project: &Project,
    options: &ExportOptions,
    generated_on: NaiveDate,
) -> Result<(Vec<u8>, usize), ExportError> {
    let document = summary::layout_summary(project, options, generated_on);
    let bytes = render::render_pdf(&document)?;
    Ok((bytes, document.pages.len()))
}

/// Write the summary of `project` into `out_dir`.
///
/// The file is named `resumo-<slug>-<millis>.pdf`.
pub fn export_project_summary(
    project: &Project,
    options: &ExportOptions,
    out_dir: &Path,
) -> Result<ExportReport, ExportError> {
    if !out_dir.is_dir() {
        return Err(ExportError::MissingOutputDir(out_dir.to_path_buf()));
    }

    let (bytes, pages) = build_summary_pdf(project, options, Local::now().date_naive())?;

    let file_name = naming::summary_file_name(&project.nome, naming::next_timestamp_millis());
    let path = out_dir.join(&file_name);
    write_atomically(out_dir, &path, &bytes)?;

    tracing::info!(
        project_id = %project.id,
        path = %path.display(),
        pages,
        "project summary exported"
    );
    Ok(ExportReport {
        file_name,
        path,
        pages,
    })
}

fn write_atomically(dir: &Path, path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let io_err = |source: std::io::Error| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;
    Ok(())
}
