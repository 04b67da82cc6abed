//! Export adapter boundary.
//!
//! The renderer produces a [`RenderedDocument`]; an [`Exporter`] turns it into
//! something a user can download. Turning the page into a PDF is the job of
//! whatever sits behind the adapter (a headless browser, a print dialog).
//! The built-in adapter writes the print-ready HTML page to disk.

pub mod handlers;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::layout::PageFillVerdict;
use crate::models::PersonalInfo;
use crate::render::RenderedDocument;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub file_name: String,
    pub bytes: usize,
}

pub trait Exporter: Send + Sync {
    fn export(
        &self,
        document: &RenderedDocument,
        suggested_file_name: &str,
    ) -> Result<ExportReceipt, ExportError>;
}

/// `Ada_Lovelace_CV.pdf`. Runs of anything but letters and digits become one
/// `_`; with no name at all the result is `CV.pdf`.
pub fn suggested_file_name(info: &PersonalInfo) -> String {
    let parts: Vec<String> = [info.first_name.as_str(), info.last_name.as_str()]
        .into_iter()
        .flat_map(|name| name.split(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect();
    if parts.is_empty() {
        "CV.pdf".to_string()
    } else {
        format!("{}_CV.pdf", parts.join("_"))
    }
}

/// Writes `<stem>.html` into a directory.
#[derive(Debug, Clone)]
pub struct HtmlFileExporter {
    dir: PathBuf,
}

impl HtmlFileExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Exporter for HtmlFileExporter {
    fn export(
        &self,
        document: &RenderedDocument,
        suggested_file_name: &str,
    ) -> Result<ExportReceipt, ExportError> {
        let stem = Path::new(suggested_file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("CV");
        let file_name = format!("{stem}.html");
        let path = self.dir.join(&file_name);

        fs::create_dir_all(&self.dir).map_err(|source| ExportError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let page = document.standalone_html();
        fs::write(&path, &page).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        let fill = &document.page_fill;
        if fill.verdict == PageFillVerdict::Overflows {
            warn!(
                pages = fill.estimated_pages,
                fill = fill.fill_fraction,
                "Exported CV runs past one page"
            );
        }
        info!(
            template = document.template.as_str(),
            path = %path.display(),
            bytes = page.len(),
            "CV exported"
        );

        Ok(ExportReceipt {
            path,
            file_name,
            bytes: page.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::initial_cv_data;
    use crate::render::render_document;

    fn info(first: &str, last: &str) -> PersonalInfo {
        PersonalInfo {
            first_name: first.to_string(),
            last_name: last.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_suggested_file_name() {
        assert_eq!(suggested_file_name(&info("Ada", "Lovelace")), "Ada_Lovelace_CV.pdf");
        assert_eq!(suggested_file_name(&info("Mary Ann", "O'Neil")), "Mary_Ann_O_Neil_CV.pdf");
        assert_eq!(suggested_file_name(&info("  ", "")), "CV.pdf");
        assert_eq!(suggested_file_name(&info("", "Turing")), "Turing_CV.pdf");
        assert_eq!(suggested_file_name(&info("José", "")), "José_CV.pdf");
    }

    #[test]
    fn test_html_exporter_writes_standalone_page() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = HtmlFileExporter::new(dir.path().join("out"));
        let mut cv = initial_cv_data();
        cv.personal_info = info("Ada", "Lovelace");
        let document = render_document(&cv);

        let receipt = exporter
            .export(&document, &suggested_file_name(&cv.personal_info))
            .unwrap();

        assert_eq!(receipt.file_name, "Ada_Lovelace_CV.html");
        let written = fs::read_to_string(&receipt.path).unwrap();
        assert_eq!(written.len(), receipt.bytes);
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("Ada Lovelace"));
    }

    #[test]
    fn test_unwritable_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let exporter = HtmlFileExporter::new(&blocker);
        let document = render_document(&initial_cv_data());
        let err = exporter.export(&document, "CV.pdf").unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
