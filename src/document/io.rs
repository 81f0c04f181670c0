//! File I/O operations and validation
//!
//! This module opens the .docx container and reads the main document part.
//! Legacy binary documents are rejected before any ZIP parsing.

use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

use super::models::RawXml;
use crate::error::{ExtractError, Result};

/// Main document part inside a WordprocessingML package
pub const DOCUMENT_PART: &str = "word/document.xml";

/// OLE2 compound file header used by .doc, .xls and .ppt
const OLE2_SIGNATURE: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const LEGACY_EXTENSIONS: &[&str] = &["doc", "dot"];

/// Open archive together with the location of its body XML
#[derive(Debug)]
pub struct DocumentHandle {
    archive: ZipArchive<File>,
    body_part: &'static str,
    path: PathBuf,
}

impl DocumentHandle {
    /// Open `path` as a ZIP package and check it has a main document part
    pub fn open(path: &Path) -> Result<Self> {
        let file = open_file(path)?;
        let mut archive = ZipArchive::new(file)
            .map_err(|e| ExtractError::corrupt(path, format!("not a ZIP archive ({e})")))?;

        if archive.by_name(DOCUMENT_PART).is_err() {
            if archive.by_name("xl/workbook.xml").is_ok() {
                return Err(ExtractError::corrupt(
                    path,
                    "this appears to be an Excel workbook (.xlsx), not a Word document",
                ));
            }
            if archive.by_name("ppt/presentation.xml").is_ok() {
                return Err(ExtractError::corrupt(
                    path,
                    "this appears to be a PowerPoint presentation (.pptx), not a Word document",
                ));
            }
            return Err(ExtractError::corrupt(
                path,
                format!("missing {DOCUMENT_PART}; the file may be corrupted"),
            ));
        }

        Ok(Self {
            archive,
            body_part: DOCUMENT_PART,
            path: path.to_path_buf(),
        })
    }

    pub fn body_part(&self) -> &str {
        self.body_part
    }

    /// Read the body XML, closing the archive
    pub fn read_body(mut self) -> Result<RawXml> {
        let mut xml = String::new();
        {
            let mut entry = self
                .archive
                .by_name(self.body_part)
                .map_err(|e| ExtractError::corrupt(&self.path, e.to_string()))?;
            entry.read_to_string(&mut xml).map_err(|e| {
                ExtractError::corrupt(&self.path, format!("cannot read {}: {e}", self.body_part))
            })?;
        }
        debug!("Read {} bytes from {}", xml.len(), self.body_part);
        Ok(RawXml::new(self.path, xml))
    }
}

fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| ExtractError::corrupt(path, format!("cannot open file ({e})")))
}

/// Fails with `UnsupportedLegacyFormat` for .doc files, by extension or signature
pub fn reject_legacy_format(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if LEGACY_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ExtractError::UnsupportedLegacyFormat(path.to_path_buf()));
    }

    let mut header = Vec::with_capacity(OLE2_SIGNATURE.len());
    open_file(path)?
        .take(OLE2_SIGNATURE.len() as u64)
        .read_to_end(&mut header)
        .map_err(|e| ExtractError::corrupt(path, format!("cannot read file header ({e})")))?;

    if header == OLE2_SIGNATURE {
        return Err(ExtractError::UnsupportedLegacyFormat(path.to_path_buf()));
    }

    Ok(())
}

/// Read `word/document.xml` from the document at `path`
pub fn read_document_xml(path: &Path) -> Result<RawXml> {
    if !path.exists() {
        return Err(ExtractError::NotFound(path.to_path_buf()));
    }
    if path.is_dir() {
        return Err(ExtractError::corrupt(path, "path is a directory"));
    }

    reject_legacy_format(path)?;

    let handle = DocumentHandle::open(path)?;
    debug!("Opened {} ({})", path.display(), handle.body_part());
    handle.read_body()
}
