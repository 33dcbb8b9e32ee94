//! Input staging: the resume file and job description waiting to be submitted.
//!
//! Files arrive from two places, a file picker or a drag-and-drop target.
//! Both are funnelled through [`FileSource`] so the workflow treats them the
//! same way: first file wins, extras are ignored.
//!
//! Extension checks here are advisory only. [`ACCEPT_LIST`] is what a picker
//! should offer as its filter, but the analysis service is the authority on
//! which formats it supports.

use crate::error::AnalyzeError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Accept filter for file pickers.
pub const ACCEPT_LIST: &str = ".pdf,.docx,.txt";

/// Resume format, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Txt,
    Other,
}

impl FileKind {
    /// Classify a file name by extension (case-insensitive).
    pub fn from_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("pdf") => FileKind::Pdf,
            Some("docx") => FileKind::Docx,
            Some("txt") => FileKind::Txt,
            _ => FileKind::Other,
        }
    }

    /// MIME type sent with the multipart `file` part.
    pub fn mime(&self) -> &'static str {
        match self {
            FileKind::Pdf => "application/pdf",
            FileKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            FileKind::Txt => "text/plain",
            FileKind::Other => "application/octet-stream",
        }
    }

    /// Whether the picker's accept filter would offer this kind.
    pub fn is_accepted(&self) -> bool {
        !matches!(self, FileKind::Other)
    }
}

/// A resume held in memory, ready to be sent.
///
/// Cloning is cheap: the content is shared, so an in-flight request and the
/// stager can both hold the same bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct StagedFile {
    name: String,
    content: Arc<[u8]>,
    kind: FileKind,
}

impl StagedFile {
    /// Build a staged file from bytes already in memory.
    pub fn from_bytes(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let name = name.into();
        let kind = FileKind::from_name(&name);
        let content: Vec<u8> = content.into();
        Self {
            name,
            content: Arc::from(content),
            kind,
        }
    }

    /// Read a resume from disk.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, AnalyzeError> {
        let path = path.as_ref();
        let content = tokio::fs::read(path)
            .await
            .map_err(|source| AnalyzeError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
        let name = display_name(path);
        debug!("Staged '{}' ({} bytes) from {}", name, content.len(), path.display());
        Ok(Self::from_bytes(name, content))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }
}

impl fmt::Debug for StagedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StagedFile")
            .field("name", &self.name)
            .field("len", &self.content.len())
            .field("kind", &self.kind)
            .finish()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Where a file selection came from.
#[derive(Debug, Clone)]
pub enum FileSource {
    /// A file-picker change event. An empty list means the picker was dismissed.
    Picker(Vec<StagedFile>),
    /// A drop onto the drop target.
    Drop(Vec<StagedFile>),
}

impl FileSource {
    /// The first file of the event; any others are ignored.
    pub fn into_first(self) -> Option<StagedFile> {
        match self {
            FileSource::Picker(files) | FileSource::Drop(files) => files.into_iter().next(),
        }
    }

    pub fn is_drop(&self) -> bool {
        matches!(self, FileSource::Drop(_))
    }
}

// ── Drag and drop ────────────────────────────────────────────────────────

/// Drop effect advertised to the drag source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
}

/// A `dragover` or `drop` event delivered to the drop target.
///
/// `default_prevented` mirrors the host's "navigate to the dropped file"
/// behaviour: the target must set it on both phases.
#[derive(Debug, Default)]
pub struct DragEvent {
    pub files: Vec<StagedFile>,
    pub default_prevented: bool,
    pub drop_effect: DropEffect,
}

impl DragEvent {
    pub fn new(files: Vec<StagedFile>) -> Self {
        Self {
            files,
            ..Self::default()
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// The drop target in front of the stager.
#[derive(Debug, Default, Clone, Copy)]
pub struct DropZone;

impl DropZone {
    /// Handle the `dragover` phase.
    pub fn on_drag_over(&self, event: &mut DragEvent) {
        event.prevent_default();
        event.drop_effect = DropEffect::Copy;
    }

    /// Handle the `drop` phase. Returns a [`FileSource::Drop`] when the event
    /// carried at least one file.
    pub fn on_drop(&self, event: &mut DragEvent) -> Option<FileSource> {
        event.prevent_default();
        event.drop_effect = DropEffect::Copy;
        let first = event.files.drain(..).next()?;
        Some(FileSource::Drop(vec![first]))
    }
}

/// Raw job-description text as typed by the user.
///
/// Stored verbatim; trimming happens only when a request is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobDescription(String);

impl JobDescription {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn raw(&self) -> &str {
        &self.0
    }

    /// The trimmed text, or `None` when blank.
    pub fn for_submission(&self) -> Option<&str> {
        let trimmed = self.0.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Staged input, before it becomes a request.
#[derive(Debug, Clone, Default)]
pub struct StagedInput {
    pub file: Option<StagedFile>,
    pub job_description: JobDescription,
}

impl StagedInput {
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(StagedFile::name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> StagedFile {
        StagedFile::from_bytes(name, b"resume".to_vec())
    }

    #[test]
    fn kind_from_extension() {
        assert_eq!(FileKind::from_name("cv.PDF"), FileKind::Pdf);
        assert_eq!(FileKind::from_name("cv.docx"), FileKind::Docx);
        assert_eq!(FileKind::from_name("notes.txt"), FileKind::Txt);
        assert_eq!(FileKind::from_name("photo.png"), FileKind::Other);
        assert_eq!(FileKind::from_name("README"), FileKind::Other);
    }

    #[test]
    fn other_kinds_are_staged_anyway() {
        let f = file("resume.odt");
        assert_eq!(f.kind(), FileKind::Other);
        assert!(!f.kind().is_accepted());
        assert_eq!(f.kind().mime(), "application/octet-stream");
    }

    #[test]
    fn first_file_wins() {
        let src = FileSource::Picker(vec![file("a.pdf"), file("b.pdf")]);
        assert_eq!(src.into_first().unwrap().name(), "a.pdf");
        assert!(FileSource::Drop(vec![]).into_first().is_none());
    }

    #[test]
    fn drag_over_prevents_default() {
        let mut ev = DragEvent::new(vec![file("a.pdf")]);
        DropZone.on_drag_over(&mut ev);
        assert!(ev.default_prevented);
        assert_eq!(ev.drop_effect, DropEffect::Copy);
        assert_eq!(ev.files.len(), 1);
    }

    #[test]
    fn drop_prevents_default_and_takes_first() {
        let mut ev = DragEvent::new(vec![file("a.pdf"), file("b.txt")]);
        let src = DropZone.on_drop(&mut ev).unwrap();
        assert!(ev.default_prevented);
        assert!(src.is_drop());
        assert_eq!(src.into_first().unwrap().name(), "a.pdf");
    }

    #[test]
    fn empty_drop_still_prevents_default() {
        let mut ev = DragEvent::new(vec![]);
        assert!(DropZone.on_drop(&mut ev).is_none());
        assert!(ev.default_prevented);
    }

    #[test]
    fn job_description_trimmed_only_for_submission() {
        let jd = JobDescription::new("  Rust engineer \n");
        assert_eq!(jd.raw(), "  Rust engineer \n");
        assert_eq!(jd.for_submission(), Some("Rust engineer"));
        assert_eq!(JobDescription::new(" \t\n").for_submission(), None);
        assert_eq!(JobDescription::default().for_submission(), None);
    }

    #[tokio::test]
    async fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        std::fs::write(&path, "Jane Doe\nRust").unwrap();

        let staged = StagedFile::from_path(&path).await.unwrap();
        assert_eq!(staged.name(), "resume.txt");
        assert_eq!(staged.content(), b"Jane Doe\nRust");
        assert_eq!(staged.kind(), FileKind::Txt);
    }

    #[tokio::test]
    async fn from_path_missing_file() {
        let err = StagedFile::from_path("/nonexistent/resume.pdf")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::FileRead { .. }));
    }
}
