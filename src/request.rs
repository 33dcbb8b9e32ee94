//! The multipart request sent to `/api/analyze`.

use crate::error::AnalyzeError;
use crate::input::{JobDescription, StagedFile};
use reqwest::multipart::{Form, Part};

/// Multipart field carrying the resume bytes.
pub const FILE_FIELD: &str = "file";

/// Multipart field carrying the trimmed job description.
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// One analysis request: a resume and an optional job description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub file: StagedFile,
    /// Trimmed, never blank.
    pub job_description: Option<String>,
}

impl AnalysisRequest {
    /// Build a request from staged input. Blank job descriptions are dropped.
    pub fn new(file: StagedFile, job_description: &JobDescription) -> Self {
        Self {
            file,
            job_description: job_description.for_submission().map(str::to_string),
        }
    }

    /// Names of the multipart fields this request will send, in order.
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut fields = vec![FILE_FIELD];
        if self.job_description.is_some() {
            fields.push(JOB_DESCRIPTION_FIELD);
        }
        fields
    }

    /// Encode as a multipart form.
    pub fn to_form(&self) -> Result<Form, AnalyzeError> {
        let part = Part::bytes(self.file.content().to_vec())
            .file_name(self.file.name().to_string())
            .mime_str(self.file.kind().mime())
            .map_err(AnalyzeError::transport)?;

        let mut form = Form::new().part(FILE_FIELD, part);
        if let Some(jd) = &self.job_description {
            form = form.text(JOB_DESCRIPTION_FIELD, jd.clone());
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged() -> StagedFile {
        StagedFile::from_bytes("cv.txt", b"Jane".to_vec())
    }

    #[test]
    fn blank_job_description_is_omitted() {
        for blank in ["", "   ", "\n\t "] {
            let req = AnalysisRequest::new(staged(), &JobDescription::new(blank));
            assert_eq!(req.job_description, None);
            assert_eq!(req.field_names(), vec!["file"]);
        }
    }

    #[test]
    fn job_description_is_trimmed() {
        let req = AnalysisRequest::new(staged(), &JobDescription::new("\n Senior Rust dev  "));
        assert_eq!(req.job_description.as_deref(), Some("Senior Rust dev"));
        assert_eq!(req.field_names(), vec!["file", "job_description"]);
    }

    #[test]
    fn form_builds_for_every_kind() {
        for name in ["a.pdf", "a.docx", "a.txt", "a.bin"] {
            let req = AnalysisRequest::new(
                StagedFile::from_bytes(name, vec![1, 2, 3]),
                &JobDescription::default(),
            );
            assert!(req.to_form().is_ok(), "{name}");
        }
    }
}
