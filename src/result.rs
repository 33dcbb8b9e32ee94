//! The analysis result returned by the service.
//!
//! [`AnalysisResult`] is a superset of the two result shapes the service is
//! known to produce:
//!
//! * the **simple** shape: `summary`, `issues`, `keywords_found`,
//!   `keywords_missing`, `word_count`, `estimated_pages`;
//! * the **extended** shape: `breakdown`, `details`, `filetype`.
//!
//! Fields absent from a given shape take empty defaults. Only `score` is
//! required. After deserialisation, [`AnalysisResult::validate`] checks the
//! numeric ranges so a well-formed but wrong body is rejected at the response
//! boundary instead of leaking into the presenter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Upper bound of the overall score.
pub const MAX_SCORE: u32 = 100;

/// Upper bound of each breakdown sub-score.
pub const MAX_SUBSCORE: u32 = 20;

/// A completed resume analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall ATS score, 0–100.
    pub score: u32,

    #[serde(default)]
    pub summary: String,

    /// Findings, in the order the service reported them.
    #[serde(default)]
    pub issues: Vec<String>,

    /// Recommendations, in the order the service reported them.
    #[serde(default)]
    pub suggestions: Vec<String>,

    /// Job-description keywords present in the resume.
    #[serde(default)]
    pub keywords_found: Vec<String>,

    /// Job-description keywords absent from the resume.
    #[serde(default)]
    pub keywords_missing: Vec<String>,

    #[serde(default)]
    pub word_count: u64,

    #[serde(default)]
    pub estimated_pages: f64,

    /// Named sub-scores, each 0–20 (extended shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<BTreeMap<String, u32>>,

    /// Structural details (extended shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<AnalysisDetails>,

    /// Detected file type label, e.g. "pdf" (extended shape).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filetype: Option<String>,
}

/// Structural details of the extended result shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDetails {
    #[serde(default)]
    pub word_count: u64,

    /// Number of bullet points found.
    #[serde(default)]
    pub bullets: u64,

    /// Section name → whether it was found.
    #[serde(default)]
    pub sections_found: BTreeMap<String, bool>,

    /// Contact signal (email, phone, linkedin, …) → whether it was found.
    #[serde(default)]
    pub contact: BTreeMap<String, bool>,

    /// Keywords extracted from the job description, when one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_keywords: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_keywords_matched: Option<Vec<String>>,
}

impl AnalysisResult {
    /// Parse and validate a response body.
    pub fn from_json(body: &[u8]) -> Result<Self, String> {
        let result: AnalysisResult =
            serde_json::from_slice(body).map_err(|e| format!("malformed JSON: {e}"))?;
        result.validate()?;
        Ok(result)
    }

    /// Check numeric ranges the presenter relies on.
    pub fn validate(&self) -> Result<(), String> {
        if self.score > MAX_SCORE {
            return Err(format!("score {} is outside 0-{MAX_SCORE}", self.score));
        }
        if !self.estimated_pages.is_finite() || self.estimated_pages < 0.0 {
            return Err(format!(
                "estimated_pages must be a non-negative number, got {}",
                self.estimated_pages
            ));
        }
        if let Some(breakdown) = &self.breakdown {
            if let Some((name, v)) = breakdown.iter().find(|(_, v)| **v > MAX_SUBSCORE) {
                return Err(format!(
                    "breakdown '{name}' is {v}, outside 0-{MAX_SUBSCORE}"
                ));
            }
        }
        Ok(())
    }

    /// True when the service compared the resume against a job description.
    pub fn has_job_keywords(&self) -> bool {
        self.details
            .as_ref()
            .is_some_and(|d| d.job_keywords.is_some())
    }
}
