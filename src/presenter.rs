//! Display derivations over an [`AnalysisResult`].
//!
//! Everything here is pure: the same result always yields the same band,
//! label, placeholder, and counts, whatever renders them.

use crate::result::AnalysisResult;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

pub const NO_ISSUES: &str = "No major issues detected";
pub const NO_SUGGESTIONS: &str = "Looks good! Consider tailoring to each application.";
pub const NO_KEYWORDS_FOUND: &str = "None detected";
pub const NO_KEYWORDS_MISSING: &str = "None";

/// Colour band for the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    /// 80 and above.
    Strong,
    /// 60–79.
    Moderate,
    /// Below 60.
    Weak,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        if score >= 80 {
            ScoreBand::Strong
        } else if score >= 60 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Strong => "strong",
            ScoreBand::Moderate => "moderate",
            ScoreBand::Weak => "weak",
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readability label shown with the simple result shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Readability {
    Good,
    Fair,
    NeedsWork,
}

impl Readability {
    pub fn for_score(score: u32) -> Self {
        if score >= 70 {
            Readability::Good
        } else if score >= 50 {
            Readability::Fair
        } else {
            Readability::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Readability::Good => "Good",
            Readability::Fair => "Fair",
            Readability::NeedsWork => "Needs work",
        }
    }
}

/// A job keyword and whether the resume contains it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub matched: bool,
}

/// Borrowed view over a result with every derived display value.
#[derive(Debug, Clone, Copy)]
pub struct ResultView<'a> {
    result: &'a AnalysisResult,
}

impl<'a> ResultView<'a> {
    pub fn new(result: &'a AnalysisResult) -> Self {
        Self { result }
    }

    pub fn result(&self) -> &'a AnalysisResult {
        self.result
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::for_score(self.result.score)
    }

    pub fn readability(&self) -> Readability {
        Readability::for_score(self.result.score)
    }

    /// Issues, or the single placeholder line when there are none.
    pub fn issue_lines(&self) -> Vec<&'a str> {
        lines_or(&self.result.issues, NO_ISSUES)
    }

    pub fn suggestion_lines(&self) -> Vec<&'a str> {
        lines_or(&self.result.suggestions, NO_SUGGESTIONS)
    }

    pub fn keywords_found_lines(&self) -> Vec<&'a str> {
        lines_or(&self.result.keywords_found, NO_KEYWORDS_FOUND)
    }

    pub fn keywords_missing_lines(&self) -> Vec<&'a str> {
        lines_or(&self.result.keywords_missing, NO_KEYWORDS_MISSING)
    }

    /// Number of sections the service found (extended shape).
    pub fn sections_found_count(&self) -> usize {
        self.result
            .details
            .as_ref()
            .map(|d| d.sections_found.values().filter(|found| **found).count())
            .unwrap_or(0)
    }

    /// `(signal, present)` pairs for contact details, in name order.
    pub fn contact_signals(&self) -> Vec<(&'a str, bool)> {
        self.result
            .details
            .as_ref()
            .map(|d| d.contact.iter().map(|(k, v)| (k.as_str(), *v)).collect())
            .unwrap_or_default()
    }

    /// `"name: v/20"` rows for the score breakdown.
    pub fn breakdown_rows(&self) -> Vec<String> {
        self.result
            .breakdown
            .iter()
            .flatten()
            .map(|(name, v)| format!("{name}: {v}/{}", crate::result::MAX_SUBSCORE))
            .collect()
    }

    /// Per-keyword match flags. `None` when no job description was analysed.
    pub fn job_keyword_coverage(&self) -> Option<Vec<KeywordHit>> {
        let details = self.result.details.as_ref()?;
        let keywords = details.job_keywords.as_ref()?;
        let matched: HashSet<&str> = details
            .job_keywords_matched
            .iter()
            .flatten()
            .map(String::as_str)
            .collect();
        Some(
            keywords
                .iter()
                .map(|k| KeywordHit {
                    keyword: k.clone(),
                    matched: matched.contains(k.as_str()),
                })
                .collect(),
        )
    }

    /// Fraction of job keywords present in the resume, 0.0–1.0.
    ///
    /// Uses the extended `job_keywords` when present, else the simple
    /// found/missing lists. `None` when there is nothing to compare.
    pub fn keyword_coverage(&self) -> Option<f64> {
        if let Some(hits) = self.job_keyword_coverage() {
            if hits.is_empty() {
                return None;
            }
            let matched = hits.iter().filter(|h| h.matched).count();
            return Some(matched as f64 / hits.len() as f64);
        }
        let found = self.result.keywords_found.len();
        let total = found + self.result.keywords_missing.len();
        (total > 0).then(|| found as f64 / total as f64)
    }
}

fn lines_or<'a>(items: &'a [String], placeholder: &'static str) -> Vec<&'a str> {
    if items.is_empty() {
        vec![placeholder]
    } else {
        items.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::AnalysisDetails;
    use std::collections::BTreeMap;

    fn result(score: u32) -> AnalysisResult {
        AnalysisResult {
            score,
            summary: String::new(),
            issues: vec![],
            suggestions: vec![],
            keywords_found: vec![],
            keywords_missing: vec![],
            word_count: 0,
            estimated_pages: 0.0,
            breakdown: None,
            details: None,
            filetype: None,
        }
    }

    #[test]
    fn score_band_boundaries() {
        assert_eq!(ScoreBand::for_score(100), ScoreBand::Strong);
        assert_eq!(ScoreBand::for_score(80), ScoreBand::Strong);
        assert_eq!(ScoreBand::for_score(79), ScoreBand::Moderate);
        assert_eq!(ScoreBand::for_score(60), ScoreBand::Moderate);
        assert_eq!(ScoreBand::for_score(59), ScoreBand::Weak);
        assert_eq!(ScoreBand::for_score(0), ScoreBand::Weak);
        assert_eq!(ScoreBand::Strong.to_string(), "strong");
    }

    #[test]
    fn readability_boundaries() {
        assert_eq!(Readability::for_score(70).label(), "Good");
        assert_eq!(Readability::for_score(69).label(), "Fair");
        assert_eq!(Readability::for_score(50).label(), "Fair");
        assert_eq!(Readability::for_score(49).label(), "Needs work");
    }

    #[test]
    fn empty_lists_use_placeholders() {
        let r = result(50);
        let view = ResultView::new(&r);
        assert_eq!(view.issue_lines(), vec![NO_ISSUES]);
        assert_eq!(view.suggestion_lines(), vec![NO_SUGGESTIONS]);
        assert_eq!(view.keywords_found_lines(), vec![NO_KEYWORDS_FOUND]);
        assert_eq!(view.keywords_missing_lines(), vec![NO_KEYWORDS_MISSING]);
    }

    #[test]
    fn non_empty_lists_keep_order() {
        let mut r = result(50);
        r.issues = vec!["No email".into(), "Too long".into()];
        assert_eq!(ResultView::new(&r).issue_lines(), vec!["No email", "Too long"]);
    }

    #[test]
    fn counts_true_sections_only() {
        let mut r = result(50);
        let mut sections = BTreeMap::new();
        sections.insert("experience".to_string(), true);
        sections.insert("education".to_string(), false);
        sections.insert("skills".to_string(), true);
        r.details = Some(AnalysisDetails {
            sections_found: sections,
            ..AnalysisDetails::default()
        });
        assert_eq!(ResultView::new(&r).sections_found_count(), 2);
        assert_eq!(ResultView::new(&result(50)).sections_found_count(), 0);
    }

    #[test]
    fn job_keyword_coverage_marks_matches() {
        let mut r = result(50);
        r.details = Some(AnalysisDetails {
            job_keywords: Some(vec!["rust".into(), "tokio".into(), "sql".into()]),
            job_keywords_matched: Some(vec!["rust".into(), "sql".into()]),
            ..AnalysisDetails::default()
        });
        let view = ResultView::new(&r);
        let hits = view.job_keyword_coverage().unwrap();
        assert_eq!(
            hits.iter().map(|h| h.matched).collect::<Vec<_>>(),
            vec![true, false, true]
        );
        let coverage = view.keyword_coverage().unwrap();
        assert!((coverage - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn coverage_absent_without_job_keywords() {
        let mut r = result(50);
        r.details = Some(AnalysisDetails {
            job_keywords_matched: Some(vec!["rust".into()]),
            ..AnalysisDetails::default()
        });
        assert!(ResultView::new(&r).job_keyword_coverage().is_none());
        assert!(ResultView::new(&r).keyword_coverage().is_none());
    }

    #[test]
    fn simple_shape_coverage() {
        let mut r = result(50);
        r.keywords_found = vec!["python".into()];
        r.keywords_missing = vec!["go".into(), "k8s".into(), "aws".into()];
        assert_eq!(ResultView::new(&r).keyword_coverage(), Some(0.25));
    }

    #[test]
    fn breakdown_rows_out_of_twenty() {
        let mut r = result(50);
        let mut breakdown = BTreeMap::new();
        breakdown.insert("contact".to_string(), 20);
        breakdown.insert("structure".to_string(), 15);
        r.breakdown = Some(breakdown);
        assert_eq!(
            ResultView::new(&r).breakdown_rows(),
            vec!["contact: 20/20", "structure: 15/20"]
        );
    }
}
