use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{require_text, InvalidOutput};

/// A job role ("vaga") offered by an edital.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobRole {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Metadata extracted from (or found for) a single edital.
///
/// `JobRoles` keep the order in which the document lists them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExamData {
    #[serde(default)]
    pub notice: String,
    #[serde(default)]
    pub notice_title: String,
    #[serde(default)]
    pub notice_description: String,
    #[serde(default)]
    pub job_roles: Vec<JobRole>,
    /// Source URL, only present on search results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ExamData {
    /// Requires a title and drops job roles that came back without a name.
    pub fn finalize(mut self) -> Result<Self, InvalidOutput> {
        require_text(&self.notice_title, "NoticeTitle")?;

        let before = self.job_roles.len();
        self.job_roles.retain(|role| !role.name.trim().is_empty());
        if self.job_roles.len() < before {
            warn!(
                "Dropped {} unnamed job roles from '{}'",
                before - self.job_roles.len(),
                self.notice_title
            );
        }

        Ok(self)
    }
}

/// Result shape of the notice search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NoticeSearch {
    #[serde(default)]
    pub notices: Vec<ExamData>,
}

impl NoticeSearch {
    /// Keeps only the most relevant notice (the first one returned).
    ///
    /// Returns `None` when the model reported no match.
    pub fn into_best(self) -> Result<Option<Self>, InvalidOutput> {
        let total = self.notices.len();
        let Some(best) = self.notices.into_iter().next() else {
            return Ok(None);
        };
        if total > 1 {
            warn!("Notice search returned {total} notices, keeping the first");
        }
        Ok(Some(NoticeSearch {
            notices: vec![best.finalize()?],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exam_data_deserializes_pascal_case() {
        let data: ExamData = serde_json::from_value(json!({
            "Notice": "Edital 01/2024",
            "NoticeTitle": "Concurso TRT",
            "NoticeDescription": "Analistas e técnicos",
            "JobRoles": [
                {"Name": "Técnico", "Description": "Nível médio"},
                {"Name": "Analista", "Description": "Nível superior"}
            ]
        }))
        .unwrap();

        assert_eq!(data.notice_title, "Concurso TRT");
        assert_eq!(data.job_roles[0].name, "Técnico");
        assert_eq!(data.job_roles[1].name, "Analista");
        assert_eq!(data.link, None);
    }

    #[test]
    fn test_exam_data_missing_fields_default_after_normalization() {
        let data: ExamData =
            serde_json::from_value(json!({"NoticeTitle": "Concurso"})).unwrap();
        assert!(data.notice.is_empty());
        assert!(data.job_roles.is_empty());
    }

    #[test]
    fn test_exam_data_serializes_without_empty_link() {
        let data = ExamData {
            notice_title: "Concurso".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&data).unwrap();
        assert!(value.get("Link").is_none());
        assert_eq!(value["NoticeTitle"], "Concurso");
        assert_eq!(value["JobRoles"], json!([]));
    }

    #[test]
    fn test_finalize_requires_title() {
        let err = ExamData::default().finalize().unwrap_err();
        assert_eq!(err, InvalidOutput::Empty("NoticeTitle".to_string()));
    }

    #[test]
    fn test_finalize_drops_unnamed_roles_keeping_order() {
        let data = ExamData {
            notice_title: "Concurso".to_string(),
            job_roles: vec![
                JobRole { name: "B".into(), description: String::new() },
                JobRole { name: " ".into(), description: "sem nome".into() },
                JobRole { name: "A".into(), description: String::new() },
            ],
            ..Default::default()
        };
        let names: Vec<_> = data
            .finalize()
            .unwrap()
            .job_roles
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_search_keeps_single_best_notice() {
        let search: NoticeSearch = serde_json::from_value(json!({
            "Notices": [
                {"NoticeTitle": "Primeiro", "Link": "https://exemplo.gov.br/edital.pdf"},
                {"NoticeTitle": "Segundo"}
            ]
        }))
        .unwrap();

        let best = search.into_best().unwrap().unwrap();
        assert_eq!(best.notices.len(), 1);
        assert_eq!(best.notices[0].notice_title, "Primeiro");
        assert_eq!(
            best.notices[0].link.as_deref(),
            Some("https://exemplo.gov.br/edital.pdf")
        );
    }

    #[test]
    fn test_search_without_notices_is_no_result() {
        // normalization turns {"Notices": []} into {}
        let search: NoticeSearch = serde_json::from_value(json!({})).unwrap();
        assert_eq!(search.into_best().unwrap(), None);
    }
}
