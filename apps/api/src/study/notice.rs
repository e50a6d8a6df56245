//! Edital metadata: extraction from document text and free-text search.

use tracing::info;

use crate::gateway::{CompletionError, CompletionGateway};
use crate::models::exam::{ExamData, NoticeSearch};
use crate::models::InvalidOutput;
use crate::study::prompts::{build_extract_notice_prompt, build_search_notice_prompt};

/// Extracts title, description and job roles from an edital's text.
pub async fn extract_notice(
    gateway: &CompletionGateway,
    notice_text: &str,
) -> Result<ExamData, CompletionError> {
    let request = build_extract_notice_prompt(notice_text);
    let data: ExamData = gateway.complete_as(&request).await?;
    let data = data.finalize()?;
    info!(
        "Extracted notice '{}' with {} job roles",
        data.notice_title,
        data.job_roles.len()
    );
    Ok(data)
}

/// Looks up the single edital that best matches `query`.
///
/// A model answer with no notices is reported as "no result found".
pub async fn search_notice(
    gateway: &CompletionGateway,
    query: &str,
) -> Result<NoticeSearch, CompletionError> {
    let request = build_search_notice_prompt(query);
    let search: NoticeSearch = gateway.complete_as(&request).await?;
    match search.into_best()? {
        Some(found) => Ok(found),
        None => {
            info!("No notice found for query '{query}'");
            Err(InvalidOutput::NoResult(query.to_string()).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::tests::{gateway_with, StubService};

    #[tokio::test]
    async fn test_extract_notice_returns_typed_data() {
        let stub = StubService::replying(
            r#"{
                "Notice": "Edital nº 1/2024 - TRF3",
                "NoticeTitle": "Concurso TRF 3ª Região",
                "NoticeDescription": "Provimento de cargos de analista e técnico",
                "JobRoles": [
                    {"Name": "Analista Judiciário", "Description": "Área judiciária"},
                    {"Name": "", "Description": "sem nome"},
                    {"Name": "Técnico Judiciário", "Description": "Área administrativa"}
                ]
            }"#,
        );
        let gateway = gateway_with(stub.clone());

        let data = extract_notice(&gateway, "texto do edital").await.unwrap();

        assert_eq!(data.notice_title, "Concurso TRF 3ª Região");
        let names: Vec<_> = data.job_roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Analista Judiciário", "Técnico Judiciário"]);
        assert!(stub
            .last_prompt
            .lock()
            .unwrap()
            .as_deref()
            .unwrap()
            .contains("texto do edital"));
    }

    #[tokio::test]
    async fn test_search_notice_no_result() {
        let stub = StubService::replying(r#"{"Notices": []}"#);
        let err = search_notice(&gateway_with(stub), "concurso inexistente")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CompletionError::Invalid(InvalidOutput::NoResult(ref q)) if q == "concurso inexistente"
        ));
        assert!(err.to_string().contains("no result found"), "{err}");
    }

    #[tokio::test]
    async fn test_search_notice_keeps_first_match() {
        let stub = StubService::replying(
            r#"{"Notices": [
                {"Notice": "Edital 1", "NoticeTitle": "PF 2024", "NoticeDescription": "Agente",
                 "Link": "https://www.gov.br/pf/edital.pdf", "JobRoles": []},
                {"Notice": "Edital 2", "NoticeTitle": "PRF 2024", "NoticeDescription": "Policial",
                 "Link": "", "JobRoles": []}
            ]}"#,
        );
        let found = search_notice(&gateway_with(stub), "polícia federal")
            .await
            .unwrap();
        assert_eq!(found.notices.len(), 1);
        assert_eq!(found.notices[0].notice_title, "PF 2024");
    }
}
