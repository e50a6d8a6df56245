//! Study roadmap generation for one job role of an edital.

use tracing::info;

use crate::gateway::{CompletionError, CompletionGateway};
use crate::models::roadmap::{Roadmap, RoadmapPolicy};
use crate::preprocess::{clean_text, extract_section};
use crate::study::prompts::build_roadmap_prompt;

/// Builds a roadmap for `job_role` from the syllabus section of `notice_text`.
///
/// Falls back to the whole cleaned notice when no syllabus header is found.
pub async fn extract_roadmap(
    gateway: &CompletionGateway,
    policy: &RoadmapPolicy,
    job_role: &str,
    notice_text: &str,
) -> Result<Roadmap, CompletionError> {
    let cleaned = clean_text(notice_text);
    let excerpt = match extract_section(&cleaned) {
        Some(section) if !section.is_empty() => {
            info!("Syllabus section found ({} chars)", section.len());
            section
        }
        _ => {
            info!("No syllabus section found, using the full notice text");
            cleaned.clone()
        }
    };

    let request = build_roadmap_prompt(job_role, &cleaned, &excerpt, policy);
    let roadmap: Roadmap = gateway.complete_as(&request).await?;
    let roadmap = roadmap.finalize(policy)?;

    info!(
        "Roadmap '{}' for '{}' with {} modules",
        roadmap.title,
        job_role,
        roadmap.modules.len()
    );
    Ok(roadmap)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::gateway::tests::{gateway_with, StubService};
    use crate::models::InvalidOutput;

    fn module(title: &str, order: u32, lessons: u32) -> serde_json::Value {
        let lessons: Vec<_> = (1..=lessons)
            .map(|i| json!({"Title": format!("{title} - lição {i}"), "Description": "Estudo", "Order": i}))
            .collect();
        json!({"Title": title, "Description": "Módulo", "Order": order, "Lessons": lessons})
    }

    fn reply(modules: Vec<serde_json::Value>) -> String {
        json!({"Title": "Roadmap", "Description": "Plano", "Modules": modules}).to_string()
    }

    #[tokio::test]
    async fn test_roadmap_prompt_uses_syllabus_excerpt() {
        let stub = StubService::replying(reply(vec![
            module("Português", 1, 3),
            module("Informática", 2, 3),
            module("Direito", 3, 3),
        ]));
        let gateway = gateway_with(stub.clone());
        let notice = "EDITAL\n\n  CONHECIMENTOS BÁSICOS\n\tLíngua Portuguesa";

        let roadmap = extract_roadmap(&gateway, &RoadmapPolicy::default(), "Técnico", notice)
            .await
            .unwrap();

        assert_eq!(roadmap.modules.len(), 3);
        let prompt = stub.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("TRECHO DO CONTEÚDO PROGRAMÁTICO:\nLíngua Portuguesa"));
    }

    #[tokio::test]
    async fn test_roadmap_orders_strictly_increasing() {
        let stub = StubService::replying(reply(vec![
            module("C", 30, 4),
            module("A", 10, 3),
            module("Vazio", 15, 0),
            module("B", 20, 5),
        ]));

        let roadmap = extract_roadmap(
            &gateway_with(stub),
            &RoadmapPolicy::default(),
            "Analista",
            "texto sem seção",
        )
        .await
        .unwrap();

        let titles: Vec<_> = roadmap.modules.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        for (i, module) in roadmap.modules.iter().enumerate() {
            assert_eq!(module.order, i as u32 + 1);
            assert!(!module.lessons.is_empty());
            for (j, lesson) in module.lessons.iter().enumerate() {
                assert_eq!(lesson.order, j as u32 + 1);
            }
        }
    }

    #[tokio::test]
    async fn test_roadmap_outside_policy_is_invalid() {
        let stub = StubService::replying(reply(vec![module("Único", 1, 3)]));

        let err = extract_roadmap(&gateway_with(stub), &RoadmapPolicy::default(), "Analista", "x")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CompletionError::Invalid(InvalidOutput::ModuleCount { count: 1, .. })
        ));
    }
}
