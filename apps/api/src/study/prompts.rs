//! Prompt Builder: pure functions turning typed inputs into `CompletionRequest`s.
//!
//! Templates use `{name}` placeholders filled in a single pass, so caller text
//! is inserted verbatim and never re-expanded even if it contains braces.

use crate::gateway::CompletionRequest;
use crate::llm_client::prompts::{ESCAPE_ARTIFACT_RULE, JSON_ONLY_SYSTEM, NO_FABRICATION_RULE};
use crate::models::question::{CorrectOption, Subject};
use crate::models::roadmap::RoadmapPolicy;
use crate::schemas::SchemaName;

pub const NOTICE_EXTRACT_SYSTEM: &str = "Você é um especialista em editais de concursos públicos \
    brasileiros. Extraia informações estruturadas de editais com fidelidade ao texto original.";

pub const NOTICE_EXTRACT_TEMPLATE: &str = r#"Leia o edital abaixo e extraia:
- o título do edital (NoticeTitle);
- uma breve descrição do edital (NoticeDescription);
- a identificação do edital, como número e órgão (Notice);
- a lista de vagas (JobRoles), cada uma com nome e breve descrição, na mesma ordem em que aparecem no edital.

{escape_rule}

EDITAL:
{notice_text}"#;

pub const NOTICE_SEARCH_SYSTEM: &str = "Você é um pesquisador de editais de concursos públicos \
    brasileiros. Retorne apenas editais reais e verificáveis.";

pub const NOTICE_SEARCH_TEMPLATE: &str = r#"Encontre o edital de concurso público mais relevante para a busca:
"{query}"

Retorne no máximo UM edital em Notices: o que melhor corresponde à busca. Preencha Link com a URL oficial onde o edital foi publicado.

{no_fabrication_rule}
Não retorne vários editais genéricos ou de exemplo.
Se nenhum edital real corresponder à busca, retorne Notices como uma lista vazia, indicando que nenhum resultado foi encontrado."#;

pub const ROADMAP_SYSTEM: &str = "Você é um especialista em preparação para concursos públicos. \
    Monte planos de estudo objetivos, fiéis ao conteúdo programático do edital.";

pub const ROADMAP_TEMPLATE: &str = r#"Gere um roadmap de estudos para a vaga "{job_role}".

O roadmap deve ter {module_bounds}, e cada módulo deve ter {lesson_bounds}.

REGRAS:
1. Use SOMENTE conteúdos técnicos presentes no TRECHO DO CONTEÚDO PROGRAMÁTICO abaixo.
2. Não introduza tópicos que não aparecem no trecho.
3. {ordering_rule}
4. Todo módulo e toda lição devem ter Title e Description preenchidos.
5. {sparse_fallback_rule}

{escape_rule}

TRECHO DO CONTEÚDO PROGRAMÁTICO:
{excerpt}

EDITAL COMPLETO (apenas para contexto):
{notice_text}"#;

/// Module and lesson ordering rule.
pub const STRICT_ORDERING_RULE: &str = "Numere Order dos módulos e das lições de cada módulo \
    de forma estritamente crescente, começando em 1, sem repetir nem pular números.";

/// What to do when the excerpt has too little technical content.
pub const SPARSE_CONTENT_FALLBACK: &str = "Se o trecho tiver pouco conteúdo técnico, em vez de \
    retornar um roadmap vazio ou incompleto, use os tópicos mais cobrados em concursos para essa vaga.";

pub const QUESTIONS_SYSTEM: &str = "Você é um elaborador de questões de concursos públicos. \
    Crie questões de múltipla escolha claras, com uma única alternativa correta.";

pub const QUESTIONS_TEMPLATE: &str = r#"Gere exatamente {quantity} questões de múltipla escolha sobre o tema "{title}".

Cada questão deve ter 4 alternativas ({options}), exatamente uma correta indicada em CorrectOption.
Use "{origin}" como Origin de todas as questões.
Numere Order de 1 a {quantity}, em ordem crescente.

DESCRIÇÃO DO TEMA:
{description}"#;

/// Fills `{key}` placeholders in one pass over the template.
///
/// Unknown placeholders are left as-is; replacement values are never scanned.
pub fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 1..];
        let hit = vars.iter().find(|(key, _)| {
            tail.starts_with(key) && tail[key.len()..].starts_with('}')
        });
        match hit {
            Some((key, value)) => {
                out.push_str(value);
                rest = &tail[key.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }

    out.push_str(rest);
    out
}

fn with_json_rules(system: &str) -> String {
    format!("{system} {JSON_ONLY_SYSTEM}")
}

fn bounds_phrase(min: usize, max: usize, singular: &str, plural: &str) -> String {
    let noun = |n: usize| if n == 1 { singular } else { plural };
    if min == max {
        format!("exatamente {min} {}", noun(min))
    } else {
        format!("entre {min} e {max} {plural}")
    }
}

/// Extracts title, description and job roles from raw edital text.
pub fn build_extract_notice_prompt(notice_text: &str) -> CompletionRequest {
    CompletionRequest {
        user_prompt: fill_template(
            NOTICE_EXTRACT_TEMPLATE,
            &[
                ("escape_rule", ESCAPE_ARTIFACT_RULE),
                ("notice_text", notice_text),
            ],
        ),
        system_instruction: with_json_rules(NOTICE_EXTRACT_SYSTEM),
        schema_name: SchemaName::ExamData.as_str().to_string(),
    }
}

/// Finds the single edital best matching a free-text query.
pub fn build_search_notice_prompt(query: &str) -> CompletionRequest {
    CompletionRequest {
        user_prompt: fill_template(
            NOTICE_SEARCH_TEMPLATE,
            &[("query", query), ("no_fabrication_rule", NO_FABRICATION_RULE)],
        ),
        system_instruction: with_json_rules(NOTICE_SEARCH_SYSTEM),
        schema_name: SchemaName::SearchNotice.as_str().to_string(),
    }
}

/// Builds a study roadmap for `job_role`, grounded on the syllabus `excerpt`.
pub fn build_roadmap_prompt(
    job_role: &str,
    notice_text: &str,
    excerpt: &str,
    policy: &RoadmapPolicy,
) -> CompletionRequest {
    let module_bounds = bounds_phrase(policy.min_modules, policy.max_modules, "módulo", "módulos");
    let lesson_bounds = bounds_phrase(policy.min_lessons, policy.max_lessons, "lição", "lições");

    CompletionRequest {
        user_prompt: fill_template(
            ROADMAP_TEMPLATE,
            &[
                ("job_role", job_role),
                ("module_bounds", &module_bounds),
                ("lesson_bounds", &lesson_bounds),
                ("ordering_rule", STRICT_ORDERING_RULE),
                ("sparse_fallback_rule", SPARSE_CONTENT_FALLBACK),
                ("escape_rule", ESCAPE_ARTIFACT_RULE),
                ("excerpt", excerpt),
                ("notice_text", notice_text),
            ],
        ),
        system_instruction: with_json_rules(ROADMAP_SYSTEM),
        schema_name: SchemaName::RoadmapData.as_str().to_string(),
    }
}

/// Builds `quantity` four-option questions about `subject`.
pub fn build_questions_prompt(subject: &Subject, quantity: usize) -> CompletionRequest {
    let quantity = quantity.to_string();
    let options = CorrectOption::ALL
        .iter()
        .map(|o| o.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    CompletionRequest {
        user_prompt: fill_template(
            QUESTIONS_TEMPLATE,
            &[
                ("quantity", &quantity),
                ("title", &subject.title),
                ("options", &options),
                ("origin", subject.assessment_type.as_str()),
                ("description", &subject.description),
            ],
        ),
        system_instruction: with_json_rules(QUESTIONS_SYSTEM),
        schema_name: SchemaName::Questions.as_str().to_string(),
    }
}
