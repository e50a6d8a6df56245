use serde_json::{json, Value};

use super::SchemaName;
use crate::models::question::{CorrectOption, Origin};

pub(super) fn schema_for(name: SchemaName) -> Value {
    match name {
        SchemaName::ExamData => exam_data(),
        SchemaName::RoadmapData => roadmap_data(),
        SchemaName::Questions => questions(),
        SchemaName::SearchNotice => search_notice(),
    }
}

fn job_role() -> Value {
    json!({
        "type": "object",
        "properties": {
            "Name": {"type": "string", "description": "Nome da vaga"},
            "Description": {"type": "string", "description": "Breve descrição da vaga"}
        },
        "required": ["Name", "Description"],
        "additionalProperties": false
    })
}

fn exam_data() -> Value {
    json!({
        "type": "object",
        "properties": {
            "Notice": {"type": "string", "description": "Texto completo do edital"},
            "NoticeTitle": {"type": "string", "description": "Título do edital"},
            "NoticeDescription": {"type": "string", "description": "Descrição breve do edital"},
            "JobRoles": {"type": "array", "items": job_role()}
        },
        "required": ["Notice", "NoticeTitle", "NoticeDescription", "JobRoles"],
        "additionalProperties": false
    })
}

fn search_notice() -> Value {
    json!({
        "type": "object",
        "properties": {
            "Notices": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "Notice": {"type": "string", "description": "Texto completo do edital"},
                        "NoticeTitle": {"type": "string", "description": "Título do edital"},
                        "NoticeDescription": {"type": "string", "description": "Descrição breve do edital"},
                        "Link": {
                            "type": "string",
                            "description": "URL oficial verificável onde o edital foi publicado"
                        },
                        "JobRoles": {"type": "array", "items": job_role()}
                    },
                    "required": ["Notice", "NoticeTitle", "NoticeDescription", "Link", "JobRoles"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["Notices"],
        "additionalProperties": false
    })
}

fn roadmap_data() -> Value {
    let lesson = json!({
        "type": "object",
        "properties": {
            "Title": {"type": "string", "description": "Título da lição"},
            "Description": {"type": "string", "description": "Conteúdo da lição"},
            "Order": {"type": "integer", "description": "Ordem da lição"}
        },
        "required": ["Title", "Description", "Order"],
        "additionalProperties": false
    });

    json!({
        "type": "object",
        "properties": {
            "Title": {"type": "string", "description": "Título do roadmap"},
            "Description": {"type": "string", "description": "Descrição do roadmap"},
            "Modules": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "Title": {"type": "string", "description": "Título do módulo"},
                        "Description": {"type": "string", "description": "Descrição do módulo"},
                        "Order": {"type": "integer", "description": "Ordem do módulo"},
                        "Lessons": {"type": "array", "items": lesson}
                    },
                    "required": ["Title", "Description", "Order", "Lessons"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["Title", "Description", "Modules"],
        "additionalProperties": false
    })
}

fn questions() -> Value {
    let correct: Vec<&str> = CorrectOption::ALL.iter().map(|o| o.as_str()).collect();
    let origins: Vec<&str> = Origin::ALL.iter().map(|o| o.as_str()).collect();

    json!({
        "type": "object",
        "properties": {
            "Questions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "Question": {"type": "string", "description": "Texto da questão"},
                        "OptionA": {"type": "string", "description": "Alternativa A"},
                        "OptionB": {"type": "string", "description": "Alternativa B"},
                        "OptionC": {"type": "string", "description": "Alternativa C"},
                        "OptionD": {"type": "string", "description": "Alternativa D"},
                        "CorrectOption": {
                            "type": "string",
                            "enum": correct,
                            "description": "Alternativa correta"
                        },
                        "Order": {"type": "integer", "description": "Ordem da questão"},
                        "Origin": {
                            "type": "string",
                            "enum": origins,
                            "description": "Origem da questão"
                        }
                    },
                    "required": [
                        "Question", "OptionA", "OptionB", "OptionC", "OptionD",
                        "CorrectOption", "Order", "Origin"
                    ],
                    "additionalProperties": false
                }
            }
        },
        "required": ["Questions"],
        "additionalProperties": false
    })
}
