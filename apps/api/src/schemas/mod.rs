//! Schema Registry: the JSON Schemas sent to the completion API as
//! structured-output constraints.
//!
//! Every object level lists all of its properties as required and forbids
//! additional properties, which strict structured-output mode demands. The
//! registry is built once at startup and only read afterwards.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use thiserror::Error;

mod definitions;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Unknown schema: {0}")]
    NotFound(String),

    #[error("Schema '{name}' failed to compile: {message}")]
    Invalid { name: String, message: String },

    #[error("Value does not match schema '{name}': {}", .errors.join("; "))]
    ValidationFailed { name: String, errors: Vec<String> },
}

/// Names of the registered response shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaName {
    ExamData,
    RoadmapData,
    Questions,
    SearchNotice,
}

impl SchemaName {
    pub const ALL: [SchemaName; 4] = [
        SchemaName::ExamData,
        SchemaName::RoadmapData,
        SchemaName::Questions,
        SchemaName::SearchNotice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SchemaName::ExamData => "exam_data",
            SchemaName::RoadmapData => "roadmap_data",
            SchemaName::Questions => "questions",
            SchemaName::SearchNotice => "search_notice",
        }
    }
}

impl fmt::Display for SchemaName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaName {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| SchemaError::NotFound(s.to_string()))
    }
}

struct RegisteredSchema {
    schema: Value,
    validator: jsonschema::Validator,
}

/// Read-only store of the four response schemas, keyed by name, each with its
/// compiled validator.
pub struct SchemaRegistry {
    schemas: HashMap<SchemaName, RegisteredSchema>,
}

impl SchemaRegistry {
    /// Compiles every built-in schema. Fails only if a definition is not a
    /// valid JSON Schema.
    pub fn new() -> Result<Self, SchemaError> {
        Self::from_definitions(
            SchemaName::ALL
                .into_iter()
                .map(|name| (name, definitions::schema_for(name))),
        )
    }

    pub(crate) fn from_definitions(
        definitions: impl IntoIterator<Item = (SchemaName, Value)>,
    ) -> Result<Self, SchemaError> {
        let schemas = definitions
            .into_iter()
            .map(|(name, schema)| {
                let validator =
                    jsonschema::validator_for(&schema).map_err(|e| SchemaError::Invalid {
                        name: name.to_string(),
                        message: e.to_string(),
                    })?;
                Ok((name, RegisteredSchema { schema, validator }))
            })
            .collect::<Result<_, SchemaError>>()?;
        Ok(Self { schemas })
    }

    /// Looks a schema up by its wire name (`"exam_data"`, ...).
    pub fn get(&self, name: &str) -> Result<(SchemaName, &Value), SchemaError> {
        let key: SchemaName = name.parse()?;
        self.schemas
            .get(&key)
            .map(|entry| (key, &entry.schema))
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))
    }

    /// Validates an instance against a registered schema.
    pub fn validate(&self, name: SchemaName, instance: &Value) -> Result<(), SchemaError> {
        let entry = self
            .schemas
            .get(&name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let errors: Vec<String> = entry
            .validator
            .iter_errors(instance)
            .map(|e| format!("{} at '{}'", e, e.instance_path))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed {
                name: name.to_string(),
                errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn objects_in(value: &Value, out: &mut Vec<Value>) {
        match value {
            Value::Object(map) => {
                if map.get("type") == Some(&json!("object")) {
                    out.push(value.clone());
                }
                map.values().for_each(|child| objects_in(child, out));
            }
            Value::Array(items) => items.iter().for_each(|child| objects_in(child, out)),
            _ => {}
        }
    }

    #[test]
    fn test_every_schema_compiles() {
        let registry = SchemaRegistry::new().unwrap();
        for name in SchemaName::ALL {
            assert!(registry.get(name.as_str()).is_ok(), "schema {name} missing");
        }
    }

    #[test]
    fn test_every_object_is_closed_and_fully_required() {
        let registry = SchemaRegistry::new().unwrap();
        for name in SchemaName::ALL {
            let (_, schema) = registry.get(name.as_str()).unwrap();
            let mut objects = Vec::new();
            objects_in(schema, &mut objects);
            assert!(!objects.is_empty());

            for object in objects {
                assert_eq!(object["additionalProperties"], json!(false), "{name}: {object}");
                let mut declared: Vec<&String> =
                    object["properties"].as_object().unwrap().keys().collect();
                let mut required: Vec<&str> = object["required"]
                    .as_array()
                    .unwrap()
                    .iter()
                    .map(|v| v.as_str().unwrap())
                    .collect();
                declared.sort();
                required.sort();
                assert_eq!(
                    declared.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
                    required,
                    "{name}: required list must cover every property"
                );
            }
        }
    }

    #[test]
    fn test_broken_definition_fails_at_construction() {
        let broken = json!({"type": "object", "properties": {"Order": {"type": "integr"}}});
        let err = SchemaRegistry::from_definitions([(SchemaName::Questions, broken)])
            .err()
            .unwrap();
        assert!(
            matches!(err, SchemaError::Invalid { ref name, .. } if name == "questions"),
            "{err}"
        );
    }

    #[test]
    fn test_validate_unregistered_name_is_not_found() {
        let registry =
            SchemaRegistry::from_definitions([(SchemaName::ExamData, json!({"type": "object"}))])
                .unwrap();
        assert!(matches!(
            registry.validate(SchemaName::Questions, &json!({})),
            Err(SchemaError::NotFound(_))
        ));
        registry.validate(SchemaName::ExamData, &json!({})).unwrap();
    }

    #[test]
    fn test_unknown_schema_name() {
        let registry = SchemaRegistry::new().unwrap();
        assert!(matches!(
            registry.get("exam_data_schema"),
            Err(SchemaError::NotFound(name)) if name == "exam_data_schema"
        ));
        assert!(matches!(registry.get(""), Err(SchemaError::NotFound(_))));
    }

    #[test]
    fn test_schema_name_round_trips_through_wire_name() {
        for name in SchemaName::ALL {
            assert_eq!(name.as_str().parse::<SchemaName>().unwrap(), name);
        }
    }

    #[test]
    fn test_validate_accepts_conforming_exam_data() {
        let registry = SchemaRegistry::new().unwrap();
        let value = json!({
            "Notice": "Edital 01/2024",
            "NoticeTitle": "Concurso TRF",
            "NoticeDescription": "Seleção para analistas",
            "JobRoles": [{"Name": "Analista", "Description": "Nível superior"}]
        });
        registry.validate(SchemaName::ExamData, &value).unwrap();
    }

    #[test]
    fn test_validate_rejects_extra_and_missing_properties() {
        let registry = SchemaRegistry::new().unwrap();
        let value = json!({
            "Notice": "Edital",
            "NoticeTitle": "Título",
            "JobRoles": [],
            "Unexpected": true
        });
        let err = registry.validate(SchemaName::ExamData, &value).unwrap_err();
        match err {
            SchemaError::ValidationFailed { name, errors } => {
                assert_eq!(name, "exam_data");
                assert!(errors.len() >= 2, "{errors:?}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_enum_values() {
        let registry = SchemaRegistry::new().unwrap();
        let value = json!({
            "Questions": [{
                "Question": "Q?",
                "OptionA": "a", "OptionB": "b", "OptionC": "c", "OptionD": "d",
                "CorrectOption": "E",
                "Order": 1,
                "Origin": "Assessment"
            }]
        });
        assert!(registry.validate(SchemaName::Questions, &value).is_err());
    }

    #[test]
    fn test_validate_roadmap_requires_integer_order() {
        let registry = SchemaRegistry::new().unwrap();
        let value = json!({
            "Title": "T",
            "Description": "D",
            "Modules": [{
                "Title": "M", "Description": "MD", "Order": "1",
                "Lessons": [{"Title": "L", "Description": "LD", "Order": 1}]
            }]
        });
        assert!(registry.validate(SchemaName::RoadmapData, &value).is_err());
    }
}
