// Shared prompt fragments used by more than one prompt builder.
// Use-case prompts live in study/prompts.rs.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "Você é um assistente preciso e estruturado. \
    Responda SOMENTE com JSON válido. \
    Não inclua nenhum texto fora do objeto JSON. \
    Não use blocos de código markdown. \
    Não inclua explicações nem desculpas.";

/// Forbids inventing data that cannot be traced to the source.
pub const NO_FABRICATION_RULE: &str = "\
    REGRA CRÍTICA: não invente dados. Não crie entradas fictícias, genéricas ou de \
    preenchimento, e não inclua informações que não possam ser verificadas.";

/// PDF extraction leaves literal escape sequences behind.
pub const ESCAPE_ARTIFACT_RULE: &str = "\
    O texto foi extraído de um PDF e pode conter sequências literais como \"\\n\" ou \"\\t\". \
    Ignore esses artefatos: eles não fazem parte do conteúdo.";
