// Study features: edital extraction and search, roadmaps, question sets.
// Every model call goes through gateway::CompletionGateway.

pub mod handlers;
pub mod notice;
pub mod prompts;
pub mod questions;
pub mod roadmap;
