// README generation: fetch repo + tree + code files → render files → LLM writes the README.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
