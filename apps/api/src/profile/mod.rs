// Profile review: fetch user + repos + events → aggregate → score via LLM.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod review;
