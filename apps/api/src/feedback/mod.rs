// Resume feedback: upload → extract → prompt → LLM → response.
// All LLM calls go through llm_client; nothing here talks to the provider directly.

pub mod checklists;
pub mod handlers;
pub mod prompts;
