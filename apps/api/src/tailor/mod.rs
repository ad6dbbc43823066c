// Resume tailoring: prompt construction, the model call, and tolerant parsing
// of the reply into a fixed record. All model calls go through llm_client.

pub mod analyzer;
pub mod handlers;
pub mod literal;
pub mod parser;
pub mod prompts;
pub mod record;
pub mod submission;
