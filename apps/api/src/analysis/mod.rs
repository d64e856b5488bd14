// Resume analysis: prompt construction, primary/fallback model invocation, HTTP handlers.
// All model calls go through llm_client via the GenerativeModel trait.

pub mod analyzer;
pub mod handlers;
pub mod invoker;
pub mod prompts;
