// Mock interview question generation.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod store;
