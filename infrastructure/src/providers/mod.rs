//! Reasoning backend adapters

mod openai;

pub use openai::{OpenAiCompatConfig, OpenAiCompatGateway, ProviderError};
