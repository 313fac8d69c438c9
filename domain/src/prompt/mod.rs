//! Prompt construction for analyzer and debate calls

mod template;

pub use template::PromptTemplate;
