//! Cover letter generation: prompt building, backends and post-processing

pub mod prompts;
pub mod generator;

pub use generator::{
    CoverLetterGenerator, CoverLetterRequest, OpenAiGenerator, TemplateGenerator, TextGenerator,
};
