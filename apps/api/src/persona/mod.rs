//! Persona pipeline — models, prompts, and orchestration for turning a
//! preference set into a Cultural Twin result.

pub mod generator;
pub mod handlers;
pub mod language;
pub mod models;
pub mod prompts;
