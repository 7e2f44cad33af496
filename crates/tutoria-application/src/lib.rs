//! Application layer for TutorIA.
//!
//! This crate provides the tutoring use case and the engines behind it:
//! tiered generation with local fallback, explanation parsing and the
//! exercise difficulty model. Provider adapters are injected; nothing here
//! knows about HTTP.

pub mod difficulty;
pub mod exercise_generator;
pub mod explanation_engine;
pub mod explanation_parser;
pub mod orchestrator;
pub mod tutor_usecase;

pub use exercise_generator::AdaptiveExerciseGenerator;
pub use explanation_engine::AdaptiveExplanationEngine;
pub use orchestrator::{GenerationOrchestrator, GenerationOutcome, TierFailure};
pub use tutor_usecase::{
    CheckAnswerResponse, ExercisesResponse, ExplainResponse, Personalization, ProviderStatus,
    TutorUseCase,
};
