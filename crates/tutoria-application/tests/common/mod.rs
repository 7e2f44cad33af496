//! Scripted provider adapters shared by the scenario tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tutoria_core::generation::{
    AnswerOption, ExerciseSlot, GeneratedExercise, GenerationParameters,
};
use tutoria_core::provider::{ProviderAdapter, ProviderError};

/// How a fake provider answers.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Answers every call
    Succeed,
    /// Fails every call with the given error
    Fail(ProviderError),
    /// Sleeps before answering
    Slow(Duration),
    /// Answers exercise slots before `index`, fails from `index` on
    FailAtItem(usize),
    /// Returns blank explanation text
    Blank,
}

pub struct FakeProvider {
    id: String,
    model: String,
    available: bool,
    behavior: Behavior,
    explanation_calls: AtomicUsize,
    exercise_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(id: &str, behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            model: format!("{id}-model"),
            available: true,
            behavior,
            explanation_calls: AtomicUsize::new(0),
            exercise_calls: AtomicUsize::new(0),
        })
    }

    pub fn unavailable(id: &str) -> Arc<Self> {
        Arc::new(Self {
            id: id.to_string(),
            model: format!("{id}-model"),
            available: false,
            behavior: Behavior::Succeed,
            explanation_calls: AtomicUsize::new(0),
            exercise_calls: AtomicUsize::new(0),
        })
    }

    pub fn explanation_calls(&self) -> usize {
        self.explanation_calls.load(Ordering::SeqCst)
    }

    pub fn exercise_calls(&self) -> usize {
        self.exercise_calls.load(Ordering::SeqCst)
    }

    async fn gate(&self, slot: Option<usize>) -> Result<(), ProviderError> {
        match &self.behavior {
            Behavior::Succeed | Behavior::Blank => Ok(()),
            Behavior::Fail(err) => Err(err.clone()),
            Behavior::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(())
            }
            Behavior::FailAtItem(index) => match slot {
                Some(slot) if slot >= *index => Err(ProviderError::request("connection reset")),
                _ => Ok(()),
            },
        }
    }
}

#[async_trait]
impl ProviderAdapter for FakeProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available
    }

    async fn generate_explanation(
        &self,
        params: &GenerationParameters,
    ) -> Result<String, ProviderError> {
        self.explanation_calls.fetch_add(1, Ordering::SeqCst);
        self.gate(None).await?;
        if matches!(self.behavior, Behavior::Blank) {
            return Ok("   ".to_string());
        }
        Ok(format!(
            "{} explains {}.\n\nKey idea:\nThe core of {} in short.\n\nExample:\nA worked case.",
            self.id, params.topic, params.topic
        ))
    }

    async fn generate_exercise(
        &self,
        params: &GenerationParameters,
        slot: ExerciseSlot,
    ) -> Result<GeneratedExercise, ProviderError> {
        self.exercise_calls.fetch_add(1, Ordering::SeqCst);
        self.gate(Some(slot.index)).await?;
        Ok(GeneratedExercise {
            question: format!("{} question {} on {}", self.id, slot.index + 1, params.topic),
            options: [
                "one".to_string(),
                "two".to_string(),
                "three".to_string(),
                "four".to_string(),
            ],
            correct: AnswerOption::B,
            explanation: "Because two.".to_string(),
        })
    }
}

pub fn chain(providers: &[&Arc<FakeProvider>]) -> Vec<Arc<dyn ProviderAdapter>> {
    providers
        .iter()
        .map(|p| Arc::clone(*p) as Arc<dyn ProviderAdapter>)
        .collect()
}
