//! In-Memory AI State Implementation

use std::sync::{Arc, Mutex};

use crate::application::ports::{AiState, AiStatePort};

/// 内存 AI 状态
#[derive(Default)]
pub struct InMemoryAiState {
    state: Mutex<AiState>,
}

impl InMemoryAiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl AiStatePort for InMemoryAiState {
    fn get(&self) -> AiState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set(&self, state: AiState) -> AiState {
        let old = std::mem::replace(
            &mut *self.state.lock().unwrap_or_else(|e| e.into_inner()),
            state,
        );
        if old != state {
            tracing::debug!(old_state = old.as_str(), new_state = state.as_str(), "AI state changed");
        }
        old
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_returns_old_state() {
        let state = InMemoryAiState::new();
        assert_eq!(state.get(), AiState::Idle);
        assert_eq!(state.set(AiState::ThinkingSpeaking), AiState::Idle);
        assert!(!state.is_interrupted());
        state.set(AiState::Interrupted);
        assert!(state.is_interrupted());
    }

    #[test]
    fn test_set_same_state_is_idempotent() {
        let state = InMemoryAiState::new();
        state.set(AiState::Listening);
        assert_eq!(state.set(AiState::Listening), AiState::Listening);
        assert_eq!(state.get(), AiState::Listening);
    }
}
