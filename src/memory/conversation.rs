//! Conversation recall gate.
//!
//! Wraps a [`SequenceMemory`] for chat-style callers: each exchange is folded
//! into the bank (user text first, then the reply), and a candidate message is
//! scored against the bank to decide whether stored context is worth pulling
//! back in. Prompt construction and model calls are the caller's concern.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_RECALL_THRESHOLD;
use crate::error::{HrrError, Result};
use crate::memory::sequence::{EncodeReport, SequenceConfig, SequenceMemory};
use crate::memory::symbols::SymbolRng;

/// Conversation gate configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationConfig {
    /// Underlying sequence bank settings.
    pub sequence: SequenceConfig,

    /// Relevance at or above which `should_recall` fires.
    pub recall_threshold: f64,
}

impl Default for ConversationConfig {
    fn default() -> Self {
        Self {
            sequence: SequenceConfig::default(),
            recall_threshold: DEFAULT_RECALL_THRESHOLD,
        }
    }
}

impl ConversationConfig {
    pub fn validate(&self) -> Result<()> {
        if !(-1.0..=1.0).contains(&self.recall_threshold) {
            return Err(HrrError::InvalidConfig(format!(
                "recall_threshold must lie in [-1, 1], got {}",
                self.recall_threshold
            )));
        }
        self.sequence.validate()
    }
}

/// What one recorded exchange contributed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub user: EncodeReport,
    pub assistant: EncodeReport,
    /// 1-based index of this turn.
    pub turn: u64,
}

/// Sequence bank fed one exchange at a time.
#[derive(Debug)]
pub struct ConversationMemory {
    bank: SequenceMemory,
    recall_threshold: f64,
    turns: u64,
}

impl ConversationMemory {
    pub fn new(config: ConversationConfig, rng: SymbolRng) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            bank: SequenceMemory::new(config.sequence, rng)?,
            recall_threshold: config.recall_threshold,
            turns: 0,
        })
    }

    pub fn seeded(config: ConversationConfig, seed: u64) -> Result<Self> {
        Self::new(config, Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Encode the user message, then the reply.
    pub fn record_turn(&mut self, user: &str, assistant: &str) -> Result<TurnReport> {
        let user = self.bank.encode(user)?;
        let assistant = self.bank.encode(assistant)?;
        self.turns += 1;
        tracing::debug!(turn = self.turns, "conversation turn recorded");
        Ok(TurnReport {
            user,
            assistant,
            turn: self.turns,
        })
    }

    /// How strongly `candidate` resonates with the recorded conversation.
    pub fn relevance(&self, candidate: &str) -> Result<f64> {
        self.bank.decode(candidate)
    }

    pub fn should_recall(&self, candidate: &str) -> Result<bool> {
        Ok(self.relevance(candidate)? >= self.recall_threshold)
    }

    pub fn recall_threshold(&self) -> f64 {
        self.recall_threshold
    }

    /// Turns recorded since construction or the last reset.
    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn bank(&self) -> &SequenceMemory {
        &self.bank
    }

    /// Forget the conversation. Token and position vectors survive.
    pub fn reset(&mut self) {
        self.bank.reset();
        self.turns = 0;
    }
}
