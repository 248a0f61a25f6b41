//! Cipher rounds: type the decrypted phrase.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::WorkedExample;
use crate::cipher::{Alphabet, CipherTransform};

/// A phrase hidden behind a cipher transform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CipherRound {
    /// The answer, uppercase.
    pub plaintext: String,
    /// How the phrase is encrypted.
    pub transform: CipherTransform,
    /// Sample shown before the round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<WorkedExample>,
}

impl CipherRound {
    /// A round without a worked example.
    pub fn new(plaintext: impl Into<String>, transform: CipherTransform) -> Self {
        Self {
            plaintext: plaintext.into(),
            transform,
            example: None,
        }
    }

    /// Attach a worked example.
    pub fn with_example(mut self, example: WorkedExample) -> Self {
        self.example = Some(example);
        self
    }

    /// The ciphertext to show. Call once per round for transpositions.
    pub fn encrypt<R: Rng>(&self, alphabet: &Alphabet, rng: &mut R) -> String {
        self.transform.apply(&self.plaintext, alphabet, rng)
    }

    /// Exact match after trimming and uppercasing.
    pub fn check(&self, answer: &str) -> bool {
        answer.trim().to_uppercase() == self.plaintext
    }

    /// Reveal the phrase.
    pub fn explanation(&self) -> Vec<String> {
        vec![format!("Ответ: {}", self.plaintext)]
    }

    /// Plaintext must be non-empty and already uppercase.
    pub fn validate(&self) -> Result<(), String> {
        if self.plaintext.trim().is_empty() {
            return Err("cipher plaintext is empty".to_string());
        }
        if self.plaintext != self.plaintext.to_uppercase() {
            return Err(format!("cipher plaintext '{}' is not uppercase", self.plaintext));
        }
        if self.plaintext != self.plaintext.trim() {
            return Err("cipher plaintext has surrounding whitespace".to_string());
        }
        Ok(())
    }
}
