use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Categories a memory item may be filed under.
pub const CATEGORIES: [&str; 5] = ["hook", "persona", "platform", "performance", "general"];

/// Write-gate thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Shortest content accepted, in characters
    pub min_content_chars: usize,
    /// Lowest `rating` accepted in evidence
    pub min_rating: u8,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            min_content_chars: 12,
            min_rating: 4,
        }
    }
}

impl MemoryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_content_chars(mut self, chars: usize) -> Self {
        self.min_content_chars = chars;
        self
    }

    pub fn with_min_rating(mut self, rating: u8) -> Self {
        self.min_rating = rating;
        self
    }
}

/// Why the write-gate turned an item away.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    EmptyContent,
    TooShort { min: usize },
    UnknownCategory(String),
    LowRating { rating: f64, min: u8 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyContent => write!(f, "content is empty"),
            Rejection::TooShort { min } => write!(f, "content shorter than {min} characters"),
            Rejection::UnknownCategory(category) => write!(
                f,
                "unknown category '{}' (expected one of: {})",
                category,
                CATEGORIES.join(", ")
            ),
            Rejection::LowRating { rating, min } => {
                write!(f, "rating {rating} below minimum {min}")
            }
        }
    }
}

/// Admission rules for long-term memory.
#[derive(Debug, Clone, Default)]
pub struct WriteGate {
    config: MemoryConfig,
}

impl WriteGate {
    pub fn new(config: MemoryConfig) -> Self {
        Self { config }
    }

    /// Check a candidate item. Evidence without a numeric `rating` is admitted.
    pub fn check(&self, content: &str, category: &str, evidence: Option<&Value>) -> Result<(), Rejection> {
        let content = content.trim();
        if content.is_empty() {
            return Err(Rejection::EmptyContent);
        }
        if content.chars().count() < self.config.min_content_chars {
            return Err(Rejection::TooShort {
                min: self.config.min_content_chars,
            });
        }
        if !CATEGORIES.contains(&category) {
            return Err(Rejection::UnknownCategory(category.to_string()));
        }
        if let Some(rating) = evidence.and_then(|e| e.get("rating")).and_then(Value::as_f64) {
            if rating < f64::from(self.config.min_rating) {
                return Err(Rejection::LowRating {
                    rating,
                    min: self.config.min_rating,
                });
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }
}
