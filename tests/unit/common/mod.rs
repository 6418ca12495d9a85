//! Shared grammar-bearing types for tests
//!
//! This module provides small typed targets that exercise nested types,
//! self-recursion and attribute validation.

use once_cell::sync::Lazy;
use regram::{
    AttributeError, Grammar, GrammarNode, Target, Value, alternation, attribute, ignore, nested,
    repeat_at_least_once, sequence,
};

fn expect_text(value: Value) -> Result<String, AttributeError> {
    let found = value.shape();
    value.into_text().ok_or(AttributeError::Mismatch {
        expected: "text",
        found,
    })
}

/// A single word
#[derive(Debug, Default)]
pub struct Word {
    pub content: String,
}

impl Target for Word {
    fn kind(&self) -> &str {
        "Word"
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        match name {
            "content" => {
                self.content = expect_text(value)?;
                Ok(())
            },
            _ => Err(AttributeError::Unknown),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "$kind": "Word", "content": self.content })
    }
}

impl Grammar for Word {
    fn grammar() -> &'static GrammarNode {
        static GRAMMAR: Lazy<GrammarNode> = Lazy::new(|| attribute("content", r"\w+"));
        &GRAMMAR
    }
}

/// Words separated by spaces
#[derive(Debug, Default)]
pub struct Sentence {
    pub words: Vec<Word>,
}

impl Sentence {
    pub fn texts(&self) -> Vec<&str> {
        self.words.iter().map(|word| word.content.as_str()).collect()
    }
}

impl Target for Sentence {
    fn kind(&self) -> &str {
        "Sentence"
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        if name != "content" {
            return Err(AttributeError::Unknown);
        }
        let found = value.shape();
        let items = value.into_sequence().ok_or(AttributeError::Mismatch {
            expected: "sequence",
            found,
        })?;
        self.words = items
            .into_iter()
            .map(|item| {
                let found = item.shape();
                item.into_object::<Word>().ok_or(AttributeError::Mismatch {
                    expected: "Word",
                    found,
                })
            })
            .collect::<Result<_, _>>()?;
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        let words: Vec<_> = self.words.iter().map(Word::to_json).collect();
        serde_json::json!({ "$kind": "Sentence", "content": words })
    }
}

impl Grammar for Sentence {
    fn grammar() -> &'static GrammarNode {
        static GRAMMAR: Lazy<GrammarNode> = Lazy::new(|| {
            attribute("content", repeat_at_least_once(alternation([ignore(" +"), nested::<Word>()])))
        });
        &GRAMMAR
    }
}

/// A word wrapped in any number of parentheses
#[derive(Debug, Default)]
pub struct Nest {
    pub inner: Option<Box<Nest>>,
    pub leaf: Option<String>,
}

impl Nest {
    pub fn depth(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.depth() + 1)
    }

    pub fn innermost(&self) -> Option<&str> {
        self.inner.as_ref().map_or(self.leaf.as_deref(), |inner| inner.innermost())
    }
}

impl Target for Nest {
    fn kind(&self) -> &str {
        "Nest"
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        match name {
            "inner" => {
                let found = value.shape();
                let inner = value.into_object::<Self>().ok_or(AttributeError::Mismatch {
                    expected: "Nest",
                    found,
                })?;
                self.inner = Some(Box::new(inner));
                Ok(())
            },
            "leaf" => {
                self.leaf = Some(expect_text(value)?);
                Ok(())
            },
            _ => Err(AttributeError::Unknown),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "$kind": "Nest",
            "inner": self.inner.as_ref().map(|inner| inner.to_json()),
            "leaf": self.leaf,
        })
    }
}

impl Grammar for Nest {
    fn grammar() -> &'static GrammarNode {
        static GRAMMAR: Lazy<GrammarNode> = Lazy::new(|| {
            alternation([
                sequence([ignore(r"\("), attribute("inner", nested::<Nest>()), ignore(r"\)")]),
                attribute("leaf", r"\w+"),
            ])
        });
        &GRAMMAR
    }
}

/// `key = value` up to a semicolon
#[derive(Debug, Default)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

impl Target for Pair {
    fn kind(&self) -> &str {
        "Pair"
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), AttributeError> {
        match name {
            "key" => self.key = expect_text(value)?,
            "value" => self.value = expect_text(value)?,
            _ => return Err(AttributeError::Unknown),
        }
        Ok(())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "$kind": "Pair", "key": self.key, "value": self.value })
    }
}

impl Grammar for Pair {
    fn grammar() -> &'static GrammarNode {
        static GRAMMAR: Lazy<GrammarNode> = Lazy::new(|| {
            sequence([attribute("key", r"\w+"), ignore(r"\s*=\s*"), attribute("value", r"[^;]*")])
        });
        &GRAMMAR
    }
}
