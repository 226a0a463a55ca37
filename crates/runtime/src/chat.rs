//! Chat messages posted by power scripts.
use std::fmt;

use serde::{Deserialize, Serialize};

/// One chat line: who speaks, an optional flavor header, and the body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub speaker: String,
    pub flavor: Option<String>,
    pub content: String,
}

fn join_names<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ChatMessage {
    pub fn new(speaker: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            flavor: None,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn with_flavor(mut self, flavor: impl Into<String>) -> Self {
        self.flavor = Some(flavor.into());
        self
    }

    /// Generic power message, flavored with the power name.
    pub fn power(
        speaker: impl Into<String>,
        power: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(speaker, content).with_flavor(power)
    }

    pub fn healing<S: AsRef<str>>(
        speaker: impl Into<String>,
        targets: &[S],
        amount: i32,
        power: impl Into<String>,
    ) -> Self {
        let content = format!("{} gains {amount} hit points.", join_names(targets));
        Self::power(speaker, power, content)
    }

    pub fn temp_hp<S: AsRef<str>>(
        speaker: impl Into<String>,
        targets: &[S],
        amount: i32,
        power: impl Into<String>,
    ) -> Self {
        let content = format!(
            "{} gains {amount} temporary hit points.",
            join_names(targets)
        );
        Self::power(speaker, power, content)
    }

    pub fn effect<S: AsRef<str>>(
        speaker: impl Into<String>,
        targets: &[S],
        effect: &str,
        power: impl Into<String>,
    ) -> Self {
        let content = format!("{effect} is applied to {}.", join_names(targets));
        Self::power(speaker, power, content)
    }

    pub fn damage<S: AsRef<str>>(
        speaker: impl Into<String>,
        targets: &[S],
        amount: i32,
        damage_type: &str,
        power: impl Into<String>,
    ) -> Self {
        let content = format!(
            "{} takes {amount} {damage_type} damage.",
            join_names(targets)
        );
        Self::power(speaker, power, content)
    }

    pub fn saving_throw<S: AsRef<str>>(
        speaker: impl Into<String>,
        targets: &[S],
        save: &str,
        power: impl Into<String>,
    ) -> Self {
        let content = format!("{} must make a {save} save.", join_names(targets));
        Self::power(speaker, power, content)
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.flavor {
            Some(flavor) => write!(f, "[{}] {}: {}", flavor, self.speaker, self.content),
            None => write!(f, "{}: {}", self.speaker, self.content),
        }
    }
}
