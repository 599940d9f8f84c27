//! Conversation state that outlives a session.

use std::collections::BTreeMap;

use crate::script::Conversation;

/// The host-visible state of one conversation.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Conversation name.
    pub conversation: String,
    /// Numeric variables.
    pub numbers: BTreeMap<String, f64>,
    /// Character display names.
    pub characters: BTreeMap<String, String>,
}

impl Snapshot {
    /// Captures a conversation's numbers and character names.
    #[must_use]
    pub fn capture(conversation: &Conversation) -> Self {
        Self {
            conversation: conversation.name().to_string(),
            numbers: conversation
                .numbers
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            characters: conversation
                .characters
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// Writes the captured state back.
    ///
    /// Every number is restored. Character names are only restored for
    /// characters the conversation already has.
    pub fn apply(&self, conversation: &mut Conversation) {
        for (id, value) in &self.numbers {
            conversation.numbers.insert(id.clone(), *value);
        }
        for (id, name) in &self.characters {
            if let Some(existing) = conversation.characters.get_mut(id) {
                existing.clone_from(name);
            }
        }
    }
}
