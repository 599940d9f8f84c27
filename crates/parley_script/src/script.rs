//! Loaded scripts: commands and conversations.

use std::collections::HashMap;

use parley_foundation::Token;

use crate::error::CommandError;

/// Index of a conversation within its script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConversationId(usize);

impl ConversationId {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// One command of a loaded script.
#[derive(Clone, Debug, PartialEq)]
pub struct Command {
    /// Position in the command list.
    pub index: usize,
    /// The keyword token. Implicit text commands get a synthesized keyword.
    pub keyword: Token,
    /// Index of the contract in the catalog.
    pub contract: usize,
    /// The conversation this command belongs to.
    pub conversation: Option<ConversationId>,
    /// Arguments, with string quotes removed.
    pub arguments: Vec<Token>,
}

impl Command {
    /// Returns the keyword text.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.keyword.text
    }

    /// Returns the argument at `index`.
    #[must_use]
    pub fn argument(&self, index: usize) -> Option<&Token> {
        self.arguments.get(index)
    }

    /// Returns the text of the argument at `index`, or `""` if absent.
    #[must_use]
    pub fn text(&self, index: usize) -> &str {
        self.argument(index).map_or("", |t| t.text.as_str())
    }
}

/// A named unit of script with its own labels, characters, and numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    name: String,
    start: usize,
    /// Character id to display name.
    pub characters: HashMap<String, String>,
    /// Label name to command index.
    pub labels: HashMap<String, usize>,
    /// Numeric variables.
    pub numbers: HashMap<String, f64>,
}

impl Conversation {
    fn new(name: String, start: usize) -> Self {
        Self {
            name,
            start,
            characters: HashMap::new(),
            labels: HashMap::new(),
            numbers: HashMap::new(),
        }
    }

    /// Returns the conversation name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the index of the `conversation` command that opens it.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Returns the command index of a label.
    #[must_use]
    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }
}

/// The conversations of a script, by id and by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conversations {
    list: Vec<Conversation>,
    by_name: HashMap<String, ConversationId>,
}

impl Conversations {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a conversation starting at command `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken.
    pub fn insert(&mut self, name: &str, start: usize) -> Result<ConversationId, CommandError> {
        if self.by_name.contains_key(name) {
            return Err(CommandError::DuplicateConversation(name.to_string()));
        }
        let id = ConversationId(self.list.len());
        self.list.push(Conversation::new(name.to_string(), start));
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Looks up a conversation id by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ConversationId> {
        self.by_name.get(name).copied()
    }

    /// Returns a conversation.
    #[must_use]
    pub fn get(&self, id: ConversationId) -> Option<&Conversation> {
        self.list.get(id.0)
    }

    /// Returns a conversation mutably.
    pub fn get_mut(&mut self, id: ConversationId) -> Option<&mut Conversation> {
        self.list.get_mut(id.0)
    }

    /// Iterates in script order.
    pub fn iter(&self) -> impl Iterator<Item = &Conversation> {
        self.list.iter()
    }

    /// Returns the number of conversations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Returns true if there are none.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

/// A fully loaded and validated script.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DialogueScript {
    pub(crate) commands: Vec<Command>,
    pub(crate) conversations: Conversations,
    pub(crate) tokens: Vec<Token>,
}

impl DialogueScript {
    /// Returns the commands in script order.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Returns the conversations.
    #[must_use]
    pub const fn conversations(&self) -> &Conversations {
        &self.conversations
    }

    /// Returns every parsed token, trivia included.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Looks up a conversation by name.
    #[must_use]
    pub fn conversation(&self, name: &str) -> Option<&Conversation> {
        self.conversations
            .find(name)
            .and_then(|id| self.conversations.get(id))
    }

    pub(crate) fn parts_mut(&mut self) -> (&[Command], &mut Conversations) {
        (&self.commands, &mut self.conversations)
    }
}
