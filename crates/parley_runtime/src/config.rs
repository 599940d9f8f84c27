//! Player configuration.

use std::path::PathBuf;

/// How the terminal player presents a conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerConfig {
    /// Conversation to start. Defaults to the first one in the script.
    pub start: Option<String>,
    /// Emit ANSI colors.
    pub color: bool,
    /// Print the banner before playing.
    pub show_banner: bool,
    /// Continue past lines of text without waiting for Enter.
    pub auto_advance: bool,
    /// Where the conversation state is saved when the player exits.
    pub save_path: Option<PathBuf>,
    /// Input prompt.
    pub prompt: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: None,
            color: true,
            show_banner: true,
            auto_advance: false,
            save_path: None,
            prompt: "> ".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the conversation to start.
    #[must_use]
    pub fn with_start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Enables or disables ANSI colors.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Disables the banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Enables or disables auto-advance.
    #[must_use]
    pub const fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    /// Sets the save file.
    #[must_use]
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = Some(path.into());
        self
    }

    /// Sets the input prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}
