//! Host-facing notifications and the listener registry.
//!
//! The interpreter reports everything the host should render as a
//! [`Notification`]. Hosts either register callbacks on an [`EventEmitter`]
//! or drain the interpreter's outbox after each call.

use std::fmt;

/// How serious an `error` notification is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// The command completed; something looked wrong.
    Warning,
    /// The command failed and the interpreter halted.
    Fatal,
}

impl Severity {
    /// Returns the numeric level: 1 for warnings, 2 for fatal errors.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Warning => 1,
            Self::Fatal => 2,
        }
    }
}

/// Something the host should react to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notification {
    /// The speaking character changed.
    SpeakerChanged(String),
    /// A line of dialogue is ready.
    TextChanged(String),
    /// A player option was added.
    OptionAdded {
        /// Position among the pending options.
        index: usize,
        /// Interpolated option text.
        text: String,
        /// Target label, or `_` to continue after the options.
        label: String,
    },
    /// Pending options were discarded.
    OptionsCleared,
    /// The script raised a named event.
    DialogueEvent(String),
    /// A command reported a problem.
    Error {
        /// What went wrong.
        message: String,
        /// How bad it is.
        severity: Severity,
    },
    /// A command completed with a warning.
    Warning(String),
}

impl Notification {
    /// Returns the kind of this notification.
    #[must_use]
    pub const fn kind(&self) -> NotificationKind {
        match self {
            Self::SpeakerChanged(_) => NotificationKind::SpeakerChanged,
            Self::TextChanged(_) => NotificationKind::TextChanged,
            Self::OptionAdded { .. } => NotificationKind::OptionAdded,
            Self::OptionsCleared => NotificationKind::OptionsCleared,
            Self::DialogueEvent(_) => NotificationKind::DialogueEvent,
            Self::Error { .. } => NotificationKind::Error,
            Self::Warning(_) => NotificationKind::Warning,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind().name();
        match self {
            Self::SpeakerChanged(text)
            | Self::TextChanged(text)
            | Self::DialogueEvent(text)
            | Self::Warning(text) => write!(f, "{name}({text:?})"),
            Self::OptionAdded { index, text, label } => {
                write!(f, "{name}({index}, {text:?}, {label:?})")
            }
            Self::OptionsCleared => write!(f, "{name}()"),
            Self::Error { message, severity } => {
                write!(f, "{name}({message:?}, {})", severity.level())
            }
        }
    }
}

/// Notification kinds, used to subscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// `speakerChanged(name)`
    SpeakerChanged,
    /// `textChanged(text)`
    TextChanged,
    /// `optionAdded(index, text, label)`
    OptionAdded,
    /// `optionsCleared()`
    OptionsCleared,
    /// `dialogueEvent(name)`
    DialogueEvent,
    /// `error(message, severity)`
    Error,
    /// `warning(message)`
    Warning,
}

impl NotificationKind {
    /// Returns the event name hosts know this kind by.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SpeakerChanged => "speakerChanged",
            Self::TextChanged => "textChanged",
            Self::OptionAdded => "optionAdded",
            Self::OptionsCleared => "optionsCleared",
            Self::DialogueEvent => "dialogueEvent",
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// Handle for removing a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Box<dyn FnMut(&Notification)>;

struct Listener {
    id: ListenerId,
    kind: NotificationKind,
    once: bool,
    callback: Callback,
}

/// Callback registry keyed by notification kind.
///
/// Callbacks run in registration order.
#[derive(Default)]
pub struct EventEmitter {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl EventEmitter {
    /// Creates an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, kind: NotificationKind, once: bool, callback: Callback) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(Listener {
            id,
            kind,
            once,
            callback,
        });
        id
    }

    /// Registers a callback for every notification of `kind`.
    pub fn register(
        &mut self,
        kind: NotificationKind,
        callback: impl FnMut(&Notification) + 'static,
    ) -> ListenerId {
        self.add(kind, false, Box::new(callback))
    }

    /// Registers a callback that is removed after its first call.
    pub fn register_once(
        &mut self,
        kind: NotificationKind,
        callback: impl FnMut(&Notification) + 'static,
    ) -> ListenerId {
        self.add(kind, true, Box::new(callback))
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    /// Calls every listener registered for the notification's kind.
    pub fn trigger(&mut self, notification: &Notification) {
        let kind = notification.kind();
        let mut fired_once = false;
        for listener in self.listeners.iter_mut().filter(|l| l.kind == kind) {
            (listener.callback)(notification);
            fired_once |= listener.once;
        }
        if fired_once {
            self.listeners.retain(|l| !(l.once && l.kind == kind));
        }
    }

    /// Returns the number of listeners for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: NotificationKind) -> usize {
        self.listeners.iter().filter(|l| l.kind == kind).count()
    }
}

impl fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventEmitter")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
