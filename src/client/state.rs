//! Client-side conversation state.
//!
//! `ChatState` is an owned value; every change goes through
//! [`ChatState::apply`], which consumes the old state and returns the next one
//! together with any side effect the driver has to run.

use std::collections::HashMap;

use crate::models::{ChatMessage, MentorRequest};
use crate::modes::MentorMode;

/// Per-mode conversation histories, kept only for the lifetime of the client
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationState {
    histories: HashMap<MentorMode, Vec<ChatMessage>>,
}

impl ConversationState {
    pub fn history(&self, mode: MentorMode) -> &[ChatMessage] {
        self.histories.get(&mode).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a turn to one mode; other modes are untouched.
    pub fn with_turn(mut self, mode: MentorMode, turn: ChatMessage) -> Self {
        self.histories.entry(mode).or_default().push(turn);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    /// A request for `mode` is in flight; its reply lands in that mode.
    Sending { mode: MentorMode },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    SelectMode(MentorMode),
    Submit(String),
    ReplyReceived { answer: String },
    RequestFailed { error: String },
}

/// Work the driver must perform after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Send(MentorRequest),
}

#[derive(Debug)]
pub struct Transition {
    pub state: ChatState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn stay(state: ChatState) -> Self {
        Self {
            state,
            effect: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    active: MentorMode,
    conversations: ConversationState,
    status: RequestStatus,
    error: Option<String>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new(MentorMode::CommunicationCoach)
    }
}

impl ChatState {
    pub fn new(active: MentorMode) -> Self {
        Self {
            active,
            conversations: ConversationState::default(),
            status: RequestStatus::Idle,
            error: None,
        }
    }

    pub fn active_mode(&self) -> MentorMode {
        self.active
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.status, RequestStatus::Sending { .. })
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history(&self, mode: MentorMode) -> &[ChatMessage] {
        self.conversations.history(mode)
    }

    pub fn visible_history(&self) -> &[ChatMessage] {
        self.history(self.active)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_sending() {
            "Thinking..."
        } else {
            "Ask Mentor"
        }
    }

    pub fn apply(self, event: ChatEvent) -> Transition {
        match event {
            ChatEvent::SelectMode(mode) => Transition::stay(Self {
                active: mode,
                ..self
            }),
            ChatEvent::Submit(input) => self.submit(input),
            ChatEvent::ReplyReceived { answer } => match self.status {
                RequestStatus::Sending { mode } => Transition::stay(Self {
                    conversations: self
                        .conversations
                        .with_turn(mode, ChatMessage::assistant(answer)),
                    status: RequestStatus::Idle,
                    ..self
                }),
                RequestStatus::Idle => {
                    tracing::debug!("Ignoring reply with no request in flight");
                    Transition::stay(self)
                }
            },
            ChatEvent::RequestFailed { error } => match self.status {
                RequestStatus::Sending { .. } => Transition::stay(Self {
                    status: RequestStatus::Idle,
                    error: Some(error),
                    ..self
                }),
                RequestStatus::Idle => Transition::stay(self),
            },
        }
    }

    fn submit(self, input: String) -> Transition {
        if self.is_sending() || input.trim().is_empty() {
            return Transition::stay(self);
        }

        let mode = self.active;
        let conversations = self
            .conversations
            .with_turn(mode, ChatMessage::user(input));
        let request = MentorRequest {
            mode,
            messages: conversations.history(mode).to_vec(),
        };

        Transition {
            state: Self {
                conversations,
                status: RequestStatus::Sending { mode },
                error: None,
                ..self
            },
            effect: Some(Effect::Send(request)),
        }
    }
}
