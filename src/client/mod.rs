/// Mentor chat client: per-mode conversation state and the driver that talks to the server
pub mod api;
pub mod command;
pub mod composer;
pub mod state;
pub mod view;

pub use api::{ClientError, HttpMentorApi, MentorApi};
pub use state::{ChatEvent, ChatState, Effect};

use crate::models::MentorRequest;
use crate::modes::MentorMode;

/// Owns the chat state and runs the effects its transitions ask for.
pub struct ChatSession<A: MentorApi> {
    api: A,
    state: ChatState,
}

impl<A: MentorApi> ChatSession<A> {
    pub fn new(api: A, initial_mode: MentorMode) -> Self {
        Self {
            api,
            state: ChatState::new(initial_mode),
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    fn dispatch(&mut self, event: ChatEvent) -> Option<Effect> {
        let transition = std::mem::take(&mut self.state).apply(event);
        self.state = transition.state;
        transition.effect
    }

    pub fn select_mode(&mut self, mode: MentorMode) {
        self.dispatch(ChatEvent::SelectMode(mode));
    }

    /// Start a turn. Returns the request to send, or `None` when the input
    /// was ignored (blank, or a request is already in flight).
    fn submit(&mut self, input: String) -> Option<MentorRequest> {
        match self.dispatch(ChatEvent::Submit(input)) {
            Some(Effect::Send(request)) => Some(request),
            None => None,
        }
    }

    /// Finish the in-flight turn with the server's reply or error.
    fn complete(&mut self, result: Result<String, ClientError>) {
        let event = match result {
            Ok(answer) => ChatEvent::ReplyReceived { answer },
            Err(e) => {
                tracing::warn!("Mentor turn failed: {}", e);
                ChatEvent::RequestFailed {
                    error: e.to_string(),
                }
            }
        };
        self.dispatch(event);
    }

    /// Submit one turn and wait for its reply. `render` sees the state once
    /// while the request is in flight and once after it settles.
    /// Returns `false` when the input was ignored.
    pub async fn send(&mut self, input: String, mut render: impl FnMut(&ChatState)) -> bool {
        let Some(request) = self.submit(input) else {
            return false;
        };
        render(&self.state);
        let result = self.api.ask(&request).await;
        self.complete(result);
        render(&self.state);
        true
    }
}
