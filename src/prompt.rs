use crate::models::ChatMessage;
use crate::modes::MentorMode;

/// Persona shared by every mode; the mode's instructions are appended to it.
pub const BASE_PERSONA: &str = "You are a senior research analyst at a global asset management firm.
You mentor junior analysts who have just transitioned from university.
You focus on:
- clear, concise communication for portfolio managers,
- structured thinking (thesis, catalysts, risks, what changes the view),
- practical advice on workflow and professional behavior.
Always answer in a friendly, professional tone and prefer bullet points when helpful.";

/// The single system message for a mode
pub fn system_instructions(mode: MentorMode) -> String {
    format!(
        "SYSTEM:\n{}\n\nMODE:\n{}",
        BASE_PERSONA,
        mode.instructions()
    )
}

/// Provider message list: one system block followed by the full history.
/// History is resent as-is every turn.
pub fn build_messages(mode: MentorMode, history: &[ChatMessage]) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 1);
    messages.push(ChatMessage::system(system_instructions(mode)));
    messages.extend(history.iter().cloned());
    messages
}
