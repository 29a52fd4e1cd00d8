//! Terminal rendering of the chat: mode tabs, message bubbles, input prompt.

use colored::*;

use super::state::ChatState;
use crate::models::{ChatMessage, Role};
use crate::modes::MentorMode;

pub const TITLE: &str = "Junior Analyst Mentor";

fn accent(mode: MentorMode) -> Color {
    Color::from(mode.config().style.accent)
}

pub fn render_tabs(state: &ChatState) -> String {
    MentorMode::ALL
        .iter()
        .map(|mode| {
            let style = mode.config().style;
            let tab = format!(" {} {} {} ", mode.ordinal(), style.glyph, mode.label());
            if *mode == state.active_mode() {
                tab.on_color(accent(*mode)).black().bold().to_string()
            } else {
                tab.color(accent(*mode)).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_message(mode: MentorMode, message: &ChatMessage) -> String {
    let (who, body) = match message.role {
        Role::User => ("You".bold(), message.content.normal()),
        Role::Assistant => (
            format!("{} Mentor", mode.config().style.glyph)
                .color(accent(mode))
                .bold(),
            message.content.normal(),
        ),
        Role::System => ("System".dimmed(), message.content.dimmed()),
    };

    let mut out = format!("{who}\n");
    for line in body.to_string().lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

pub fn render_history(state: &ChatState) -> String {
    let mode = state.active_mode();
    let history = state.visible_history();
    if history.is_empty() {
        return format!("{}\n", mode.config().placeholder.dimmed().italic());
    }
    history
        .iter()
        .map(|m| render_message(mode, m))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_status(state: &ChatState) -> Option<String> {
    if state.is_sending() {
        return Some(state.submit_label().dimmed().to_string());
    }
    state.error().map(|e| e.red().to_string())
}

pub fn render_screen(state: &ChatState) -> String {
    let mut out = format!("{}\n\n{}\n\n", TITLE.bold(), render_tabs(state));
    out.push_str(&render_history(state));
    if let Some(status) = render_status(state) {
        out.push('\n');
        out.push_str(&status);
        out.push('\n');
    }
    out
}

pub fn render_mode_list() -> String {
    MentorMode::ALL
        .iter()
        .map(|mode| {
            let cfg = mode.config();
            format!(
                "  {}. {:<20} {}",
                mode.ordinal(),
                cfg.label.color(accent(*mode)),
                cfg.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn prompt(state: &ChatState, continuing: bool) -> String {
    if continuing {
        "... ".to_string()
    } else {
        format!("{} > ", state.active_mode().label().color(accent(state.active_mode())))
    }
}
