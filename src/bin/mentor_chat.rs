use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use analyst_mentor::client::command::Command;
use analyst_mentor::client::composer::{Composer, ComposerAction};
use analyst_mentor::client::{ChatSession, HttpMentorApi, view};
use analyst_mentor::config::Config;
use analyst_mentor::modes::MentorMode;

#[tokio::main]
async fn main() -> Result<()> {
    analyst_mentor::init_tracing();

    let config = Config::load();
    tracing::info!(endpoint = %config.client.endpoint, "Starting mentor chat");

    let mut session = ChatSession::new(
        HttpMentorApi::new(config.client.endpoint.clone()),
        MentorMode::CommunicationCoach,
    );
    let mut composer = Composer::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", view::render_screen(session.state()));
    println!("Commands: /mode <1-4|id>, /modes, /quit. End a line with \\ to continue it.");

    loop {
        print!("{}", view::prompt(session.state(), !composer.is_empty()));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        if composer.is_empty() {
            if let Some(cmd) = Command::parse(&line) {
                match cmd {
                    Command::Quit => break,
                    Command::ListModes => println!("{}", view::render_mode_list()),
                    Command::SwitchMode(mode) => {
                        session.select_mode(mode);
                        println!("{}", view::render_screen(session.state()));
                    }
                    Command::Unknown(raw) => println!("Unknown command: {raw}"),
                }
                continue;
            }
        }

        if let ComposerAction::Submit(text) = composer.feed_line(&line) {
            session
                .send(text, |state| println!("{}", view::render_screen(state)))
                .await;
        }
    }

    Ok(())
}
