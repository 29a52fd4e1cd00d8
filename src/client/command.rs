use crate::modes::MentorMode;

/// Slash commands understood by the terminal client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SwitchMode(MentorMode),
    ListModes,
    Quit,
    Unknown(String),
}

impl Command {
    /// `None` when the line is ordinary chat input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let rest = line.strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        let cmd = match (name, arg) {
            ("quit" | "exit" | "q", _) => Command::Quit,
            ("modes", _) => Command::ListModes,
            ("mode", Some(arg)) => match Self::mode_arg(arg) {
                Some(mode) => Command::SwitchMode(mode),
                None => Command::Unknown(line.to_string()),
            },
            _ => Command::Unknown(line.to_string()),
        };
        Some(cmd)
    }

    fn mode_arg(arg: &str) -> Option<MentorMode> {
        match arg.parse::<usize>() {
            Ok(n) => MentorMode::from_ordinal(n),
            Err(_) => arg.parse().ok(),
        }
    }
}
