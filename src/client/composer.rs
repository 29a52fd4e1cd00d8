/// Input area key handling: Enter submits, Shift+Enter breaks the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Backspace,
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self { key, shift: false }
    }

    pub fn shifted(key: Key) -> Self {
        Self { key, shift: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerAction {
    None,
    Submit(String),
}

/// Marks a line-based terminal line as "newline, keep composing"
pub const CONTINUATION: char = '\\';

#[derive(Debug, Default)]
pub struct Composer {
    buffer: String,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn handle(&mut self, press: KeyPress) -> ComposerAction {
        match press.key {
            Key::Enter if press.shift => {
                self.buffer.push('\n');
                ComposerAction::None
            }
            // The confirm key never reaches the buffer
            Key::Enter => ComposerAction::Submit(std::mem::take(&mut self.buffer)),
            Key::Backspace => {
                self.buffer.pop();
                ComposerAction::None
            }
            Key::Char(c) => {
                self.buffer.push(c);
                ComposerAction::None
            }
        }
    }

    /// Feed one terminal line. A trailing `\` stands for Shift+Enter.
    pub fn feed_line(&mut self, line: &str) -> ComposerAction {
        let line = line.trim_end_matches(['\r', '\n']);
        let (text, newline) = match line.strip_suffix(CONTINUATION) {
            Some(rest) => (rest, true),
            None => (line, false),
        };

        for c in text.chars() {
            self.handle(KeyPress::plain(Key::Char(c)));
        }

        if newline {
            self.handle(KeyPress::shifted(Key::Enter))
        } else {
            self.handle(KeyPress::plain(Key::Enter))
        }
    }
}
