/// Mentor modes and their static configuration
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ───────────────────────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────────────────────

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModeError {
    #[error("Invalid mode '{name}'. Valid modes: {valid_list}")]
    InvalidMode { name: String, valid_list: String },

    #[error("Empty mode name provided")]
    EmptyModeName,
}

impl ModeError {
    pub fn invalid_mode(name: &str) -> Self {
        let valid_list = MentorMode::ALL
            .iter()
            .map(|m| m.id())
            .collect::<Vec<_>>()
            .join(", ");
        Self::InvalidMode {
            name: name.to_string(),
            valid_list,
        }
    }
}

// ───────────────────────────────────────────────────────────────────────────────
// Modes
// ───────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MentorMode {
    CommunicationCoach,
    PmSimulator,
    WorkflowHelper,
    SafeQa,
}

impl fmt::Display for MentorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for MentorMode {
    type Err = ModeError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match norm.as_str() {
            "" => Err(ModeError::EmptyModeName),
            "communication_coach" => Ok(MentorMode::CommunicationCoach),
            "pm_simulator" => Ok(MentorMode::PmSimulator),
            "workflow_helper" => Ok(MentorMode::WorkflowHelper),
            "safe_qa" => Ok(MentorMode::SafeQa),
            _ => Err(ModeError::invalid_mode(s)),
        }
    }
}

impl Default for MentorMode {
    fn default() -> Self {
        MentorMode::SafeQa
    }
}

impl MentorMode {
    pub const ALL: [MentorMode; 4] = [
        MentorMode::CommunicationCoach,
        MentorMode::PmSimulator,
        MentorMode::WorkflowHelper,
        MentorMode::SafeQa,
    ];

    pub const fn id(&self) -> &'static str {
        match self {
            MentorMode::CommunicationCoach => "communication_coach",
            MentorMode::PmSimulator => "pm_simulator",
            MentorMode::WorkflowHelper => "workflow_helper",
            MentorMode::SafeQa => "safe_qa",
        }
    }

    pub fn config(&self) -> &'static ModeConfig {
        match self {
            MentorMode::CommunicationCoach => &COMMUNICATION_COACH,
            MentorMode::PmSimulator => &PM_SIMULATOR,
            MentorMode::WorkflowHelper => &WORKFLOW_HELPER,
            MentorMode::SafeQa => &SAFE_QA,
        }
    }

    pub fn label(&self) -> &'static str {
        self.config().label
    }

    pub fn instructions(&self) -> &'static str {
        self.config().instructions
    }

    /// Position in the tab strip, 1-based
    pub fn ordinal(&self) -> usize {
        Self::ALL
            .iter()
            .position(|m| m == self)
            .map(|i| i + 1)
            .unwrap_or(0)
    }

    pub fn from_ordinal(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }
}

// ───────────────────────────────────────────────────────────────────────────────
// Static configuration
// ───────────────────────────────────────────────────────────────────────────────

/// Presentation styling for a mode tab and its message bubbles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeStyle {
    /// Accent colour name as understood by `colored`
    pub accent: &'static str,
    pub glyph: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ModeConfig {
    pub label: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    pub instructions: &'static str,
    pub style: ModeStyle,
}

static COMMUNICATION_COACH: ModeConfig = ModeConfig {
    label: "Communication Coach",
    description: "Review drafts of emails, meeting notes or IC memos and make them PM-friendly",
    placeholder: "Paste your draft email, meeting notes or IC memo here...",
    instructions: "You are acting as a communication coach.
The user will paste drafts of emails, meeting notes, or IC memos.
Your tasks:
1) Briefly point out what is clear vs. unclear.
2) Rewrite the draft in a more concise, PM-friendly style.
3) Give 2-3 concrete tips they can remember for next time.",
    style: ModeStyle {
        accent: "blue",
        glyph: "✉",
    },
};

static PM_SIMULATOR: ModeConfig = ModeConfig {
    label: "PM Simulator",
    description: "Have a portfolio manager stress-test your investment thesis",
    placeholder: "Describe your investment thesis...",
    instructions: "Act as a portfolio manager challenging a junior analyst's thesis.
Your tasks:
1) Ask 3-5 tough but fair questions about their idea.
2) Focus on portfolio relevance, risk, catalysts, and \"what would change your mind\".
3) Do NOT rewrite their thesis; only challenge it.",
    style: ModeStyle {
        accent: "magenta",
        glyph: "◆",
    },
};

static WORKFLOW_HELPER: ModeConfig = ModeConfig {
    label: "Workflow Helper",
    description: "Prioritize tasks and plan the workday",
    placeholder: "List your tasks and deadlines...",
    instructions: "You help junior analysts prioritize tasks and structure their workday.
Your tasks:
1) Sort tasks by urgency and importance.
2) Propose a simple schedule for today.
3) Suggest what they should communicate to their PM (e.g. delays, trade-offs).",
    style: ModeStyle {
        accent: "green",
        glyph: "☰",
    },
};

static SAFE_QA: ModeConfig = ModeConfig {
    label: "Safe Q&A",
    description: "Ask about asset management culture, expectations and soft skills",
    placeholder: "Ask a question about the job...",
    instructions: "You answer questions about asset management culture, expectations, and soft skills.
You explain concepts in simple, concrete language and give examples when helpful.
Avoid giving specific buy/sell recommendations on individual securities.",
    style: ModeStyle {
        accent: "yellow",
        glyph: "?",
    },
};

/// Public view of a mode, served by `GET /api/modes`
#[derive(Debug, Clone, Serialize)]
pub struct ModeSummary {
    pub id: MentorMode,
    pub label: &'static str,
    pub description: &'static str,
    pub placeholder: &'static str,
    pub style: ModeStyle,
}

impl From<MentorMode> for ModeSummary {
    fn from(mode: MentorMode) -> Self {
        let cfg = mode.config();
        Self {
            id: mode,
            label: cfg.label,
            description: cfg.description,
            placeholder: cfg.placeholder,
            style: cfg.style,
        }
    }
}

pub fn catalog() -> Vec<ModeSummary> {
    MentorMode::ALL.into_iter().map(ModeSummary::from).collect()
}
