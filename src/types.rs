use std::fmt;

/// Risk classification declared by the model for a suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    /// Anything the model sent that is not one of the three levels, kept
    /// verbatim for display.
    Unrecognized(String),
}

impl RiskLevel {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "low" => RiskLevel::Low,
            "medium" => RiskLevel::Medium,
            "high" => RiskLevel::High,
            _ => RiskLevel::Unrecognized(raw.to_string()),
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
            RiskLevel::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

/// A single vetted command proposal. Only built by [`crate::parser::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSuggestion {
    pub command: String,
    pub explanation: String,
    pub risk_level: RiskLevel,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub interrupted: bool,
}

impl ExecutionResult {
    pub fn succeeded() -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            interrupted: false,
        }
    }

    pub fn failed(exit_code: Option<i32>) -> Self {
        Self {
            success: false,
            exit_code,
            interrupted: false,
        }
    }

    pub fn interrupted() -> Self {
        Self {
            success: false,
            exit_code: None,
            interrupted: true,
        }
    }
}
