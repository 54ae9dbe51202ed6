//! The risk gate. Callers never branch on the risk level themselves.

use crate::types::{CommandSuggestion, RiskLevel};
use crate::ui::Console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Policy {
    pub default_confirm: bool,
    pub warn: bool,
}

pub fn policy(level: &RiskLevel) -> Policy {
    match level {
        RiskLevel::Low => Policy {
            default_confirm: true,
            warn: false,
        },
        RiskLevel::Medium => Policy {
            default_confirm: false,
            warn: false,
        },
        RiskLevel::High => Policy {
            default_confirm: false,
            warn: true,
        },
        RiskLevel::Unrecognized(_) => Policy {
            default_confirm: false,
            warn: false,
        },
    }
}

/// Show `suggestion` and ask whether to run it. An interrupted prompt is a
/// decline.
pub fn confirm(console: &mut dyn Console, persona: &str, suggestion: &CommandSuggestion) -> bool {
    let policy = policy(&suggestion.risk_level);
    console.show_suggestion(persona, suggestion);
    if policy.warn {
        console.high_risk_banner();
    }
    match console.confirm("Execute this command?", policy.default_confirm) {
        Some(approved) => approved,
        None => {
            tracing::debug!("confirmation interrupted");
            false
        }
    }
}
