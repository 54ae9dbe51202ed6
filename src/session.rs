use crate::error::UnknownPersona;
use crate::personas;

/// State that survives between requests: only the active persona.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    active_persona: &'static str,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            active_persona: personas::DEFAULT_PERSONA,
        }
    }
}

impl Session {
    /// Start a session on `persona`, failing if it is not registered.
    pub fn with_persona(persona: &str) -> Result<Self, UnknownPersona> {
        let mut session = Self::default();
        session.switch_persona(persona)?;
        Ok(session)
    }

    pub fn active_persona(&self) -> &'static str {
        self.active_persona
    }

    /// Guidance text for the active persona.
    pub fn persona_text(&self) -> &'static str {
        // active_persona only ever holds a registered key
        personas::get(self.active_persona).unwrap_or_default()
    }

    /// Switch personas. Matching is case-insensitive and ignores surrounding
    /// whitespace; on failure the active persona is left unchanged.
    pub fn switch_persona(&mut self, name: &str) -> Result<(), UnknownPersona> {
        let wanted = name.trim().to_lowercase();
        match personas::keys().find(|key| *key == wanted) {
            Some(key) => {
                tracing::debug!(from = self.active_persona, to = key, "persona switched");
                self.active_persona = key;
                Ok(())
            }
            None => Err(UnknownPersona {
                name: name.trim().to_string(),
            }),
        }
    }
}
