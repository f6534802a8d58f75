//! Write authorization.
//!
//! Scripture text is reference content, so every write must say explicitly
//! that it overrides it. Rejections are ordinary outcomes, not errors.

use serde::{Deserialize, Serialize};

use super::cache::Entry;
use super::selector::is_notify;

/// Payload accepted by the `Verse` data type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerseSetData {
    /// Plain text. Never authorized.
    Text(String),

    /// Text with an explicit acknowledgment that it changes scripture.
    Heresy {
        text: String,
        #[serde(rename = "isHeresy", default)]
        is_heresy: bool,
    },
}

impl VerseSetData {
    /// Authorized payload, as built by the `Heresy` data type.
    pub fn heresy(text: impl Into<String>) -> Self {
        Self::Heresy {
            text: text.into(),
            is_heresy: true,
        }
    }
}

/// Why a write did not take effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The write targeted the `"notify"` selector.
    NotifySelector,
    /// The payload was a bare string.
    BareText,
    /// The structured payload did not acknowledge the change.
    NotAcknowledged,
    /// The text equals what is already stored.
    Unchanged,
}

/// Outcome of [`authorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Effective write carrying the new text.
    Change(String),
    Rejected(Rejection),
}

/// Decide whether a write changes the entry currently stored for its key.
///
/// Rules are applied in order: notify selector, bare text, missing
/// acknowledgment, identical text.
pub fn authorize(raw: &str, payload: VerseSetData, current: Option<&Entry>) -> GateDecision {
    if is_notify(raw) {
        return GateDecision::Rejected(Rejection::NotifySelector);
    }

    let text = match payload {
        VerseSetData::Text(_) => return GateDecision::Rejected(Rejection::BareText),
        VerseSetData::Heresy { is_heresy: false, .. } => {
            return GateDecision::Rejected(Rejection::NotAcknowledged)
        }
        VerseSetData::Heresy { text, .. } => text,
    };

    if current.is_some_and(|entry| entry.text == text) {
        return GateDecision::Rejected(Rejection::Unchanged);
    }

    GateDecision::Change(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_rejected_first() {
        let decision = authorize("notify", VerseSetData::heresy("text"), None);
        assert_eq!(decision, GateDecision::Rejected(Rejection::NotifySelector));
    }

    #[test]
    fn test_bare_text_rejected() {
        let decision = authorize("john 3:16", VerseSetData::Text("text".into()), None);
        assert_eq!(decision, GateDecision::Rejected(Rejection::BareText));
    }

    #[test]
    fn test_unacknowledged_rejected() {
        let payload = VerseSetData::Heresy {
            text: "text".into(),
            is_heresy: false,
        };
        let decision = authorize("john 3:16", payload, None);
        assert_eq!(decision, GateDecision::Rejected(Rejection::NotAcknowledged));
    }

    #[test]
    fn test_identical_text_rejected() {
        let current = Entry::fetched("same".into());
        let decision = authorize("john 3:16", VerseSetData::heresy("same"), Some(&current));
        assert_eq!(decision, GateDecision::Rejected(Rejection::Unchanged));
    }

    #[test]
    fn test_change_accepted_for_uncached_key() {
        let decision = authorize("john 3:16", VerseSetData::heresy("new"), None);
        assert_eq!(decision, GateDecision::Change("new".into()));
    }

    #[test]
    fn test_set_data_from_json() {
        let bare: VerseSetData = serde_json::from_str(r#""plain""#).unwrap();
        assert_eq!(bare, VerseSetData::Text("plain".into()));

        let structured: VerseSetData =
            serde_json::from_str(r#"{"text": "Heretical text", "isHeresy": true}"#).unwrap();
        assert_eq!(structured, VerseSetData::heresy("Heretical text"));

        let missing_flag: VerseSetData = serde_json::from_str(r#"{"text": "x"}"#).unwrap();
        assert_eq!(
            authorize("john 3:16", missing_flag, None),
            GateDecision::Rejected(Rejection::NotAcknowledged)
        );
    }
}
