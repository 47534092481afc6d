//! Global hotkey binding, as text and as a value.
//!
//! Registration with the operating system is an external concern behind
//! [`crate::ports::HotkeyRegistrarPort`]; this module only parses and renders
//! bindings such as `cmd+shift+v`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_HOTKEY: &str = "cmd+shift+v";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub cmd: bool,
}

impl Modifiers {
    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.alt || self.shift || self.cmd)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HotkeySpec {
    pub modifiers: Modifiers,
    /// Lowercase key name, e.g. `v` or `f5`.
    pub key: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HotkeySpecParseError {
    #[error("hotkey binding is empty")]
    Empty,

    #[error("hotkey binding contains an empty segment")]
    EmptySegment,

    #[error("modifier `{0}` appears more than once")]
    DuplicateModifier(String),

    #[error("hotkey binding has no key")]
    MissingKey,

    #[error("hotkey binding has two keys: `{0}` and `{1}`")]
    MultipleKeys(String, String),
}

impl Default for HotkeySpec {
    fn default() -> Self {
        Self {
            modifiers: Modifiers {
                cmd: true,
                shift: true,
                ..Modifiers::default()
            },
            key: "v".to_string(),
        }
    }
}

impl FromStr for HotkeySpec {
    type Err = HotkeySpecParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(HotkeySpecParseError::Empty);
        }

        let mut modifiers = Modifiers::default();
        let mut key: Option<String> = None;

        for segment in s.split('+') {
            let token = segment.trim().to_lowercase();
            if token.is_empty() {
                return Err(HotkeySpecParseError::EmptySegment);
            }

            let slot = match token.as_str() {
                "cmd" | "command" | "super" | "meta" => Some(&mut modifiers.cmd),
                "ctrl" | "control" => Some(&mut modifiers.ctrl),
                "alt" | "option" | "opt" => Some(&mut modifiers.alt),
                "shift" => Some(&mut modifiers.shift),
                _ => None,
            };

            match slot {
                Some(flag) if *flag => return Err(HotkeySpecParseError::DuplicateModifier(token)),
                Some(flag) => *flag = true,
                None => {
                    if let Some(existing) = key.take() {
                        return Err(HotkeySpecParseError::MultipleKeys(existing, token));
                    }
                    key = Some(token);
                }
            }
        }

        let key = key.ok_or(HotkeySpecParseError::MissingKey)?;
        Ok(Self { modifiers, key })
    }
}

impl fmt::Display for HotkeySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.modifiers;
        for (on, name) in [(m.ctrl, "ctrl"), (m.alt, "alt"), (m.shift, "shift"), (m.cmd, "cmd")] {
            if on {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_cmd_shift_v() {
        let parsed: HotkeySpec = DEFAULT_HOTKEY.parse().unwrap();
        assert_eq!(parsed, HotkeySpec::default());
    }

    #[test]
    fn parsing_is_order_and_case_insensitive() {
        let a: HotkeySpec = "Shift + CMD + V".parse().unwrap();
        let b: HotkeySpec = "command+shift+v".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "shift+cmd+v");
    }

    #[test]
    fn display_uses_canonical_order() {
        let spec: HotkeySpec = "cmd+alt+ctrl+shift+f5".parse().unwrap();
        assert_eq!(spec.to_string(), "ctrl+alt+shift+cmd+f5");
    }

    #[test]
    fn bare_key_is_allowed() {
        let spec: HotkeySpec = "f12".parse().unwrap();
        assert!(spec.modifiers.is_empty());
        assert_eq!(spec.key, "f12");
    }

    #[test]
    fn rejects_malformed_bindings() {
        assert_eq!("".parse::<HotkeySpec>(), Err(HotkeySpecParseError::Empty));
        assert_eq!(
            "cmd++v".parse::<HotkeySpec>(),
            Err(HotkeySpecParseError::EmptySegment)
        );
        assert_eq!(
            "cmd+shift".parse::<HotkeySpec>(),
            Err(HotkeySpecParseError::MissingKey)
        );
        assert_eq!(
            "cmd+v+c".parse::<HotkeySpec>(),
            Err(HotkeySpecParseError::MultipleKeys("v".into(), "c".into()))
        );
        assert_eq!(
            "shift+shift+v".parse::<HotkeySpec>(),
            Err(HotkeySpecParseError::DuplicateModifier("shift".into()))
        );
    }
}
