//! Button actions and the action table compiled from a [`Config`].

use crate::config::{ActionConfig, Config};
use crate::keycode::{button_label, key_label};
use crate::modifier::ModifierSet;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// What a physical mouse button does once remapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Re-emit the press/release as another mouse button.
    RemapToButton(u32),
    /// Swallow the button and send a key chord on press.
    SendKeyCombo { key: u16, modifiers: ModifierSet },
    /// Leave the event alone.
    PassThrough,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::RemapToButton(button) => write!(f, "Mouse {}", button_label(*button)),
            Action::SendKeyCombo { key, modifiers } if modifiers.is_empty() => {
                f.write_str(&key_label(*key))
            }
            Action::SendKeyCombo { key, modifiers } => {
                write!(f, "{}+{}", modifiers, key_label(*key))
            }
            Action::PassThrough => f.write_str("Pass through"),
        }
    }
}

/// Problem with a single config entry. None of these are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    /// The entry was dropped because its `type` is not recognised.
    #[error("button {button}: unknown action type {kind:?}, mapping ignored")]
    UnknownActionType { button: u32, kind: String },

    /// The entry was dropped because a field its type needs is absent.
    #[error("button {button}: {kind:?} action without {field}, mapping ignored")]
    MissingField {
        button: u32,
        kind: &'static str,
        field: &'static str,
    },

    /// The modifier was skipped; the rest of the entry still applies.
    #[error("button {button}: unknown modifier {name:?} ignored")]
    UnknownModifier { button: u32, name: String },
}

/// Frozen mapping from button id to [`Action`].
///
/// Built once before interception starts and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTable {
    actions: BTreeMap<u32, Action>,
}

impl ActionTable {
    /// Compile `config` into a table and log every issue found.
    pub fn from_config(config: &Config) -> Self {
        let (table, issues) = Self::build(config);
        for issue in &issues {
            log::warn!("{}", issue);
        }
        table
    }

    /// Compile `config` into a table, returning the issues alongside.
    ///
    /// Entries are applied in order, so a later mapping for the same button
    /// replaces an earlier one. Invalid entries are skipped without
    /// disturbing the remaining ones.
    pub fn build(config: &Config) -> (Self, Vec<ConfigIssue>) {
        let mut actions = BTreeMap::new();
        let mut issues = Vec::new();

        for mapping in &config.button_mappings {
            if let Some(action) = compile_action(mapping.button, &mapping.action, &mut issues) {
                actions.insert(mapping.button, action);
            }
        }

        (Self { actions }, issues)
    }

    /// Action bound to `button`, if any.
    #[inline]
    pub fn get(&self, button: u32) -> Option<&Action> {
        self.actions.get(&button)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Iterate in ascending button order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Action)> {
        self.actions.iter().map(|(button, action)| (*button, action))
    }

    /// One `"  <button> -> <action>"` line per mapping, ascending by button.
    pub fn describe(&self) -> Vec<String> {
        self.iter()
            .map(|(button, action)| format!("  {} -> {}", button_label(button), action))
            .collect()
    }
}

fn compile_action(
    button: u32,
    config: &ActionConfig,
    issues: &mut Vec<ConfigIssue>,
) -> Option<Action> {
    match config.kind.as_str() {
        "key" => {
            let Some(key) = config.key_code else {
                issues.push(ConfigIssue::MissingField {
                    button,
                    kind: "key",
                    field: "keyCode",
                });
                return None;
            };
            let names = config.modifiers.as_deref().unwrap_or_default();
            let (modifiers, unknown) = ModifierSet::from_names(names);
            issues.extend(
                unknown
                    .into_iter()
                    .map(|name| ConfigIssue::UnknownModifier { button, name }),
            );
            Some(Action::SendKeyCombo { key, modifiers })
        }
        "mouse" => match config.mouse_button {
            Some(target) => Some(Action::RemapToButton(target)),
            None => {
                issues.push(ConfigIssue::MissingField {
                    button,
                    kind: "mouse",
                    field: "mouseButton",
                });
                None
            }
        },
        "passthrough" => Some(Action::PassThrough),
        other => {
            issues.push(ConfigIssue::UnknownActionType {
                button,
                kind: other.to_string(),
            });
            None
        }
    }
}
