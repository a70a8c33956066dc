//! Word-prefix targeting.
//!
//! The player locks onto an enemy with the first letter of its word and then
//! finishes the word one keystroke at a time. Wrong letters are swallowed.

use crate::sim::entities::{Enemy, EnemyId};

/// A key press as the simulation sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Always lowercase ASCII.
    Letter(char),
    Backspace,
    Escape,
    Enter,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value. Letters are folded to lowercase.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Backspace" => Key::Backspace,
            "Escape" => Key::Escape,
            "Enter" => Key::Enter,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => {
                        Key::Letter(c.to_ascii_lowercase())
                    }
                    _ => Key::Other,
                }
            }
        }
    }
}

/// `Idle` always has an empty prefix; `Locked` always a non-empty one that
/// the target's word starts with.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Targeting {
    #[default]
    Idle,
    Locked { target: EnemyId, typed: String },
}

/// What a keystroke asks the session to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// No state change.
    Ignored,
    /// A letter matched: attack `target` with `progress` letters typed.
    /// `finished` marks the kill.
    Strike {
        target: EnemyId,
        progress: usize,
        finished: bool,
    },
    /// The prefix got shorter but the lock holds.
    Trimmed,
    /// The lock was released.
    Released,
}

impl Targeting {
    pub fn typed(&self) -> &str {
        match self {
            Targeting::Idle => "",
            Targeting::Locked { typed, .. } => typed,
        }
    }

    pub fn target(&self) -> Option<EnemyId> {
        match self {
            Targeting::Idle => None,
            Targeting::Locked { target, .. } => Some(*target),
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, Targeting::Locked { .. })
    }

    pub fn clear(&mut self) {
        *self = Targeting::Idle;
    }

    /// Applies one key. `enemies` is the live set in spawn order; only those
    /// that `is_candidate` accepts may become a fresh lock.
    pub fn on_key(
        &mut self,
        key: Key,
        enemies: &[Enemy],
        is_candidate: impl Fn(&Enemy) -> bool,
    ) -> KeyOutcome {
        match key {
            Key::Letter(c) => self.on_letter(c, enemies, is_candidate),
            Key::Backspace => self.on_backspace(),
            Key::Escape if self.is_locked() => {
                self.clear();
                KeyOutcome::Released
            }
            Key::Escape | Key::Enter | Key::Other => KeyOutcome::Ignored,
        }
    }

    fn on_letter(
        &mut self,
        c: char,
        enemies: &[Enemy],
        is_candidate: impl Fn(&Enemy) -> bool,
    ) -> KeyOutcome {
        match self {
            Targeting::Idle => {
                let Some(enemy) = enemies
                    .iter()
                    .find(|e| is_candidate(*e) && e.word.starts_with(c))
                else {
                    return KeyOutcome::Ignored;
                };
                let finished = enemy.word.len() == 1;
                let target = enemy.id;
                if !finished {
                    *self = Targeting::Locked {
                        target,
                        typed: c.to_string(),
                    };
                }
                KeyOutcome::Strike {
                    target,
                    progress: 1,
                    finished,
                }
            }
            Targeting::Locked { target, typed } => {
                let target = *target;
                let Some(enemy) = enemies.iter().find(|e| e.id == target) else {
                    // target died under us; the keystroke is spent
                    log::trace!("dropping {c:?}: locked enemy {target} is gone");
                    self.clear();
                    return KeyOutcome::Released;
                };
                if enemy.word[typed.len()..].chars().next() != Some(c) {
                    return KeyOutcome::Ignored;
                }
                typed.push(c);
                let progress = typed.len();
                let finished = progress == enemy.word.len();
                if finished {
                    self.clear();
                }
                KeyOutcome::Strike {
                    target,
                    progress,
                    finished,
                }
            }
        }
    }

    fn on_backspace(&mut self) -> KeyOutcome {
        match self {
            Targeting::Idle => KeyOutcome::Ignored,
            Targeting::Locked { typed, .. } => {
                typed.pop();
                if typed.is_empty() {
                    self.clear();
                    KeyOutcome::Released
                } else {
                    KeyOutcome::Trimmed
                }
            }
        }
    }
}
