//! Polled input collaborator
//!
//! The simulation never receives pushed input: each tick it asks an
//! [`InputSource`] which controls are held. Keyboard/pointer capture lives
//! outside the crate and fills a [`ControlState`] per player slot.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_PLAYERS;

/// Logical controls a player can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    Jump,
    /// Ground pound while airborne
    Down,
    Phase,
    Attack,
    Special,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::Left,
        Control::Right,
        Control::Jump,
        Control::Down,
        Control::Phase,
        Control::Attack,
        Control::Special,
    ];

    /// Case-insensitive lookup by variant name ("jump", "Attack", ...)
    pub fn from_name(name: &str) -> Option<Control> {
        Self::ALL
            .into_iter()
            .find(|c| format!("{:?}", c).eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    /// Same as `Control::Attack`
    Primary,
    /// Same as `Control::Special`
    Secondary,
}

pub trait InputSource {
    fn is_control_active(&self, control: Control) -> bool;
    fn is_pointer_button_active(&self, button: PointerButton) -> bool;
}

/// Plain held/not-held snapshot for one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub down: bool,
    pub phase: bool,
    pub attack: bool,
    pub special: bool,
    pub primary_pointer: bool,
    pub secondary_pointer: bool,
}

impl ControlState {
    pub fn set(&mut self, control: Control, active: bool) {
        match control {
            Control::Left => self.left = active,
            Control::Right => self.right = active,
            Control::Jump => self.jump = active,
            Control::Down => self.down = active,
            Control::Phase => self.phase = active,
            Control::Attack => self.attack = active,
            Control::Special => self.special = active,
        }
    }

    pub fn set_pointer(&mut self, button: PointerButton, active: bool) {
        match button {
            PointerButton::Primary => self.primary_pointer = active,
            PointerButton::Secondary => self.secondary_pointer = active,
        }
    }

    /// Builder-style helper used by scripted inputs
    pub fn with(mut self, control: Control) -> Self {
        self.set(control, true);
        self
    }
}

impl InputSource for ControlState {
    fn is_control_active(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Jump => self.jump,
            Control::Down => self.down,
            Control::Phase => self.phase,
            Control::Attack => self.attack,
            Control::Special => self.special,
        }
    }

    fn is_pointer_button_active(&self, button: PointerButton) -> bool {
        match button {
            PointerButton::Primary => self.primary_pointer,
            PointerButton::Secondary => self.secondary_pointer,
        }
    }
}

/// Input commands for a single tick, one slot per player
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub players: [ControlState; MAX_PLAYERS],
}

impl TickInput {
    /// Controls for the player in `slot` (0-based); out-of-range slots read as idle
    pub fn for_slot(&self, slot: usize) -> ControlState {
        self.players.get(slot).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_query() {
        let mut state = ControlState::default();
        state.set(Control::Jump, true);
        state.set_pointer(PointerButton::Secondary, true);

        assert!(state.is_control_active(Control::Jump));
        assert!(!state.is_control_active(Control::Attack));
        assert!(state.is_pointer_button_active(PointerButton::Secondary));

        state.set(Control::Jump, false);
        assert!(!state.is_control_active(Control::Jump));
    }

    #[test]
    fn test_control_from_name() {
        assert_eq!(Control::from_name("jump"), Some(Control::Jump));
        assert_eq!(Control::from_name("SPECIAL"), Some(Control::Special));
        assert_eq!(Control::from_name("dash"), None);
    }

    #[test]
    fn test_out_of_range_slot_is_idle() {
        let input = TickInput::default();
        assert_eq!(input.for_slot(17), ControlState::default());
    }
}
