//! Discrete input events from the host

/// One key-level event. Applied to the state immediately, between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Jump,
    DuckStart,
    DuckEnd,
    PauseToggle,
    Restart,
    MuteToggle,
    DebugToggle,
    ContrastToggle,
    /// Number keys 1..=3; anything else is ignored
    SelectDifficulty(u8),
}

impl InputEvent {
    /// Conventional key mapping for hosts that deliver key names
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Space" | "ArrowUp" | "Up" | "w" | "W" => Some(InputEvent::Jump),
            "p" | "P" | "Escape" => Some(InputEvent::PauseToggle),
            "r" | "R" => Some(InputEvent::Restart),
            "m" | "M" => Some(InputEvent::MuteToggle),
            "F3" | "`" => Some(InputEvent::DebugToggle),
            "c" | "C" => Some(InputEvent::ContrastToggle),
            "1" => Some(InputEvent::SelectDifficulty(1)),
            "2" => Some(InputEvent::SelectDifficulty(2)),
            "3" => Some(InputEvent::SelectDifficulty(3)),
            _ => None,
        }
    }

    /// Key-down/key-up pairs that map to duck events
    pub fn duck_from_key(key: &str, pressed: bool) -> Option<Self> {
        match key {
            "ArrowDown" | "Down" | "s" | "S" => Some(if pressed {
                InputEvent::DuckStart
            } else {
                InputEvent::DuckEnd
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(InputEvent::from_key("Space"), Some(InputEvent::Jump));
        assert_eq!(InputEvent::from_key("2"), Some(InputEvent::SelectDifficulty(2)));
        assert_eq!(InputEvent::from_key("x"), None);
        assert_eq!(InputEvent::duck_from_key("Down", true), Some(InputEvent::DuckStart));
        assert_eq!(InputEvent::duck_from_key("Down", false), Some(InputEvent::DuckEnd));
        assert_eq!(InputEvent::duck_from_key("Up", true), None);
    }
}
