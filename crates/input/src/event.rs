/// Physical keys the tracer responds to, decoupled from any windowing
/// toolkit. The desktop shell maps its native key codes into these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    ShiftLeft,
    Escape,
}

impl Key {
    /// Whether this key drives camera translation.
    pub fn is_movement(self) -> bool {
        !matches!(self, Self::Escape)
    }
}

/// A typed input event from the windowing collaborator.
///
/// One event per native window/device event; the frame orchestrator drains
/// all pending events before each integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// External quit signal (window close or Escape).
    Quit,
    /// Key transition. Repeats while held count as presses.
    Key { key: Key, pressed: bool },
    /// Relative pointer motion. `right_held` is the right-button state at
    /// the time of the motion; motion without it is hover, not look.
    PointerMotion { dx: f32, dy: f32, right_held: bool },
    /// Signed scroll magnitude (positive dollies toward the view direction).
    Scroll { delta: f32 },
}

impl InputEvent {
    /// Whether this event changes the viewpoint and therefore must discard
    /// the accumulated radiance estimate.
    ///
    /// Key releases count: they change the velocity integral, which moves
    /// the camera on the following frames.
    pub fn is_camera_affecting(&self) -> bool {
        match self {
            Self::Key { key, .. } => key.is_movement(),
            Self::PointerMotion { right_held, .. } => *right_held,
            Self::Scroll { .. } => true,
            Self::Quit => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_keys_affect_camera() {
        for key in [Key::KeyW, Key::ArrowLeft, Key::Space, Key::ShiftLeft] {
            assert!(InputEvent::Key { key, pressed: true }.is_camera_affecting());
            assert!(
                InputEvent::Key {
                    key,
                    pressed: false
                }
                .is_camera_affecting()
            );
        }
    }

    #[test]
    fn escape_and_quit_do_not_affect_camera() {
        assert!(
            !InputEvent::Key {
                key: Key::Escape,
                pressed: true
            }
            .is_camera_affecting()
        );
        assert!(!InputEvent::Quit.is_camera_affecting());
    }

    #[test]
    fn pointer_motion_requires_right_button() {
        assert!(
            InputEvent::PointerMotion {
                dx: 2.0,
                dy: 0.0,
                right_held: true
            }
            .is_camera_affecting()
        );
        assert!(
            !InputEvent::PointerMotion {
                dx: 2.0,
                dy: 0.0,
                right_held: false
            }
            .is_camera_affecting()
        );
    }

    #[test]
    fn scroll_affects_camera() {
        assert!(InputEvent::Scroll { delta: -1.0 }.is_camera_affecting());
    }
}
