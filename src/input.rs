//! Touch signal for the desktop host.
//!
//! The panel's controller only reports "pressed or not"; here that signal is
//! held while the left mouse button, the space bar or any touch contact is
//! down.

use std::collections::HashSet;

use log::trace;
use winit::event::{ElementState, MouseButton, TouchPhase, WindowEvent};
use winit::keyboard::{Key, NamedKey};

#[derive(Debug, Default, Clone)]
pub struct TouchState {
    pointer_down: bool,
    key_down: bool,
    contacts: HashSet<u64>,
}

impl TouchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a window event into the pressed signal. Returns `true` if the
    /// event was an input this state tracks.
    pub fn handle(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.set_pointer(*state == ElementState::Pressed),
            WindowEvent::KeyboardInput { event, .. }
                if event.logical_key == Key::Named(NamedKey::Space) =>
            {
                self.set_key(event.state == ElementState::Pressed)
            }
            WindowEvent::Touch(touch) => self.touch(touch.id, touch.phase),
            WindowEvent::Focused(false) => self.release_all(),
            _ => return false,
        }
        true
    }

    pub fn set_pointer(&mut self, down: bool) {
        self.pointer_down = down;
    }

    pub fn set_key(&mut self, down: bool) {
        self.key_down = down;
    }

    pub fn touch(&mut self, id: u64, phase: TouchPhase) {
        match phase {
            TouchPhase::Started | TouchPhase::Moved => {
                self.contacts.insert(id);
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.contacts.remove(&id);
            }
        }
    }

    pub fn release_all(&mut self) {
        self.pointer_down = false;
        self.key_down = false;
        self.contacts.clear();
    }

    pub fn is_pressed(&self) -> bool {
        self.pointer_down || self.key_down || !self.contacts.is_empty()
    }
}

/// Enforces a minimum interval between accepted presses
#[derive(Debug, Clone)]
pub struct Debouncer {
    interval_ms: u64,
    last_accepted: Option<u64>,
}

impl Debouncer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            last_accepted: None,
        }
    }

    /// Accepts a press at `now` if more than the interval has passed since the
    /// last accepted one.
    pub fn accept(&mut self, now: u64) -> bool {
        let ready = match self.last_accepted {
            Some(last) => now.saturating_sub(last) > self.interval_ms,
            None => true,
        };
        if ready {
            self.last_accepted = Some(now);
        } else {
            trace!("press at {now} ms ignored by debounce");
        }
        ready
    }
}
