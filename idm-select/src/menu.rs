//! Bulk-action menu open/close state.
//!
//! While the menu is open it holds a [`CaptureGuard`] from the host's
//! [`InputCapture`], so the host routes Escape/Tab and outside activity to the
//! menu first. Closing the menu, or dropping it, releases the capture.

use std::cell::Cell;
use std::rc::Rc;

/// Registry the event loop consults to know whether a menu wants first look
/// at input. Cloning shares the same registry.
#[derive(Debug, Clone, Default)]
pub struct InputCapture {
    holders: Rc<Cell<usize>>,
}

impl InputCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&self) -> CaptureGuard {
        self.holders.set(self.holders.get() + 1);
        CaptureGuard {
            holders: Rc::clone(&self.holders),
        }
    }

    pub fn is_active(&self) -> bool {
        self.holders.get() > 0
    }
}

/// Releases its capture when dropped.
#[derive(Debug)]
pub struct CaptureGuard {
    holders: Rc<Cell<usize>>,
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        self.holders.set(self.holders.get().saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    /// Activation of the menu toggle itself. Never counts as outside activity.
    ToggleClick,
    Escape,
    Tab,
    /// Any other pointer or key activity; `inside` is true when it targets the
    /// open menu.
    Activity { inside: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    /// Input was not for the menu; the host handles it normally.
    Ignored,
    Opened,
    /// Menu closed by a second activation of the toggle.
    ClosedByToggle,
    /// Menu closed. `refocus_toggle` asks the host to return focus to the
    /// toggle (keyboard dismissal).
    Closed { refocus_toggle: bool },
}

impl MenuOutcome {
    /// Whether the host must stop propagating the input.
    pub fn is_consumed(self) -> bool {
        match self {
            MenuOutcome::Ignored => false,
            MenuOutcome::Opened | MenuOutcome::ClosedByToggle => true,
            MenuOutcome::Closed { refocus_toggle } => refocus_toggle,
        }
    }
}

#[derive(Debug, Default)]
pub struct BulkMenu {
    capture: Option<CaptureGuard>,
    highlighted: usize,
}

impl BulkMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.capture.is_some()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn toggle(&mut self, capture: &InputCapture) -> MenuOutcome {
        if self.is_open() {
            self.close();
            MenuOutcome::ClosedByToggle
        } else {
            self.capture = Some(capture.acquire());
            self.highlighted = 0;
            MenuOutcome::Opened
        }
    }

    pub fn close(&mut self) {
        self.capture = None;
    }

    pub fn handle_input(&mut self, input: MenuInput, capture: &InputCapture) -> MenuOutcome {
        match input {
            MenuInput::ToggleClick => self.toggle(capture),
            _ if !self.is_open() => MenuOutcome::Ignored,
            MenuInput::Escape | MenuInput::Tab => {
                self.close();
                MenuOutcome::Closed {
                    refocus_toggle: true,
                }
            }
            MenuInput::Activity { inside: true } => MenuOutcome::Ignored,
            MenuInput::Activity { inside: false } => {
                self.close();
                MenuOutcome::Closed {
                    refocus_toggle: false,
                }
            }
        }
    }

    pub fn highlight_next(&mut self, item_count: usize) {
        if item_count == 0 {
            return;
        }
        self.highlighted = (self.highlighted + 1) % item_count;
    }

    pub fn highlight_previous(&mut self, item_count: usize) {
        if item_count == 0 {
            return;
        }
        self.highlighted = if self.highlighted == 0 {
            item_count - 1
        } else {
            self.highlighted - 1
        };
    }
}
