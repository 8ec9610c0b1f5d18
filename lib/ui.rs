//! Three-button menu.
//!
//! In [`UiState::Main`] the buttons zoom in, zoom out and open the theme
//! menu; in [`UiState::ThemeSelect`] they step to the previous theme, the next
//! theme and back. Buttons are sampled once per cycle and at most one action
//! is taken per debounce interval, with A taking priority over B over C.

use embedded_hal::digital::v2::InputPin;

use crate::config::{DEBOUNCE_INTERVAL_US, ZOOM_FLOOR, ZOOM_INITIAL, ZOOM_STEP};
use crate::theme::{Theme, ThemeIndex};
use crate::time::Instant;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum UiState {
    Main,
    ThemeSelect,
}

impl UiState {
    /// Menu labels for buttons A, B and C.
    pub fn labels(self) -> [&'static str; 3] {
        match self {
            UiState::Main => ["Zoom+", "Zoom-", "Theme"],
            UiState::ThemeSelect => ["Former", "Next", "Back"],
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Action {
    ZoomIn,
    ZoomOut,
    OpenThemes,
    PreviousTheme,
    NextTheme,
    Back,
}

impl Action {
    /// Theme menu actions repaint the whole screen so nothing of the old
    /// palette stays behind.
    pub fn clears_screen(self) -> bool {
        matches!(
            self,
            Action::PreviousTheme | Action::NextTheme | Action::Back
        )
    }
}

/// Buttons held down during one poll.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Pressed {
    pub a: bool,
    pub b: bool,
    pub c: bool,
}

pub trait ButtonPad {
    fn pressed(&mut self) -> Pressed;
}

/// Active-low buttons on three input pins. A pin that fails to read keeps
/// its previous state.
pub struct Buttons<A, B, C> {
    a: A,
    b: B,
    c: C,
    last: Pressed,
}

impl<A, B, C> Buttons<A, B, C>
where
    A: InputPin,
    B: InputPin,
    C: InputPin,
{
    pub fn new(a: A, b: B, c: C) -> Self {
        Buttons {
            a,
            b,
            c,
            last: Pressed::default(),
        }
    }
}

impl<A, B, C> ButtonPad for Buttons<A, B, C>
where
    A: InputPin,
    B: InputPin,
    C: InputPin,
{
    fn pressed(&mut self) -> Pressed {
        let pressed = Pressed {
            a: is_pressed(&self.a, self.last.a),
            b: is_pressed(&self.b, self.last.b),
            c: is_pressed(&self.c, self.last.c),
        };
        self.last = pressed;
        pressed
    }
}

fn is_pressed<P: InputPin>(pin: &P, previous: bool) -> bool {
    pin.is_low().unwrap_or_else(|_| {
        warn!("button read failed");
        previous
    })
}

/// Horizontal pixels per sample, never below [`ZOOM_FLOOR`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Zoom(f32);

impl Zoom {
    pub fn get(self) -> f32 {
        self.0
    }

    /// Saturates at `f32::MAX` so a long hold never reaches infinity and
    /// [`Zoom::zoom_out`] can always bring it back.
    pub fn zoom_in(self) -> Self {
        Zoom((self.0 * ZOOM_STEP).min(f32::MAX))
    }

    pub fn zoom_out(self) -> Self {
        Zoom((self.0 / ZOOM_STEP).max(ZOOM_FLOOR))
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Zoom(ZOOM_INITIAL)
    }
}

pub struct Debounce {
    last_action: Option<Instant>,
    min_interval_us: u32,
}

impl Debounce {
    pub fn new(min_interval_us: u32) -> Self {
        Debounce {
            last_action: None,
            min_interval_us,
        }
    }

    /// The last action is forgotten once it is more than half the counter
    /// period old, so a press is never rejected after the timestamp wraps.
    /// Requires polling at least once per half period (about 35 minutes).
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last_action {
            Some(last) if now.ticks_until(last) > 0 => {
                self.last_action = None;
                true
            }
            Some(last) => now.elapsed_since(last) > self.min_interval_us,
            None => true,
        }
    }

    pub fn accept(&mut self, now: Instant) {
        self.last_action = Some(now);
    }
}

pub struct Ui {
    state: UiState,
    zoom: Zoom,
    theme: ThemeIndex,
    debounce: Debounce,
}

impl Ui {
    pub fn new() -> Self {
        Ui {
            state: UiState::Main,
            zoom: Zoom::default(),
            theme: ThemeIndex::default(),
            debounce: Debounce::new(DEBOUNCE_INTERVAL_US),
        }
    }

    pub fn state(&self) -> UiState {
        self.state
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn theme_index(&self) -> ThemeIndex {
        self.theme
    }

    pub fn theme(&self) -> &'static Theme {
        self.theme.theme()
    }

    /// Applies the action selected by `pressed`, if the debounce interval has
    /// passed since the last one.
    pub fn handle(&mut self, now: Instant, pressed: Pressed) -> Option<Action> {
        if !self.debounce.ready(now) {
            return None;
        }
        let action = self.select(pressed)?;
        match action {
            Action::ZoomIn => self.zoom = self.zoom.zoom_in(),
            Action::ZoomOut => self.zoom = self.zoom.zoom_out(),
            Action::OpenThemes => self.state = UiState::ThemeSelect,
            Action::PreviousTheme => self.theme = self.theme.previous(),
            Action::NextTheme => self.theme = self.theme.next(),
            Action::Back => self.state = UiState::Main,
        }
        self.debounce.accept(now);
        debug!(
            "ui action, zoom {=f32} theme {=usize}",
            self.zoom.get(),
            self.theme.get()
        );
        Some(action)
    }

    fn select(&self, pressed: Pressed) -> Option<Action> {
        let [a, b, c] = match self.state {
            UiState::Main => [Action::ZoomIn, Action::ZoomOut, Action::OpenThemes],
            UiState::ThemeSelect => [Action::PreviousTheme, Action::NextTheme, Action::Back],
        };
        if pressed.a {
            Some(a)
        } else if pressed.b {
            Some(b)
        } else if pressed.c {
            Some(c)
        } else {
            None
        }
    }
}

impl Default for Ui {
    fn default() -> Self {
        Ui::new()
    }
}
