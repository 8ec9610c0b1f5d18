use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Theme {
    pub background: Rgb565,
    pub waveform: Rgb565,
    pub text: Rgb565,
    pub highlight: Rgb565,
}

pub const THEMES: [Theme; 4] = [
    Theme {
        background: Rgb565::BLACK,
        waveform: Rgb565::GREEN,
        text: Rgb565::WHITE,
        highlight: Rgb565::YELLOW,
    },
    Theme {
        background: Rgb565::WHITE,
        waveform: Rgb565::BLUE,
        text: Rgb565::BLACK,
        highlight: Rgb565::RED,
    },
    Theme {
        background: Color::PURPLE,
        waveform: Rgb565::YELLOW,
        text: Rgb565::WHITE,
        highlight: Rgb565::CYAN,
    },
    Theme {
        background: Color::NAVY,
        waveform: Rgb565::CYAN,
        text: Rgb565::WHITE,
        highlight: Rgb565::MAGENTA,
    },
];

struct Color;

impl Color {
    // 128, 0, 128
    const PURPLE: Rgb565 = Rgb565::new(16, 0, 16);
    // 20, 20, 40
    const NAVY: Rgb565 = Rgb565::new(2, 5, 5);
}

/// Position in [`THEMES`], always in range.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ThemeIndex(usize);

impl ThemeIndex {
    pub fn get(self) -> usize {
        self.0
    }

    pub fn theme(self) -> &'static Theme {
        &THEMES[self.0]
    }

    pub fn next(self) -> Self {
        ThemeIndex((self.0 + 1) % THEMES.len())
    }

    pub fn previous(self) -> Self {
        ThemeIndex((self.0 + THEMES.len() - 1) % THEMES.len())
    }
}
