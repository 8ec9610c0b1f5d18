use core::fmt::Write;
use embedded_graphics::drawable::Pixel;
use embedded_graphics::fonts::{Font6x8, Text};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, Primitive};
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::style::{PrimitiveStyle, TextStyleBuilder};
use heapless::String;

use crate::buffer::SampleBuffer;
use crate::config::{
    ADC_MAX, INFO_TEXT_Y, MENU_Y, SCREEN_WIDTH, WAVEFORM_HEIGHT, WAVEFORM_TOP,
};
use crate::error::{Error, Result};
use crate::estimator::Estimates;
use crate::hw::Lcd;
use crate::theme::Theme;
use crate::ui::{UiState, Zoom};

pub struct Display<LCD> {
    lcd: LCD,
}

impl<LCD> Display<LCD>
where
    LCD: Lcd,
{
    pub fn new(lcd: LCD) -> Self {
        Display { lcd }
    }

    /// Fills the whole screen with the theme background.
    pub fn clear(&mut self, theme: &Theme) -> Result<(), LCD::Error> {
        self.lcd.clear(theme.background).map_err(Error::Lcd)
    }

    /// Redraws the waveform band as one point per column.
    pub fn waveform<const LEN: usize>(
        &mut self,
        buffer: &SampleBuffer<LEN>,
        zoom: Zoom,
        theme: &Theme,
    ) -> Result<(), LCD::Error> {
        let band = Rectangle::new(
            Point::new(0, Waveform::TOP),
            Point::new(Dimension::WIDTH - 1, Waveform::BOTTOM),
        )
        .into_styled(PrimitiveStyle::with_fill(theme.background));
        self.lcd.draw(&band).map_err(Error::Lcd)?;

        for (_, point) in trace_points(buffer, zoom) {
            self.lcd
                .draw(Pixel(point, theme.waveform))
                .map_err(Error::Lcd)?;
        }
        Ok(())
    }

    pub fn info(&mut self, estimates: &Estimates, theme: &Theme) -> Result<(), LCD::Error> {
        let mut buffer = String::<48>::new();
        write!(
            &mut buffer,
            "Gain: {:.2}  Freq: {:.1} Hz",
            estimates.gain, estimates.frequency
        )
        .map_err(|_| Error::BufferWrite)?;
        self.clear_row(TextRow::INFO.y, theme)?;
        self.draw_text(&buffer, TextRow::INFO, theme.text, theme)
    }

    /// Labels of buttons A, B and C, highlighted while the theme menu is open.
    pub fn menu(&mut self, state: UiState, theme: &Theme) -> Result<(), LCD::Error> {
        let color = match state {
            UiState::Main => theme.text,
            UiState::ThemeSelect => theme.highlight,
        };
        self.clear_row(TextRow::MENU_Y, theme)?;
        for (column, label) in state.labels().iter().enumerate() {
            let position = Point::new(
                column as i32 * TextRow::MENU_COLUMN_WIDTH + TextRow::MENU_INSET,
                TextRow::MENU_Y,
            );
            self.draw_text(label, position, color, theme)?;
        }
        Ok(())
    }

    pub fn release(self) -> LCD {
        self.lcd
    }

    #[cfg(test)]
    pub(crate) fn lcd(&mut self) -> &mut LCD {
        &mut self.lcd
    }

    fn clear_row(&mut self, y: i32, theme: &Theme) -> Result<(), LCD::Error> {
        let row = Rectangle::new(
            Point::new(0, y),
            Point::new(Dimension::WIDTH - 1, y + TextRow::HEIGHT - 1),
        )
        .into_styled(PrimitiveStyle::with_fill(theme.background));
        self.lcd.draw(&row).map_err(Error::Lcd)
    }

    fn draw_text(
        &mut self,
        text: &str,
        position: Point,
        color: Rgb565,
        theme: &Theme,
    ) -> Result<(), LCD::Error> {
        let style = TextStyleBuilder::new(Font6x8)
            .text_color(color)
            .background_color(theme.background)
            .build();
        let text = Text::new(text, position).into_styled(style);
        self.lcd.draw(&text).map_err(Error::Lcd)
    }
}

/// Screen positions of the samples that fit horizontally, with their index.
///
/// Sample `i` lands at `x = floor(i * zoom)`; the walk starts at sample 1 and
/// stops at the first one past the right edge. When several samples share a
/// column only the last of them is kept.
pub fn trace_points<const LEN: usize>(
    buffer: &SampleBuffer<LEN>,
    zoom: Zoom,
) -> impl Iterator<Item = (usize, Point)> + '_ {
    let scale = zoom.get();
    let mut columns = (1..LEN)
        .map(move |index| (index, (index as f32 * scale) as i32))
        .take_while(|&(_, x)| x < Dimension::WIDTH)
        .peekable();
    core::iter::from_fn(move || loop {
        let (index, x) = columns.next()?;
        match columns.peek() {
            Some(&(_, next)) if next == x => continue,
            _ => return Some((index, Point::new(x, Waveform::y(buffer.as_slice()[index])))),
        }
    })
}

struct Dimension;

impl Dimension {
    const WIDTH: i32 = SCREEN_WIDTH as i32;
}

struct Waveform;

impl Waveform {
    const TOP: i32 = WAVEFORM_TOP;
    const HEIGHT: i32 = WAVEFORM_HEIGHT;
    const BOTTOM: i32 = Waveform::TOP + Waveform::HEIGHT - 1;

    /// Larger codes are drawn higher up.
    fn y(code: u16) -> i32 {
        Waveform::BOTTOM - map(code as u32, 0, ADC_MAX as u32, 0, Waveform::HEIGHT as u32 - 1) as i32
    }
}

struct TextRow;

impl TextRow {
    const HEIGHT: i32 = 8;
    const INFO: Point = Point::new(5, INFO_TEXT_Y);
    const MENU_Y: i32 = MENU_Y;
    const MENU_COLUMN_WIDTH: i32 = Dimension::WIDTH / 3;
    const MENU_INSET: i32 = 15;
}

fn map(to_map: u32, in_min: u32, in_max: u32, out_min: u32, out_max: u32) -> u32 {
    (to_map - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}
