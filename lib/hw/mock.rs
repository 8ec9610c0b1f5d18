//! Host stand-ins for the board peripherals.

use core::convert::Infallible;
use std::cell::Cell;
use std::rc::Rc;

use embedded_graphics::drawable::{Drawable, Pixel};
use embedded_graphics::geometry::Size;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::DrawTarget;
use embedded_hal::digital::v2::InputPin;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::hw::{AnalogSource, Clock, Input, Lcd};
use crate::time::Instant;

/// Manually driven clock. Every `now()` first advances time by `step` so busy
/// waits terminate; clones share the same time base.
#[derive(Clone)]
pub struct FakeClock {
    now: Rc<Cell<u32>>,
    step: u32,
}

impl FakeClock {
    pub fn new(start: u32, step: u32) -> Self {
        FakeClock {
            now: Rc::new(Cell::new(start)),
            step,
        }
    }

    pub fn micros(&self) -> u32 {
        self.now.get()
    }

    pub fn advance(&self, micros: u32) {
        self.now.set(self.now.get().wrapping_add(micros));
    }
}

impl Clock for FakeClock {
    fn now(&mut self) -> Instant {
        self.advance(self.step);
        Instant::from_micros(self.now.get())
    }
}

type SignalFn = Box<dyn FnMut(usize) -> Result<u16, ()>>;
type CostFn = Box<dyn Fn(usize) -> u32>;

/// ADC producing signal codes from a closure indexed by read number, and gain
/// codes from a script whose last entry repeats.
pub struct FakeAdc {
    signal: SignalFn,
    gain: Vec<Result<u16, ()>>,
    clock: Option<(FakeClock, CostFn)>,
    reads: usize,
    pub read_times: Vec<u32>,
    pub gain_reads: usize,
}

impl FakeAdc {
    pub fn constant(code: u16) -> Self {
        FakeAdc::from_fn(move |_| Ok(code))
    }

    pub fn from_fn<F>(signal: F) -> Self
    where
        F: FnMut(usize) -> Result<u16, ()> + 'static,
    {
        FakeAdc {
            signal: Box::new(signal),
            gain: vec![Ok(0)],
            clock: None,
            reads: 0,
            read_times: Vec::new(),
            gain_reads: 0,
        }
    }

    pub fn with_gain(mut self, gain: Vec<Result<u16, ()>>) -> Self {
        self.gain = gain;
        self
    }

    /// Makes every signal read consume `cost(read_number)` microseconds.
    pub fn with_clock<F>(mut self, clock: FakeClock, cost: F) -> Self
    where
        F: Fn(usize) -> u32 + 'static,
    {
        self.clock = Some((clock, Box::new(cost)));
        self
    }
}

impl AnalogSource for FakeAdc {
    type Error = ();

    fn read(&mut self, input: Input) -> Result<u16, ()> {
        match input {
            Input::Signal => {
                let index = self.reads;
                self.reads += 1;
                if let Some((clock, cost)) = &self.clock {
                    self.read_times.push(clock.micros());
                    clock.advance(cost(index));
                }
                (self.signal)(index)
            }
            Input::Gain => {
                let step = self.gain_reads.min(self.gain.len() - 1);
                self.gain_reads += 1;
                self.gain[step]
            }
        }
    }
}

/// Input pin whose level is set from the test. `None` makes reads fail.
#[derive(Clone)]
pub struct FakePin(Rc<Cell<Option<bool>>>);

impl FakePin {
    pub fn released() -> Self {
        FakePin(Rc::new(Cell::new(Some(true))))
    }

    pub fn press(&self) {
        self.0.set(Some(false));
    }

    pub fn release(&self) {
        self.0.set(Some(true));
    }

    pub fn break_wire(&self) {
        self.0.set(None);
    }
}

impl InputPin for FakePin {
    type Error = ();

    fn is_high(&self) -> Result<bool, ()> {
        self.0.get().ok_or(())
    }

    fn is_low(&self) -> Result<bool, ()> {
        self.0.get().map(|high| !high).ok_or(())
    }
}

/// In-memory frame buffer of the screen size.
pub struct Canvas {
    pixels: Vec<Rgb565>,
}

impl Canvas {
    const WIDTH: usize = SCREEN_WIDTH as usize;
    const HEIGHT: usize = SCREEN_HEIGHT as usize;

    pub fn new() -> Self {
        Canvas {
            pixels: vec![Rgb565::new(0, 0, 0); Canvas::WIDTH * Canvas::HEIGHT],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb565 {
        self.pixels[y * Canvas::WIDTH + x]
    }

    /// Pixels of `color` within rows `[top, bottom)`.
    pub fn points_in_rows(&self, color: Rgb565, top: usize, bottom: usize) -> Vec<(usize, usize)> {
        let mut points = Vec::new();
        for y in top..bottom {
            for x in 0..Canvas::WIDTH {
                if self.pixel(x, y) == color {
                    points.push((x, y));
                }
            }
        }
        points
    }

    pub fn fill(&mut self, color: Rgb565) {
        self.pixels.iter_mut().for_each(|pixel| *pixel = color);
    }
}

impl DrawTarget<Rgb565> for Canvas {
    type Error = Infallible;

    fn draw_pixel(&mut self, Pixel(point, color): Pixel<Rgb565>) -> Result<(), Infallible> {
        let (x, y) = (point.x, point.y);
        if x >= 0 && y >= 0 && (x as usize) < Canvas::WIDTH && (y as usize) < Canvas::HEIGHT {
            self.pixels[y as usize * Canvas::WIDTH + x as usize] = color;
        }
        Ok(())
    }

    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)
    }
}

/// LCD backed by a [`Canvas`]. Setting `fail` makes every call error out
/// without touching the canvas.
pub struct MockLcd {
    pub canvas: Canvas,
    pub fail: bool,
    pub clears: usize,
}

impl MockLcd {
    pub fn new() -> Self {
        MockLcd {
            canvas: Canvas::new(),
            fail: false,
            clears: 0,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct BusError;

impl Lcd for MockLcd {
    type Error = BusError;

    fn clear(&mut self, color: Rgb565) -> Result<(), BusError> {
        if self.fail {
            return Err(BusError);
        }
        self.clears += 1;
        self.canvas.fill(color);
        Ok(())
    }

    fn draw<D: Drawable<Rgb565>>(&mut self, drawable: D) -> Result<(), BusError> {
        if self.fail {
            return Err(BusError);
        }
        match drawable.draw(&mut self.canvas) {
            Ok(()) => Ok(()),
            Err(never) => match never {},
        }
    }
}
