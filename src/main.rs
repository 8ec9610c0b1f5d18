#![no_main]
#![no_std]

use lib as _;

use lib::config::{SAMPLE_COUNT, SAMPLE_RATE_HZ};
use lib::display::Display;
use lib::hw::{init_clock, init_lcd, FrontEnd, HwButtons, HwLcd, LcdInterface, MonoTimer};
use lib::scope::Scope;
use lib::ui::Buttons;
use rtic::app;
use stm32g0xx_hal::delay::DelayExt;
use stm32g0xx_hal::gpio::{GpioExt, Speed};

#[app(device = stm32g0xx_hal::stm32, peripherals = true)]
const APP: () = {
    struct Resources {
        scope: Scope<SAMPLE_COUNT>,
        display: Display<HwLcd>,
        front_end: FrontEnd,
        buttons: HwButtons,
        clock: MonoTimer,
    }

    #[init]
    fn init(cx: init::Context) -> init::LateResources {
        let core: rtic::export::Peripherals = cx.core;
        let device: stm32g0xx_hal::stm32::Peripherals = cx.device;

        // Clock
        let mut rcc = init_clock(device.RCC);
        let mut delay = core.SYST.delay(&mut rcc);

        // GPIO
        let gpioa = device.GPIOA.split(&mut rcc);
        let gpiob = device.GPIOB.split(&mut rcc);

        // LCD
        let interface = LcdInterface::new(
            gpiob.pb0.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb1.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb2.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb3.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb4.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb5.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb6.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb7.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb8.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb9.into_push_pull_output().set_speed(Speed::VeryHigh),
        );
        let lcd = init_lcd(
            interface,
            gpioa.pa4.into_push_pull_output(),
            gpioa.pa5.into_push_pull_output(),
            &mut delay,
        )
        .unwrap();
        let display = Display::new(lcd);

        // ADC
        let front_end = FrontEnd::new(
            device.ADC,
            gpioa.pa0.into_analog(),
            gpioa.pa1.into_analog(),
            &mut rcc,
        );

        // Buttons
        let buttons = Buttons::new(
            gpiob.pb10.into_pull_up_input(),
            gpiob.pb11.into_pull_up_input(),
            gpiob.pb12.into_pull_up_input(),
        );

        // Time base
        let mut clock = MonoTimer::new(device.TIM3, &mut rcc);
        clock.start();

        defmt::info!(
            "scope ready, {=usize} samples at {=u32} Hz",
            SAMPLE_COUNT,
            SAMPLE_RATE_HZ
        );

        init::LateResources {
            scope: Scope::new(SAMPLE_RATE_HZ),
            display,
            front_end,
            buttons,
            clock,
        }
    }

    #[idle(resources = [scope, display, front_end, buttons, clock])]
    fn idle(cx: idle::Context) -> ! {
        let scope: &mut Scope<SAMPLE_COUNT> = cx.resources.scope;
        let display: &mut Display<HwLcd> = cx.resources.display;
        let front_end: &mut FrontEnd = cx.resources.front_end;
        let buttons: &mut HwButtons = cx.resources.buttons;
        let clock: &mut MonoTimer = cx.resources.clock;

        scope.start(display);
        loop {
            scope.cycle(front_end, clock, buttons, display);
        }
    }

    #[task(binds = TIM3, priority = 1)]
    fn tim3(_: tim3::Context) {
        MonoTimer::on_overflow();
    }
};
