#![no_main]
#![no_std]

//! Drives a button handler object through a gate.
//!
//! `Button::on_edge` needs `&mut self`, but the EXTI0 vector only gets a bare
//! `extern "C" fn()`. The button binds its method to a gate in `init`, and the
//! interrupt only ever sees the gate.

#[rtic::app(
    device = hal::pac,
    peripherals = true,
    dispatchers = [SPI1]
)]
mod app {
    use fugit::Instant;
    use hal::{
        gpio::{Edge, Input, Output, PA0, PA5},
        pac,
        prelude::*,
        timer,
    };
    use heapless::mpmc::Q8;
    use stm32f4xx_hal as hal;

    use irq_gate::{dbg, Gate};

    type Stamp = Instant<u32, 1, 1_000_000>;

    /// Press timestamps, produced by the gate and drained by `idle`.
    static PRESSES: Q8<Stamp> = Q8::new();

    pub struct Button {
        pin: PA0<Input>,
        led: PA5<Output>,
    }

    impl Button {
        fn on_edge(&mut self) {
            self.pin.clear_interrupt_pending_bit();
            self.led.toggle();
            PRESSES.enqueue(monotonics::now()).ok();
        }
    }

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        gate: Gate,
    }

    #[monotonic(binds = TIM2, default = true)]
    type MicrosecMono = timer::MonoTimerUs<pac::TIM2>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        dbg::init!();
        dbg::println!("init");

        let mut dp = ctx.device;

        let rcc = dp.RCC.constrain();
        let clocks = rcc.cfgr.use_hse(8.MHz()).sysclk(96.MHz()).freeze();

        let mono = dp.TIM2.monotonic_us(&clocks);

        let mut syscfg = dp.SYSCFG.constrain();
        let gpioa = dp.GPIOA.split();

        let mut pin = gpioa.pa0.into_pull_down_input();
        pin.make_interrupt_source(&mut syscfg);
        pin.trigger_on_edge(&mut dp.EXTI, Edge::Rising);
        pin.enable_interrupt(&mut dp.EXTI);

        let mut led = gpioa.pa5.into_push_pull_output();
        led.set_high(); // Turn off

        let button = cortex_m::singleton!(: Button = Button { pin, led })
            .expect("May only call init once");

        // The button lives in a singleton and only the gate touches it from
        // here on.
        let gate = unsafe {
            irq_gate::allocate_method_gate(Button::on_edge, button as *mut _)
        }
        .expect("gate pool exhausted");
        dbg::println!("button gate bound, {} in use", irq_gate::GATES.allocated());

        dbg::println!("init end");
        (Shared {}, Local { gate }, init::Monotonics(mono))
    }

    #[idle]
    fn idle(_: idle::Context) -> ! {
        loop {
            while let Some(stamp) = PRESSES.dequeue() {
                dbg::println!("press at {} us", stamp.ticks());
            }
            cortex_m::asm::wfi();
        }
    }

    #[task(binds = EXTI0, local = [gate])]
    fn exti0(ctx: exti0::Context) {
        (ctx.local.gate)();
    }
}
