#![no_std]
#![no_main]

use cortex_m::delay::Delay;
use panic_halt as _;
use rp_pico::entry;
use rp_pico::hal::{Clock, Sio, Timer, clocks::init_clocks_and_plls, pac, watchdog::Watchdog};
use rtt_target::{rprintln, rtt_init_print};

use pwm_dimmer::{
    BrightnessController, BrightnessController3, ChannelBank, DimmerConfig, DutyCycleChannel,
    LED_COUNT, PullUpSwitch, PwmChannel, SwitchLine, Switches,
};
use rp_pico_dimmer::time::{HardwareTimer, Instant};
use rp_pico_dimmer::{DECREASE_SWITCH_GPIO, INCREASE_SWITCH_GPIO, TOGGLE_SWITCH_GPIO};

#[entry]
fn main() -> ! {
    rtt_init_print!();
    rprintln!("=== RP Pico Dimmer ===");
    rprintln!("Starting initialization...");

    // Get peripherals
    let mut pac = pac::Peripherals::take().unwrap();
    let core = pac::CorePeripherals::take().unwrap();

    // Set up watchdog driver
    let mut watchdog = Watchdog::new(pac.WATCHDOG);

    // Configure clocks (125 MHz)
    let clocks = init_clocks_and_plls(
        rp_pico::XOSC_CRYSTAL_FREQ,
        pac.XOSC,
        pac.CLOCKS,
        pac.PLL_SYS,
        pac.PLL_USB,
        &mut pac.RESETS,
        &mut watchdog,
    )
    .ok()
    .unwrap();

    let system_clock_hz = clocks.system_clock.freq().to_Hz();
    rprintln!("System clock configured: {} Hz", system_clock_hz);

    // Set up the Single Cycle IO (for GPIO access)
    let sio = Sio::new(pac.SIO);

    // Set the pins to their default state
    let pins = rp_pico::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let config = DimmerConfig::default();

    // Switches pull up internally and short to ground when pressed
    let mut increase = PullUpSwitch::new(pins.gpio9.into_pull_up_input());
    let mut toggle = PullUpSwitch::new(pins.gpio8.into_pull_up_input());
    let mut decrease = PullUpSwitch::new(pins.gpio7.into_pull_up_input());

    // LEDs: GPIO22 (PWM3/A), GPIO21 (PWM2/B), GPIO20 (PWM2/A)
    let mut pwm_slices = rp_pico::hal::pwm::Slices::new(pac.PWM, &mut pac.RESETS);

    pwm_slices.pwm2.set_div_int(config.pwm.divider);
    pwm_slices.pwm2.set_top(config.pwm.period);
    pwm_slices.pwm2.enable();

    pwm_slices.pwm3.set_div_int(config.pwm.divider);
    pwm_slices.pwm3.set_top(config.pwm.period);
    pwm_slices.pwm3.enable();

    let mut led1_channel = pwm_slices.pwm3.channel_a;
    let mut led2_channel = pwm_slices.pwm2.channel_b;
    let mut led3_channel = pwm_slices.pwm2.channel_a;

    led1_channel.output_to(pins.gpio22);
    led2_channel.output_to(pins.gpio21);
    led3_channel.output_to(pins.gpio20);

    let mut led1 = DutyCycleChannel::new(led1_channel);
    let mut led2 = DutyCycleChannel::new(led2_channel);
    let mut led3 = DutyCycleChannel::new(led3_channel);

    rprintln!(
        "PWM: period {} divider {} -> {} Hz",
        config.pwm.period,
        config.pwm.divider,
        config.pwm.output_frequency_hz(system_clock_hz)
    );

    // Create hardware timer
    let timer = Timer::new(pac.TIMER, &mut pac.RESETS, &clocks);
    let time_source = HardwareTimer::new(timer);

    let switches = Switches::<&mut dyn SwitchLine>::new(&mut toggle, &mut increase, &mut decrease);
    let channels: [&mut dyn PwmChannel; LED_COUNT] = [&mut led1, &mut led2, &mut led3];

    let mut controller: BrightnessController3<'_, Instant, HardwareTimer, _, _> =
        match BrightnessController::new(
            config,
            &time_source,
            switches,
            ChannelBank::new(channels),
        ) {
            Ok(controller) => controller,
            Err(err) => {
                rprintln!("Fatal configuration error: {}", err);
                loop {
                    cortex_m::asm::wfi();
                }
            }
        };

    rprintln!("=== System Ready ===");
    rprintln!("  GPIO{}: toggle on/off", TOGGLE_SWITCH_GPIO);
    rprintln!("  GPIO{}: hold to brighten", INCREASE_SWITCH_GPIO);
    rprintln!("  GPIO{}: hold to dim", DECREASE_SWITCH_GPIO);

    // Set up delay
    let mut delay = Delay::new(core.SYST, system_clock_hz);

    loop {
        let report = controller.service();

        if let Some(change) = report.change {
            rprintln!(
                "{:?}: {}% -> {}% (level {})",
                change.button,
                change.from,
                change.to,
                change.level
            );
        }

        delay.delay_ms(report.next_service.as_delay_ms());
    }
}
