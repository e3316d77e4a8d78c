#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_time::Delay;
use pico2w_robot::blink::blink_until;
use pico2w_robot::config::BLINK_INTERVAL_MS;
use pico2w_robot::wifi::{self, WifiPins};
use {defmt_rtt as _, panic_probe as _};

// Program metadata
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"Blink"),
    embassy_rp::binary_info::rp_program_description!(
        c"Toggles the on-board LED every second until GP15 is pulled low"
    ),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());

    // The Pico 2 W's LED is on the radio, so the radio has to be up (but not joined).
    let wifi_pins = WifiPins {
        pwr: p.PIN_23,
        cs: p.PIN_25,
        dio: p.PIN_24,
        clk: p.PIN_29,
        pio: p.PIO0,
        dma: p.DMA_CH0,
    };
    let mut led = match wifi::onboard_led(spawner, wifi_pins).await {
        Ok(led) => led,
        Err(e) => panic!("Radio setup failed: {}", Display2Format(&e)),
    };
    // Active-low stop button
    let mut button = Input::new(p.PIN_15, Pull::Up);

    info!("Built-in LED starts flashing...");
    let toggles = blink_until(
        &mut led,
        &mut Delay,
        BLINK_INTERVAL_MS,
        button.wait_for_low(),
    )
    .await;
    info!("Finished after {} toggles.", toggles);
}
