#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use pico2w_robot::config::{ROBOT_NAME, WIFI_PASSWORD, WIFI_SSID};
use pico2w_robot::hardware::MotorPins;
use pico2w_robot::server::serve_forever;
use pico2w_robot::wifi::{self, WifiCredentials, WifiPins};
use pico2w_robot::ControlPage;
use {defmt_rtt as _, panic_probe as _};

// Program metadata
#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [embassy_rp::binary_info::EntryAddr; 4] = [
    embassy_rp::binary_info::rp_program_name!(c"Wi-Fi Robot"),
    embassy_rp::binary_info::rp_program_description!(
        c"Hold-to-move web controller for a two-motor chassis"
    ),
    embassy_rp::binary_info::rp_cargo_version!(),
    embassy_rp::binary_info::rp_program_build_attribute!(),
];

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("=========================================");
    info!("{} starting...", ROBOT_NAME);
    info!("=========================================");

    let p = embassy_rp::init(Default::default());

    // Motors first so the wheels are held still while the radio comes up.
    let motor_pins = MotorPins {
        in1: p.PIN_27,
        in2: p.PIN_26,
        in3: p.PIN_21,
        in4: p.PIN_20,
        slice: p.PWM_SLICE1,
        enb: p.PIN_18,
        ena: p.PIN_19,
    };
    let mut chassis = match motor_pins.into_chassis() {
        Ok(chassis) => chassis,
        Err(e) => panic!("Motor setup failed: {}", Display2Format(&e)),
    };
    info!("Motors stopped, PWM ready");

    let stack = match wifi::connect(
        spawner,
        WifiPins {
            pwr: p.PIN_23,
            cs: p.PIN_25,
            dio: p.PIN_24,
            clk: p.PIN_29,
            pio: p.PIO0,
            dma: p.DMA_CH0,
        },
        WifiCredentials {
            ssid: WIFI_SSID,
            password: WIFI_PASSWORD,
        },
    )
    .await
    {
        Ok(stack) => stack,
        Err(e) => panic!("WiFi setup failed: {}", Display2Format(&e)),
    };

    let page = ControlPage::new(ROBOT_NAME);
    serve_forever(stack, &mut chassis, &page).await
}
