//! CYW43 bring-up and station-mode join.
//!
//! The radio and the `embassy-net` stack each run in their own Embassy task; everything
//! else in the firmware only sees the returned [`Stack`]. The blink firmware powers the
//! radio without joining, only to reach the LED on its `WL_GPIO0`.

use cyw43::JoinOptions;
use cyw43_pio::{PioSpi, RM2_CLOCK_DIVIDER};
use defmt::{Display2Format, info, warn};
use embassy_executor::Spawner;
use embassy_net::{Config, Stack, StackResources};
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_rp::{Peri, bind_interrupts};
use embassy_time::{Delay, Duration, with_timeout};
use static_cell::StaticCell;

use crate::blink::Led;
use crate::config::{DHCP_TIMEOUT_SECS, JOIN_POLICY};
use crate::join::join_with_retry;
use crate::{Error, Result};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Network name and passphrase for station mode.
#[derive(Debug, Clone, Copy)]
pub struct WifiCredentials {
    pub ssid: &'static str,
    pub password: &'static str,
}

/// Peripherals wired to the on-board CYW43439.
pub struct WifiPins {
    pub pwr: Peri<'static, PIN_23>,
    pub cs: Peri<'static, PIN_25>,
    pub dio: Peri<'static, PIN_24>,
    pub clk: Peri<'static, PIN_29>,
    pub pio: Peri<'static, PIO0>,
    pub dma: Peri<'static, DMA_CH0>,
}

#[embassy_executor::task]
async fn cyw43_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// The on-board LED, wired to the radio's `WL_GPIO0`.
pub struct OnboardLed {
    control: cyw43::Control<'static>,
}

impl Led for OnboardLed {
    async fn set(&mut self, on: bool) {
        self.control.gpio_set(0, on).await;
    }
}

/// Powers the radio and hands back its LED, without touching the network.
///
/// # Errors
///
/// Returns [`Error::TaskSpawn`] if the radio driver task cannot start.
pub async fn onboard_led(spawner: Spawner, pins: WifiPins) -> Result<OnboardLed> {
    let (_, control) = start_radio(spawner, pins).await?;
    Ok(OnboardLed { control })
}

/// Powers the radio, joins `credentials` and waits for a DHCP lease.
///
/// # Errors
///
/// Returns [`Error::TaskSpawn`] if the driver tasks cannot start,
/// [`Error::JoinFailed`] if every join attempt in [`JOIN_POLICY`] fails, or
/// [`Error::DhcpTimeout`] if no address is assigned in time.
pub async fn connect(
    spawner: Spawner,
    pins: WifiPins,
    credentials: WifiCredentials,
) -> Result<Stack<'static>> {
    let (net_device, mut control) = start_radio(spawner, pins).await?;

    let config = Config::dhcpv4(Default::default());
    let seed = 0x5eed_0f_7b07_2025;

    static RESOURCES: StaticCell<StackResources<3>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        config,
        RESOURCES.init(StackResources::<3>::new()),
        seed,
    );
    spawner.spawn(net_task(runner)?);

    info!("Connecting to WiFi: {}", credentials.ssid);
    let attempt_timeout = Duration::from_millis(u64::from(JOIN_POLICY.attempt_timeout_ms));
    let attempts = join_with_retry(&JOIN_POLICY, &mut Delay, async |number| {
        let joined = with_timeout(
            attempt_timeout,
            control.join(credentials.ssid, JoinOptions::new(credentials.password.as_bytes())),
        )
        .await;
        match joined {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                warn!("Join attempt {} failed: status {}", number, err.status);
                Err(())
            }
            Err(_) => {
                warn!("Join attempt {} timed out", number);
                Err(())
            }
        }
    })
    .await?;
    info!("WiFi joined after {} attempt(s), waiting for DHCP...", attempts);

    with_timeout(Duration::from_secs(DHCP_TIMEOUT_SECS), stack.wait_config_up())
        .await
        .map_err(|_| Error::DhcpTimeout)?;

    if let Some(config) = stack.config_v4() {
        info!("Connected: {}", Display2Format(&config.address));
    }
    Ok(stack)
}

/// Loads firmware and CLM, starts the driver task and selects low-latency power mode.
async fn start_radio(
    spawner: Spawner,
    pins: WifiPins,
) -> Result<(cyw43::NetDriver<'static>, cyw43::Control<'static>)> {
    let fw = cyw43_firmware::CYW43_43439A0;
    let clm = cyw43_firmware::CYW43_43439A0_CLM;

    let pwr = Output::new(pins.pwr, Level::Low);
    let cs = Output::new(pins.cs, Level::High);
    let mut pio = Pio::new(pins.pio, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        RM2_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        pins.dio,
        pins.clk,
        pins.dma,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(cyw43_task(runner)?);

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::Performance)
        .await;
    Ok((net_device, control))
}
