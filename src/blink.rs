//! Free-running LED blink that stops on an external interrupt.

use embassy_futures::select::select;
use embedded_hal_async::delay::DelayNs;

/// An on/off indicator whose writes may have to go over a bus.
///
/// On the Pico 2 W the on-board LED hangs off the radio (`WL_GPIO0`), so switching it is an
/// SPI transaction rather than a register write.
pub trait Led {
    fn set(&mut self, on: bool) -> impl Future<Output = ()>;
}

/// Toggles `led` every `interval_ms`, starting from off, until `interrupt` completes;
/// then switches it off.
///
/// Returns how many times the LED was toggled.
pub async fn blink_until<L, D>(
    led: &mut L,
    delay: &mut D,
    interval_ms: u32,
    interrupt: impl Future<Output = ()>,
) -> u32
where
    L: Led,
    D: DelayNs,
{
    let mut toggles: u32 = 0;
    {
        let ticking = async {
            let mut on = false;
            loop {
                on = !on;
                led.set(on).await;
                toggles = toggles.wrapping_add(1);
                delay.delay_ms(interval_ms).await;
            }
        };
        select(interrupt, ticking).await;
    }
    led.set(false).await;
    toggles
}
