//! PWM slice timing for a target output frequency.

/// Clock divider and counter wrap value for one PWM slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmTiming {
    /// Integer system-clock divider, 1..=255.
    pub divider: u8,
    /// Counter wraps after `top + 1` ticks.
    pub top: u16,
}

impl PwmTiming {
    /// Picks the smallest integer divider that lets one period of `freq_hz` fit the 16-bit
    /// counter, which keeps duty resolution as fine as possible.
    ///
    /// Frequencies too low to reach even with the largest divider saturate at
    /// `divider = 255, top = u16::MAX`. A zero frequency is treated the same way.
    #[must_use]
    pub const fn for_frequency(clk_hz: u32, freq_hz: u32) -> Self {
        const SLOWEST: PwmTiming = PwmTiming {
            divider: u8::MAX,
            top: u16::MAX,
        };
        if freq_hz == 0 {
            return SLOWEST;
        }

        let mut divider: u32 = 1;
        while divider <= u8::MAX as u32 {
            let ticks = clk_hz / (freq_hz * divider);
            if ticks == 0 {
                return Self {
                    divider: divider as u8,
                    top: 0,
                };
            }
            if ticks <= u16::MAX as u32 + 1 {
                return Self {
                    divider: divider as u8,
                    top: (ticks - 1) as u16,
                };
            }
            divider += 1;
        }
        SLOWEST
    }
}
