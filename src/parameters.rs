//! Timing constants and network-scale parameters (§4.10).
//!
//! Kept as a const-table-plus-`Default` struct, the same idiom the
//! teacher uses for its own LoRaWAN `recommended`/`Parameters` pair:
//! named constants for values fixed by the protocol, and a
//! `Parameters::derive` constructor computing the values the
//! specification calls "derived, not free parameters" (§4.1) from a
//! small set of radio/timer characteristics, rather than letting each
//! call site recompute the formulas by hand.

#![deny(clippy::wildcard_enum_match_arm)]

/// Values fixed by the protocol rather than by deployment.
pub mod recommended {
    /// IEEE 802.15.4 CCA-TX gap, microseconds.
    pub const CCA_TX_GAP_US: u32 = 192;
    /// Nominal maximum radio range, in the active coordinate scale's
    /// units (§4.4's backoff formula, §8 scenario S2).
    pub const RADIO_RANGE: i64 = 1700;
}

/// The handful of physical characteristics a Radio/Timer pair reports,
/// from which every MAC timing constant in §4.1 is derived.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy)]
pub struct RadioCharacteristics {
    /// Raw over-the-air byte rate, bytes/second.
    pub byte_rate: u32,
    /// Radio turnaround time, microseconds (`Tᵤ`).
    pub turnaround_us: u32,
    /// RX-to-TX switch time, microseconds.
    pub rx_to_tx_us: u32,
    /// TX-to-RX switch time, microseconds.
    pub tx_to_rx_us: u32,
    /// Interrupt handling delay, microseconds.
    pub int_handling_delay_us: u32,
    /// Size of the Microframe plus PHY header, bytes.
    pub microframe_phy_size: u32,
    /// Target duty cycle, in parts-per-million.
    pub duty_cycle_ppm: u32,
}

/// Every timing constant named in §4.1, computed by [`Parameters::derive`].
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy)]
pub struct Parameters {
    /// `G`: CCA-TX gap.
    pub g_us: u32,
    /// `Tᵢ`: inter-microframe gap.
    pub ti_us: u32,
    /// `Tₛ`: time to transmit one microframe.
    pub ts_us: u32,
    /// `T_r`: receive-microframe timeout.
    pub tr_us: u32,
    /// `NMF`: microframes per preamble train.
    pub nmf: u32,
    /// `CI`: one MAC cycle.
    pub ci_us: u32,
    /// `SLEEP_PERIOD`.
    pub sleep_period_us: u32,
    /// `DATA_LISTEN_MARGIN`.
    pub data_listen_margin_us: u32,
    /// `DATA_SKIP_TIME`.
    pub data_skip_time_us: u32,
    /// `TX_DELAY`.
    pub tx_delay_us: u32,
    /// `RX_DATA_TIMEOUT`.
    pub rx_data_timeout_us: u32,
    /// `CCA_TIME`.
    pub cca_time_us: u32,
    /// Nominal maximum radio range (§4.4's backoff formula).
    pub radio_range: i64,
}

impl Parameters {
    /// Derive every timing constant in §4.1 from `radio`, following the
    /// exact formulas that section specifies.
    pub fn derive(radio: &RadioCharacteristics) -> Self {
        let g_us = recommended::CCA_TX_GAP_US;
        let ti_us = radio.turnaround_us + radio.rx_to_tx_us + radio.int_handling_delay_us;
        let ts_us = (radio.microframe_phy_size * 1_000_000 / radio.byte_rate) + radio.tx_to_rx_us;
        let tr_us = 2 * ts_us + ti_us;

        // NMF = ceil(1e6 * T_r / (D * (Ti+Ts))), then +1.
        let denom = radio.duty_cycle_ppm as u64 * (ti_us + ts_us) as u64;
        let nmf = ((1_000_000u64 * tr_us as u64 + denom - 1) / denom) as u32 + 1;

        let ci_us = ts_us + (nmf - 1) * (ts_us + ti_us);
        let sleep_period_us = ci_us - tr_us;
        let data_listen_margin_us = ti_us / 2;
        let data_skip_time_us = data_listen_margin_us + 4500;
        let tx_delay_us = radio.int_handling_delay_us + radio.rx_to_tx_us;
        let rx_data_timeout_us = data_skip_time_us + data_listen_margin_us + 4 * (ts_us + ti_us);
        let cca_time_us = core::cmp::max(2 * ts_us + ti_us, g_us);

        Self {
            g_us,
            ti_us,
            ts_us,
            tr_us,
            nmf,
            ci_us,
            sleep_period_us,
            data_listen_margin_us,
            data_skip_time_us,
            tx_delay_us,
            rx_data_timeout_us,
            cca_time_us,
            radio_range: recommended::RADIO_RANGE,
        }
    }

    /// Property 1 of §8: every derived `NMF` must let a preamble train
    /// span at least one receive-microframe timeout.
    pub fn preamble_sufficient(&self) -> bool {
        (self.nmf - 1) * (self.ti_us + self.ts_us) + self.ts_us >= self.tr_us
    }
}
