use tstp::parameters::{Parameters, RadioCharacteristics};

fn sample_radio() -> RadioCharacteristics {
    RadioCharacteristics {
        byte_rate: 1_000_000,
        turnaround_us: 100,
        rx_to_tx_us: 50,
        tx_to_rx_us: 90,
        int_handling_delay_us: 50,
        microframe_phy_size: 10,
        duty_cycle_ppm: 100_000,
    }
}

#[test]
fn derive_matches_the_formulas_bit_for_bit() {
    let params = Parameters::derive(&sample_radio());

    assert_eq!(params.ti_us, 200);
    assert_eq!(params.ts_us, 100);
    assert_eq!(params.tr_us, 400);
    assert_eq!(params.nmf, 15);
    assert_eq!(params.ci_us, 4300);
    assert_eq!(params.sleep_period_us, 3900);
    assert_eq!(params.data_listen_margin_us, 100);
    assert_eq!(params.data_skip_time_us, 4600);
    assert_eq!(params.tx_delay_us, 100);
    assert_eq!(params.rx_data_timeout_us, 5900);
    assert_eq!(params.cca_time_us, 400);
}

#[test]
fn preamble_is_always_sufficient() {
    let params = Parameters::derive(&sample_radio());
    assert!(params.preamble_sufficient());
}

#[test]
fn tighter_duty_cycle_demands_more_microframes() {
    let mut tight = sample_radio();
    tight.duty_cycle_ppm = 1_000;
    let loose = Parameters::derive(&sample_radio());
    let tight = Parameters::derive(&tight);
    assert!(tight.nmf > loose.nmf);
    assert!(tight.preamble_sufficient());
}
