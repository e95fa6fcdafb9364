//! Static simplex and utility zones.
//!
//! These zones do not depend on the repeater directory and are appended
//! after the repeater-derived zones. All frequencies are integer Hz.

use crate::model::{Bandwidth, Channel, Tone, Zone};

/// Standard UK channel spacing.
const STEP_HZ: u64 = 12_500;

/// DMR hotspot channels on 434.000 and 438.800 MHz.
#[must_use]
pub fn hotspot_zone() -> Zone {
    const LOW: u64 = 434_000_000;
    const HIGH: u64 = 438_800_000;
    Zone::from_channels(
        "HOTSPOT",
        vec![
            Channel::digital("HS 434 SIMPLEX", LOW, LOW, 1, 1),
            Channel::digital("HS 438 SIMPLEX", HIGH, HIGH, 1, 1),
            Channel::digital("HS RPT TS1", LOW, HIGH, 1, 1),
            Channel::digital("HS RPT TS2", LOW, HIGH, 1, 2),
        ],
    )
}

/// V16 to V46 from 145.200 MHz; V40 is the calling channel.
#[must_use]
pub fn vhf_fm_simplex_zone() -> Zone {
    let channels = (16..=46)
        .map(|n: u64| {
            let hz = 145_200_000 + (n - 16) * STEP_HZ;
            let name = if n == 40 { format!("V{n} CALL") } else { format!("V{n}") };
            Channel::analog(&name, hz, hz)
        })
        .collect();
    Zone::from_channels("VHF FM SIMPLEX", channels)
}

/// U272 to U288 from 433.400 MHz; U280 is the calling channel.
#[must_use]
pub fn uhf_fm_simplex_zone() -> Zone {
    let channels = (272..=288)
        .map(|n: u64| {
            let hz = 433_400_000 + (n - 272) * STEP_HZ;
            let name = if n == 280 { format!("U{n} CALL") } else { format!("U{n}") };
            Channel::analog(&name, hz, hz)
        })
        .collect();
    Zone::from_channels("UHF FM SIMPLEX", channels)
}

/// The 2m DMR simplex calling channel.
#[must_use]
pub fn vhf_dv_simplex_zone() -> Zone {
    const CALL: u64 = 144_612_500;
    Zone::from_channels(
        "VHF DV SIMPLEX",
        vec![Channel::digital("2M DV CALL", CALL, CALL, 1, 1)],
    )
}

/// DH1 to DH8 from 438.5875 MHz; DH3 is the calling channel.
#[must_use]
pub fn uhf_dv_simplex_zone() -> Zone {
    let channels = (1..=8)
        .map(|n: u64| {
            let hz = 438_587_500 + (n - 1) * STEP_HZ;
            let name = if n == 3 { format!("DH{n} CALL") } else { format!("DH{n}") };
            Channel::digital(&name, hz, hz, 1, 1)
        })
        .collect();
    Zone::from_channels("UHF DV SIMPLEX", channels)
}

/// The sixteen PMR446 channels, receive only.
#[must_use]
pub fn pmr446_zone() -> Zone {
    let channels = (1..=16)
        .map(|n: u64| {
            let hz = 446_006_250 + (n - 1) * STEP_HZ;
            Channel::analog(&format!("PMR {n}"), hz, hz).receive_only()
        })
        .collect();
    Zone::from_channels("PMR446", channels)
}

/// ISS voice downlink with doppler steps, plus the cross-band repeater.
#[must_use]
pub fn iss_zone() -> Zone {
    const UPLINK: u64 = 145_200_000;
    const RPT_UP: u64 = 145_990_000;
    const RPT_DOWN: u64 = 437_800_000;
    const DOPPLER: [(&str, u64); 5] = [
        ("ISS RISE", 145_805_000),
        ("ISS HIGH", 145_802_500),
        ("ISS OVER", 145_800_000),
        ("ISS LOW", 145_797_500),
        ("ISS SET", 145_795_000),
    ];

    let mut channels: Vec<Channel> = DOPPLER
        .iter()
        .map(|(name, downlink)| {
            Channel::analog(name, *downlink, UPLINK).with_bandwidth(Bandwidth::Wide)
        })
        .collect();
    channels.push(
        Channel::analog("ISS RPT UP", RPT_UP, RPT_UP)
            .with_bandwidth(Bandwidth::Wide)
            .with_tones(Tone::from_hz(67.0), None),
    );
    channels.push(Channel::analog("ISS RPT DN", RPT_DOWN, RPT_DOWN).with_bandwidth(Bandwidth::Wide));
    Zone::from_channels("ISS", channels)
}

/// ITU marine simplex channels (ship and coast on the same frequency),
/// excluding DSC channel 70 and the guard channels.
const MARINE_CHANNELS: [(u32, u64); 22] = [
    (6, 156_300_000),
    (8, 156_400_000),
    (9, 156_450_000),
    (10, 156_500_000),
    (11, 156_550_000),
    (12, 156_600_000),
    (13, 156_650_000),
    (14, 156_700_000),
    (15, 156_750_000),
    (16, 156_800_000),
    (17, 156_850_000),
    (27, 157_350_000),
    (67, 156_375_000),
    (68, 156_425_000),
    (69, 156_475_000),
    (71, 156_575_000),
    (72, 156_625_000),
    (73, 156_675_000),
    (74, 156_725_000),
    (77, 156_875_000),
    (87, 157_375_000),
    (88, 157_425_000),
];

/// Marine VHF listening channels, receive only. Channel 16 is the calling
/// channel.
#[must_use]
pub fn marine_vhf_zone() -> Zone {
    let channels = MARINE_CHANNELS
        .iter()
        .map(|(number, hz)| {
            let name = if *number == 16 {
                format!("MAR {number} CALL")
            } else {
                format!("MAR {number:02}")
            };
            Channel::analog(&name, *hz, *hz)
                .with_bandwidth(Bandwidth::Wide)
                .receive_only()
        })
        .collect();
    Zone::from_channels("MARINE VHF", channels)
}

/// Every static zone, in display order.
#[must_use]
pub fn static_zones() -> Vec<Zone> {
    vec![
        hotspot_zone(),
        vhf_fm_simplex_zone(),
        uhf_fm_simplex_zone(),
        vhf_dv_simplex_zone(),
        uhf_dv_simplex_zone(),
        pmr446_zone(),
        iss_zone(),
        marine_vhf_zone(),
    ]
}
