//! Property tests for command encoding

use proptest::prelude::*;
use trill_protocol::commands::{cmd, OFFSET_COMMAND};
use trill_protocol::frame::{Command, Identity};
use trill_protocol::layout::{count_touches, read_u12_be, CentroidLayout, NO_TOUCH};

proptest! {
    #[test]
    fn scan_settings_always_in_range(speed in any::<u8>(), bits in any::<u8>()) {
        let frame = Command::scan_settings(speed, bits).encode();
        let bytes = frame.as_bytes();
        prop_assert_eq!(bytes.len(), 4);
        prop_assert_eq!(bytes[0], OFFSET_COMMAND);
        prop_assert_eq!(bytes[1], cmd::SCAN_SETTINGS);
        prop_assert!(bytes[2] <= 3);
        prop_assert!((9..=16).contains(&bytes[3]));
    }

    #[test]
    fn in_range_scan_settings_pass_through(speed in 0u8..=3, bits in 9u8..=16) {
        let frame = Command::scan_settings(speed, bits).encode();
        prop_assert_eq!(frame.as_bytes(), &[OFFSET_COMMAND, cmd::SCAN_SETTINGS, speed, bits][..]);
    }

    #[test]
    fn noise_threshold_monotonic(a in 0.0f32..1.0, b in 0.0f32..1.0, bits in 9u8..=16) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let Command::NoiseThreshold(lo_counts) = Command::noise_threshold(lo, bits) else {
            panic!("wrong command");
        };
        let Command::NoiseThreshold(hi_counts) = Command::noise_threshold(hi, bits) else {
            panic!("wrong command");
        };
        prop_assert!(lo_counts <= hi_counts);
    }

    #[test]
    fn sixteen_bit_args_reassemble(value in any::<u16>()) {
        let frame = Command::MinimumSize(value).encode();
        let bytes = frame.as_bytes();
        prop_assert_eq!(u16::from_be_bytes([bytes[2], bytes[3]]), value);
    }

    #[test]
    fn identity_requires_four_bytes(response in proptest::collection::vec(any::<u8>(), 0..8)) {
        let parsed = Identity::parse(&response);
        prop_assert_eq!(parsed.is_ok(), response.len() == 4);
    }

    #[test]
    fn twelve_bit_reads_masked(hi in any::<u8>(), lo in any::<u8>()) {
        let value = read_u12_be(&[hi, lo], 0).unwrap();
        prop_assert!(value <= 0x0FFF);
    }

    #[test]
    fn touch_count_bounded_by_layout(buf in proptest::collection::vec(any::<u8>(), 32)) {
        let layout = CentroidLayout::TWO_AXIS;
        let count = count_touches(&buf, 0, layout.max_touches);
        prop_assert!(count <= layout.max_touches);
        // every counted slot is a real touch
        for i in 0..count as usize {
            prop_assert_ne!(u16::from_be_bytes([buf[2 * i], buf[2 * i + 1]]), NO_TOUCH);
        }
    }
}
