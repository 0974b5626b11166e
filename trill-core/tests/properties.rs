//! Property tests for the device model and frame decoding

use proptest::prelude::*;
use trill_core::decode::{decode_touches, RawFrame};
use trill_core::device::{DeviceVariant, Scales};
use trill_core::state::DeviceState;
use trill_core::Mode;
use trill_protocol::frame::Identity;

fn variant() -> impl Strategy<Value = DeviceVariant> {
    prop::sample::select(DeviceVariant::KNOWN.to_vec())
}

fn mode() -> impl Strategy<Value = Mode> {
    prop::sample::select(vec![
        Mode::Auto,
        Mode::Centroid,
        Mode::Raw,
        Mode::Baseline,
        Mode::Differential,
    ])
}

fn code_of(variant: DeviceVariant) -> u8 {
    (1..=5u8)
        .find(|&c| DeviceVariant::from_code(c) == variant)
        .unwrap()
}

fn identified(variant: DeviceVariant, mode: Mode) -> DeviceState {
    let mut state = DeviceState::new();
    state.apply_identity(Identity {
        device_code: code_of(variant),
        firmware_version: 1,
    });
    state.set_mode(mode);
    state
}

proptest! {
    #[test]
    fn raw_scale_is_inverse_power_of_two(bits in 9u8..=16, v in variant()) {
        let scales = Scales::new(v.rescale_factors(), bits);
        prop_assert_eq!(scales.raw, 1.0 / (1u32 << bits) as f32);
    }

    #[test]
    fn raw_values_within_full_scale(
        bits in 9u8..=16,
        bytes in proptest::collection::vec(any::<u8>(), 60),
    ) {
        let mut state = identified(DeviceVariant::Square, Mode::Raw);
        state.set_num_bits(bits);
        let max = 4095.0 / (1u32 << bits) as f32;
        let values = state.commit_raw(RawFrame::from_bytes(&bytes).unwrap());
        prop_assert_eq!(values.len(), 30);
        for &value in values {
            prop_assert!((0.0..=max).contains(&value));
        }
    }

    #[test]
    fn channel_count_independent_of_settings(v in variant(), m in mode(), bits in 0u8..=32) {
        let mut state = identified(v, m);
        let before = state.num_channels();
        state.set_num_bits(bits);
        state.set_mode(Mode::Raw);
        prop_assert_eq!(state.num_channels(), before);
        prop_assert!([26, 28, 30].contains(&before));
    }

    #[test]
    fn touch_decoding_is_idempotent(v in variant(), bytes in proptest::collection::vec(any::<u8>(), 32)) {
        let len = v.centroid_layout().length();
        let frame = RawFrame::from_bytes(&bytes[..len]).unwrap();
        let layout = v.centroid_layout();
        prop_assert_eq!(decode_touches(&frame, &layout), decode_touches(&frame, &layout));

        let mut state = identified(v, Mode::Centroid);
        let first = state.commit_centroid(frame.clone());
        let second = state.commit_centroid(frame);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn compound_values_zero_without_touches(v in variant(), tail in proptest::collection::vec(any::<u8>(), 30)) {
        let len = v.centroid_layout().length();
        let mut bytes = vec![0xFF, 0xFF];
        bytes.extend_from_slice(&tail[..len - 2]);
        let mut state = identified(v, Mode::Centroid);
        state.commit_centroid(RawFrame::from_bytes(&bytes).unwrap());

        prop_assert_eq!(state.number_of_touches(), 0);
        prop_assert_eq!(state.compound_touch_location(), 0.0);
        prop_assert_eq!(state.compound_touch_size(), 0.0);
    }

    #[test]
    fn two_axis_size_averages_paired_touches(bytes in proptest::collection::vec(any::<u8>(), 32)) {
        for v in [DeviceVariant::Square, DeviceVariant::Hex] {
            let mut state = identified(v, Mode::Centroid);
            let set = state.commit_centroid(RawFrame::from_bytes(&bytes).unwrap());
            prop_assert!(set.vertical() <= 4 && set.horizontal() <= 4);

            let paired = set.vertical().min(set.horizontal());
            let expected = if paired == 0 {
                0.0
            } else {
                let sum: f32 = (0..paired).map(|i| state.touch_size(i).unwrap()).sum();
                sum / paired as f32
            };
            let actual = state.compound_touch_size();
            prop_assert!(
                (actual - expected).abs() <= 1e-4,
                "compound size {} differs from paired mean {}", actual, expected
            );
        }
    }

    #[test]
    fn out_of_range_touch_rejected(v in variant(), touch in 5u8..=255) {
        let state = identified(v, Mode::Centroid);
        prop_assert!(state.touch_location(touch).is_err());
        prop_assert!(state.touch_size(touch).is_err());
    }
}
