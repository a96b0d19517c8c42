//! Property-based tests with proptest
//!
//! - `codec_properties`: compression round trip
//! - `envelope_properties`: round trip, tamper detection, key isolation
//! - `armor_properties`: text channel round trip

use proptest::prelude::*;

use keyseal::compression::{compress, decompress};
use keyseal::crypto::{Key, NONCE_SIZE};
use keyseal::encoding::TextEncoding;
use keyseal::{Direction, EnvelopePipeline, PipelineRequest, SealError};

fn pipeline(key: [u8; 32]) -> EnvelopePipeline {
    EnvelopePipeline::new(Key::from_bytes(key))
}

mod codec_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// decompress(compress(x)) == x
        #[test]
        fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..10_000)) {
            let compressed = compress(&data).unwrap();
            prop_assert_eq!(decompress(&compressed).unwrap(), data);
        }
    }
}

mod envelope_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// decode(encode(p, k), k) == p
        #[test]
        fn prop_roundtrip(
            key in any::<[u8; 32]>(),
            data in prop::collection::vec(any::<u8>(), 0..4_096),
        ) {
            let pipeline = pipeline(key);
            let envelope = pipeline.encode(&data).unwrap();
            prop_assert_eq!(pipeline.decode(&envelope).unwrap(), data);
        }

        /// Any single bit flip is rejected by the tag check
        #[test]
        fn prop_bit_flip_detected(
            key in any::<[u8; 32]>(),
            data in prop::collection::vec(any::<u8>(), 0..512),
            position in any::<prop::sample::Index>(),
            bit in 0u8..8,
        ) {
            let pipeline = pipeline(key);
            let mut envelope = pipeline.encode(&data).unwrap();
            let i = position.index(envelope.len());
            envelope[i] ^= 1 << bit;

            prop_assert!(matches!(pipeline.decode(&envelope), Err(SealError::Authentication)));
        }

        /// A different key never opens the envelope
        #[test]
        fn prop_key_sensitivity(
            key in any::<[u8; 32]>(),
            other in any::<[u8; 32]>(),
            data in prop::collection::vec(any::<u8>(), 0..512),
        ) {
            prop_assume!(key != other);
            let envelope = pipeline(key).encode(&data).unwrap();
            prop_assert!(matches!(pipeline(other).decode(&envelope), Err(SealError::Authentication)));
        }

        /// Same plaintext and key still yield distinct envelopes
        #[test]
        fn prop_nonce_uniqueness(
            key in any::<[u8; 32]>(),
            data in prop::collection::vec(any::<u8>(), 0..256),
        ) {
            let pipeline = pipeline(key);
            let a = pipeline.encode(&data).unwrap();
            let b = pipeline.encode(&data).unwrap();
            prop_assert_ne!(&a[..NONCE_SIZE], &b[..NONCE_SIZE]);
            prop_assert_ne!(a, b);
        }

        /// Inputs shorter than a nonce are rejected as malformed
        #[test]
        fn prop_short_input_rejected(data in prop::collection::vec(any::<u8>(), 0..NONCE_SIZE)) {
            prop_assert!(matches!(pipeline([0u8; 32]).decode(&data), Err(SealError::EnvelopeFormat(_))));
        }
    }
}

mod armor_properties {
    use super::*;

    fn encoding() -> impl Strategy<Value = TextEncoding> {
        prop_oneof![Just(TextEncoding::Hex), Just(TextEncoding::Base64)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Text envelopes open with the scheme they were written in
        #[test]
        fn prop_text_roundtrip(
            encoding in encoding(),
            data in prop::collection::vec(any::<u8>(), 0..2_048),
        ) {
            let pipeline = pipeline([7u8; 32]);
            let sealed = pipeline.run(PipelineRequest {
                direction: Direction::Encode,
                input: &data,
                text_encoding: Some(encoding),
            }).unwrap();

            let opened = pipeline.run(PipelineRequest {
                direction: Direction::Decode,
                input: sealed.bytes(),
                text_encoding: Some(encoding),
            }).unwrap();
            prop_assert_eq!(opened.bytes(), data.as_slice());
        }

        /// Decoding with the wrong scheme fails instead of returning garbage
        #[test]
        fn prop_swapped_scheme_fails(data in prop::collection::vec(any::<u8>(), 0..512)) {
            let pipeline = pipeline([7u8; 32]);
            for (written, read) in [
                (TextEncoding::Hex, TextEncoding::Base64),
                (TextEncoding::Base64, TextEncoding::Hex),
            ] {
                let sealed = pipeline.run(PipelineRequest {
                    direction: Direction::Encode,
                    input: &data,
                    text_encoding: Some(written),
                }).unwrap();

                let result = pipeline.run(PipelineRequest {
                    direction: Direction::Decode,
                    input: sealed.bytes(),
                    text_encoding: Some(read),
                });
                prop_assert!(result.is_err());
            }
        }
    }
}
