use libm24sr::protocol::checksum::{append_crc, crc16, crc16_bytes};
use libm24sr::protocol::residue_is_zero;
use proptest::prelude::*;

#[test]
fn deselect_frame_carries_its_own_crc() {
    assert_eq!(crc16_bytes(&[0xC2]), [0xE0, 0xB4]);
    assert!(residue_is_zero(&[0xC2, 0xE0, 0xB4]));
}

#[test]
fn empty_buffer_is_the_seed() {
    assert_eq!(crc16(&[]), 0x6363);
}

proptest! {
    #[test]
    fn appended_crc_folds_to_zero(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let mut frame = data.clone();
        append_crc(&mut frame);
        prop_assert!(residue_is_zero(&frame));
    }

    #[test]
    fn single_bit_flip_is_detected(data in prop::collection::vec(any::<u8>(), 1..64), bit in 0usize..8) {
        let mut frame = data.clone();
        append_crc(&mut frame);
        frame[0] ^= 1 << bit;
        prop_assert!(!residue_is_zero(&frame));
    }
}
