use libm24sr::protocol::frame::{Apdu, is_s_block, wtx_reply, wtx_request};
use libm24sr::protocol::{BlockSequence, IBlock, residue_is_zero};
use libm24sr::test_support::wtx_request_frame;
use libm24sr::Error;

#[test]
fn block_number_toggles_across_commands() {
    let apdu = Apdu::new(0x00, 0xB0, 0x0000, 0x019F).with_le(2);
    let mut seq = BlockSequence::new();
    let pcbs: Vec<u8> = (0..4)
        .map(|_| IBlock::encode(&apdu, &mut seq, None).unwrap()[0])
        .collect();
    assert_eq!(pcbs, vec![0x02, 0x03, 0x02, 0x03]);
}

#[test]
fn device_id_follows_pcb() {
    let apdu = Apdu::new(0x00, 0xB0, 0x0000, 0x019F).with_le(2);
    let mut seq = BlockSequence::new();
    let frame = IBlock::encode(&apdu, &mut seq, Some(0x07)).unwrap();
    assert_eq!(&frame[..3], &[0x0A, 0x07, 0x00]);
    assert!(residue_is_zero(&frame));
}

#[test]
fn wtx_exchange() {
    let request = wtx_request_frame(0x3B);
    assert!(is_s_block(&request));
    let fwt = wtx_request(&request).unwrap();
    assert_eq!(fwt, 0x3B);
    let reply = wtx_reply(fwt);
    assert_eq!(&reply[..2], &[0xF2, 0x3B]);
    assert!(residue_is_zero(&reply));
}

#[test]
fn corrupted_wtx_is_rejected() {
    let mut request = wtx_request_frame(0x01);
    request[1] ^= 0x10;
    assert!(matches!(wtx_request(&request), Err(Error::CrcMismatch { .. })));
}

#[test]
fn i_block_is_not_s_block() {
    assert!(!is_s_block(&[0x02, 0x90, 0x00]));
    assert!(!is_s_block(&[]));
}

#[test]
fn select_frames_match_captures() {
    use libm24sr::protocol::codec::encode_command_frame;
    use libm24sr::protocol::Command;
    use libm24sr::types::FileId;

    let mut seq = BlockSequence::new();
    let app = encode_command_frame(&Command::SelectApplication, &mut seq, None).unwrap();
    assert_eq!(hex::encode(&app[..app.len() - 2]), "0200a4040007d276000085010100");
    let ndef = encode_command_frame(&Command::SelectNdefFile(FileId::new(0x0001)), &mut seq, None)
        .unwrap();
    assert_eq!(hex::encode(&ndef[..ndef.len() - 2]), "0300a4000c020001");
    assert!(residue_is_zero(&app) && residue_is_zero(&ndef));
}

#[test]
fn captured_deselect_checks_out() {
    let frame = hex::decode("c2e0b4").unwrap();
    assert!(residue_is_zero(&frame));
    assert!(!residue_is_zero(&hex::decode("c2e0b5").unwrap()));
}
