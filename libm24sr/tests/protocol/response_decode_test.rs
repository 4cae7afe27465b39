use libm24sr::protocol::checksum::append_crc;
use libm24sr::protocol::codec::decode_response_frame;
use libm24sr::protocol::frame::check_response;
use libm24sr::protocol::{ApduStatus, Command};
use libm24sr::test_support::{data_reply, status_reply};
use libm24sr::Error;

#[test]
fn success_word_is_ok() {
    assert_eq!(check_response(&status_reply(0x02, 0x9000)), Ok(()));
}

#[test]
fn chip_words_pass_through() {
    let cases = [
        (0x6A82, ApduStatus::FileNotFound),
        (0x6700, ApduStatus::WrongLength),
        (0x6982, ApduStatus::SecurityUnsatisfied),
        (0x6300, ApduStatus::PasswordRequired),
        (0x63C1, ApduStatus::PasswordIncorrect { retries: 1 }),
        (0x6D00, ApduStatus::InsNotSupported),
        (0x6E00, ApduStatus::ClassNotSupported),
        (0x6581, ApduStatus::UnsuccessfulUpdating),
    ];
    for (word, status) in cases {
        assert_eq!(
            check_response(&status_reply(0x03, word)),
            Err(Error::Chip(status)),
            "word {:#06x}",
            word
        );
        assert_eq!(Error::Chip(status).status_word(), word);
    }
}

#[test]
fn unknown_word_is_kept() {
    assert_eq!(
        check_response(&status_reply(0x02, 0x6A81)),
        Err(Error::Chip(ApduStatus::Other(0x6A81)))
    );
}

#[test]
fn garbled_word_is_a_frame_error() {
    let err = check_response(&status_reply(0x02, 0x0011)).unwrap_err();
    assert!(matches!(err, Error::FrameFormat(_)));
    assert!(err.is_io());
}

#[test]
fn error_reply_to_a_read_uses_short_layout() {
    let cmd = Command::read_binary(0, 4);
    let mut frame = status_reply(0x02, 0x6282);
    frame.extend_from_slice(&[0xFF; 4]);
    assert_eq!(
        decode_response_frame(&cmd, &frame),
        Err(Error::Chip(ApduStatus::EndOfFile))
    );
}

#[test]
fn corrupted_reply_is_a_crc_error() {
    let mut frame = data_reply(0x02, &[1, 2, 3]);
    frame[2] ^= 0xFF;
    let err = decode_response_frame(&Command::read_binary(0, 3), &frame).unwrap_err();
    assert!(matches!(err, Error::CrcMismatch { .. }));
    assert!(err.is_io());
    assert_eq!(err.status_word(), 0x0012);
}

#[test]
fn read_reply_data() {
    let frame = data_reply(0x03, &[0x00, 0x0F, 0x20]);
    assert_eq!(
        decode_response_frame(&Command::read_binary(0, 3), &frame),
        Ok(vec![0x00, 0x0F, 0x20])
    );
}

#[test]
fn short_frame_is_invalid_length() {
    let mut frame = vec![0x02];
    append_crc(&mut frame);
    assert!(matches!(
        decode_response_frame(&Command::SelectCcFile, &frame),
        Err(Error::InvalidLength { .. })
    ));
}
