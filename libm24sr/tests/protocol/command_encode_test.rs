use libm24sr::protocol::codec::encode_command_frame;
use libm24sr::protocol::{BlockSequence, Command, residue_is_zero};
use libm24sr::{Error, FileId, Password, PasswordType};

fn encode(cmd: &Command) -> Vec<u8> {
    let mut seq = BlockSequence::new();
    encode_command_frame(cmd, &mut seq, None).unwrap()
}

#[test]
fn select_application_frame() {
    let frame = encode(&Command::SelectApplication);
    assert_eq!(
        &frame[..13],
        &[0x02, 0x00, 0xA4, 0x04, 0x00, 0x07, 0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01]
    );
    assert_eq!(frame[13], 0x00);
    assert!(residue_is_zero(&frame));
}

#[test]
fn select_cc_and_system_files() {
    assert_eq!(
        &encode(&Command::SelectCcFile)[..8],
        &[0x02, 0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x03]
    );
    assert_eq!(
        &encode(&Command::SelectSystemFile)[..8],
        &[0x02, 0x00, 0xA4, 0x00, 0x0C, 0x02, 0xE1, 0x01]
    );
    assert_eq!(
        &encode(&Command::SelectNdefFile(FileId::new(0x0004)))[6..8],
        &[0x00, 0x04]
    );
}

#[test]
fn read_binary_frames() {
    assert_eq!(
        &encode(&Command::read_binary(0x0102, 0x0F))[..6],
        &[0x02, 0x00, 0xB0, 0x01, 0x02, 0x0F]
    );
    assert_eq!(encode(&Command::st_read_binary(0, 2))[1], 0xA2);
}

#[test]
fn read_lengths_are_clamped() {
    assert_eq!(
        Command::read_binary(0, 1000),
        Command::ReadBinary {
            offset: 0,
            length: 246
        }
    );
}

#[test]
fn oversized_update_is_refused_not_cut() {
    let data = vec![0xAB; 300];
    let cmd = Command::update_binary(0, &data);
    match &cmd {
        Command::UpdateBinary { data, .. } => assert_eq!(data.len(), 300),
        other => panic!("unexpected: {:?}", other),
    }
    let mut seq = BlockSequence::new();
    assert_eq!(
        encode_command_frame(&cmd, &mut seq, None),
        Err(Error::InvalidLength {
            expected: 246,
            actual: 300
        })
    );

    let edge = encode(&Command::update_binary(0, &[0x11; 246]));
    assert_eq!(edge[5], 246);
}

#[test]
fn update_binary_frame() {
    let frame = encode(&Command::update_binary(0x0004, &[0x12, 0x34]));
    assert_eq!(&frame[..8], &[0x02, 0x00, 0xD6, 0x00, 0x04, 0x02, 0x12, 0x34]);
    assert_eq!(frame.len(), 10);
}

#[test]
fn verify_with_and_without_password() {
    let bare = encode(&Command::Verify {
        password: PasswordType::Read,
        value: None,
    });
    assert_eq!(&bare[..6], &[0x02, 0x00, 0x20, 0x00, 0x01, 0x00]);
    assert_eq!(bare.len(), 8);

    let with = encode(&Command::Verify {
        password: PasswordType::I2c,
        value: Some(Password::DEFAULT),
    });
    assert_eq!(&with[..6], &[0x02, 0x00, 0x20, 0x00, 0x03, 0x10]);
    assert_eq!(with.len(), 6 + 16 + 2);
}

#[test]
fn permanent_state_uses_st_class() {
    let frame = encode(&Command::EnablePermanentState(PasswordType::Write));
    assert_eq!(&frame[..5], &[0x02, 0xA2, 0x28, 0x00, 0x02]);
    let frame = encode(&Command::DisableVerificationRequirement(PasswordType::Read));
    assert_eq!(&frame[..5], &[0x02, 0x00, 0x26, 0x00, 0x01]);
}

#[test]
fn i2c_slot_rejected_for_access_rights() {
    assert!(matches!(
        Command::EnableVerificationRequirement(PasswordType::I2c).apdu(),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        Command::DisablePermanentState(PasswordType::I2c).apdu(),
        Err(Error::InvalidParameter(_))
    ));
}

#[test]
fn interrupt_and_state_control() {
    let frame = encode(&Command::SendInterrupt);
    assert_eq!(&frame[..6], &[0x02, 0xA2, 0xD6, 0x00, 0x1E, 0x00]);
    let frame = encode(&Command::StateControl { set: true });
    assert_eq!(&frame[..7], &[0x02, 0xA2, 0xD6, 0x00, 0x1F, 0x01, 0x01]);
}

#[test]
fn session_commands_are_raw_bytes() {
    assert_eq!(encode(&Command::GetSession), vec![0x26]);
    assert_eq!(encode(&Command::KillSession), vec![0x52]);
    assert_eq!(encode(&Command::Deselect), vec![0xC2, 0xE0, 0xB4]);
}
