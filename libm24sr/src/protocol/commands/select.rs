// libm24sr/libm24sr/src/protocol/commands/select.rs

//! Application and file selection.

use crate::constants::{
    CLA_DEFAULT, CMDSTRUCT_SELECT_APPLICATION, CMDSTRUCT_SELECT_FILE, INS_SELECT_FILE,
    NDEF_APPLICATION_ID, P1P2_SELECT_APPLICATION, P1P2_SELECT_FILE,
};
use crate::protocol::frame::Apdu;
use crate::types::FileId;

/// Select the NDEF Tag Application (D2 76 00 00 85 01 01), Le = 0.
pub fn encode_select_application() -> Apdu {
    Apdu::new(
        CLA_DEFAULT,
        INS_SELECT_FILE,
        P1P2_SELECT_APPLICATION,
        CMDSTRUCT_SELECT_APPLICATION,
    )
    .with_data(&NDEF_APPLICATION_ID)
    .with_le(0x00)
}

/// Select an elementary file by identifier (CC, system or NDEF file).
pub fn encode_select_file(id: FileId) -> Apdu {
    Apdu::new(CLA_DEFAULT, INS_SELECT_FILE, P1P2_SELECT_FILE, CMDSTRUCT_SELECT_FILE)
        .with_data(&id.to_be_bytes())
}
