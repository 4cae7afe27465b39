// libm24sr/libm24sr/src/protocol/commands/security.rs

//! Password commands: verify, change, enable/disable requirement and permanent state.

use crate::constants::{
    CLA_DEFAULT, CLA_ST, CMDSTRUCT_CHANGE_REFERENCE_DATA, CMDSTRUCT_PERMANENT_STATE,
    CMDSTRUCT_VERIFICATION_REQUIREMENT, CMDSTRUCT_VERIFY_WITHOUT_PASSWORD,
    CMDSTRUCT_VERIFY_WITH_PASSWORD, INS_CHANGE_REFERENCE_DATA,
    INS_DISABLE_VERIFICATION_REQUIREMENT, INS_ENABLE_VERIFICATION_REQUIREMENT, INS_VERIFY,
};
use crate::protocol::frame::Apdu;
use crate::types::{Password, PasswordType};
use crate::{Error, Result};

/// Verify a password. Without a value the command only asks whether the
/// slot currently requires one.
pub fn encode_verify(password: PasswordType, value: Option<&Password>) -> Apdu {
    match value {
        Some(pwd) => Apdu::new(CLA_DEFAULT, INS_VERIFY, password.id(), CMDSTRUCT_VERIFY_WITH_PASSWORD)
            .with_data(pwd.as_bytes()),
        None => Apdu::new(
            CLA_DEFAULT,
            INS_VERIFY,
            password.id(),
            CMDSTRUCT_VERIFY_WITHOUT_PASSWORD,
        ),
    }
}

/// ChangeReferenceData: set `password` to `value`.
pub fn encode_change_reference_data(password: PasswordType, value: &Password) -> Apdu {
    Apdu::new(
        CLA_DEFAULT,
        INS_CHANGE_REFERENCE_DATA,
        password.id(),
        CMDSTRUCT_CHANGE_REFERENCE_DATA,
    )
    .with_data(value.as_bytes())
}

/// Enable or disable the password requirement of the read or write slot.
pub fn encode_verification_requirement(enable: bool, password: PasswordType) -> Result<Apdu> {
    ensure_access_slot(password)?;
    Ok(Apdu::new(
        CLA_DEFAULT,
        requirement_ins(enable),
        password.id(),
        CMDSTRUCT_VERIFICATION_REQUIREMENT,
    ))
}

/// ST proprietary variant of the verification requirement command that
/// locks (or unlocks) the slot permanently.
pub fn encode_permanent_state(enable: bool, password: PasswordType) -> Result<Apdu> {
    ensure_access_slot(password)?;
    Ok(Apdu::new(
        CLA_ST,
        requirement_ins(enable),
        password.id(),
        CMDSTRUCT_PERMANENT_STATE,
    ))
}

fn requirement_ins(enable: bool) -> u8 {
    if enable {
        INS_ENABLE_VERIFICATION_REQUIREMENT
    } else {
        INS_DISABLE_VERIFICATION_REQUIREMENT
    }
}

fn ensure_access_slot(password: PasswordType) -> Result<()> {
    match password {
        PasswordType::Read | PasswordType::Write => Ok(()),
        PasswordType::I2c => Err(Error::InvalidParameter(
            "access state applies to the read or write password only".into(),
        )),
    }
}
