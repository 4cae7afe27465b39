// libm24sr/libm24sr/src/protocol/commands/control.rs

//! ST GPO control: SendInterrupt and StateControl.

use crate::constants::{
    CLA_ST, CMDSTRUCT_SEND_INTERRUPT, CMDSTRUCT_STATE_CONTROL, INS_SEND_INTERRUPT,
    P1P2_SEND_INTERRUPT, P1P2_STATE_CONTROL,
};
use crate::protocol::frame::Apdu;

/// Pulse the GPO pin; the I2C GPO must be configured for interrupts first.
pub fn encode_send_interrupt() -> Apdu {
    Apdu::new(CLA_ST, INS_SEND_INTERRUPT, P1P2_SEND_INTERRUPT, CMDSTRUCT_SEND_INTERRUPT)
}

/// Drive the GPO low (`set`) or release it to high impedance.
pub fn encode_state_control(set: bool) -> Apdu {
    Apdu::new(CLA_ST, INS_SEND_INTERRUPT, P1P2_STATE_CONTROL, CMDSTRUCT_STATE_CONTROL)
        .with_data(&[u8::from(set)])
}
