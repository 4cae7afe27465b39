// libm24sr/libm24sr/src/constants.rs

//! Wire-level constants of the M24SR command set.

/// ISO 7816 class byte
pub const CLA_DEFAULT: u8 = 0x00;
/// ST proprietary class byte
pub const CLA_ST: u8 = 0xA2;

/// SELECT FILE instruction
pub const INS_SELECT_FILE: u8 = 0xA4;
/// READ BINARY instruction (also ExtendedReadBinary with [`CLA_ST`])
pub const INS_READ_BINARY: u8 = 0xB0;
/// UPDATE BINARY instruction
pub const INS_UPDATE_BINARY: u8 = 0xD6;
/// VERIFY instruction
pub const INS_VERIFY: u8 = 0x20;
/// CHANGE REFERENCE DATA instruction
pub const INS_CHANGE_REFERENCE_DATA: u8 = 0x24;
/// DISABLE VERIFICATION REQUIREMENT instruction
pub const INS_DISABLE_VERIFICATION_REQUIREMENT: u8 = 0x26;
/// ENABLE VERIFICATION REQUIREMENT instruction
pub const INS_ENABLE_VERIFICATION_REQUIREMENT: u8 = 0x28;
/// SendInterrupt and StateControl share the UPDATE BINARY opcode under
/// [`CLA_ST`].
pub const INS_SEND_INTERRUPT: u8 = 0xD6;

/// P1/P2 selecting an application by name
pub const P1P2_SELECT_APPLICATION: u16 = 0x0400;
/// P1/P2 selecting an elementary file by id
pub const P1P2_SELECT_FILE: u16 = 0x000C;
/// NDEF Tag Application name, version 2
pub const NDEF_APPLICATION_ID: [u8; 7] = [0xD2, 0x76, 0x00, 0x00, 0x85, 0x01, 0x01];
/// Capability Container file id
pub const CC_FILE_ID: u16 = 0xE103;
/// ST system file id
pub const SYSTEM_FILE_ID: u16 = 0xE101;

/// P1/P2 of the SendInterrupt command
pub const P1P2_SEND_INTERRUPT: u16 = 0x001E;
/// P1/P2 of the StateControl command
pub const P1P2_STATE_CONTROL: u16 = 0x001F;

/// GetSession, sent as a bare byte outside any I-Block
pub const GET_SESSION_COMMAND: u8 = 0x26;
/// KillRFSession, sent as a bare byte outside any I-Block
pub const KILL_SESSION_COMMAND: u8 = 0x52;
/// S(DESELECT) with its CRC
pub const DESELECT_COMMAND: [u8; 3] = [0xC2, 0xE0, 0xB4];

/// I-Block PCB with block number 0
pub const PCB_I_BLOCK: u8 = 0x02;
/// PCB bit announcing a device id byte
pub const PCB_DID_FOLLOWING: u8 = 0x08;
/// S(WTX) request/response PCB
pub const PCB_S_BLOCK_WTX: u8 = 0xF2;
/// Mask selecting the block type bits of a PCB
pub const MASK_BLOCK: u8 = 0xC0;
/// Block type bits of an S-Block
pub const MASK_S_BLOCK: u8 = 0xC0;

// Command structure bitmask: which fields an I-Block carries
/// Carries the PCB
pub const FIELD_PCB: u16 = 0x0001;
/// Carries CLA
pub const FIELD_CLA: u16 = 0x0002;
/// Carries INS
pub const FIELD_INS: u16 = 0x0004;
/// Carries P1
pub const FIELD_P1: u16 = 0x0008;
/// Carries P2
pub const FIELD_P2: u16 = 0x0010;
/// Carries Lc
pub const FIELD_LC: u16 = 0x0020;
/// Carries a data field
pub const FIELD_DATA: u16 = 0x0040;
/// Carries Le
pub const FIELD_LE: u16 = 0x0080;
/// Carries the trailing CRC
pub const FIELD_CRC: u16 = 0x0100;

/// Field set of SelectApplication
pub const CMDSTRUCT_SELECT_APPLICATION: u16 = 0x01FF;
/// Field set of SelectFile
pub const CMDSTRUCT_SELECT_FILE: u16 = 0x017F;
/// Field set of ReadBinary
pub const CMDSTRUCT_READ_BINARY: u16 = 0x019F;
/// Field set of UpdateBinary
pub const CMDSTRUCT_UPDATE_BINARY: u16 = 0x017F;
/// Field set of a bare Verify (password status query)
pub const CMDSTRUCT_VERIFY_WITHOUT_PASSWORD: u16 = 0x013F;
/// Field set of Verify carrying a password
pub const CMDSTRUCT_VERIFY_WITH_PASSWORD: u16 = 0x017F;
/// Field set of ChangeReferenceData
pub const CMDSTRUCT_CHANGE_REFERENCE_DATA: u16 = 0x017F;
/// Field set of Enable/DisableVerificationRequirement
pub const CMDSTRUCT_VERIFICATION_REQUIREMENT: u16 = 0x011F;
/// Field set of Enable/DisablePermanentState
pub const CMDSTRUCT_PERMANENT_STATE: u16 = 0x011F;
/// Field set of SendInterrupt
pub const CMDSTRUCT_SEND_INTERRUPT: u16 = 0x013F;
/// Field set of StateControl
pub const CMDSTRUCT_STATE_CONTROL: u16 = 0x017F;

/// SW1/SW2 of a successful command
pub const STATUS_SUCCESS: u16 = 0x9000;
/// PCB + SW1 + SW2 + CRC
pub const STATUS_RESPONSE_LEN: usize = 5;
/// PCB + WTX byte + CRC
pub const WTX_RESPONSE_LEN: usize = 4;
/// Deselect echo: PCB + CRC
pub const DESELECT_RESPONSE_LEN: usize = 3;
/// Offset from the end of a response to SW1 (SW2 follows).
pub const STATUS_OFFSET_FROM_END: usize = 4;
/// I-Block header preceding user data in a response.
pub const RESPONSE_DATA_OFFSET: usize = 1;

/// Largest read/update payload a single command may carry.
pub const MAX_BYTE_OPERATION_LEN: usize = 246;

/// Passwords are 128 bits
pub const PASSWORD_LEN: usize = 16;
/// Reference of the read password
pub const READ_PASSWORD_ID: u16 = 0x0001;
/// Reference of the write password
pub const WRITE_PASSWORD_ID: u16 = 0x0002;
/// Reference of the I2C password
pub const I2C_PASSWORD_ID: u16 = 0x0003;

/// Offset of the GPO configuration byte in the system file
pub const SYSTEM_FILE_GPO_OFFSET: u16 = 0x0004;
/// Offset of the IC reference byte in the system file
pub const SYSTEM_FILE_CHIP_ID_OFFSET: u16 = 0x0011;

/// Capability Container length with one NDEF File Control TLV
pub const CC_FILE_LEN: usize = 15;

/// Big-endian NLEN prefix of the NDEF file
pub const NDEF_LENGTH_PREFIX_LEN: usize = 2;
