use log::error;

use crate::commands::Command;
use crate::error::TransportError;
use crate::transport::{CtrlRequest, Transport};

// Prepare exchange the firmware wants before every parameter read. Skipping
// it makes the read below return stale data.
const PREP_REQUEST_TYPE: u8 = 0xA1;
const PREP_REQUEST: u8 = 2;
const PREP_VALUE: u16 = 0x0100;
const PREP_INDEX: u16 = 0x2900;

const READ_REQUEST_TYPE: u8 = 0xC0;

/// Read a single byte parameter from the device.
///
/// Three transfers per read, always in this order: a prepare read of 16
/// bytes, a prepare read of 50 bytes, then the actual one-byte read. The
/// handshake cannot be reused across calls.
pub fn read_byte(
    transport: &mut dyn Transport,
    command: Command,
    index: u16,
) -> Result<u8, TransportError> {
    transport.ctrl_transfer_in(CtrlRequest::new(
        PREP_REQUEST_TYPE,
        PREP_REQUEST,
        PREP_VALUE,
        PREP_INDEX,
        16,
    ))?;
    transport.ctrl_transfer_in(CtrlRequest::new(
        PREP_REQUEST_TYPE,
        PREP_REQUEST,
        PREP_VALUE,
        PREP_INDEX,
        50,
    ))?;

    let data = transport.ctrl_transfer_in(CtrlRequest::new(
        READ_REQUEST_TYPE,
        command.command_id(),
        0,
        index,
        1,
    ))?;

    match data.first() {
        Some(&byte) => Ok(byte),
        None => {
            error!("Empty response to {:?} read at index {}", command, index);
            Err(TransportError::Usb(rusb::Error::Pipe))
        }
    }
}
