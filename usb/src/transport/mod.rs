use crate::error::TransportError;

mod fake;
mod libusb;

pub use fake::FakeTransport;
pub use libusb::UsbTransport;

pub const DEFAULT_TIMEOUT_MS: u32 = 1000;

/// One USB control transfer, fully described. Built fresh for every call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CtrlRequest {
    pub request_type: u8,
    pub request: u8,
    pub value: u16,
    pub index: u16,
    pub length: u16,
    pub timeout_ms: u32,
}

impl CtrlRequest {
    pub fn new(request_type: u8, request: u8, value: u16, index: u16, length: u16) -> Self {
        Self {
            request_type,
            request,
            value,
            index,
            length,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Blocking session with one physical device. Exactly one open transport may
/// hold the claimed interfaces of a given device; the USB stack enforces
/// that, not us.
pub trait Transport: Send {
    fn open(&mut self) -> Result<(), TransportError>;

    /// Release everything and forget the handle. Always leaves the transport
    /// closed, even when individual release steps fail along the way.
    fn close(&mut self);

    fn is_open(&self) -> bool;

    /// Inbound control transfer. Returns at most `request.length` bytes,
    /// truncated to what the device actually sent. Fails with
    /// [`TransportError::Disconnected`] when the transport is not open.
    fn ctrl_transfer_in(&mut self, request: CtrlRequest) -> Result<Vec<u8>, TransportError>;

    /// Outbound control transfer, returning the number of bytes written.
    fn ctrl_transfer_out(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
        timeout_ms: u32,
    ) -> Result<usize, TransportError>;
}
