use std::collections::HashMap;

use crate::error::TransportError;
use crate::transport::{CtrlRequest, Transport};

type ReplyKey = (u8, u8, u16, u16, u16);

/// Deterministic in-memory transport for tests and development without
/// hardware. Replies are canned per request tuple; anything unmapped reads
/// back as zeroes so probing unknown parameters stays total and
/// side-effect free. Every inbound transfer is recorded for inspection.
#[derive(Default)]
pub struct FakeTransport {
    open: bool,
    replies: HashMap<ReplyKey, Vec<u8>>,
    requests: Vec<CtrlRequest>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a canned reply for the exact `(request_type, request, value,
    /// index, length)` tuple. Longer data is truncated to `length` when read.
    pub fn set_reply(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        length: u16,
        data: &[u8],
    ) {
        self.replies
            .insert((request_type, request, value, index, length), data.to_vec());
    }

    /// Every inbound transfer seen so far, in issue order.
    pub fn requests(&self) -> &[CtrlRequest] {
        &self.requests
    }
}

impl Transport for FakeTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn ctrl_transfer_in(&mut self, request: CtrlRequest) -> Result<Vec<u8>, TransportError> {
        if !self.open {
            return Err(TransportError::Disconnected);
        }

        self.requests.push(request);

        let key = (
            request.request_type,
            request.request,
            request.value,
            request.index,
            request.length,
        );
        let data = match self.replies.get(&key) {
            Some(reply) => {
                let mut reply = reply.clone();
                reply.truncate(request.length as usize);
                reply
            }
            None => vec![0; request.length as usize],
        };

        Ok(data)
    }

    fn ctrl_transfer_out(
        &mut self,
        _request_type: u8,
        _request: u8,
        _value: u16,
        _index: u16,
        data: &[u8],
        _timeout_ms: u32,
    ) -> Result<usize, TransportError> {
        if !self.open {
            return Err(TransportError::Disconnected);
        }
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfers_require_an_open_transport() {
        let mut transport = FakeTransport::new();
        assert!(!transport.is_open());

        let result = transport.ctrl_transfer_in(CtrlRequest::new(0xC0, 0x03, 0, 0, 1));
        assert!(matches!(result, Err(TransportError::Disconnected)));

        let result = transport.ctrl_transfer_out(0x40, 0x03, 0, 0, &[1], 1000);
        assert!(matches!(result, Err(TransportError::Disconnected)));

        transport.open().unwrap();
        assert!(transport.is_open());
        transport.close();
        assert!(!transport.is_open());
    }

    #[test]
    fn unmapped_reads_come_back_as_zeroes() {
        let mut transport = FakeTransport::new();
        transport.open().unwrap();

        let data = transport
            .ctrl_transfer_in(CtrlRequest::new(0xA1, 2, 0x0100, 0x2900, 16))
            .unwrap();
        assert_eq!(data, vec![0u8; 16]);
    }

    #[test]
    fn replies_are_keyed_by_the_full_tuple_and_truncated() {
        let mut transport = FakeTransport::new();
        transport.open().unwrap();
        transport.set_reply(0xC0, 0x03, 0, 0, 1, &[0x01, 0x02, 0x03]);

        let data = transport
            .ctrl_transfer_in(CtrlRequest::new(0xC0, 0x03, 0, 0, 1))
            .unwrap();
        assert_eq!(data, vec![0x01]);

        // Same request with a different length is a different key.
        let data = transport
            .ctrl_transfer_in(CtrlRequest::new(0xC0, 0x03, 0, 0, 2))
            .unwrap();
        assert_eq!(data, vec![0, 0]);
    }

    #[test]
    fn writes_report_the_full_length() {
        let mut transport = FakeTransport::new();
        transport.open().unwrap();

        let written = transport
            .ctrl_transfer_out(0x40, 0x05, 0, 1, &[0xAA, 0xBB], 1000)
            .unwrap();
        assert_eq!(written, 2);
    }
}
