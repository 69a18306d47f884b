use std::time::Duration;

use log::{debug, info, warn};
use rusb::{Device, DeviceHandle, GlobalContext};

use crate::error::{classify_claim_error, TransportError};
use crate::transport::{CtrlRequest, Transport};

// The US-4x4 spreads its audio, MIDI and vendor control endpoints across
// interfaces 0-4; the whole set has to be claimed for an exclusive session.
const INTERFACES: [u8; 5] = [0, 1, 2, 3, 4];

/// Transport backed by libusb. Holds the device handle and the claimed
/// interface set between `open()` and `close()`.
pub struct UsbTransport {
    vendor_id: u16,
    product_id: u16,
    handle: Option<DeviceHandle<GlobalContext>>,
    claimed: Vec<u8>,
}

impl UsbTransport {
    pub fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
            handle: None,
            claimed: Vec::new(),
        }
    }

    /// Enumeration-only presence probe. Never opens or claims anything, so
    /// it is safe to call repeatedly while a session is active elsewhere.
    pub fn is_present(vendor_id: u16, product_id: u16) -> bool {
        Self::find_device(vendor_id, product_id).is_some()
    }

    fn find_device(vendor_id: u16, product_id: u16) -> Option<Device<GlobalContext>> {
        if let Ok(devices) = rusb::devices() {
            for device in devices.iter() {
                if let Ok(descriptor) = device.device_descriptor() {
                    if descriptor.vendor_id() == vendor_id && descriptor.product_id() == product_id
                    {
                        return Some(device);
                    }
                }
            }
        }
        None
    }

    fn claim_all(handle: &mut DeviceHandle<GlobalContext>) -> Result<Vec<u8>, TransportError> {
        if let Err(error) = handle.set_active_configuration(1) {
            debug!("Failed to select configuration: {}", error);
            return Err(classify_claim_error(error));
        }

        for interface in INTERFACES {
            // The kernel audio/MIDI drivers usually own these. A failed
            // detach just means nothing was attached, or the platform has no
            // way of telling us.
            if handle.kernel_driver_active(interface).unwrap_or(false) {
                if let Err(error) = handle.detach_kernel_driver(interface) {
                    debug!(
                        "Could not detach kernel driver from interface {}: {}",
                        interface, error
                    );
                }
            }
        }

        let mut claimed = Vec::with_capacity(INTERFACES.len());
        for interface in INTERFACES {
            if let Err(error) = handle.claim_interface(interface) {
                warn!("Failed to claim interface {}: {}", interface, error);
                for claimed_interface in claimed {
                    let _ = handle.release_interface(claimed_interface);
                }
                return Err(classify_claim_error(error));
            }
            claimed.push(interface);
        }

        Ok(claimed)
    }
}

impl Transport for UsbTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        let device = Self::find_device(self.vendor_id, self.product_id)
            .ok_or(TransportError::DeviceNotFound)?;

        let mut handle = device.open().map_err(classify_claim_error)?;
        debug!(
            "Opened device {:04x}:{:04x}, claiming interfaces..",
            self.vendor_id, self.product_id
        );

        // On failure the handle is dropped here and the transport stays
        // closed with nothing claimed.
        self.claimed = Self::claim_all(&mut handle)?;
        self.handle = Some(handle);

        info!(
            "Connected to device {:04x}:{:04x}",
            self.vendor_id, self.product_id
        );
        Ok(())
    }

    fn close(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            for interface in self.claimed.drain(..) {
                if let Err(error) = handle.release_interface(interface) {
                    debug!("Failed to release interface {}: {}", interface, error);
                }
            }

            // Hand interface 0 back so the kernel audio driver can rebind.
            if let Err(error) = handle.attach_kernel_driver(0) {
                debug!("Could not reattach kernel driver: {}", error);
            }

            info!(
                "Closed device {:04x}:{:04x}",
                self.vendor_id, self.product_id
            );
        }
        self.claimed.clear();
    }

    fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    fn ctrl_transfer_in(&mut self, request: CtrlRequest) -> Result<Vec<u8>, TransportError> {
        let handle = self.handle.as_mut().ok_or(TransportError::Disconnected)?;

        let mut buf = vec![0u8; request.length as usize];
        let read = handle.read_control(
            request.request_type,
            request.request,
            request.value,
            request.index,
            &mut buf,
            Duration::from_millis(u64::from(request.timeout_ms)),
        )?;

        buf.truncate(read);
        Ok(buf)
    }

    fn ctrl_transfer_out(
        &mut self,
        request_type: u8,
        request: u8,
        value: u16,
        index: u16,
        data: &[u8],
        timeout_ms: u32,
    ) -> Result<usize, TransportError> {
        let handle = self.handle.as_mut().ok_or(TransportError::Disconnected)?;

        let written = handle.write_control(
            request_type,
            request,
            value,
            index,
            data,
            Duration::from_millis(u64::from(timeout_ms)),
        )?;

        Ok(written)
    }
}
