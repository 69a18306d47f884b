use log::{debug, info, warn};
use tascam_types::{DeviceState, DeviceStatus};

use crate::devices::DeviceDescriptor;
use crate::error::TransportError;
use crate::state;
use crate::transport::{Transport, UsbTransport};

pub type TransportFactory = Box<dyn Fn(&DeviceDescriptor) -> Box<dyn Transport> + Send>;

/// Owns the active transport and the connection state machine around it.
/// Every transport fault stops here and becomes a status transition plus a
/// message the UI can show; nothing below this layer retries.
///
/// Not safe for concurrent use; the owning layer serialises calls.
pub struct DeviceManager {
    descriptor: DeviceDescriptor,
    factory: TransportFactory,
    transport: Option<Box<dyn Transport>>,
    status: DeviceStatus,
    last_error: Option<String>,
}

impl DeviceManager {
    /// Manager for one supported device, talking through libusb.
    pub fn for_device(descriptor: DeviceDescriptor) -> Self {
        Self::with_factory(
            descriptor,
            Box::new(|descriptor: &DeviceDescriptor| -> Box<dyn Transport> {
                Box::new(UsbTransport::new(
                    descriptor.vendor_id,
                    descriptor.product_id,
                ))
            }),
        )
    }

    /// Manager with an injected transport factory, for tests and alternate
    /// backends.
    pub fn with_factory(descriptor: DeviceDescriptor, factory: TransportFactory) -> Self {
        Self {
            descriptor,
            factory,
            transport: None,
            status: DeviceStatus::Disconnected,
            last_error: None,
        }
    }

    pub fn descriptor(&self) -> DeviceDescriptor {
        self.descriptor
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Open a fresh session with the device. Returns whether the device is
    /// now connected; on failure the reason is available via `last_error()`.
    pub fn connect(&mut self) -> bool {
        // Drop any session we already hold. Reconnecting while connected
        // must not leave a second set of claimed interfaces behind.
        if let Some(mut transport) = self.transport.take() {
            transport.close();
        }

        let mut transport = (self.factory)(&self.descriptor);
        match transport.open() {
            Ok(()) => {
                info!("Connected to {}", self.descriptor.name);
                self.transport = Some(transport);
                self.status = DeviceStatus::Connected;
                self.last_error = None;
                true
            }
            Err(TransportError::DeviceNotFound) => {
                debug!("{} is not attached", self.descriptor.name);
                self.fail_connect(DeviceStatus::Disconnected, "Device not found")
            }
            Err(TransportError::PermissionDenied) => {
                warn!("Access to {} denied", self.descriptor.name);
                self.fail_connect(DeviceStatus::Error, "Permission denied")
            }
            Err(error) => {
                warn!("Failed to open {}: {}", self.descriptor.name, error);
                self.fail_connect(DeviceStatus::Error, "Transport error")
            }
        }
    }

    fn fail_connect(&mut self, status: DeviceStatus, message: &str) -> bool {
        self.transport = None;
        self.status = status;
        self.last_error = Some(message.to_owned());
        false
    }

    /// Read a full snapshot from the connected device. `None` when not
    /// connected, or when the device fell over mid-read; a partial snapshot
    /// is never returned.
    pub fn read_state(&mut self) -> Option<DeviceState> {
        if self.status != DeviceStatus::Connected {
            return None;
        }
        let transport = self.transport.as_mut()?;

        match state::read_state(transport.as_mut()) {
            Ok(snapshot) => Some(snapshot),
            Err(error) => {
                warn!("Lost {} mid-read: {}", self.descriptor.name, error);
                if let Some(mut transport) = self.transport.take() {
                    transport.close();
                }
                self.status = DeviceStatus::Error;
                self.last_error = Some("Communication failed during read".to_owned());
                None
            }
        }
    }

    /// Close the session and return to the idle state.
    pub fn disconnect(&mut self) {
        if let Some(mut transport) = self.transport.take() {
            transport.close();
        }
        self.status = DeviceStatus::Disconnected;
        self.last_error = None;
    }
}
