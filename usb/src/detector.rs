use log::debug;

use crate::devices::{DeviceDescriptor, SUPPORTED_DEVICES};
use crate::transport::UsbTransport;

/// Scan the bus for hardware we know how to drive, in registry order.
/// Enumeration only; nothing is opened, claimed or otherwise disturbed, so
/// this is safe to call repeatedly.
pub fn detect_supported_devices() -> Vec<DeviceDescriptor> {
    detect_with(UsbTransport::is_present, &SUPPORTED_DEVICES)
}

/// Registry probe with an injectable presence check, for tests and
/// alternate backends.
pub fn detect_with<F>(is_present: F, registry: &[DeviceDescriptor]) -> Vec<DeviceDescriptor>
where
    F: Fn(u16, u16) -> bool,
{
    let mut found = Vec::new();
    for descriptor in registry {
        if is_present(descriptor.vendor_id, descriptor.product_id) {
            debug!("Found {}", descriptor.name);
            found.push(*descriptor);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{PID_US4X4, VID_TASCAM};

    #[test]
    fn only_attached_devices_are_reported() {
        let found = detect_with(
            |vendor_id, product_id| vendor_id == VID_TASCAM && product_id == PID_US4X4,
            &SUPPORTED_DEVICES,
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Tascam US-4x4");
    }

    #[test]
    fn nothing_attached_means_nothing_found() {
        let found = detect_with(|_, _| false, &SUPPORTED_DEVICES);
        assert!(found.is_empty());
    }

    #[test]
    fn registry_order_is_preserved() {
        let found = detect_with(|_, _| true, &SUPPORTED_DEVICES);

        let names: Vec<_> = found.iter().map(|descriptor| descriptor.name).collect();
        assert_eq!(
            names,
            vec!["Tascam US-4x4", "Tascam US-4x4HR", "Tascam US-16x08"]
        );
    }

    #[test]
    fn probing_is_idempotent() {
        let probe = |vendor_id: u16, _product_id: u16| vendor_id == VID_TASCAM;

        let first = detect_with(probe, &SUPPORTED_DEVICES);
        let second = detect_with(probe, &SUPPORTED_DEVICES);
        assert_eq!(first, second);
    }
}
