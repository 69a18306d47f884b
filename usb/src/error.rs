#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    #[error("No matching USB device was found")]
    DeviceNotFound,

    #[error("Access to the USB device was denied")]
    PermissionDenied,

    #[error("Transport is not open")]
    Disconnected,

    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),
}

/// Sort an open/claim failure into the permission bucket or the generic one.
///
/// libusb reports a clean `Access` error on most platforms, but some backends
/// only surface the problem in the message text, so a substring match is kept
/// as a best-effort fallback. It is a heuristic, nothing stronger.
pub(crate) fn classify_claim_error(error: rusb::Error) -> TransportError {
    if error == rusb::Error::Access {
        return TransportError::PermissionDenied;
    }

    let message = error.to_string().to_lowercase();
    if message.contains("permission") || message.contains("access") {
        return TransportError::PermissionDenied;
    }

    TransportError::Usb(error)
}
