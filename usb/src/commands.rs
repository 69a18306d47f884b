/// Vendor commands understood by the US-4x4 firmware. Each one reads a single
/// byte per wIndex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Powersave,
    InputEnable,
    MonitoringMode,
    Routing,
}

impl Command {
    pub fn command_id(&self) -> u8 {
        match self {
            Command::Powersave => 0x03,
            Command::InputEnable => 0x05,
            Command::MonitoringMode => 0x07,
            Command::Routing => 0x09,
        }
    }

    /// Valid wIndex values for this command. Reads outside the range return
    /// garbage on real hardware, so callers stick to these.
    pub fn indices(&self) -> &'static [u16] {
        match self {
            Command::Powersave => &[0],
            Command::InputEnable => &[0, 1, 2, 3],
            Command::MonitoringMode => &[0, 1],
            Command::Routing => &[0, 1],
        }
    }
}
