use enum_map::{Enum, EnumMap};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, FromRepr};

/// The four analog inputs on the front panel, in wIndex order.
#[derive(Copy, Clone, Debug, Display, Enum, EnumIter, EnumCount, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputChannel {
    In1,
    In2,
    In3,
    In4,
}

/// Input pairs as grouped by the direct monitoring section.
#[derive(Copy, Clone, Debug, Display, Enum, EnumIter, EnumCount, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InputPair {
    In12,
    In34,
}

/// Physical line output pairs, the routing destinations.
#[derive(Copy, Clone, Debug, Display, Enum, EnumIter, EnumCount, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutputPair {
    Line12,
    Line34,
}

/// Direct monitoring mode for an input pair.
#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, FromRepr, PartialEq, Eq)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MonitoringMode {
    Mono = 0,
    Stereo = 1,
}

impl MonitoringMode {
    /// Decode the raw monitoring byte. Unknown codes come back as `None`
    /// rather than guessing.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::from_repr(code)
    }
}

/// Signal source that can be routed to a line output pair.
#[derive(Copy, Clone, Debug, Display, EnumIter, EnumCount, FromRepr, PartialEq, Eq)]
#[repr(u8)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RouteSource {
    Mix = 0,
    Out12 = 1,
    Out34 = 2,
}

impl RouteSource {
    pub fn from_code(code: u8) -> Option<Self> {
        Self::from_repr(code)
    }
}

/// Where the connection to the hardware currently stands.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceStatus {
    Disconnected,
    Connected,
    Error,
}

/// One complete read of every tracked device parameter. Monitoring and
/// routing values are kept as the raw bytes the hardware reported; use
/// [`MonitoringMode::from_code`] and [`RouteSource::from_code`] to interpret
/// them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceState {
    pub powersave: bool,
    pub input_enable: EnumMap<InputChannel, bool>,
    pub monitoring_mode: EnumMap<InputPair, u8>,
    pub routing: EnumMap<OutputPair, u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monitoring_mode_decodes_known_codes() {
        assert_eq!(MonitoringMode::from_code(0), Some(MonitoringMode::Mono));
        assert_eq!(MonitoringMode::from_code(1), Some(MonitoringMode::Stereo));
        assert_eq!(MonitoringMode::from_code(2), None);
    }

    #[test]
    fn route_source_decodes_known_codes() {
        assert_eq!(RouteSource::from_code(0), Some(RouteSource::Mix));
        assert_eq!(RouteSource::from_code(1), Some(RouteSource::Out12));
        assert_eq!(RouteSource::from_code(2), Some(RouteSource::Out34));
        assert_eq!(RouteSource::from_code(3), None);
    }

    #[test]
    fn default_state_is_all_zeroes() {
        let state = DeviceState::default();
        assert!(!state.powersave);
        assert!(state.input_enable.values().all(|enabled| !enabled));
        assert!(state.monitoring_mode.values().all(|&mode| mode == 0));
        assert!(state.routing.values().all(|&source| source == 0));
    }
}
