use strum::IntoEnumIterator;
use tascam_types::{DeviceState, InputChannel, InputPair, OutputPair};

use crate::commands::Command;
use crate::error::TransportError;
use crate::protocol;
use crate::transport::Transport;

/// Aggregate a full snapshot of the device: one powersave read, four input
/// enables, two monitoring modes, two routing selections, in that order.
/// Nine byte reads in total. Any transport failure propagates untouched;
/// there is no retry and no partial snapshot.
pub fn read_state(transport: &mut dyn Transport) -> Result<DeviceState, TransportError> {
    let mut state = DeviceState::default();

    let powersave = protocol::read_byte(transport, Command::Powersave, 0)?;
    state.powersave = powersave != 0;

    for (channel, &index) in InputChannel::iter().zip(Command::InputEnable.indices()) {
        let value = protocol::read_byte(transport, Command::InputEnable, index)?;
        state.input_enable[channel] = value != 0;
    }

    for (pair, &index) in InputPair::iter().zip(Command::MonitoringMode.indices()) {
        state.monitoring_mode[pair] = protocol::read_byte(transport, Command::MonitoringMode, index)?;
    }

    for (pair, &index) in OutputPair::iter().zip(Command::Routing.indices()) {
        state.routing[pair] = protocol::read_byte(transport, Command::Routing, index)?;
    }

    Ok(state)
}
