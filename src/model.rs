use std::fmt;

pub type KWh = f64;

/// Placeholder reported for textual `webData` positions the firmware
/// left empty.
pub const NO_DATA: &str = "no data";

#[derive(Debug, Clone)]
pub struct Api {
    pub address: String,
    pub username: String,
    pub password: String,
}

/// One decoded status snapshot of an Omnik inverter WiFi module.
///
/// The first group of fields is copied verbatim from the `var` assignments
/// of `/js/status.js`; the second group is decoded from the positional
/// `webData` payload. Every field is populated on a successful parse.
#[derive(Debug, Clone, PartialEq)]
pub struct InverterReading {
    /* verbatim module variables */
    pub version: String,
    pub device_id: String,
    pub mac_address: String,
    pub signal_strength: String,
    pub wan_ip: String,
    pub nmac: String,
    pub fephy: String,
    /* decoded from webData */
    pub serial_number: String,
    pub main_firmware: String,
    pub slave_firmware: String,
    pub model: String,
    pub current_power: u64,
    pub day_energy: KWh,
    pub total_energy: KWh,
    pub alerts: u64,
    pub last_update: u64,
}

impl fmt::Display for InverterReading {
    /// Renders the reading as the labeled report the device's own web UI
    /// shows, with both energy values at two fractional digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inverter serial number   : {}", self.serial_number)?;
        writeln!(f, "Firmware version (main)  : {}", self.main_firmware)?;
        writeln!(f, "Firmware version (slave) : {}", self.slave_firmware)?;
        writeln!(f, "Inverter model           : {}", self.model)?;
        writeln!(f, "Module firmware version  : {}", self.version)?;
        writeln!(f, "Device serial number     : {}", self.device_id)?;
        writeln!(f, "MAC address              : {}", self.mac_address)?;
        writeln!(f, "Signal strength          : {}", self.signal_strength)?;
        writeln!(f, "WAN IP address           : {}", self.wan_ip)?;
        writeln!(f, "nmac                     : {}", self.nmac)?;
        writeln!(f, "fephy                    : {}", self.fephy)?;
        writeln!(f, "Current power            : {} W", self.current_power)?;
        writeln!(f, "Yield today              : {:.2} kWh", self.day_energy)?;
        writeln!(f, "Total yield              : {:.2} kWh", self.total_energy)?;
        writeln!(f, "Alerts                   : {}", self.alerts)?;
        write!(f, "Last update              : {} min ago", self.last_update)
    }
}
