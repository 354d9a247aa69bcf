use crate::api::error::Error;
use crate::model::{InverterReading, KWh, NO_DATA};

/* webData positions, fixed by the device firmware. Position 4 carries the
rated power and is not part of the reading. */
const SERIAL_NUMBER: usize = 0;
const MAIN_FIRMWARE: usize = 1;
const SLAVE_FIRMWARE: usize = 2;
const MODEL: usize = 3;
const CURRENT_POWER: usize = 5;
const DAY_ENERGY: usize = 6;
const TOTAL_ENERGY: usize = 7;
const ALERTS: usize = 8;
const LAST_UPDATE: usize = 9;

/// Extract the value of one `var <name>="<value>";` assignment.
///
/// The value runs from the end of the `var <name>="` marker to the next
/// `";` occurring after it; earlier `";` occurrences elsewhere in the
/// page are irrelevant. A page without the marker, or without a
/// terminator after it, is rejected.
fn extract<'a>(text: &'a str, name: &str) -> Result<&'a str, Error> {
    let marker = format!("var {}=\"", name);
    let start = text
        .find(&marker)
        .ok_or_else(|| Error::MissingVariable(name.to_string()))?
        + marker.len();
    let length = text[start..]
        .find("\";")
        .ok_or_else(|| Error::UnterminatedVariable(name.to_string()))?;
    Ok(&text[start..start + length])
}

/// Read a textual webData position. Empty and absent positions both
/// decode to the `"no data"` placeholder.
fn text_field(fields: &[&str], index: usize) -> String {
    match fields.get(index) {
        Some(value) if !value.is_empty() => (*value).to_string(),
        _ => NO_DATA.to_string(),
    }
}

/// Read a numeric webData position. Empty and absent positions both
/// decode to 0; any other content must parse as a base-10 integer.
fn numeric_field(fields: &[&str], index: usize) -> Result<u64, Error> {
    match fields.get(index) {
        Some(value) if !value.is_empty() => value
            .parse()
            .map_err(|_| Error::MalformedField(index, (*value).to_string())),
        _ => Ok(0),
    }
}

/// Decode one `/js/status.js` page into an `InverterReading`.
///
/// The page is not JSON: the module publishes its state as JavaScript
/// `var` assignments, seven of which are copied verbatim into the
/// reading, while `webData` is split on `,` and consumed positionally.
/// Any missing variable fails the whole parse; there is no partial
/// reading. webData pages shorter than ten positions are valid and
/// decode to defaults past the end (field counts vary by firmware
/// revision).
pub fn parse(text: &str) -> Result<InverterReading, Error> {
    let version = extract(text, "version")?;
    let device_id = extract(text, "m2mMid")?;
    let mac_address = extract(text, "wlanMac")?;
    let signal_strength = extract(text, "m2mRssi")?;
    let wan_ip = extract(text, "wanIp")?;
    let nmac = extract(text, "nmac")?;
    let fephy = extract(text, "fephy")?;
    let web_data = extract(text, "webData")?;

    let fields: Vec<&str> = web_data.split(',').collect();

    Ok(InverterReading {
        version: version.to_string(),
        device_id: device_id.to_string(),
        mac_address: mac_address.to_string(),
        signal_strength: signal_strength.to_string(),
        wan_ip: wan_ip.to_string(),
        nmac: nmac.to_string(),
        fephy: fephy.to_string(),
        serial_number: text_field(&fields, SERIAL_NUMBER),
        main_firmware: text_field(&fields, MAIN_FIRMWARE),
        slave_firmware: text_field(&fields, SLAVE_FIRMWARE),
        model: text_field(&fields, MODEL),
        current_power: numeric_field(&fields, CURRENT_POWER)?,
        /* yield today is published in 10 Wh steps, lifetime yield in 100 Wh steps */
        day_energy: numeric_field(&fields, DAY_ENERGY)? as KWh / 100.0,
        total_energy: numeric_field(&fields, TOTAL_ENERGY)? as KWh / 10.0,
        alerts: numeric_field(&fields, ALERTS)?,
        last_update: numeric_field(&fields, LAST_UPDATE)?,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn read_resource(filename: &str) -> String {
        let mut d = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        d.push(format!("resources/test/{}", filename));
        fs::read_to_string(d.as_path()).unwrap()
    }

    /// Minimal page carrying all eight variables with the given webData.
    fn page_with_web_data(web_data: &str) -> String {
        format!(
            "var version=\"NL1-V1.0-0077-4\";\n\
             var m2mMid=\"602123456\";\n\
             var wlanMac=\"AC-CF-23-8D-7A-30\";\n\
             var m2mRssi=\"74%\";\n\
             var wanIp=\"192.168.1.101\";\n\
             var nmac=\"\";\n\
             var fephy=\"\";\n\
             var webData=\"{}\";\n",
            web_data
        )
    }

    #[test]
    fn status_page() {
        let input = read_resource("status.js");
        let output = parse(&input).unwrap();
        assert_eq!("H4.01.38Y1.0.09W1.0.08", output.version);
        assert_eq!("602123456", output.device_id);
        assert_eq!("AC-CF-23-8D-7A-30", output.mac_address);
        assert_eq!("74%", output.signal_strength);
        assert_eq!("192.168.1.101", output.wan_ip);
        assert_eq!("", output.nmac);
        assert_eq!("", output.fephy);
        assert_eq!("NLBN4020157P5017", output.serial_number);
        assert_eq!("V5.04Build230", output.main_firmware);
        assert_eq!("V4.13Build253", output.slave_firmware);
        assert_eq!("omnik3000tl", output.model);
        assert_eq!(1850, output.current_power);
        assert_eq!(4.56, output.day_energy);
        assert_eq!(7892.3, output.total_energy);
        assert_eq!(0, output.alerts);
        assert_eq!(5, output.last_update);
    }

    #[test]
    fn missing_variable_names_the_variable() {
        let input = page_with_web_data("A,B,C,D,,1,2,3,4,5").replace("var wanIp=", "var lanIp=");
        assert_eq!(
            Err(Error::MissingVariable("wanIp".to_string())),
            parse(&input)
        );
    }

    #[test]
    fn terminator_before_marker_is_ignored() {
        /* the page opens with several empty assignments, so `";` occurs
        many times before the webData marker */
        let input = read_resource("status.js");
        let output = parse(&input).unwrap();
        assert_eq!("NLBN4020157P5017", output.serial_number);
    }

    #[test]
    fn unterminated_variable_is_rejected() {
        let mut input = page_with_web_data("A,B,C,D,,1,2,3,4,5");
        input.truncate(input.find("var webData=\"").unwrap() + "var webData=\"A,B".len());
        assert_eq!(
            Err(Error::UnterminatedVariable("webData".to_string())),
            parse(&input)
        );
    }

    #[test]
    fn empty_positions_decode_to_defaults() {
        let input = page_with_web_data("A,B,C,D,,100,250,12345,2,7");
        let output = parse(&input).unwrap();
        assert_eq!("A", output.serial_number);
        assert_eq!("B", output.main_firmware);
        assert_eq!("C", output.slave_firmware);
        assert_eq!("D", output.model);
        assert_eq!(100, output.current_power);
        assert_eq!(2.5, output.day_energy);
        assert_eq!(1234.5, output.total_energy);
        assert_eq!(2, output.alerts);
        assert_eq!(7, output.last_update);
    }

    #[test]
    fn all_empty_positions_decode_to_defaults() {
        let output = parse(&page_with_web_data(",,,,,,,,,")).unwrap();
        assert_eq!(NO_DATA, output.serial_number);
        assert_eq!(NO_DATA, output.main_firmware);
        assert_eq!(NO_DATA, output.slave_firmware);
        assert_eq!(NO_DATA, output.model);
        assert_eq!(0, output.current_power);
        assert_eq!(0.0, output.day_energy);
        assert_eq!(0.0, output.total_energy);
        assert_eq!(0, output.alerts);
        assert_eq!(0, output.last_update);
    }

    #[test]
    fn short_web_data_is_tolerated() {
        let output = parse(&page_with_web_data("X,Y,Z,W")).unwrap();
        assert_eq!("X", output.serial_number);
        assert_eq!("Y", output.main_firmware);
        assert_eq!("Z", output.slave_firmware);
        assert_eq!("W", output.model);
        assert_eq!(0, output.current_power);
        assert_eq!(0.0, output.day_energy);
        assert_eq!(0.0, output.total_energy);
        assert_eq!(0, output.alerts);
        assert_eq!(0, output.last_update);
    }

    #[test]
    fn energy_scaling() {
        let output = parse(&page_with_web_data("A,B,C,D,,0,1234,98765,0,0")).unwrap();
        assert_eq!(12.34, output.day_energy);
        assert_eq!(9876.5, output.total_energy);
    }

    #[test]
    fn non_numeric_position_is_rejected() {
        let input = page_with_web_data("A,B,C,D,,abc,250,12345,2,7");
        assert_eq!(
            Err(Error::MalformedField(5, "abc".to_string())),
            parse(&input)
        );
    }
}
