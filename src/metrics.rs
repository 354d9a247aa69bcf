use omnik_rs::model::Api;
use prometheus::{Encoder, GaugeVec, IntGaugeVec, TextEncoder};

lazy_static! {
    static ref CURRENT_POWER_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "current_power",
            "instantaneous power production reported by the inverter (in W)",
        ),
        &["serial_number"],
    )
    .unwrap();
    static ref DAY_ENERGY_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "day_energy",
            "total amount of energy yielded in current day (in kWh)",
        ),
        &["serial_number"],
    )
    .unwrap();
    static ref TOTAL_ENERGY_GAUGE: GaugeVec = register_gauge_vec!(
        opts!(
            "total_energy",
            "cumulative lifetime energy yield (in kWh)",
        ),
        &["serial_number"],
    )
    .unwrap();
    static ref ALERTS_GAUGE: IntGaugeVec = register_int_gauge_vec!(
        opts!("active_alerts", "number of alerts raised by the inverter",),
        &["serial_number"],
    )
    .unwrap();
    static ref LAST_UPDATE_GAUGE: IntGaugeVec = register_int_gauge_vec!(
        opts!(
            "last_update_minutes",
            "minutes elapsed since the inverter last updated the module",
        ),
        &["serial_number"],
    )
    .unwrap();
}

/// Collect one reading from `api` and feed its numeric fields to the
/// Prometheus exporter registry. The textual identity fields stay on the
/// `/status` report; only the serial number travels along, as the label.
pub async fn collect(api: &Api) -> Result<(), omnik_rs::Error> {
    let reading = omnik_rs::api::status(api).await?;

    if reading.alerts > 0 {
        log::warn!(
            "inverter {} reports {} active alert(s)",
            reading.serial_number,
            reading.alerts
        );
    }

    let serial_number = reading.serial_number.as_str();
    CURRENT_POWER_GAUGE
        .with_label_values(&[serial_number])
        .set(reading.current_power as f64);
    DAY_ENERGY_GAUGE
        .with_label_values(&[serial_number])
        .set(reading.day_energy);
    TOTAL_ENERGY_GAUGE
        .with_label_values(&[serial_number])
        .set(reading.total_energy);
    ALERTS_GAUGE
        .with_label_values(&[serial_number])
        .set(reading.alerts as i64);
    LAST_UPDATE_GAUGE
        .with_label_values(&[serial_number])
        .set(reading.last_update as i64);

    Ok(())
}

/// Read metrics from Prometheus exporter registry.
pub async fn read() -> Result<String, omnik_rs::Error> {
    // Gather the metrics.
    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).or(Err(omnik_rs::Error::FormatError))
}
