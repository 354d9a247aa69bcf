#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate prometheus;
#[macro_use]
extern crate rocket;

use config::Config;
use omnik_rs::api;
use omnik_rs::model::Api;
use rocket::{Build, Rocket, State};
use std::sync::Mutex;
use std::time::Instant;

mod metrics;

/* factory credentials of the WiFi module's web UI */
const DEFAULT_USERNAME: &str = "admin";
const DEFAULT_PASSWORD: &str = "admin";
const DEFAULT_INTERVAL_SECS: i64 = 30;

#[derive(Clone, serde::Deserialize)]
pub struct OmnikConfig {
    address: String,
    username: String,
    password: String,
    interval: u64,
}

/// Structure containing state for API handlers.
pub struct StateData {
    api: Api,
    interval: u64,
    /// Timestamp of last successful metric collection via `metrics::collect()`
    last_refresh: Mutex<Option<Instant>>,
}

impl StateData {
    /// Updates `last_refresh` to `now()`.
    fn mark_refreshed(&self) {
        if let Ok(mut ts) = self.last_refresh.lock() {
            *ts = Some(Instant::now());
        } else {
            log::trace!("Unable to lock refresh timestamp mutex, will refresh again")
        }
    }

    /// Checks whether `interval_secs` elapsed since last `mark_refreshed()`
    fn needs_refresh(&self, interval_secs: u64) -> bool {
        let elapsed_opt = self
            .last_refresh
            .lock()
            .ok()
            .and_then(|a| a.map(|b| b.elapsed().as_secs()));

        if let Some(elapsed) = elapsed_opt {
            elapsed > interval_secs
        } else {
            /* If there is None timestamp/elapsed, always return true to trigger collection */
            true
        }
    }
}

pub fn read_settings() -> OmnikConfig {
    let mut settings = Config::default();
    settings
        .merge(config::Environment::with_prefix("OMNIK"))
        .unwrap()
        .set_default("username", DEFAULT_USERNAME)
        .unwrap()
        .set_default("password", DEFAULT_PASSWORD)
        .unwrap()
        .set_default("interval", DEFAULT_INTERVAL_SECS)
        .unwrap();

    settings.try_into().expect("Configuration error")
}

#[get("/metrics")]
async fn metrics_route(state: &State<StateData>) -> Result<String, api::Error> {
    if state.needs_refresh(state.interval) {
        metrics::collect(&state.api).await?;
        state.mark_refreshed();
    } else {
        log::info!("interval time not yet elapsed since last run; returning cached result")
    }
    metrics::read().await
}

#[get("/status")]
async fn status_route(state: &State<StateData>) -> Result<String, api::Error> {
    let reading = api::status(&state.api).await?;
    Ok(reading.to_string())
}

#[launch]
fn rocket() -> Rocket<Build> {
    env_logger::init();

    let settings = read_settings();
    let api = api::api(settings.address, settings.username, settings.password);
    let state = StateData {
        api,
        interval: settings.interval,
        last_refresh: Mutex::new(None),
    };

    rocket::build()
        .manage(state)
        .mount("/", routes![metrics_route, status_route])
}
