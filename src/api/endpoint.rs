pub type Endpoint = str;

pub const STATUS: &Endpoint = "/js/status.js";
