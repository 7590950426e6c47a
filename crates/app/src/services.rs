//! Application services (use-cases).

pub mod price_sensor;
