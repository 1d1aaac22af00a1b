pub mod configuration;
pub mod domain;
pub mod record_store_client;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod utility;
