// Library for tests to access modules

pub mod config;
pub mod ingest;
pub mod maintenance;
pub mod models;
pub mod routes;
pub mod telemetry_repo;
pub mod timestamp;
pub mod version;
