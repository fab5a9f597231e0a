pub mod constants;
pub mod googledocs;
pub mod http_client;
pub mod record;

pub use googledocs::googledocs_id_from_url;
pub use record::TelemetryRecord;
