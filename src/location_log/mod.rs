pub mod location_log;
pub mod location_log_error;
pub mod location_record;
