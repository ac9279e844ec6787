pub mod file_weather_store;
pub mod weather_store;
pub mod weather_store_error;
