pub mod health;
pub mod last_weather;
pub mod locations;
pub mod proxy;
pub mod weather;
