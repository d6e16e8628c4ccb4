pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod goals;
pub mod knowledge;
pub mod nps;
pub mod team;
pub mod tickets;
