pub mod auth;
pub mod client;
pub mod dashboard;
pub mod goal;
pub mod knowledge;
pub mod nps;
pub mod team;
pub mod ticket;
