// src/handlers.rs

pub mod alerts;
pub mod bookings;
pub mod chamados;
pub mod enquetes;
pub mod health;
pub mod items;
pub mod logs;
pub mod prestadores;
pub mod profiles;
pub mod sheets;
pub mod spaces;
pub mod wiki;
