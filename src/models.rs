pub mod alert;
pub mod booking;
pub mod chamado;
pub mod enquete;
pub mod item;
pub mod log;
pub mod prestador;
pub mod profile;
pub mod sheet;
pub mod space;
pub mod wiki;
