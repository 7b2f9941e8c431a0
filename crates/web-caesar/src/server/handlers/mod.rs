pub mod cipher;
pub mod jokes;
pub mod languages;
pub mod logs;
pub mod status;
