//! Shared, read-only state handed to every request

use caesar::Dictionaries;
use scribe::request_log::RequestLog;
use std::sync::Arc;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<Config>,
  pub dictionaries: Arc<Dictionaries>,
  pub logger: RequestLog,
}

impl AppState {
  pub fn new(config: Config, dictionaries: Dictionaries, logger: RequestLog) -> Self {
    Self { config: Arc::new(config), dictionaries: Arc::new(dictionaries), logger }
  }
}
