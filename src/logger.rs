use std::io::Write;

use env_logger::{Builder, Env};
use log::Level;

pub const ERROR_TAG: &str = "--- ERROR ---";

pub fn render(level: Level, msg: &str) -> String {
    match level {
        Level::Error => format!("{} {}", ERROR_TAG, msg),
        _ => format!("[{}] {}", level, msg),
    }
}

/// Logs to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn init() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(buf, "{}", render(record.level(), &record.args().to_string()))
        })
        .init();
}
