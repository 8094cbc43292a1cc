use crate::{constants::MISSING_VALUES, error::SvevalResult};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use std::{
    fmt::{Binary, Display},
    io::Write,
    sync::Once,
};

pub type Result<T> = SvevalResult<T>;

#[allow(unused)]
static INIT_LOG: Once = Once::new();

#[allow(unused)]
pub fn init_logger() {
    INIT_LOG.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .init();
    });
}

/// Installs the global logger for callers that want sveval's diagnostics.
///
/// A verbosity of 0 logs at info, 1 at debug and anything higher at trace.
/// `RUST_LOG` is honored on top of the chosen level.
pub fn init_verbose(verbosity: u8) -> Result<()> {
    let filter_level: LevelFilter = match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .try_init()
        .map_err(|e| crate::sveval_error!("Failed to initialize logger: {e}"))
}

pub fn is_missing(value: &str) -> bool {
    MISSING_VALUES.contains(&value.trim())
}

pub fn format_number_with_commas<T>(n: T) -> String
where
    T: Display + Binary,
{
    let s = n.to_string();
    let (sign, digits) = s.strip_prefix('-').map_or(("", s.as_str()), |d| ("-", d));

    if digits.len() <= 3 {
        return s;
    }

    let mut grouped = String::with_capacity(digits.len() + (digits.len() - 1) / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{sign}{grouped}")
}
