use log::LevelFilter;
use std::io::Write;

/// Install the global logger at `level`. Lines go to stderr so that
/// `--json` output on stdout stays machine readable. Later calls only
/// adjust the level.
pub fn init_logger(level: LevelFilter) {
    let installed = env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(buf, "{}: {} - {}", record.level(), record.target(), record.args())
        })
        .target(env_logger::Target::Stderr)
        .filter_level(level)
        .try_init()
        .is_ok();
    if !installed {
        log::debug!("logger already installed; level now {}", level);
    }
    log::set_max_level(level);
}

pub fn parse_level(level: &str) -> Option<LevelFilter> {
    let lvl = match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => return None,
    };
    Some(lvl)
}

/// Initialise logging from a level name. Returns `false` for unknown names.
pub fn set_log_level(level: &str) -> bool {
    match parse_level(level) {
        Some(lvl) => {
            init_logger(lvl);
            true
        }
        None => false,
    }
}
