use chrono::Local;
use log::{Level, Metadata, Record};

/// Console-only logger: progress messages go to stdout, warnings and fatal
/// diagnostics to stderr.
pub struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let formatted = format!(
            "[{}] {}: {}",
            Local::now().format("%I:%M:%S %p"),
            record.level(),
            record.args()
        );

        if record.level() <= Level::Warn {
            eprintln!("{}", formatted);
        } else {
            println!("{}", formatted);
        }
    }

    fn flush(&self) {}
}
