use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};
use slog::{Drain, Logger};
use slog_async::AsyncGuard;


/// Forwards records from the `log` facade (used by the tfidf library) into
/// the application's slog logger
struct SlogBridge {
    log: Logger,
    level: LevelFilter,
}


impl log::Log for SlogBridge {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let target = record.target();
        match record.level() {
            Level::Error => error!(self.log, "{}", record.args(); "target" => target),
            Level::Warn => warn!(self.log, "{}", record.args(); "target" => target),
            Level::Info => info!(self.log, "{}", record.args(); "target" => target),
            Level::Debug => debug!(self.log, "{}", record.args(); "target" => target),
            Level::Trace => trace!(self.log, "{}", record.args(); "target" => target),
        }
    }

    fn flush(&self) {}
}


/// Builds the root logger, writing to stderr from a background thread.
///
/// Records are flushed when the returned guard is dropped.
pub fn build(verbose: bool) -> (Logger, AsyncGuard) {
    let level = if verbose { slog::Level::Debug } else { slog::Level::Info };

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let (drain, guard) = slog_async::Async::new(drain)
        .overflow_strategy(slog_async::OverflowStrategy::Block)
        .build_with_guard();
    let drain = slog::LevelFilter::new(drain.fuse(), level).fuse();

    (Logger::root(drain, o!("app" => "tfsearch")), guard)
}


/// Sends records logged through the `log` facade to `log`, filtered to the
/// same level as the root logger
pub fn init(log: &Logger, verbose: bool) -> Result<(), SetLoggerError> {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    log::set_boxed_logger(Box::new(SlogBridge {
        log: log.new(o!("source" => "tfidf")),
        level,
    }))?;
    log::set_max_level(level);

    Ok(())
}
