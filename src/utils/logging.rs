use std::{path::Path, sync::LazyLock};

use anyhow::Result;
use tracing::level_filters::LevelFilter;
use tracing_appender::rolling::{RollingFileAppender, RollingWriter, Rotation};
use tracing_subscriber::fmt::{
    format::FmtSpan,
    writer::{MakeWriter, MakeWriterExt, OptionalWriter},
};

pub const CLI_PREFIX: &str = "cli";

/// `MakeWriter` over an optional appender; writes nowhere when absent.
struct MaybeAppender(Option<RollingFileAppender>);

impl<'a> MakeWriter<'a> for MaybeAppender {
    type Writer = OptionalWriter<RollingWriter<'a>>;

    fn make_writer(&'a self) -> Self::Writer {
        self.0.as_ref().map(|a| a.make_writer()).into()
    }
}

pub fn enable_logging(
    prefix: &str,
    log_dir: Option<&Path>,
    log_level: Option<LevelFilter>,
    show_std: bool,
) -> Result<()> {
    // Without a directory logs only go to stdout, if at all.
    let appender = log_dir
        .map(|dir| {
            tracing_appender::rolling::Builder::new()
                .rotation(Rotation::DAILY)
                .max_log_files(5)
                .filename_prefix(prefix)
                .build(dir)
        })
        .transpose()?;

    let stdout = std::io::stdout.with_filter(move |_| show_std);

    let level = log_level
        .map(|v| v.to_string())
        .unwrap_or_else(|| std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()));

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(format!(
            "{}={level}",
            env!("CARGO_PKG_NAME").replace("-", "_"),
        )))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(stdout.and(MaybeAppender(appender)))
        .with_ansi(false)
        .init();
    Ok(())
}

pub static TEST_LOGGING: LazyLock<()> = LazyLock::new(|| {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_test_writer()
        .pretty()
        .init()
});
