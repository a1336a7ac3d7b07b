use std::io;
use std::time::Instant;

use tracing::level_filters::LevelFilter;
use tracing::span;
use tracing::subscriber::SetGlobalDefaultError;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry, filter, fmt};

use crate::cli;

const CORE_TARGETS: [&str; 4] = ["lexing", "parsing", "indexing", "resolving"];

/// Reports how long each span lived, from creation to close.
struct SpanTimingLayer;

impl<S> Layer<S> for SpanTimingLayer
where
    S: tracing::Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, _: &span::Attributes<'_>, id: &span::Id, ctx: Context<'_, S>) {
        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(Instant::now());
        }
    }

    fn on_close(&self, id: span::Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let Some(created) = span.extensions().get::<Instant>().copied() else {
            return;
        };
        let duration = created.elapsed();
        tracing::info!(target: "meta", span = span.name(), span.duration = ?duration);
    }
}

fn targets(config: &cli::Config) -> filter::Targets {
    CORE_TARGETS
        .into_iter()
        .fold(filter::Targets::new(), |targets, target| {
            targets.with_target(target, config.parser_log)
        })
        .with_target("srcindex", config.log)
}

/// Installs the global subscriber: events go to standard error, span
/// durations are reported for the core crates.
pub fn start(config: &cli::Config) -> Result<(), SetGlobalDefaultError> {
    let fmt_filter =
        targets(config).with_target("meta", LevelFilter::INFO).with_default(LevelFilter::WARN);
    let fmt = fmt::layer().with_writer(io::stderr).with_filter(fmt_filter);

    let timing_filter = targets(config).with_default(LevelFilter::OFF);
    let timing = SpanTimingLayer.with_filter(timing_filter);

    let subscriber = Registry::default().with(fmt).with(timing);
    tracing::subscriber::set_global_default(subscriber)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex, PoisonError};

    use clap::Parser;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap_or_else(PoisonError::into_inner).extend_from_slice(bytes);
            Ok(bytes.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    fn subscriber(config: &cli::Config, buffer: &Buffer) -> impl tracing::Subscriber {
        let writer = buffer.clone();
        let fmt_filter = targets(config).with_target("meta", LevelFilter::INFO);
        let fmt = fmt::layer()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .with_filter(fmt_filter.with_default(LevelFilter::WARN));
        let timing = SpanTimingLayer.with_filter(targets(config).with_default(LevelFilter::OFF));
        Registry::default().with(fmt).with(timing)
    }

    #[test]
    fn span_duration_is_reported_on_close() {
        let config = cli::Config::parse_from(["srcindex", "--parser-log", "debug", "check", "x"]);
        let buffer = Buffer::default();

        tracing::subscriber::with_default(subscriber(&config, &buffer), || {
            let span = tracing::debug_span!(target: "parsing", "parse_index");
            span.in_scope(|| tracing::debug!(target: "parsing", "Parsed source index"));
        });

        let contents = buffer.contents();
        assert!(contents.contains("Parsed source index"), "{contents}");
        assert!(contents.contains("parse_index"), "{contents}");
        assert!(contents.contains("span.duration"), "{contents}");
    }

    #[test]
    fn core_crates_are_silent_by_default() {
        let config = cli::Config::parse_from(["srcindex", "check", "x"]);
        let buffer = Buffer::default();

        tracing::subscriber::with_default(subscriber(&config, &buffer), || {
            let span = tracing::debug_span!(target: "parsing", "parse_index");
            span.in_scope(|| tracing::warn!(target: "parsing", "Rejected insertion"));
        });

        assert_eq!(buffer.contents(), "");
    }
}
