// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use miette::IntoDiagnostic;
use tracing_core::LevelFilter;
use tracing_subscriber::{Layer, layer::SubscriberExt, registry::LookupSpan,
                         util::SubscriberInitExt};

use super::{DisplayPreference, TracingConfig, WriterConfig, rolling_file_appender_impl};
use crate::ok;

pub type DynLayer<S> = dyn Layer<S> + Send + Sync + 'static;

/// Avoid gnarly type annotations by using a macro to create the `fmt` layer.
#[macro_export]
macro_rules! create_fmt {
    () => {
        tracing_subscriber::fmt::layer()
            .compact()
            .without_time()
            .with_thread_ids(false)
            .with_thread_names(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
    };
}

/// Initialize the global tracing subscriber with the provided [`TracingConfig`]. Does
/// nothing for [`WriterConfig::None`].
///
/// # Errors
///
/// Returns an error if the log file can't be created, or if a global subscriber has
/// already been set.
pub fn init_tracing(tracing_config: TracingConfig) -> miette::Result<()> {
    let Some(layers) = try_create_layers(&tracing_config)? else {
        return ok!();
    };
    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .into_diagnostic()
}

/// Returns the layers without installing them. Returns `None` for
/// [`WriterConfig::None`].
///
/// # Errors
///
/// Returns an error if the log file can't be created.
pub fn try_create_layers(
    tracing_config: &TracingConfig,
) -> miette::Result<Option<Vec<Box<DynLayer<tracing_subscriber::Registry>>>>> {
    if tracing_config.writer_config == WriterConfig::None {
        return ok!(None);
    }

    let level_filter = tracing_config.level_filter;

    // The level filter goes first so that layers without their own filter still respect
    // it.
    let mut layers: Vec<Box<DynLayer<tracing_subscriber::Registry>>> =
        vec![Box::new(level_filter)];

    if let Some(preferred_display) = tracing_config.writer_config.display_preference() {
        layers.push(create_display_layer(preferred_display, level_filter));
    }

    if let Some(path) = tracing_config.writer_config.file_path() {
        layers.push(try_create_file_layer(path, level_filter)?);
    }

    ok!(Some(layers))
}

fn create_display_layer<S>(
    preferred_display: DisplayPreference,
    level_filter: LevelFilter,
) -> Box<DynLayer<S>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let fmt_layer = create_fmt!().with_ansi(true);
    match preferred_display {
        DisplayPreference::Stdout => Box::new(
            fmt_layer
                .with_writer(std::io::stdout)
                .with_filter(level_filter),
        ),
        DisplayPreference::Stderr => Box::new(
            fmt_layer
                .with_writer(std::io::stderr)
                .with_filter(level_filter),
        ),
    }
}

fn try_create_file_layer<S>(
    path: &str,
    level_filter: LevelFilter,
) -> miette::Result<Box<DynLayer<S>>>
where
    S: tracing_core::Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    let file = rolling_file_appender_impl::try_create(path)?;
    ok!(Box::new(
        create_fmt!()
            .with_ansi(false)
            .with_writer(file)
            .with_filter(level_filter),
    ))
}

#[cfg(test)]
mod tests_tracing_setup {
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    use super::*;

    #[test]
    fn test_no_layers_when_disabled() {
        let layers = try_create_layers(&TracingConfig::disabled()).unwrap();
        assert!(layers.is_none());
    }

    #[test]
    fn test_display_layers() {
        let layers = try_create_layers(&TracingConfig::new_display(
            DisplayPreference::Stdout,
        ))
        .unwrap()
        .unwrap();
        // Level filter + display.
        assert_eq!(layers.len(), 2);
    }

    #[test]
    fn test_display_and_file_layers() {
        let path = std::env::temp_dir().join("r3bl_confirm_flow_layers_test.log");
        let config = TracingConfig::new_file_and_display(
            Some(path.to_string_lossy().to_string()),
            DisplayPreference::Stderr,
        );
        let layers = try_create_layers(&config).unwrap().unwrap();
        // Level filter + display + file.
        assert_eq!(layers.len(), 3);
    }

    #[test]
    #[serial]
    fn test_init_tracing_disabled_is_noop() {
        assert!(init_tracing(TracingConfig::disabled()).is_ok());
    }
}
