// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use tracing_appender::rolling::RollingFileAppender;

/// Create a file appender that never rolls over, so one flow session maps to one log
/// file. `path_str` is the full path, eg: `/tmp/confirm_flow.log`. A bare file name is
/// created in the current directory.
///
/// # Errors
///
/// Returns an error if `path_str` has no file name component.
pub fn try_create(path_str: &str) -> miette::Result<RollingFileAppender> {
    let path = Path::new(path_str);

    let file_name = path.file_name().ok_or_else(|| {
        miette::miette!("Log file path `{}` has no file name", path.display())
    })?;

    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    Ok(tracing_appender::rolling::never(directory, file_name))
}

#[cfg(test)]
mod tests_rolling_file_appender {
    use super::*;

    #[test]
    fn test_rejects_path_without_file_name() {
        assert!(try_create("/").is_err());
    }

    #[test]
    fn test_creates_appender_in_temp_dir() {
        let path = std::env::temp_dir().join("r3bl_confirm_flow_appender_test.log");
        let path_str = path.to_string_lossy().to_string();
        assert!(try_create(&path_str).is_ok());
    }
}
