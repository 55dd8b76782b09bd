// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

/// Wrap the given value in `Ok`, or return `Ok(())` when no value is given.
///
/// ```
/// use r3bl_confirm_flow::ok;
///
/// fn unit() -> miette::Result<()> { ok!() }
/// fn value() -> miette::Result<u32> { ok!(12) }
/// ```
#[macro_export]
macro_rules! ok {
    // No args.
    () => {
        Ok(())
    };
    // With arg.
    ($value:expr) => {
        Ok($value)
    };
}

pub type StdMutex<T> = std::sync::Mutex<T>;
