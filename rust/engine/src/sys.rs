use std::fmt;

/// A nice little helper trait that lets us log errors on their way out
pub trait ResultExt {
    /// Log the error, prefixed with `ctx`, and continue
    fn err_log(self, ctx: impl fmt::Display) -> Self;

    /// Log the error as a warning, prefixed with `ctx`, and continue
    fn err_warn(self, ctx: impl fmt::Display) -> Self;
}

impl<T, E: std::error::Error> ResultExt for Result<T, E> {
    fn err_log(self, ctx: impl fmt::Display) -> Self {
        if let Err(e) = &self {
            log::error!("{ctx}: {}", chain(e));
        };
        self
    }

    fn err_warn(self, ctx: impl fmt::Display) -> Self {
        if let Err(e) = &self {
            log::warn!("{ctx}: {}", chain(e));
        };
        self
    }
}

/// Render an error with all of its sources, `outer: inner: ...`
fn chain(e: &dyn std::error::Error) -> String {
    let mut out = e.to_string();
    let mut source = e.source();
    while let Some(s) = source {
        let msg = s.to_string();
        // Some errors already include their source in the message
        if !out.ends_with(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        source = s.source();
    }
    out
}
