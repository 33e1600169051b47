#[macro_export]
macro_rules! log_err {
    // Usage: log_err!("loading products", err);
    ($context:expr, $err:expr) => {{
        let location = format!("{}:{}", file!(), line!());
        ::log::error!("{} failed at {}: {}", $context, location, $err);
    }};
}
