/// Builds a `reqwest::Client` with the given User-Agent.
///
/// With a second argument, connecting and every single read are bounded by that duration.
/// A slow transfer that keeps receiving data never times out.
///
/// Evaluates to `Result<Client, reqwest::Error>` so callers can propagate build failures.
#[macro_export]
macro_rules! client {
    ($ua:expr) => {{
        $crate::reqwest::Client::builder()
            .user_agent($ua)
            .build()
    }};
    ($ua:expr, $timeout:expr) => {{
        $crate::reqwest::Client::builder()
            .user_agent($ua)
            .connect_timeout($timeout)
            .read_timeout($timeout)
            .build()
    }};
}

/// Cuts a post title to at most `$len` chars for progress lines.
#[macro_export]
macro_rules! short_title {
    ($title:expr, $len:expr) => {{
        let st: String = $title.chars().take($len).collect();
        st
    }};
}
