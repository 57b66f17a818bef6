/// Times `$block` and warns when it runs past `$threshold_ms` milliseconds.
/// A plain passthrough unless `DF.log_performance` is on.
#[macro_export]
macro_rules! trace_time {
    ($name:expr, $threshold_ms:expr, $block:block) => {{
        if $crate::config::DF.log_performance {
            let started = $crate::utils::AppInstant::now();
            let value = $block;
            let elapsed = started.elapsed();
            let limit = std::time::Duration::from_millis($threshold_ms);
            if elapsed > limit {
                log::warn!(
                    "SLOW [{}] {} took {:.3}ms (limit {}ms)",
                    if cfg!(debug_assertions) { "debug" } else { "release" },
                    $name,
                    elapsed.as_secs_f64() * 1000.0,
                    $threshold_ms
                );
            }
            value
        } else {
            $block
        }
    }};
}
