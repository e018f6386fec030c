// Copyright 2025 Irreducible Inc.

use tracing_subscriber::{
	fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::env::boolean_env_flag_set;

/// Environment flag that enables span close events (with busy/idle timings) in the log output.
pub const LOG_SPANS_FLAG: &str = "BITPLANE_LOG_SPANS";

/// Install the global tracing subscriber.
///
/// The filter is taken from `RUST_LOG` and defaults to `warn`. Calling this more than once is
/// harmless, later calls are ignored.
pub fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let span_events = if boolean_env_flag_set(LOG_SPANS_FLAG) {
		FmtSpan::CLOSE
	} else {
		FmtSpan::NONE
	};

	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(tracing_subscriber::fmt::layer().with_span_events(span_events))
		.try_init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_init_twice() {
		init_tracing();
		init_tracing();
		tracing::debug!("tracing initialised");
	}
}
