#[cfg(feature = "trace")]
use std::path::Path;
#[cfg(feature = "trace")]
use std::sync::Once;

/// Used when `RUST_LOG` is unset: session and matcher decisions at debug,
/// table loading and tokenizer fallbacks included.
#[cfg(feature = "trace")]
const DEFAULT_FILTER: &str = "kana_engine=debug,kana_session=debug,kana_core=debug";

#[cfg(feature = "trace")]
static INIT: Once = Once::new();

/// JSON span/event log under `log_dir`, one `kana-trace.jsonl.<date>` file
/// per day so long practice servers rotate. Returns false when another
/// subscriber was already installed by the host, in which case events go
/// there instead.
#[cfg(feature = "trace")]
pub fn init_tracing(log_dir: &Path) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        let file_appender = tracing_appender::rolling::daily(log_dir, "kana-trace.jsonl");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        installed = tracing_subscriber::fmt()
            .json()
            .with_writer(non_blocking)
            .with_target(true)
            .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
            .with_env_filter(filter)
            .try_init()
            .is_ok();
        if installed {
            std::mem::forget(guard); // flushes for the life of the process
        }
    });
    installed
}

#[cfg(not(feature = "trace"))]
pub fn init_tracing(_log_dir: &std::path::Path) -> bool {
    false
}
