// rulecraft-core/src/infrastructure/adapters/tracing_notifier.rs

use tracing::{error, info, warn};

use crate::ports::{Notice, NoticeLevel, Notifier};

/// Sends notices to the log, at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info | NoticeLevel::Success => {
                info!(kind = %notice.level, "{}: {}", notice.title, notice.message)
            }
            NoticeLevel::Warning => warn!("{}: {}", notice.title, notice.message),
            NoticeLevel::Error => error!("{}: {}", notice.title, notice.message),
        }
    }
}
