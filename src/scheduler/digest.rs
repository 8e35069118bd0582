//! Daily digest jobs
//!
//! Three independently scheduled sessions (morning, afternoon, evening) pick
//! a proverb under a per-session category policy, format a message, and hand
//! it to the notification channel. Delivery failure is logged and never
//! retried within the invocation; an empty pool skips the invocation with a
//! warning.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveTime};
use rand::seq::SliceRandom;
use tracing::{error, info, warn};

use super::trigger;
use crate::config::DigestConfig;
use crate::error::{Error, Result};
use crate::models::{ContentItem, DigestSession};
use crate::notify::Notifier;
use crate::selector::NoRepeatSelector;
use crate::storage::ProverbRepository;

/// Closing captions, one chosen at random per digest
const CAPTIONS: &[&str] = &[
    "Remember: growth starts with gratitude.",
    "Keep learning; every day is a new chapter.",
    "Your progress may be slow, but it is still progress.",
    "Start your day with purpose and end it with peace.",
    "Let wisdom guide your path, not haste.",
    "The small steps today build the greatness of tomorrow.",
    "Stay humble, stay hungry, and keep moving.",
    "Light up someone's day; kindness costs nothing.",
    "Reflection brings clarity; patience brings peace.",
    "Dreams don't work unless you do.",
];

/// Fire times for the three sessions
#[derive(Debug, Clone, Copy)]
struct SessionTimes {
    morning: NaiveTime,
    afternoon: NaiveTime,
    evening: NaiveTime,
}

/// Time-of-day digest scheduler
pub struct DigestScheduler {
    repository: Arc<dyn ProverbRepository>,
    selector: Arc<NoRepeatSelector>,
    notifier: Arc<dyn Notifier>,
    times: SessionTimes,
}

impl DigestScheduler {
    /// Create a digest scheduler from configuration
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when a fire time does not parse as `HH:MM`
    pub fn new(
        repository: Arc<dyn ProverbRepository>,
        selector: Arc<NoRepeatSelector>,
        notifier: Arc<dyn Notifier>,
        config: &DigestConfig,
    ) -> Result<Self> {
        let times = SessionTimes {
            morning: trigger::parse_fire_time(&config.morning)?,
            afternoon: trigger::parse_fire_time(&config.afternoon)?,
            evening: trigger::parse_fire_time(&config.evening)?,
        };

        Ok(Self {
            repository,
            selector,
            notifier,
            times,
        })
    }

    fn fire_time(&self, session: DigestSession) -> NaiveTime {
        match session {
            DigestSession::Morning => self.times.morning,
            DigestSession::Afternoon => self.times.afternoon,
            DigestSession::Evening => self.times.evening,
        }
    }

    /// Run one session's loop forever: sleep until the next fire time, send,
    /// repeat
    pub async fn run_session(&self, session: DigestSession) {
        loop {
            let wait = trigger::duration_until(self.fire_time(session));
            info!(
                session = %session,
                wait_secs = wait.as_secs(),
                "digest session sleeping until next fire"
            );
            tokio::time::sleep(wait).await;
            self.send_digest(session).await;
        }
    }

    /// One digest invocation; every failure mode ends here
    pub async fn send_digest(&self, session: DigestSession) {
        info!(session = %session, "digest triggered");

        let message = match self.compose(session) {
            Ok(message) => message,
            Err(Error::EmptyPool(_)) => {
                warn!(session = %session, "no proverbs available, skipping digest");
                return;
            }
            Err(e) => {
                error!(session = %session, error = %e, "digest composition failed");
                return;
            }
        };

        match self.notifier.send(&message).await {
            Ok(status) if status.accepted => {
                info!(session = %session, channel = %status.channel, "digest sent");
            }
            Ok(status) => {
                warn!(session = %session, status = %status, "digest delivery rejected");
            }
            Err(e) => {
                warn!(session = %session, error = %e, "digest delivery failed");
            }
        }
    }

    /// Pick an item under the session policy and format the message
    ///
    /// Surfaced errors: [`Error::EmptyPool`] when the store holds nothing,
    /// and storage errors from reading the pool.
    pub fn compose(&self, session: DigestSession) -> Result<String> {
        let pool = self.repository.find_all()?;
        if pool.is_empty() {
            return Err(Error::empty_pool(session.as_str()));
        }

        let selected = self.pick(session, &pool)?;

        let mut rng = rand::thread_rng();
        let caption = CAPTIONS.choose(&mut rng).copied().unwrap_or(CAPTIONS[0]);

        Ok(format_message(session, &selected, caption, Local::now()))
    }

    /// Session category policy over the explicit origin field
    ///
    /// MORNING prefers imported quotes, AFTERNOON prefers local proverbs,
    /// EVENING draws from everything; an empty preferred subset silently
    /// falls back to the full pool.
    fn pick(&self, session: DigestSession, pool: &[ContentItem]) -> Result<ContentItem> {
        let subset: Vec<ContentItem> = match session {
            DigestSession::Morning => pool.iter().filter(|i| i.is_imported()).cloned().collect(),
            DigestSession::Afternoon => {
                pool.iter().filter(|i| !i.is_imported()).cloned().collect()
            }
            DigestSession::Evening => Vec::new(),
        };

        if subset.is_empty() {
            self.selector.select(session.as_str(), pool)
        } else {
            self.selector.select(session.as_str(), &subset)
        }
    }
}

/// Format a digest message from its parts
fn format_message(
    session: DigestSession,
    item: &ContentItem,
    caption: &str,
    now: DateTime<Local>,
) -> String {
    format!(
        "{header}\n\n**Language:** {language}\n**Proverb:** {text}\n**Meaning:** {meaning}\n\nTime: {time}\n\n{caption}",
        header = session.header(item.is_imported()),
        language = item.language,
        text = item.text,
        meaning = item.meaning.as_deref().unwrap_or("-"),
        time = now.format("%I:%M %p"),
    )
}
