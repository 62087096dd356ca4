//! Site configuration: transition timings, reveal texts and cancellation.

use crate::content::SiteContent;
use crate::schedule::CancelPolicy;

/// Errors raised while loading or validating a [`SiteConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[cfg(feature = "toml")]
    #[error("failed to parse site config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid timing `{field}`: {reason}")]
    InvalidTiming { field: &'static str, reason: &'static str },
}

/// Durations driving the transition sequences, in milliseconds.
///
/// Entry offsets are measured from the moment the intent was accepted, so
/// `mural_content_ms` and `down_arrow_ms` land after `exit_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionTimings {
    /// Exit animation length before the next view mounts
    pub exit_ms: u64,
    /// Delay between the bio erase finishing and the projects list sliding in
    pub projects_reveal_ms: u64,
    /// Offset from the exit to the mural logo dropping in
    pub mural_content_ms: u64,
    /// Offset from the exit to the down arrow fading in
    pub down_arrow_ms: u64,
    /// Offset from the exit to the bottom page content rising
    pub bottom_content_ms: u64,
    /// Milliseconds between reveal steps
    pub reveal_interval_ms: u32,
}

impl Default for TransitionTimings {
    fn default() -> Self {
        Self {
            exit_ms: 600,
            projects_reveal_ms: 50,
            mural_content_ms: 50,
            down_arrow_ms: 650,
            bottom_content_ms: 50,
            reveal_interval_ms: 1,
        }
    }
}

impl TransitionTimings {
    /// Check the timings describe a sequence that can play out in order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.exit_ms == 0 {
            return Err(ConfigError::InvalidTiming {
                field: "exit_ms",
                reason: "content would mount before the exit animation",
            });
        }
        if self.reveal_interval_ms == 0 {
            return Err(ConfigError::InvalidTiming {
                field: "reveal_interval_ms",
                reason: "must be at least 1",
            });
        }
        if self.down_arrow_ms < self.mural_content_ms {
            return Err(ConfigError::InvalidTiming {
                field: "down_arrow_ms",
                reason: "arrow would appear before the mural logo",
            });
        }
        Ok(())
    }
}

/// Site configuration, typically read from a `site.toml` file.
///
/// All fields are optional; anything left out keeps the built-in value.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SiteConfig {
    pub exit_ms: Option<u64>,
    pub projects_reveal_ms: Option<u64>,
    pub mural_content_ms: Option<u64>,
    pub down_arrow_ms: Option<u64>,
    pub bottom_content_ms: Option<u64>,
    pub reveal_interval_ms: Option<u32>,
    pub cancel_policy: Option<CancelPolicy>,
    pub bio_text: Option<String>,
    pub studio_mural_text: Option<String>,
}

impl SiteConfig {
    /// Parse a `site.toml` string into `SiteConfig`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Resolve timings against the defaults and validate them.
    pub fn timings(&self) -> Result<TransitionTimings, ConfigError> {
        let defaults = TransitionTimings::default();
        let timings = TransitionTimings {
            exit_ms: self.exit_ms.unwrap_or(defaults.exit_ms),
            projects_reveal_ms: self.projects_reveal_ms.unwrap_or(defaults.projects_reveal_ms),
            mural_content_ms: self.mural_content_ms.unwrap_or(defaults.mural_content_ms),
            down_arrow_ms: self.down_arrow_ms.unwrap_or(defaults.down_arrow_ms),
            bottom_content_ms: self.bottom_content_ms.unwrap_or(defaults.bottom_content_ms),
            reveal_interval_ms: self.reveal_interval_ms.unwrap_or(defaults.reveal_interval_ms),
        };
        timings.validate()?;
        Ok(timings)
    }

    /// Reveal texts, falling back to the built-in copy.
    pub fn content(&self) -> SiteContent {
        let defaults = SiteContent::default();
        SiteContent {
            bio: self.bio_text.clone().unwrap_or(defaults.bio),
            studio_mural: self.studio_mural_text.clone().unwrap_or(defaults.studio_mural),
        }
    }

    pub fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy.unwrap_or_default()
    }
}
