//! Typewriter-style text reveal engine.

use tracing::trace;

/// Direction a reveal run walks its source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RevealDirection {
    /// Grow the buffer from empty to the full text
    #[default]
    Type,
    /// Shrink the buffer from the full text to empty
    Erase,
}

/// Current state of the reveal engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealState {
    /// No run has been started, or the last run was cancelled
    Idle,
    /// A run is stepping
    Running,
    /// The last run reached its terminal bound
    Finished,
}

/// Identifier of a single reveal run.
///
/// Every call to [`TextReveal::start`] mints a new id, so a completion can
/// always be matched to the run that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u64);

/// Outcome of [`TextReveal::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStart {
    /// The run is active; drive it with [`TextReveal::tick`]
    Running(RunId),
    /// The source was empty and the run completed synchronously
    Completed(RunId),
}

impl RevealStart {
    /// The id of the run that was started.
    pub fn run(self) -> RunId {
        match self {
            RevealStart::Running(run) | RevealStart::Completed(run) => run,
        }
    }

    /// Returns true when the run already completed.
    #[inline]
    pub fn is_completed(self) -> bool {
        matches!(self, RevealStart::Completed(_))
    }
}

/// Outcome of a single [`TextReveal::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealTick {
    /// No run is active; nothing was published
    Idle,
    /// The cursor moved one character and a new buffer was published
    Stepped,
    /// The cursor moved onto its terminal bound and the run completed
    Finished(RunId),
}

/// Restartable character stepper that reveals or erases a text buffer.
///
/// The engine does not own a timer. The caller is responsible for calling
/// `tick()` every `interval_ms()` while [`is_running`](Self::is_running)
/// holds. Starting a new run discards the previous one without reporting its
/// completion.
///
/// ## Example
///
/// ```rust
/// use portfolio_core_view::{RevealDirection, RevealTick, TextReveal};
///
/// let mut reveal = TextReveal::new(1);
/// reveal.start("héllo", RevealDirection::Type);
/// assert_eq!(reveal.buffer(), "");
///
/// reveal.tick();
/// reveal.tick();
/// assert_eq!(reveal.buffer(), "hé");
///
/// while !matches!(reveal.tick(), RevealTick::Finished(_)) {}
/// assert_eq!(reveal.buffer(), "héllo");
/// ```
#[derive(Clone, Debug)]
pub struct TextReveal {
    /// Source text of the current (or last) run
    source: String,
    /// Byte offset of every char boundary; `boundaries[n]` ends the n-char prefix
    boundaries: Vec<usize>,
    /// Cursor in characters, always within `0..=char_len`
    cursor: usize,
    direction: RevealDirection,
    state: RevealState,
    run: RunId,
    next_run: u64,
    /// Milliseconds between steps
    interval_ms: u32,
}

impl TextReveal {
    /// Create an idle engine with an empty buffer.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            source: String::new(),
            boundaries: vec![0],
            cursor: 0,
            direction: RevealDirection::Type,
            state: RevealState::Idle,
            run: RunId(0),
            next_run: 1,
            interval_ms: interval_ms.max(1),
        }
    }

    /// Create an idle engine that already displays `text` in full.
    pub fn resting(text: &str, interval_ms: u32) -> Self {
        let mut reveal = Self::new(interval_ms);
        reveal.load(text);
        reveal.cursor = reveal.char_len();
        reveal
    }

    /// Start a new run over `source`, cancelling any active run.
    ///
    /// `None` is treated as the empty string. An empty source completes
    /// synchronously: the returned value is [`RevealStart::Completed`] and no
    /// tick will ever report that run.
    pub fn start<'a>(&mut self, source: impl Into<Option<&'a str>>, direction: RevealDirection) -> RevealStart {
        self.run = RunId(self.next_run);
        self.next_run += 1;
        self.load(source.into().unwrap_or_default());
        self.direction = direction;
        self.cursor = match direction {
            RevealDirection::Type => 0,
            RevealDirection::Erase => self.char_len(),
        };

        if self.char_len() == 0 {
            self.state = RevealState::Finished;
            trace!(run = self.run.0, "reveal run completed on start (empty source)");
            return RevealStart::Completed(self.run);
        }

        self.state = RevealState::Running;
        RevealStart::Running(self.run)
    }

    /// Advance the active run by exactly one character.
    ///
    /// Call this method from your timer at the rate returned by `interval_ms()`.
    pub fn tick(&mut self) -> RevealTick {
        if self.state != RevealState::Running {
            return RevealTick::Idle;
        }

        let len = self.char_len();
        self.cursor = match self.direction {
            RevealDirection::Type => (self.cursor + 1).min(len),
            RevealDirection::Erase => self.cursor.saturating_sub(1),
        };

        if self.cursor == self.terminal() {
            self.state = RevealState::Finished;
            trace!(run = self.run.0, direction = ?self.direction, "reveal run finished");
            RevealTick::Finished(self.run)
        } else {
            RevealTick::Stepped
        }
    }

    /// Stop the active run without reporting completion.
    ///
    /// The buffer keeps whatever was last published.
    pub fn cancel(&mut self) {
        if self.state == RevealState::Running {
            self.state = RevealState::Idle;
        }
    }

    /// The currently published buffer.
    #[inline]
    pub fn buffer(&self) -> &str {
        &self.source[..self.boundaries[self.cursor]]
    }

    /// Source text of the current (or last) run.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Cursor position in characters.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the source text in characters.
    #[inline]
    pub fn char_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    /// Number of ticks left before the active run completes.
    pub fn remaining_steps(&self) -> usize {
        if self.state != RevealState::Running {
            return 0;
        }
        self.cursor.abs_diff(self.terminal())
    }

    /// Fraction of the source currently visible (0.0 - 1.0).
    pub fn position(&self) -> f64 {
        let len = self.char_len();
        if len == 0 {
            return 0.0;
        }
        self.cursor as f64 / len as f64
    }

    #[inline]
    pub fn direction(&self) -> RevealDirection {
        self.direction
    }

    #[inline]
    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Check if a run is currently stepping.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == RevealState::Running
    }

    /// Id of the current (or last) run.
    #[inline]
    pub fn run(&self) -> RunId {
        self.run
    }

    /// Set the step interval. Values below 1 ms are clamped to 1.
    pub fn set_interval_ms(&mut self, interval_ms: u32) {
        self.interval_ms = interval_ms.max(1);
    }

    /// Milliseconds between steps. Use this to configure your timer.
    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    fn terminal(&self) -> usize {
        match self.direction {
            RevealDirection::Type => self.char_len(),
            RevealDirection::Erase => 0,
        }
    }

    fn load(&mut self, text: &str) {
        self.source.clear();
        self.source.push_str(text);
        self.boundaries.clear();
        self.boundaries.extend(text.char_indices().map(|(i, _)| i));
        self.boundaries.push(text.len());
    }
}

impl Default for TextReveal {
    fn default() -> Self {
        Self::new(1)
    }
}
