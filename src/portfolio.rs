//! Page controller: intents, scheduled continuations and reveal runs.

use tracing::{debug, trace};

use crate::config::{ConfigError, SiteConfig, TransitionTimings};
use crate::content::{ProjectAction, ProjectEntry, RevealSource, SiteContent, PROJECTS};
use crate::reveal::{RevealDirection, RevealStart, RevealTick, RunId, TextReveal};
use crate::scene::{compose, Scene};
use crate::schedule::{CancelPolicy, Scheduler, Step};
use crate::view::{AboutPhase, BottomPhase, MuralPhase, ProjectsPhase, TransitionFlags, View, ViewState};

/// Deferred state change armed by an intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mutation {
    ShowProjects,
    EnterAbout,
    EnterStudioMural,
    ShowStudioMuralContent,
    ShowDownArrow,
    EnterStudioMuralBottom,
    ShowStudioMuralBottom,
}

/// Read-only view of everything a renderer needs.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub view: View,
    pub view_state: ViewState,
    pub flags: TransitionFlags,
    /// Text currently published by the reveal engine
    pub buffer: &'a str,
    pub reveal_source: Option<RevealSource>,
    pub skull_opacity: f64,
    pub down_arrow_opacity: f64,
    pub projects: &'a [ProjectEntry],
}

/// Owns the page state and sequences every transition.
///
/// Intents (`go_to_*`, `advance_studio_mural`, `select_project`) validate a
/// precondition on the current view and are ignored when it fails. Accepted
/// intents arm a plan of delayed mutations. Nothing happens on its own: call
/// [`update`](Self::update) with the current time (from a timer, a frame
/// callback or a test) to fire due mutations and reveal steps.
///
/// ## Example
///
/// ```rust
/// use portfolio_core_view::{Portfolio, ViewState, BIO_TEXT};
///
/// let mut page = Portfolio::new();
/// assert!(page.go_to_projects(0));
/// assert_eq!(page.view_state(), ViewState::Projects);
///
/// // The bio erases one character per millisecond, then the list slides in.
/// let erase_ms = BIO_TEXT.chars().count() as u64;
/// page.update(erase_ms + 50);
/// assert!(page.flags().projects_visible);
/// assert_eq!(page.buffer(), "");
/// ```
#[derive(Clone, Debug)]
pub struct Portfolio {
    view: View,
    skull_opacity: f64,
    down_arrow_opacity: f64,
    reveal: TextReveal,
    reveal_source: Option<RevealSource>,
    /// Due time of the next reveal step while a run is active
    next_reveal_ms: u64,
    scheduler: Scheduler<Mutation>,
    timings: TransitionTimings,
    cancel_policy: CancelPolicy,
    content: SiteContent,
    /// Logical time of the last processed event
    now_ms: u64,
}

impl Portfolio {
    /// Create a controller with the built-in texts and timings.
    pub fn new() -> Self {
        Self::with_content(SiteContent::default(), TransitionTimings::default())
    }

    /// Create a controller resting on the about view with the full bio shown.
    pub fn with_content(content: SiteContent, timings: TransitionTimings) -> Self {
        Self {
            view: View::default(),
            skull_opacity: 1.0,
            down_arrow_opacity: 0.0,
            reveal: TextReveal::resting(&content.bio, timings.reveal_interval_ms),
            reveal_source: Some(RevealSource::Bio),
            next_reveal_ms: 0,
            scheduler: Scheduler::new(),
            timings,
            cancel_policy: CancelPolicy::default(),
            content,
            now_ms: 0,
        }
    }

    /// Create a controller from a resolved site configuration.
    pub fn from_config(config: &SiteConfig) -> Result<Self, ConfigError> {
        let mut portfolio = Self::with_content(config.content(), config.timings()?);
        portfolio.cancel_policy = config.cancel_policy();
        Ok(portfolio)
    }

    pub fn set_cancel_policy(&mut self, policy: CancelPolicy) {
        self.cancel_policy = policy;
    }

    #[inline]
    pub fn cancel_policy(&self) -> CancelPolicy {
        self.cancel_policy
    }

    #[inline]
    pub fn timings(&self) -> &TransitionTimings {
        &self.timings
    }

    /// About → Projects: erase the bio, then slide the projects list in.
    pub fn go_to_projects(&mut self, now_ms: u64) -> bool {
        self.update(now_ms);
        if self.view.state() != ViewState::About {
            return self.ignore("go_to_projects");
        }

        self.begin_intent("go_to_projects");
        self.view = View::Projects(ProjectsPhase::Erasing);
        self.start_reveal(RevealSource::Bio, RevealDirection::Erase);
        true
    }

    /// Projects or StudioMural → About: retract the visible content, then type
    /// the bio back in.
    pub fn go_to_about(&mut self, now_ms: u64) -> bool {
        self.update(now_ms);
        let retracting = match self.view {
            View::Projects(_) => View::Projects(ProjectsPhase::Retracting),
            View::StudioMural(_) => View::StudioMural(MuralPhase::Retracting),
            _ => return self.ignore("go_to_about"),
        };

        self.begin_intent("go_to_about");
        self.view = retracting;
        self.down_arrow_opacity = 0.0;
        let exit = self.timings.exit_ms;
        self.arm([Step::after(exit, Mutation::EnterAbout)]);
        true
    }

    /// Projects → StudioMural: retract the list, fade the skull, type the
    /// mural text and stagger the logo and arrow in.
    pub fn go_to_studio_mural(&mut self, now_ms: u64) -> bool {
        self.update(now_ms);
        if self.view.state() != ViewState::Projects {
            return self.ignore("go_to_studio_mural");
        }

        self.begin_intent("go_to_studio_mural");
        self.view = View::Projects(ProjectsPhase::Retracting);
        let t = self.timings;
        self.arm([
            Step::after(t.exit_ms, Mutation::EnterStudioMural),
            Step::after(t.exit_ms.saturating_add(t.mural_content_ms), Mutation::ShowStudioMuralContent),
            Step::after(t.exit_ms.saturating_add(t.down_arrow_ms), Mutation::ShowDownArrow),
        ]);
        true
    }

    /// StudioMural → StudioMuralBottom: slide the logo and arrow up, then
    /// raise the bottom page content.
    pub fn advance_studio_mural(&mut self, now_ms: u64) -> bool {
        self.update(now_ms);
        if self.view.state() != ViewState::StudioMural {
            return self.ignore("advance_studio_mural");
        }

        self.begin_intent("advance_studio_mural");
        self.view = View::StudioMural(MuralPhase::Hiding);
        let t = self.timings;
        self.arm([
            Step::after(t.exit_ms, Mutation::EnterStudioMuralBottom),
            Step::after(t.exit_ms.saturating_add(t.bottom_content_ms), Mutation::ShowStudioMuralBottom),
        ]);
        true
    }

    /// Dispatch the action of the project at `index`, if it has one.
    pub fn select_project(&mut self, index: usize, now_ms: u64) -> bool {
        match PROJECTS.get(index).and_then(|p| p.action) {
            Some(ProjectAction::OpenStudioMural) => self.go_to_studio_mural(now_ms),
            None => {
                self.update(now_ms);
                self.ignore("select_project")
            }
        }
    }

    /// Fire every scheduled mutation and reveal step due at or before `now_ms`.
    ///
    /// Events are processed in timestamp order; at equal timestamps scheduled
    /// mutations fire before reveal steps. Returns true if anything changed.
    /// Calls with a time earlier than the last processed one do nothing.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if now_ms < self.now_ms {
            return false;
        }

        let mut changed = false;
        loop {
            let step_due = self.scheduler.next_due();
            let reveal_due = self.reveal.is_running().then_some(self.next_reveal_ms);
            let step_first = match (step_due, reveal_due) {
                (Some(step), Some(reveal)) => step <= reveal,
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };

            if step_first {
                let Some(fired) = self.scheduler.pop_due(now_ms) else {
                    break;
                };
                self.now_ms = fired.due_ms;
                trace!(at = fired.due_ms, action = ?fired.action, "scheduled step fired");
                self.apply(fired.action);
            } else {
                let Some(due) = reveal_due.filter(|&due| due <= now_ms) else {
                    break;
                };
                self.now_ms = due;
                self.next_reveal_ms = due.saturating_add(u64::from(self.reveal.interval_ms()));
                if let RevealTick::Finished(run) = self.reveal.tick() {
                    self.on_reveal_finished(run);
                }
            }
            changed = true;
        }

        self.now_ms = now_ms;
        changed
    }

    /// Earliest time at which [`update`](Self::update) would change something.
    pub fn next_deadline(&self) -> Option<u64> {
        let reveal_due = self.reveal.is_running().then_some(self.next_reveal_ms);
        match (self.scheduler.next_due(), reveal_due) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Returns true while a transition or reveal run is still in flight.
    pub fn is_animating(&self) -> bool {
        !self.scheduler.is_empty() || self.reveal.is_running()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            view: self.view,
            view_state: self.view.state(),
            flags: self.flags(),
            buffer: self.reveal.buffer(),
            reveal_source: self.reveal_source,
            skull_opacity: self.skull_opacity,
            down_arrow_opacity: self.down_arrow_opacity,
            projects: &PROJECTS,
        }
    }

    /// Layers to render for the current state.
    pub fn scene(&self) -> Scene {
        compose(&self.snapshot(), self.timings.exit_ms)
    }

    #[inline]
    pub fn view(&self) -> View {
        self.view
    }

    #[inline]
    pub fn view_state(&self) -> ViewState {
        self.view.state()
    }

    pub fn flags(&self) -> TransitionFlags {
        let active = self
            .reveal_source
            .filter(|_| self.reveal.is_running())
            .map(|source| (source, self.reveal.direction()));
        self.view.flags(active)
    }

    #[inline]
    pub fn buffer(&self) -> &str {
        self.reveal.buffer()
    }

    #[inline]
    pub fn reveal(&self) -> &TextReveal {
        &self.reveal
    }

    #[inline]
    pub fn reveal_source(&self) -> Option<RevealSource> {
        self.reveal_source
    }

    #[inline]
    pub fn skull_opacity(&self) -> f64 {
        self.skull_opacity
    }

    #[inline]
    pub fn down_arrow_opacity(&self) -> f64 {
        self.down_arrow_opacity
    }

    #[inline]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn ignore(&self, intent: &'static str) -> bool {
        debug!(intent, view = ?self.view, "intent ignored");
        false
    }

    fn begin_intent(&mut self, intent: &'static str) {
        debug!(intent, from = ?self.view, at = self.now_ms, "intent accepted");
        if self.cancel_policy == CancelPolicy::CancelPending {
            let dropped = self.scheduler.cancel_pending();
            if dropped > 0 {
                debug!(intent, dropped, "superseded pending steps");
            }
        }
    }

    fn arm<const N: usize>(&mut self, steps: [Step<Mutation>; N]) {
        self.scheduler.schedule(self.now_ms, steps);
    }

    fn start_reveal(&mut self, source: RevealSource, direction: RevealDirection) {
        self.reveal_source = Some(source);
        match self.reveal.start(self.content.text(source), direction) {
            RevealStart::Running(_) => {
                self.next_reveal_ms = self.now_ms.saturating_add(u64::from(self.reveal.interval_ms()));
            }
            RevealStart::Completed(run) => self.on_reveal_finished(run),
        }
    }

    fn on_reveal_finished(&mut self, run: RunId) {
        trace!(?run, view = ?self.view, "reveal run completed");
        match (self.view, self.reveal.direction()) {
            (View::Projects(ProjectsPhase::Erasing), RevealDirection::Erase) => {
                self.set_view(View::Projects(ProjectsPhase::Mounted));
                let delay = self.timings.projects_reveal_ms;
                self.arm([Step::after(delay, Mutation::ShowProjects)]);
            }
            (View::About(AboutPhase::Typing), RevealDirection::Type) => {
                self.set_view(View::About(AboutPhase::Resting));
            }
            // mural typing has no phase of its own
            _ => {}
        }
    }

    fn apply(&mut self, mutation: Mutation) {
        match mutation {
            Mutation::ShowProjects => {
                if self.view == View::Projects(ProjectsPhase::Mounted) {
                    self.set_view(View::Projects(ProjectsPhase::Shown));
                }
            }
            Mutation::EnterAbout => {
                self.set_view(View::About(AboutPhase::Typing));
                self.skull_opacity = 1.0;
                self.start_reveal(RevealSource::Bio, RevealDirection::Type);
            }
            Mutation::EnterStudioMural => {
                self.set_view(View::StudioMural(MuralPhase::Entering));
                self.skull_opacity = 0.0;
                self.start_reveal(RevealSource::StudioMural, RevealDirection::Type);
            }
            Mutation::ShowStudioMuralContent => {
                if self.view == View::StudioMural(MuralPhase::Entering) {
                    self.set_view(View::StudioMural(MuralPhase::Shown));
                }
            }
            Mutation::ShowDownArrow => {
                if matches!(self.view, View::StudioMural(MuralPhase::Entering | MuralPhase::Shown)) {
                    self.down_arrow_opacity = 1.0;
                }
            }
            Mutation::EnterStudioMuralBottom => {
                self.set_view(View::StudioMuralBottom(BottomPhase::Entering));
                self.down_arrow_opacity = 0.0;
            }
            Mutation::ShowStudioMuralBottom => {
                if self.view == View::StudioMuralBottom(BottomPhase::Entering) {
                    self.set_view(View::StudioMuralBottom(BottomPhase::Shown));
                }
            }
        }
    }

    fn set_view(&mut self, view: View) {
        if self.view != view {
            debug!(from = ?self.view, to = ?view, at = self.now_ms, "view changed");
            self.view = view;
        }
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{BIO_TEXT, STUDIO_MURAL_TEXT};

    fn bio_len() -> u64 {
        BIO_TEXT.chars().count() as u64
    }

    fn mural_len() -> u64 {
        STUDIO_MURAL_TEXT.chars().count() as u64
    }

    /// Controller parked on the shown projects list at the returned time.
    fn on_projects() -> (Portfolio, u64) {
        let mut page = Portfolio::new();
        page.go_to_projects(0);
        let t = bio_len() + 50;
        page.update(t);
        assert_eq!(page.view(), View::Projects(ProjectsPhase::Shown));
        (page, t)
    }

    #[test]
    fn test_initial_state() {
        let page = Portfolio::new();
        assert_eq!(page.view(), View::About(AboutPhase::Resting));
        assert_eq!(page.buffer(), BIO_TEXT);
        assert_eq!(page.skull_opacity(), 1.0);
        assert_eq!(page.down_arrow_opacity(), 0.0);
        assert!(!page.is_animating());
        assert_eq!(page.next_deadline(), None);
    }

    #[test]
    fn test_erase_then_projects_slide_in() {
        let mut page = Portfolio::new();
        assert!(page.go_to_projects(0));
        assert!(page.flags().leaving_about);

        page.update(10);
        assert_eq!(page.buffer().chars().count() as u64, bio_len() - 10);

        page.update(bio_len());
        assert_eq!(page.buffer(), "");
        assert_eq!(page.view(), View::Projects(ProjectsPhase::Mounted));
        assert!(!page.flags().projects_visible);

        page.update(bio_len() + 49);
        assert!(!page.flags().projects_visible);
        page.update(bio_len() + 50);
        assert!(page.flags().projects_visible);
        assert!(!page.is_animating());
    }

    #[test]
    fn test_go_to_projects_outside_about_is_ignored() {
        let (mut page, t) = on_projects();
        let before = page.snapshot().flags;

        assert!(!page.go_to_projects(t));
        assert_eq!(page.view(), View::Projects(ProjectsPhase::Shown));
        assert_eq!(page.flags(), before);
        assert!(!page.is_animating());
    }

    #[test]
    fn test_studio_mural_sequence_order() {
        let (mut page, t) = on_projects();
        assert!(page.go_to_studio_mural(t));
        assert!(!page.flags().projects_visible);

        page.update(t + 599);
        assert_eq!(page.view_state(), ViewState::Projects);
        assert_eq!(page.skull_opacity(), 1.0);

        page.update(t + 600);
        assert_eq!(page.view(), View::StudioMural(MuralPhase::Entering));
        assert_eq!(page.skull_opacity(), 0.0);
        assert!(page.flags().entering_studio_mural);
        assert_eq!(page.reveal_source(), Some(RevealSource::StudioMural));

        page.update(t + 650);
        assert!(page.flags().studio_mural_content_visible);
        assert_eq!(page.down_arrow_opacity(), 0.0);

        page.update(t + 1_250);
        assert_eq!(page.down_arrow_opacity(), 1.0);

        page.update(t + 600 + mural_len());
        assert_eq!(page.buffer(), STUDIO_MURAL_TEXT);
        assert!(!page.flags().entering_studio_mural);
    }

    #[test]
    fn test_round_trip_restores_bio() {
        let (mut page, t) = on_projects();
        assert!(page.go_to_about(t));
        assert_eq!(page.view(), View::Projects(ProjectsPhase::Retracting));

        page.update(t + 600);
        assert_eq!(page.view(), View::About(AboutPhase::Typing));
        assert!(page.flags().entering_about);
        assert_eq!(page.buffer(), "");

        page.update(t + 600 + bio_len());
        assert_eq!(page.view(), View::About(AboutPhase::Resting));
        assert_eq!(page.buffer(), BIO_TEXT);
        assert!(!page.flags().entering_about);
    }

    #[test]
    fn test_about_from_studio_mural_resets_scalars() {
        let (mut page, t) = on_projects();
        page.go_to_studio_mural(t);
        page.update(t + 1_300);
        assert_eq!(page.down_arrow_opacity(), 1.0);

        assert!(page.go_to_about(t + 1_300));
        assert_eq!(page.down_arrow_opacity(), 0.0);
        assert!(!page.flags().studio_mural_content_visible);

        page.update(t + 1_900);
        assert_eq!(page.view(), View::About(AboutPhase::Typing));
        assert_eq!(page.skull_opacity(), 1.0);
        assert_eq!(page.reveal_source(), Some(RevealSource::Bio));
    }

    #[test]
    fn test_advance_to_bottom_page() {
        let (mut page, t) = on_projects();
        page.go_to_studio_mural(t);
        page.update(t + 700);
        assert!(page.flags().studio_mural_content_visible);

        assert!(page.advance_studio_mural(t + 700));
        assert!(page.flags().studio_mural_content_hiding);
        assert!(page.flags().studio_mural_content_visible);

        page.update(t + 1_300);
        assert_eq!(page.view(), View::StudioMuralBottom(BottomPhase::Entering));
        assert!(!page.flags().studio_mural_content_visible);
        assert!(!page.flags().studio_mural_content_hiding);
        // the arrow step was superseded by the advance
        assert_eq!(page.down_arrow_opacity(), 0.0);

        page.update(t + 1_350);
        assert!(page.flags().studio_mural_bottom_visible);

        // mural text keeps typing on the bottom page
        assert!(page.flags().entering_studio_mural);
        assert!(page.buffer().len() < STUDIO_MURAL_TEXT.len());
        page.update(t + 600 + mural_len());
        assert_eq!(page.buffer(), STUDIO_MURAL_TEXT);

        assert!(!page.advance_studio_mural(t + 5_000));
        assert!(!page.go_to_about(t + 5_000));
    }

    #[test]
    fn test_interrupted_erase_keeps_bio_mounted() {
        use crate::scene::LayerKind;

        let mut page = Portfolio::new();
        page.go_to_projects(0);
        assert!(page.go_to_about(100));
        assert_eq!(page.view(), View::Projects(ProjectsPhase::Retracting));
        assert!(page.flags().leaving_about);

        page.update(300);
        let scene = page.scene();
        let bio = scene.layer(LayerKind::BioText).unwrap();
        assert!(bio.mounted);
        assert_eq!(bio.text.as_deref(), Some(page.buffer()));
        assert!(!scene.layer(LayerKind::ProjectsList).unwrap().mounted);

        // the type run replaces the erase once about mounts
        page.update(700);
        assert_eq!(page.view(), View::About(AboutPhase::Typing));
        assert!(!page.flags().leaving_about);
    }

    #[test]
    fn test_new_intent_cancels_superseded_steps() {
        let (mut page, t) = on_projects();
        page.go_to_about(t);
        // still on projects while the list retracts
        assert!(page.go_to_studio_mural(t + 100));

        page.update(t + 700);
        assert_eq!(page.view(), View::StudioMural(MuralPhase::Entering));
        assert_eq!(page.reveal_source(), Some(RevealSource::StudioMural));
    }

    #[test]
    fn test_let_run_keeps_superseded_steps() {
        let (mut page, t) = on_projects();
        page.set_cancel_policy(CancelPolicy::LetRun);
        page.go_to_about(t);
        page.go_to_studio_mural(t + 100);

        // the about step fires first, then the mural step overrides it
        page.update(t + 600);
        assert_eq!(page.view(), View::About(AboutPhase::Typing));
        page.update(t + 700);
        assert_eq!(page.view(), View::StudioMural(MuralPhase::Entering));
    }

    #[test]
    fn test_select_project() {
        let (mut page, t) = on_projects();
        assert!(!page.select_project(1, t));
        assert!(!page.select_project(99, t));
        assert_eq!(page.view(), View::Projects(ProjectsPhase::Shown));

        assert!(page.select_project(0, t));
        page.update(t + 600);
        assert_eq!(page.view_state(), ViewState::StudioMural);
    }

    #[test]
    fn test_empty_bio_completes_immediately() {
        let content = SiteContent {
            bio: String::new(),
            ..SiteContent::default()
        };
        let mut page = Portfolio::with_content(content, TransitionTimings::default());
        page.go_to_projects(0);

        assert_eq!(page.buffer(), "");
        assert_eq!(page.view(), View::Projects(ProjectsPhase::Mounted));
        page.update(50);
        assert!(page.flags().projects_visible);
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let mut page = Portfolio::new();
        page.go_to_projects(100);
        page.update(200);
        let buffer = page.buffer().to_string();

        assert!(!page.update(150));
        assert_eq!(page.buffer(), buffer);
        assert_eq!(page.now_ms(), 200);
    }

    #[test]
    fn test_next_deadline_tracks_reveal_and_steps() {
        let mut page = Portfolio::new();
        page.go_to_projects(0);
        assert_eq!(page.next_deadline(), Some(1));

        let (mut page, t) = on_projects();
        page.go_to_studio_mural(t);
        assert_eq!(page.next_deadline(), Some(t + 600));
    }
}
