//! View states, per-view transition phases and the flags derived from them.

use crate::content::RevealSource;
use crate::reveal::RevealDirection;

/// Which page is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewState {
    #[default]
    About,
    Projects,
    StudioMural,
    StudioMuralBottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AboutPhase {
    /// Bio fully shown, nothing animating
    Resting,
    /// Bio type run in progress
    Typing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectsPhase {
    /// Bio erase run in progress, list not mounted
    Erasing,
    /// List mounted off-screen, about to slide in
    Mounted,
    /// List slid into place
    Shown,
    /// List sliding back out before the next view mounts
    Retracting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MuralPhase {
    /// Logo mounted above the frame, about to drop in
    Entering,
    /// Logo in place
    Shown,
    /// Logo and arrow sliding up for the bottom page
    Hiding,
    /// Logo retracting before returning to about
    Retracting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BottomPhase {
    /// Content mounted below the frame, about to rise
    Entering,
    /// Content in place
    Shown,
}

/// The authoritative page state: the active view and its transition phase.
///
/// Carrying the phase inside the view makes combinations such as "projects
/// visible while on the about page" unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    About(AboutPhase),
    Projects(ProjectsPhase),
    StudioMural(MuralPhase),
    StudioMuralBottom(BottomPhase),
}

impl View {
    /// The active view without its phase.
    pub fn state(self) -> ViewState {
        match self {
            View::About(_) => ViewState::About,
            View::Projects(_) => ViewState::Projects,
            View::StudioMural(_) => ViewState::StudioMural,
            View::StudioMuralBottom(_) => ViewState::StudioMuralBottom,
        }
    }

    /// Derive the transition flags a renderer keys its layers on.
    ///
    /// `active` is the reveal run in flight, if any. The bio erase and the
    /// mural type run outlive the phase that started them, so their flags
    /// follow the run rather than the phase.
    pub fn flags(self, active: Option<(RevealSource, RevealDirection)>) -> TransitionFlags {
        TransitionFlags {
            leaving_about: active == Some((RevealSource::Bio, RevealDirection::Erase)),
            entering_about: self == View::About(AboutPhase::Typing),
            entering_studio_mural: active == Some((RevealSource::StudioMural, RevealDirection::Type)),
            projects_visible: self == View::Projects(ProjectsPhase::Shown),
            studio_mural_content_visible: matches!(
                self,
                View::StudioMural(MuralPhase::Shown | MuralPhase::Hiding)
            ),
            studio_mural_content_hiding: self == View::StudioMural(MuralPhase::Hiding),
            studio_mural_bottom_visible: self == View::StudioMuralBottom(BottomPhase::Shown),
        }
    }
}

impl Default for View {
    fn default() -> Self {
        View::About(AboutPhase::Resting)
    }
}

/// Booleans tracking in-flight animations, one per visible animation phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionFlags {
    pub leaving_about: bool,
    pub entering_about: bool,
    pub entering_studio_mural: bool,
    pub projects_visible: bool,
    pub studio_mural_content_visible: bool,
    pub studio_mural_content_hiding: bool,
    pub studio_mural_bottom_visible: bool,
}
