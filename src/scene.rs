//! Declarative layer list derived from a [`Snapshot`].

use crate::content::ProjectEntry;
use crate::easing::{Easing, Transition};
use crate::portfolio::Snapshot;
use crate::view::ViewState;

/// Visual layers of the page, in paint order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Background,
    Nebula,
    Skull,
    MuralLogo,
    DownArrow,
    UpArrow,
    BType,
    MuralMockup,
    BioText,
    MuralText,
    ProjectsList,
    Nav,
    Foreground,
}

impl LayerKind {
    /// Element id a DOM renderer looks the layer up by.
    pub fn id(self) -> &'static str {
        match self {
            LayerKind::Background => "layer-background",
            LayerKind::Nebula => "layer-nebula",
            LayerKind::Skull => "layer-skull",
            LayerKind::MuralLogo => "layer-mural-logo",
            LayerKind::DownArrow => "layer-down-arrow",
            LayerKind::UpArrow => "layer-up-arrow",
            LayerKind::BType => "layer-b-type",
            LayerKind::MuralMockup => "layer-mural-mockup",
            LayerKind::BioText => "layer-bio-text",
            LayerKind::MuralText => "layer-mural-text",
            LayerKind::ProjectsList => "layer-projects",
            LayerKind::Nav => "layer-nav",
            LayerKind::Foreground => "layer-foreground",
        }
    }

    pub fn z_index(self) -> i32 {
        match self {
            LayerKind::Background => 0,
            LayerKind::Nebula => 5,
            LayerKind::Foreground => 20,
            _ => 10,
        }
    }
}

/// Vertical offset a layer animates toward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Translate {
    /// Resting position
    Rest,
    Px(f64),
    /// Viewport-height units; ±150 parks a layer fully off-screen
    Vh(f64),
}

impl Translate {
    pub const ABOVE: Translate = Translate::Vh(-150.0);
    pub const BELOW: Translate = Translate::Vh(150.0);

    pub fn css(&self) -> String {
        match self {
            Translate::Rest => "translateY(0)".to_string(),
            Translate::Px(v) => format!("translateY({v}px)"),
            Translate::Vh(v) => format!("translateY({v}vh)"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    #[default]
    Normal,
    PlusLighter,
}

impl BlendMode {
    pub fn css(&self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::PlusLighter => "plus-lighter",
        }
    }
}

/// One layer and the values it should currently animate toward.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    /// Whether the layer is in the tree at all
    pub mounted: bool,
    /// Horizontally centred on its anchor (`translateX(-50%)`)
    pub centered: bool,
    pub translate: Translate,
    pub opacity: f64,
    pub blend: BlendMode,
    pub transition: Option<Transition>,
    /// Text content for text layers
    pub text: Option<String>,
}

impl Layer {
    fn new(kind: LayerKind, mounted: bool) -> Self {
        Self {
            kind,
            mounted,
            centered: false,
            translate: Translate::Rest,
            opacity: 1.0,
            blend: BlendMode::Normal,
            transition: None,
            text: None,
        }
    }

    fn centered(mut self, translate: Translate) -> Self {
        self.centered = true;
        self.translate = translate;
        self
    }

    fn with_transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    /// CSS `transform` value.
    pub fn transform_css(&self) -> String {
        if self.centered {
            format!("translateX(-50%) {}", self.translate.css())
        } else {
            self.translate.css()
        }
    }
}

/// Every layer of the page for one state.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub layers: Vec<Layer>,
}

impl Scene {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    /// Layers currently in the tree, in paint order.
    pub fn mounted(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.mounted)
    }
}

/// Map a snapshot to layers. `slide_ms` is the duration of every slide and fade.
///
/// ## Example
///
/// ```rust
/// use portfolio_core_view::{LayerKind, Portfolio};
///
/// let page = Portfolio::new();
/// let scene = page.scene();
///
/// let bio = scene.layer(LayerKind::BioText).unwrap();
/// assert!(bio.mounted);
/// assert_eq!(bio.text.as_deref(), Some(page.buffer()));
/// assert!(!scene.layer(LayerKind::ProjectsList).unwrap().mounted);
/// ```
pub fn compose(snapshot: &Snapshot<'_>, slide_ms: u64) -> Scene {
    let state = snapshot.view_state;
    let flags = snapshot.flags;
    let on_mural = state == ViewState::StudioMural;
    let on_bottom = state == ViewState::StudioMuralBottom;
    let slide = Transition::slide(slide_ms);

    let logo = if flags.studio_mural_content_visible && !flags.studio_mural_content_hiding {
        Translate::Rest
    } else {
        Translate::ABOVE
    };
    let arrow = if flags.studio_mural_content_hiding {
        Translate::ABOVE
    } else {
        Translate::Rest
    };
    let bottom = if flags.studio_mural_bottom_visible {
        Translate::Rest
    } else {
        Translate::BELOW
    };
    let projects = if flags.projects_visible {
        Translate::Px(-70.0)
    } else {
        Translate::ABOVE
    };

    let mut nebula = Layer::new(LayerKind::Nebula, true);
    nebula.opacity = 0.65;
    nebula.blend = BlendMode::PlusLighter;

    let mut skull = Layer::new(LayerKind::Skull, true)
        .with_transition(Transition::fade(slide_ms, Easing::Standard));
    skull.opacity = snapshot.skull_opacity;

    let mut down_arrow = Layer::new(LayerKind::DownArrow, on_mural)
        .centered(arrow)
        .with_transition(slide.with_fade());
    down_arrow.opacity = snapshot.down_arrow_opacity;

    let mut bio_text = Layer::new(LayerKind::BioText, state == ViewState::About || flags.leaving_about);
    bio_text.text = Some(snapshot.buffer.to_string());

    let mut mural_text = Layer::new(
        LayerKind::MuralText,
        on_mural || on_bottom || flags.entering_studio_mural,
    );
    mural_text.text = Some(snapshot.buffer.to_string());

    let mut projects_list = Layer::new(
        LayerKind::ProjectsList,
        state == ViewState::Projects && !flags.leaving_about,
    )
    .with_transition(slide);
    projects_list.translate = projects;
    projects_list.text = Some(listing(snapshot.projects));

    Scene {
        layers: vec![
            Layer::new(LayerKind::Background, true),
            nebula,
            skull,
            Layer::new(LayerKind::MuralLogo, on_mural)
                .centered(logo)
                .with_transition(slide),
            down_arrow,
            Layer::new(LayerKind::UpArrow, on_bottom)
                .centered(bottom)
                .with_transition(slide),
            Layer::new(LayerKind::BType, on_bottom)
                .centered(bottom)
                .with_transition(slide),
            Layer::new(LayerKind::MuralMockup, on_bottom)
                .centered(bottom)
                .with_transition(slide),
            bio_text,
            mural_text,
            projects_list,
            Layer::new(LayerKind::Nav, true),
            Layer::new(LayerKind::Foreground, true),
        ],
    }
}

/// Project names, one line per name line, entries separated by a blank line.
fn listing(projects: &[ProjectEntry]) -> String {
    let mut text = String::new();
    for (i, project) in projects.iter().enumerate() {
        if i > 0 {
            text.push('\n');
        }
        for line in project.lines() {
            text.push_str(line);
            text.push('\n');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{RevealSource, PROJECTS};
    use crate::reveal::RevealDirection;
    use crate::view::{AboutPhase, BottomPhase, MuralPhase, ProjectsPhase, View};

    fn snapshot(view: View, mural_typing: bool) -> Snapshot<'static> {
        let active = mural_typing.then_some((RevealSource::StudioMural, RevealDirection::Type));
        snapshot_with(view, active)
    }

    fn snapshot_with(view: View, active: Option<(RevealSource, RevealDirection)>) -> Snapshot<'static> {
        Snapshot {
            view,
            view_state: view.state(),
            flags: view.flags(active),
            buffer: "text",
            reveal_source: Some(RevealSource::Bio),
            skull_opacity: 1.0,
            down_arrow_opacity: 0.0,
            projects: &PROJECTS,
        }
    }

    fn layer(scene: &Scene, kind: LayerKind) -> &Layer {
        scene.layer(kind).expect("every kind is always present")
    }

    #[test]
    fn test_about_scene() {
        let scene = compose(&snapshot(View::About(AboutPhase::Resting), false), 600);
        assert_eq!(scene.layers.len(), 13);

        let mounted: Vec<_> = scene.mounted().map(|l| l.kind).collect();
        assert_eq!(
            mounted,
            vec![
                LayerKind::Background,
                LayerKind::Nebula,
                LayerKind::Skull,
                LayerKind::BioText,
                LayerKind::Nav,
                LayerKind::Foreground,
            ]
        );
        assert_eq!(layer(&scene, LayerKind::BioText).text.as_deref(), Some("text"));
        assert_eq!(layer(&scene, LayerKind::Nebula).blend.css(), "plus-lighter");
    }

    #[test]
    fn test_projects_list_slides() {
        let bio_erase = Some((RevealSource::Bio, RevealDirection::Erase));
        let erasing = compose(&snapshot_with(View::Projects(ProjectsPhase::Erasing), bio_erase), 600);
        assert!(layer(&erasing, LayerKind::BioText).mounted);
        assert!(!layer(&erasing, LayerKind::ProjectsList).mounted);

        let interrupted = compose(&snapshot_with(View::Projects(ProjectsPhase::Retracting), bio_erase), 600);
        assert!(layer(&interrupted, LayerKind::BioText).mounted);
        assert!(!layer(&interrupted, LayerKind::ProjectsList).mounted);

        let mounted = compose(&snapshot(View::Projects(ProjectsPhase::Mounted), false), 600);
        let list = layer(&mounted, LayerKind::ProjectsList);
        assert!(list.mounted);
        assert_eq!(list.transform_css(), "translateY(-150vh)");

        let shown = compose(&snapshot(View::Projects(ProjectsPhase::Shown), false), 600);
        assert_eq!(layer(&shown, LayerKind::ProjectsList).transform_css(), "translateY(-70px)");
        assert!(!layer(&shown, LayerKind::BioText).mounted);

        let text = layer(&shown, LayerKind::ProjectsList).text.as_deref().unwrap_or_default();
        assert!(text.starts_with("STUDIO\nMURAL\n\nTYPE\nANATOMY\n"));
        assert!(text.ends_with("UTS\nGARDEN\n"));
    }

    #[test]
    fn test_mural_logo_and_arrow() {
        let entering = compose(&snapshot(View::StudioMural(MuralPhase::Entering), true), 600);
        let logo = layer(&entering, LayerKind::MuralLogo);
        assert!(logo.mounted);
        assert_eq!(logo.transform_css(), "translateX(-50%) translateY(-150vh)");
        assert!(layer(&entering, LayerKind::MuralText).mounted);

        let shown = compose(&snapshot(View::StudioMural(MuralPhase::Shown), false), 600);
        assert_eq!(layer(&shown, LayerKind::MuralLogo).translate, Translate::Rest);
        assert_eq!(layer(&shown, LayerKind::DownArrow).translate, Translate::Rest);

        let hiding = compose(&snapshot(View::StudioMural(MuralPhase::Hiding), false), 600);
        assert_eq!(layer(&hiding, LayerKind::MuralLogo).translate, Translate::ABOVE);
        assert_eq!(layer(&hiding, LayerKind::DownArrow).translate, Translate::ABOVE);
    }

    #[test]
    fn test_bottom_page_rises() {
        let entering = compose(&snapshot(View::StudioMuralBottom(BottomPhase::Entering), false), 600);
        for kind in [LayerKind::UpArrow, LayerKind::BType, LayerKind::MuralMockup] {
            assert!(layer(&entering, kind).mounted);
            assert_eq!(layer(&entering, kind).translate, Translate::BELOW);
        }
        assert!(!layer(&entering, LayerKind::MuralLogo).mounted);
        assert!(layer(&entering, LayerKind::MuralText).mounted);

        let shown = compose(&snapshot(View::StudioMuralBottom(BottomPhase::Shown), false), 600);
        assert_eq!(layer(&shown, LayerKind::UpArrow).translate, Translate::Rest);
    }

    #[test]
    fn test_text_layers_exclusive() {
        let views = [
            View::About(AboutPhase::Typing),
            View::Projects(ProjectsPhase::Erasing),
            View::Projects(ProjectsPhase::Shown),
            View::StudioMural(MuralPhase::Entering),
            View::StudioMural(MuralPhase::Retracting),
            View::StudioMuralBottom(BottomPhase::Shown),
        ];
        for view in views {
            let scene = compose(&snapshot(view, false), 600);
            let bio = layer(&scene, LayerKind::BioText).mounted;
            let mural = layer(&scene, LayerKind::MuralText).mounted;
            assert!(!(bio && mural), "both text layers mounted in {view:?}");
        }
    }

    #[test]
    fn test_transition_css() {
        let scene = compose(&snapshot(View::StudioMural(MuralPhase::Shown), false), 600);
        let arrow = layer(&scene, LayerKind::DownArrow);
        assert_eq!(
            arrow.transition.map(|t| t.css()).as_deref(),
            Some("transform 0.6s cubic-bezier(0.34, 1.56, 0.64, 1), opacity 0.6s")
        );
        assert_eq!(layer(&scene, LayerKind::Foreground).kind.z_index(), 20);
    }
}
