//! Static page content: reveal texts and the projects list.

/// Biography shown on the about view.
pub const BIO_TEXT: &str = "I'm Luke, a first-year Visual Communication Design student at UTS who came to the degree later than most, with several years of professional experience already behind me. I have worked across branding, motion, and digital marketing, developing a practice that explores how design shapes emotion and perception.\n\nI believe design has become depersonalised by being treated as output rather than world-building. True design constructs energy and atmosphere. It should embrace the tools of the digital age while retaining an analogue soul, with texture, warmth, and imperfection that remind us of the human touch.\n\nEach project, no matter the scale, forms part of a greater visual narrative. My focus is on creating work that feels boldly alive, with imagery that is poignant, aesthetics that strike deeply, and experiences that resonate.";

/// Project description shown on the studio mural pages.
pub const STUDIO_MURAL_TEXT: &str = "I was interested in forming a distinct sense of belonging and connection to space through graphic expression - this flourished by using the pervasive cutting mats as a foundation for the piece. Whether or not it's realised, every student in 5A forms their own unique connection to their cutting mat, but we're all unified by the green and yellow grid.\n\nFlexible grid systems then became key - how crucial is the 1:1 box system? Can I retain that sense of connection if the grid is manipulated, expanded, refined?\n\nFurthermore, how can I manipulate typographic treatment to ensure legibility? What are the boundaries? The result plays on scale, forming almost an illusion of depth against the grid while still offering a nod towards the cutting mats, maintaining a sense of familiarity.";

/// Which text the reveal engine is sourced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RevealSource {
    Bio,
    StudioMural,
}

/// What selecting a project entry does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProjectAction {
    /// Transition into the studio mural page
    OpenStudioMural,
}

/// An entry of the projects list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProjectEntry {
    /// Display name; `\n` separates the two stacked lines
    pub name: &'static str,
    /// `None` for entries that do not lead anywhere yet
    pub action: Option<ProjectAction>,
}

impl ProjectEntry {
    /// The name's lines, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &'static str> {
        self.name.lines()
    }
}

/// The projects list, in display order.
pub static PROJECTS: [ProjectEntry; 6] = [
    ProjectEntry { name: "STUDIO\nMURAL", action: Some(ProjectAction::OpenStudioMural) },
    ProjectEntry { name: "TYPE\nANATOMY", action: None },
    ProjectEntry { name: "CHANCE\nAND CHOICE", action: None },
    ProjectEntry { name: "PHOTO\nWORK", action: None },
    ProjectEntry { name: "POST\nCARDS", action: None },
    ProjectEntry { name: "UTS\nGARDEN", action: None },
];

/// The two reveal texts, overridable through configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteContent {
    pub bio: String,
    pub studio_mural: String,
}

impl SiteContent {
    /// Text backing the given reveal source.
    pub fn text(&self, source: RevealSource) -> &str {
        match source {
            RevealSource::Bio => &self.bio,
            RevealSource::StudioMural => &self.studio_mural,
        }
    }
}

impl Default for SiteContent {
    fn default() -> Self {
        Self {
            bio: BIO_TEXT.to_string(),
            studio_mural: STUDIO_MURAL_TEXT.to_string(),
        }
    }
}
