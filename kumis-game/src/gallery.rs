//! Fungi catalogue browser.
use crate::content::{Fungi, FungiKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryFilter {
    #[default]
    All,
    Khamir,
    Kapang,
    Cendawan,
}

impl GalleryFilter {
    pub const ALL: [GalleryFilter; 4] = [
        GalleryFilter::All,
        GalleryFilter::Khamir,
        GalleryFilter::Kapang,
        GalleryFilter::Cendawan,
    ];

    #[must_use]
    pub fn admits(self, kind: FungiKind) -> bool {
        match self {
            Self::All => true,
            Self::Khamir => kind == FungiKind::Khamir,
            Self::Kapang => kind == FungiKind::Kapang,
            Self::Cendawan => kind == FungiKind::Cendawan,
        }
    }

    /// Stable key, also used for UI string lookup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Khamir => "khamir",
            Self::Kapang => "kapang",
            Self::Cendawan => "cendawan",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryView {
    pub filter: GalleryFilter,
    pub selected: Option<String>,
}

impl GalleryView {
    pub fn set_filter(&mut self, filter: GalleryFilter) {
        self.filter = filter;
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.selected = Some(id.into());
    }

    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn visible<'a>(&self, catalogue: &'a [Fungi]) -> Vec<&'a Fungi> {
        catalogue
            .iter()
            .filter(|f| self.filter.admits(f.kind))
            .collect()
    }

    #[must_use]
    pub fn detail<'a>(&self, catalogue: &'a [Fungi]) -> Option<&'a Fungi> {
        let id = self.selected.as_deref()?;
        catalogue.iter().find(|f| f.id == id)
    }
}
