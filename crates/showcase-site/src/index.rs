//! The list of samples shown on the index page.

use std::collections::BTreeSet;
use std::path::Path;

use showcase_manifest::{Language, SampleEntry};

use crate::templates::{IndexEntry, LanguageLink};

/// Thumbnail used when a sample has none of its own.
pub const DEFAULT_THUMB: &str = "thumb/default.png";

/// Samples and the languages actually built for each, in manifest order.
#[derive(Debug, Default)]
pub struct SiteIndex {
    entries: Vec<(SampleEntry, BTreeSet<Language>)>,
}

impl SiteIndex {
    /// Create an index listing `samples` with nothing built yet.
    pub fn new(samples: &[SampleEntry]) -> Self {
        Self {
            entries: samples
                .iter()
                .map(|sample| (sample.clone(), BTreeSet::new()))
                .collect(),
        }
    }

    /// Record that `language` of the sample at `path` has been staged.
    pub fn record_built(&mut self, path: &str, language: Language) {
        if let Some((_, built)) = self.entries.iter_mut().find(|(s, _)| s.path == path) {
            built.insert(language);
        }
    }

    /// Number of (sample, language) builds recorded.
    pub fn builds(&self) -> usize {
        self.entries.iter().map(|(_, built)| built.len()).sum()
    }

    /// Index entries for every sample with at least one built language.
    ///
    /// Links follow the sample's declared language order; thumbnails are
    /// looked up under `site_dir`.
    pub fn entries(&self, site_dir: &Path) -> Vec<IndexEntry> {
        self.entries
            .iter()
            .filter_map(|(sample, built)| {
                let langs: Vec<LanguageLink> = sample
                    .langs
                    .iter()
                    .filter(|lang| built.contains(*lang))
                    .map(|lang| LanguageLink {
                        name: lang.label().to_string(),
                        link: sample.dir_name(*lang),
                    })
                    .collect();

                let url = langs.first()?.link.clone();

                Some(IndexEntry {
                    name: sample.name.clone(),
                    url,
                    description: sample.desc.clone(),
                    thumb: thumbnail(site_dir, &sample.path),
                    langs,
                })
            })
            .collect()
    }
}

/// `thumb/<path>.png` when the site has it, otherwise the default thumbnail.
pub fn thumbnail(site_dir: &Path, sample_path: &str) -> String {
    let thumb = format!("thumb/{}.png", sample_path.to_lowercase());
    if site_dir.join(&thumb).is_file() {
        thumb
    } else {
        DEFAULT_THUMB.to_string()
    }
}
