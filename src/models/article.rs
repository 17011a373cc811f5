//! Article data structure.

use serde::{Deserialize, Serialize};

/// A publication fetched from PubMed.
///
/// Immutable once fetched. Upstream records may omit any of the optional
/// fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Article {
    /// PubMed identifier
    pub pmid: String,

    /// Article title
    #[serde(default)]
    pub title: Option<String>,

    /// Abstract text
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,

    /// Publication year
    #[serde(default)]
    pub year: Option<String>,

    /// Author display names, in publication order
    #[serde(default)]
    pub authors: Vec<String>,
}

impl Article {
    /// Canonical detail-page URL for this article.
    pub fn detail_url(&self) -> String {
        format!("https://pubmed.ncbi.nlm.nih.gov/{}/", self.pmid)
    }

    /// Author display line: the first four names joined by ", ", with an
    /// ", et al." suffix when more exist.
    pub fn author_line(&self) -> String {
        if self.authors.len() > 4 {
            format!("{}, et al.", self.authors[..4].join(", "))
        } else {
            self.authors.join(", ")
        }
    }
}
