// src/services/pubmed.rs

//! PubMed E-utilities client.
//!
//! Searches topic identifiers via `esearch` and fetches article details in
//! one batched `efetch` request.

use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{Article, Config};
use crate::utils::http;

/// Default base URL for the NCBI E-utilities endpoints.
pub const EUTILS_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";

/// Response envelope for the esearch endpoint.
#[derive(Debug, Default, Deserialize)]
struct EsearchResponse {
    #[serde(default)]
    esearchresult: EsearchResult,
}

#[derive(Debug, Default, Deserialize)]
struct EsearchResult {
    #[serde(default)]
    idlist: Vec<String>,
}

/// Service for querying PubMed.
pub struct PubmedClient {
    client: reqwest::Client,
    base_url: String,
}

impl PubmedClient {
    /// Create a client against the default NCBI endpoints.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, EUTILS_BASE_URL)
    }

    /// Create a client against a non-default base URL (used by tests).
    pub fn with_base_url(config: &Config, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client: http::create_client(config)?,
            base_url: base_url.into(),
        })
    }

    /// Search PubMed for identifiers matching a topic, capped at
    /// `max_results`, in upstream ranking order.
    pub async fn search(&self, topic: &str, max_results: u32) -> Result<Vec<String>> {
        let url = format!("{}/esearch.fcgi", self.base_url);
        let retmax = max_results.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("db", "pubmed"),
                ("term", topic),
                ("retmax", retmax.as_str()),
                ("retmode", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::search(topic, response.status().as_u16()));
        }

        let data: EsearchResponse = response.json().await?;
        Ok(data.esearchresult.idlist)
    }

    /// Fetch article details for a batch of identifiers in a single request.
    pub async fn fetch_details(&self, pmids: &[String]) -> Result<Vec<Article>> {
        if pmids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/efetch.fcgi", self.base_url);
        let ids = pmids.join(",");
        let response = self
            .client
            .get(&url)
            .query(&[
                ("db", "pubmed"),
                ("id", ids.as_str()),
                ("retmode", "xml"),
            ])
            .send()
            .await
            .map_err(|e| AppError::fetch(format!("efetch request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::fetch(format!(
                "failed to fetch details for {} PMIDs (status {})",
                pmids.len(),
                response.status().as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::fetch(format!("unreadable efetch body: {e}")))?;
        Ok(parse_articles(&body))
    }
}

/// Selectors for the efetch article markup.
///
/// Element names are matched lowercase; the parser case-folds tags like
/// `PubmedArticle` while building the tree.
struct ArticleSelectors {
    article: Selector,
    pmid: Selector,
    title: Selector,
    abstract_text: Selector,
    year: Selector,
    author: Selector,
    last_name: Selector,
    fore_name: Selector,
}

impl ArticleSelectors {
    fn new() -> Self {
        Self {
            article: parse_selector("pubmedarticle"),
            pmid: parse_selector("pmid"),
            title: parse_selector("articletitle"),
            abstract_text: parse_selector("abstract abstracttext"),
            year: parse_selector("pubdate year"),
            author: parse_selector("authorlist author"),
            last_name: parse_selector("lastname"),
            fore_name: parse_selector("forename"),
        }
    }
}

fn parse_selector(s: &str) -> Selector {
    Selector::parse(s).expect("static selector must parse")
}

/// Parse efetch markup into articles, best-effort per record.
///
/// A record missing optional fields still yields a partial `Article`; a
/// record without a PMID is skipped. Author entries where both name parts
/// are empty are dropped.
fn parse_articles(markup: &str) -> Vec<Article> {
    let document = Html::parse_document(markup);
    let selectors = ArticleSelectors::new();

    let mut articles = Vec::new();
    for record in document.select(&selectors.article) {
        let Some(pmid) = select_text(&record, &selectors.pmid) else {
            continue;
        };

        let authors = record
            .select(&selectors.author)
            .filter_map(|author| {
                let fore = select_text(&author, &selectors.fore_name).unwrap_or_default();
                let last = select_text(&author, &selectors.last_name).unwrap_or_default();
                let name = format!("{fore} {last}").trim().to_string();
                (!name.is_empty()).then_some(name)
            })
            .collect();

        articles.push(Article {
            pmid,
            title: select_text(&record, &selectors.title),
            abstract_text: select_text(&record, &selectors.abstract_text),
            year: select_text(&record, &selectors.year),
            authors,
        });
    }
    articles
}

/// First matching element's text, trimmed; `None` when missing or empty.
fn select_text(node: &ElementRef, selector: &Selector) -> Option<String> {
    node.select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| !text.is_empty())
}
