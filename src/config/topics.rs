// src/config/topics.rs
//! Topic configuration: keywords, publisher allowlist, search queries and feed URLs.
//!
//! Loading order:
//! 1) $TOPICS_CONFIG_PATH (must exist when set)
//! 2) config/topics.toml
//! 3) config/topics.json
//! 4) built-in seed (`royalties`, `fpm`)

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_TOPICS_CONFIG_PATH: &str = "TOPICS_CONFIG_PATH";
pub const DEFAULT_MIN_RELEVANCE: u32 = 2;
pub const DEFAULT_MAX_DAYS: u32 = 90;

fn default_min_relevance() -> u32 {
    DEFAULT_MIN_RELEVANCE
}
fn default_max_days() -> u32 {
    DEFAULT_MAX_DAYS
}

/// One named filtering configuration. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicConfig {
    /// URL key, e.g. "royalties".
    pub slug: String,
    /// Human label, returned as the response `type`.
    pub label: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Allowlist; an entry matches when it is a substring of the publisher.
    #[serde(default)]
    pub publishers: Vec<String>,
    /// Search queries for the Google and Bing methods, fetched in order.
    #[serde(default)]
    pub queries: Vec<String>,
    /// Direct feed URLs for the RSS method, fetched in order.
    #[serde(default)]
    pub feeds: Vec<String>,
    #[serde(default = "default_min_relevance")]
    pub min_relevance: u32,
    /// Upper bound for the `days` request parameter.
    #[serde(default = "default_max_days")]
    pub max_days: u32,
}

impl TopicConfig {
    /// Trim, drop blanks, dedupe lists (order kept: first query wins on dedupe).
    fn sanitized(mut self) -> Self {
        self.slug = self.slug.trim().to_lowercase();
        self.label = self.label.trim().to_string();
        if self.label.is_empty() {
            self.label = self.slug.clone();
        }
        self.keywords = clean_list(self.keywords);
        self.publishers = clean_list(self.publishers);
        self.queries = clean_list(self.queries);
        self.feeds = clean_list(self.feeds);
        self
    }
}

/// The set of topics served by the API.
#[derive(Debug, Clone)]
pub struct TopicRegistry {
    topics: Vec<TopicConfig>,
}

impl TopicRegistry {
    pub fn new(topics: Vec<TopicConfig>) -> Result<Self> {
        let topics: Vec<TopicConfig> = topics.into_iter().map(TopicConfig::sanitized).collect();
        if topics.is_empty() {
            bail!("no topics configured");
        }
        let mut slugs = HashSet::new();
        for t in &topics {
            if t.slug.is_empty() {
                bail!("topic with empty slug");
            }
            if !slugs.insert(t.slug.clone()) {
                bail!("duplicate topic slug `{}`", t.slug);
            }
            if t.max_days == 0 {
                bail!("topic `{}`: max_days must be >= 1", t.slug);
            }
        }
        Ok(Self { topics })
    }

    /// Case-insensitive lookup by slug.
    pub fn get(&self, slug: &str) -> Option<&TopicConfig> {
        let slug = slug.trim();
        self.topics.iter().find(|t| t.slug.eq_ignore_ascii_case(slug))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopicConfig> {
        self.topics.iter()
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Built-in topics used when no config file is present.
    pub fn builtin() -> Self {
        Self {
            topics: default_seed()
                .into_iter()
                .map(TopicConfig::sanitized)
                .collect(),
        }
    }
}

#[derive(Deserialize)]
struct TopicsFile {
    topics: Vec<TopicConfig>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonTopics {
    Wrapped(TopicsFile),
    Bare(Vec<TopicConfig>),
}

/// Load topics from an explicit path. Supports TOML or JSON formats.
pub fn load_topics_from(path: &Path) -> Result<TopicRegistry> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading topics from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let topics = parse_topics(&content, ext.as_str())
        .with_context(|| format!("parsing topics from {}", path.display()))?;
    TopicRegistry::new(topics)
}

/// Load topics using env var + fallbacks (see module docs).
pub fn load_topics_default() -> Result<TopicRegistry> {
    if let Ok(p) = std::env::var(ENV_TOPICS_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_topics_from(&pb);
        } else {
            return Err(anyhow!("TOPICS_CONFIG_PATH points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/topics.toml");
    if toml_p.exists() {
        return load_topics_from(&toml_p);
    }
    let json_p = PathBuf::from("config/topics.json");
    if json_p.exists() {
        return load_topics_from(&json_p);
    }
    Ok(TopicRegistry::builtin())
}

fn parse_topics(s: &str, hint_ext: &str) -> Result<Vec<TopicConfig>> {
    match hint_ext {
        "toml" => parse_toml(s),
        "json" => parse_json(s),
        _ => parse_toml(s).or_else(|_| parse_json(s)),
    }
}

fn parse_toml(s: &str) -> Result<Vec<TopicConfig>> {
    let v: TopicsFile = toml::from_str(s)?;
    Ok(v.topics)
}

fn parse_json(s: &str) -> Result<Vec<TopicConfig>> {
    let v: JsonTopics = serde_json::from_str(s)?;
    Ok(match v {
        JsonTopics::Wrapped(f) => f.topics,
        JsonTopics::Bare(v) => v,
    })
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && seen.insert(t.to_lowercase()) {
            out.push(t.to_string());
        }
    }
    out
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Oil & gas exploration / royalties coverage and municipal transfer (FPM) coverage.
fn default_seed() -> Vec<TopicConfig> {
    let national_press = [
        "Valor Econômico",
        "Reuters",
        "Agência Brasil",
        "g1",
        "Estadão",
        "Folha",
        "O Globo",
        "CNN Brasil",
        "InfoMoney",
    ];

    let mut energy_publishers = strings(&national_press);
    energy_publishers.extend(strings(&[
        "Petrobras",
        "ANP",
        "IBAMA",
        "Portos e Navios",
        "Brasil Energia",
        "Offshore Energy",
        "BNAmericas",
        "Eixos",
        "epbr",
    ]));

    let mut municipal_publishers = strings(&national_press);
    municipal_publishers.extend(strings(&[
        "CNM",
        "Agência Senado",
        "Agência Câmara",
        "Tesouro Nacional",
        "Poder360",
        "Correio Braziliense",
    ]));

    vec![
        TopicConfig {
            slug: "royalties".into(),
            label: "Royalties".into(),
            keywords: strings(&[
                "petróleo",
                "óleo",
                "petrobras",
                "anp",
                "exploração",
                "perfuração",
                "produção",
                "pré-sal",
                "presal",
                "offshore",
                "bacia",
                "campo",
                "plataforma",
                "fpso",
                "contrato",
                "licitação",
                "leilão",
                "royalties",
                "capex",
                "margem equatorial",
                "bacia de campos",
                "bacia de santos",
            ]),
            publishers: energy_publishers,
            queries: strings(&[
                "royalties petróleo",
                "petróleo Brasil",
                "exploração de petróleo Brasil",
                "produção de petróleo Brasil",
                "ANP leilão petróleo",
                "perfuração offshore Brasil",
                "pré-sal produção Brasil",
                "bacia de campos produção",
                "bacia de santos pré-sal",
                "margem equatorial petróleo",
            ]),
            feeds: strings(&[
                "https://agenciabrasil.ebc.com.br/rss/economia/feed.xml",
                "https://g1.globo.com/rss/g1/economia/",
                "https://www.infomoney.com.br/feed/",
                "https://epbr.com.br/feed/",
            ]),
            min_relevance: 2,
            max_days: 90,
        },
        TopicConfig {
            slug: "fpm".into(),
            label: "FPM".into(),
            keywords: strings(&[
                "fpm",
                "fundo de participação dos municípios",
                "fundo de participação",
                "repasse",
                "transferência",
                "municípios",
                "prefeituras",
                "cnm",
                "tesouro nacional",
                "arrecadação",
                "imposto de renda",
                "ipi",
                "decêndio",
            ]),
            publishers: municipal_publishers,
            queries: strings(&[
                "FPM",
                "FPM repasse municípios",
                "Fundo de Participação dos Municípios",
                "repasse FPM prefeituras",
                "FPM decêndio",
                "CNM FPM",
            ]),
            feeds: strings(&[
                "https://agenciabrasil.ebc.com.br/rss/economia/feed.xml",
                "https://www12.senado.leg.br/noticias/feed/todasnoticias/RSS",
                "https://www.poder360.com.br/feed/",
            ]),
            min_relevance: 2,
            max_days: 60,
        },
    ]
}
