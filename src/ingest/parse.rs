// src/ingest/parse.rs
//! RSS 2.0 / Atom parsing into `ParsedFeed`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use metrics::histogram;
use quick_xml::de::{DeError, Deserializer, EntityResolver};
use quick_xml::escape::resolve_html5_entity;
use quick_xml::events::{BytesText, Event};
use quick_xml::Reader;
use serde::Deserialize;
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::{OffsetDateTime, UtcOffset};

use crate::ingest::types::{FeedEntry, ParsedFeed};

/* ---------- RSS 2.0 ---------- */

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    title: Option<String>,
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    // `<link>` and `<atom:link href=".."/>` share a local name
    #[serde(rename = "link", default)]
    link: Vec<TextNode>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
}

/* ---------- Atom ---------- */

#[derive(Debug, Deserialize)]
struct AtomFeed {
    title: Option<TextNode>,
    #[serde(rename = "entry", default)]
    entry: Vec<AtomEntry>,
}

#[derive(Debug, Deserialize)]
struct AtomEntry {
    title: Option<TextNode>,
    #[serde(rename = "link", default)]
    link: Vec<AtomLink>,
    summary: Option<TextNode>,
    content: Option<TextNode>,
    published: Option<String>,
    updated: Option<String>,
}

// Text that may carry attributes (`type`, `href`, ...), so read `$text` explicitly.
#[derive(Debug, Deserialize)]
struct TextNode {
    #[serde(rename = "$text", default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct AtomLink {
    #[serde(rename = "@href")]
    href: Option<String>,
    #[serde(rename = "@rel")]
    rel: Option<String>,
}

/// Parse a feed body. RSS and Atom are told apart by the root element.
pub fn parse_feed(body: &str) -> Result<ParsedFeed> {
    let t0 = std::time::Instant::now();

    let feed = match root_element(body).as_deref() {
        Some("rss") => {
            let rss: Rss = from_feed_str(body).context("parsing rss xml")?;
            from_rss(rss)
        }
        Some("feed") => {
            let atom: AtomFeed = from_feed_str(body).context("parsing atom xml")?;
            from_atom(atom)
        }
        Some(other) => bail!("unsupported feed root element <{other}>"),
        None => bail!("empty or malformed feed document"),
    };

    histogram!("news_parse_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    Ok(feed)
}

/// HTML named entities (`&ccedil;`, `&nbsp;`, ...) show up in feeds without any DTD.
#[derive(Debug, Default, Clone, Copy)]
struct Html5Entities;

impl EntityResolver for Html5Entities {
    type Error = std::convert::Infallible;

    fn capture(&mut self, _doctype: BytesText) -> Result<(), Self::Error> {
        Ok(())
    }

    fn resolve(&self, entity: &str) -> Option<&str> {
        resolve_html5_entity(entity)
    }
}

fn from_feed_str<'de, T: Deserialize<'de>>(xml: &'de str) -> Result<T, DeError> {
    let mut de = Deserializer::from_str_with_resolver(xml, Html5Entities);
    T::deserialize(&mut de)
}

fn from_rss(rss: Rss) -> ParsedFeed {
    let entries = rss
        .channel
        .item
        .into_iter()
        .map(|it| FeedEntry {
            title: it.title.unwrap_or_default(),
            summary: it.description,
            link: it
                .link
                .into_iter()
                .map(|l| l.value)
                .find(|l| !l.trim().is_empty()),
            published: it.pub_date.as_deref().and_then(parse_published),
        })
        .collect();
    ParsedFeed {
        title: rss.channel.title,
        entries,
    }
}

fn from_atom(atom: AtomFeed) -> ParsedFeed {
    let entries = atom
        .entry
        .into_iter()
        .map(|e| {
            let link = pick_atom_link(&e.link);
            FeedEntry {
                title: e.title.map(|t| t.value).unwrap_or_default(),
                summary: e.summary.or(e.content).map(|t| t.value),
                link,
                published: e
                    .published
                    .as_deref()
                    .or(e.updated.as_deref())
                    .and_then(parse_published),
            }
        })
        .collect();
    ParsedFeed {
        title: atom.title.map(|t| t.value),
        entries,
    }
}

/// Prefer `rel="alternate"` (or no rel), else the first link with an href.
fn pick_atom_link(links: &[AtomLink]) -> Option<String> {
    links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")) && l.href.is_some())
        .or_else(|| links.iter().find(|l| l.href.is_some()))
        .and_then(|l| l.href.clone())
}

/// Local name of the first element in the document.
fn root_element(xml: &str) -> Option<String> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                return Some(String::from_utf8_lossy(e.local_name().as_ref()).into_owned());
            }
            Ok(Event::Eof) | Err(_) => return None,
            Ok(_) => {}
        }
    }
}

/// Publication time as a UTC instant. RFC 2822 (RSS) and RFC 3339 (Atom) are tried
/// strictly first; chrono's RFC 2822 reader covers `GMT`/single-digit-day variants.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let strict = OffsetDateTime::parse(raw, &Rfc2822)
        .or_else(|_| OffsetDateTime::parse(raw, &Rfc3339))
        .ok()
        .map(|dt| dt.to_offset(UtcOffset::UTC))
        .and_then(|dt| DateTime::<Utc>::from_timestamp(dt.unix_timestamp(), dt.nanosecond()));
    strict.or_else(|| {
        DateTime::parse_from_rfc2822(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    })
}
