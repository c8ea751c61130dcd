// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2026 Aleksandr Ptakhin

//! Structural extraction: anchor targets, head metadata, and the visible
//! text used by the spelling pipeline. Parsing is lenient throughout;
//! malformed markup degrades to empty results instead of failing the
//! request.

use crate::models::analysis::{MetaTag, PageExtract};
use scraper::{Html, Selector};

/// Element types whose text counts as human-readable page content.
/// Script, style, and attribute content never qualify.
const VISIBLE_TEXT_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, p, li, span, a";

/// Pull links, metadata, and visible text out of a page in one parse.
pub fn extract_page(html: &str) -> PageExtract {
    let document = Html::parse_document(html);

    PageExtract {
        raw_links: extract_raw_links(&document),
        title: extract_title(&document),
        meta_tags: extract_meta_tags(&document),
        visible_text: extract_visible_text(&document),
    }
}

/// Every anchor href in document order. Duplicates are kept; each
/// occurrence is probed independently later.
fn extract_raw_links(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
        .collect()
}

fn extract_title(document: &Html) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let element = document.select(&selector).next()?;
    let title = element.text().collect::<String>().trim().to_string();
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Meta tags carrying both a name and a content attribute, document order.
fn extract_meta_tags(document: &Html) -> Vec<MetaTag> {
    let Ok(selector) = Selector::parse("meta") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| {
            let tag = element.value();
            match (tag.attr("name"), tag.attr("content")) {
                (Some(name), Some(content)) => Some(MetaTag {
                    name: name.to_string(),
                    content: content.to_string(),
                }),
                _ => None,
            }
        })
        .collect()
}

/// Text content of the readable elements under `<body>`, document order,
/// joined with single spaces and with whitespace runs collapsed.
fn extract_visible_text(document: &Html) -> String {
    let Ok(body) = Selector::parse("body") else {
        return String::new();
    };
    let Ok(readable) = Selector::parse(VISIBLE_TEXT_SELECTOR) else {
        return String::new();
    };

    let mut pieces: Vec<String> = Vec::new();
    for body_element in document.select(&body) {
        for element in body_element.select(&readable) {
            pieces.push(element.text().collect::<String>());
        }
    }

    pieces
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
