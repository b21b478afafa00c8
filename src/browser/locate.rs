//! Locator resolution
//!
//! Resolves a declarative locator to exactly one live element. Zero matches
//! and ambiguous matches are both hard errors; nothing is retried here.

use chromiumoxide::element::Element;
use chromiumoxide::Page;

use crate::common::{Error, Result};
use crate::scenario::Locator;

/// Resolve a locator against the live page
pub async fn resolve(page: &Page, locator: &Locator) -> Result<Element> {
    match locator {
        Locator::Css { selector } => single_match(page, selector, locator).await,
        Locator::Placeholder { text } => {
            single_match(page, &placeholder_selector(text), locator).await
        }
        Locator::Nth { kind, index } => {
            let elements = find_all(page, kind, locator).await?;
            let count = elements.len();
            elements.into_iter().nth(*index).ok_or_else(|| {
                Error::LocatorNotFound(format!("{locator} ({count} candidates)"))
            })
        }
        Locator::Text { kind, text, index } => {
            resolve_by_text(page, kind, text, *index, locator).await
        }
    }
}

/// Resolve a text locator: exact (trimmed) matches beat substring matches
async fn resolve_by_text(
    page: &Page,
    kind: &str,
    text: &str,
    index: Option<usize>,
    locator: &Locator,
) -> Result<Element> {
    let elements = find_all(page, kind, locator).await?;

    let mut exact = Vec::new();
    let mut partial = Vec::new();
    for element in elements {
        let visible = match element.inner_text().await {
            Ok(Some(t)) => t,
            _ => continue,
        };
        let visible = visible.trim();
        if visible == text {
            exact.push(element);
        } else if visible.contains(text) {
            partial.push(element);
        }
    }

    let mut matched = if exact.is_empty() { partial } else { exact };

    if let Some(i) = index {
        let count = matched.len();
        return matched.into_iter().nth(i).ok_or_else(|| {
            Error::LocatorNotFound(format!("{locator} ({count} matches)"))
        });
    }

    match matched.len() {
        0 => Err(Error::LocatorNotFound(locator.to_string())),
        1 => Ok(matched.remove(0)),
        count => Err(Error::LocatorAmbiguous {
            locator: locator.to_string(),
            count,
        }),
    }
}

async fn find_all(page: &Page, selector: &str, locator: &Locator) -> Result<Vec<Element>> {
    page.find_elements(selector)
        .await
        .map_err(|_| Error::LocatorNotFound(locator.to_string()))
}

async fn single_match(page: &Page, selector: &str, locator: &Locator) -> Result<Element> {
    let mut elements = find_all(page, selector, locator).await?;
    match elements.len() {
        0 => Err(Error::LocatorNotFound(locator.to_string())),
        1 => Ok(elements.remove(0)),
        count => Err(Error::LocatorAmbiguous {
            locator: locator.to_string(),
            count,
        }),
    }
}

/// CSS selector for an input with an exact placeholder attribute
pub(crate) fn placeholder_selector(text: &str) -> String {
    format!("input[placeholder={}]", css_string(text))
}

/// Quote a string for use inside a CSS attribute selector
fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
