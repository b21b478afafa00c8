//! Page interactions
//!
//! Each action resolves its locator fresh against the live DOM, then drives
//! the element through CDP. Resolution is retried while the page settles
//! (bounded by the action timeout); the interaction itself is not retried.

use std::future::Future;
use std::time::Duration;

use chromiumoxide::element::Element;
use chromiumoxide::Page;

use crate::common::config::Timeouts;
use crate::common::{Error, Result};
use crate::scenario::{Locator, SelectOption};

use super::locate;

/// How often an unresolved locator is retried while the page settles
const RESOLVE_POLL: Duration = Duration::from_millis(250);

/// Pause after a click so any triggered navigation or re-render can start
const CLICK_SETTLE: Duration = Duration::from_millis(100);

/// Clears an input the way a user would expect: value reset plus an input
/// event so framework listeners fire
const CLEAR_INPUT_JS: &str =
    "function() { this.value = ''; this.dispatchEvent(new Event('input', { bubbles: true })); }";

/// Click an element
pub async fn click(page: &Page, locator: &Locator, timeouts: &Timeouts) -> Result<()> {
    let element = resolve_settled(page, locator, timeouts).await?;
    with_timeout("click", timeouts.action_secs, async {
        element.click().await?;
        Ok(())
    })
    .await?;
    tokio::time::sleep(CLICK_SETTLE).await;
    Ok(())
}

/// Clear an input and type a value into it
pub async fn fill(page: &Page, locator: &Locator, value: &str, timeouts: &Timeouts) -> Result<()> {
    let element = resolve_settled(page, locator, timeouts).await?;
    with_timeout("fill", timeouts.action_secs, async {
        element.click().await?;
        element.call_js_fn(CLEAR_INPUT_JS, false).await?;
        element.type_str(value).await?;
        Ok(())
    })
    .await
}

/// Choose an option in a select element and fire input/change events
pub async fn select(
    page: &Page,
    locator: &Locator,
    option: &SelectOption,
    timeouts: &Timeouts,
) -> Result<()> {
    let element = resolve_settled(page, locator, timeouts).await?;
    let js = select_js(option);

    let ret = with_timeout("select", timeouts.action_secs, async {
        Ok(element.call_js_fn(js, false).await?)
    })
    .await?;

    match ret.result.value {
        Some(serde_json::Value::Bool(true)) => Ok(()),
        _ => Err(Error::OptionNotFound {
            locator: locator.to_string(),
            option: option.to_string(),
        }),
    }
}

/// Resolve a locator, retrying while the page settles
///
/// Ambiguity fails immediately; "not found" is retried until the deadline
/// since the element may simply not have rendered yet.
async fn resolve_settled(
    page: &Page,
    locator: &Locator,
    timeouts: &Timeouts,
) -> Result<Element> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(timeouts.action_secs);
    loop {
        match locate::resolve(page, locator).await {
            Ok(element) => return Ok(element),
            Err(e @ Error::LocatorAmbiguous { .. }) => return Err(e),
            Err(e) => {
                if tokio::time::Instant::now() + RESOLVE_POLL >= deadline {
                    return Err(e);
                }
                tokio::time::sleep(RESOLVE_POLL).await;
            }
        }
    }
}

async fn with_timeout<T, F>(action: &str, secs: u64, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match tokio::time::timeout(Duration::from_secs(secs), fut).await {
        Ok(result) => result,
        Err(_) => Err(Error::ActionTimeout {
            action: action.to_string(),
            secs,
        }),
    }
}

/// Build the in-page function that applies a select option
///
/// Returns `true` from the page when an option matched, `false` otherwise.
fn select_js(option: &SelectOption) -> String {
    match option {
        SelectOption::Index { index } => format!(
            "function() {{ \
             if (this.options.length <= {index}) {{ return false; }} \
             this.selectedIndex = {index}; \
             this.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             this.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true; }}"
        ),
        SelectOption::Value { value } => select_scan_js("this.options[i].value === wanted", value),
        SelectOption::Label { label } => select_scan_js(
            "(this.options[i].label || '').trim() === wanted \
             || (this.options[i].textContent || '').trim() === wanted",
            label,
        ),
    }
}

/// Shared scan loop for value- and label-based option matching
fn select_scan_js(predicate: &str, wanted: &str) -> String {
    // serde_json produces a quoted, escaped JS string literal
    let literal = serde_json::to_string(wanted).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        "function() {{ \
         const wanted = {literal}; \
         for (let i = 0; i < this.options.length; i++) {{ \
         if ({predicate}) {{ \
         this.selectedIndex = i; \
         this.dispatchEvent(new Event('input', {{ bubbles: true }})); \
         this.dispatchEvent(new Event('change', {{ bubbles: true }})); \
         return true; }} }} \
         return false; }}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_js_by_index_guards_range() {
        let js = select_js(&SelectOption::Index { index: 2 });
        assert!(js.contains("this.options.length <= 2"));
        assert!(js.contains("this.selectedIndex = 2"));
        assert!(js.contains("new Event('change'"));
    }

    #[test]
    fn test_select_js_by_value_embeds_escaped_literal() {
        let js = select_js(&SelectOption::Value {
            value: "say \"hi\"".to_string(),
        });
        assert!(js.contains(r#"const wanted = "say \"hi\"";"#));
        assert!(js.contains("this.options[i].value === wanted"));
    }

    #[test]
    fn test_select_js_by_label_compares_text_content() {
        let js = select_js(&SelectOption::Label {
            label: "Striker".to_string(),
        });
        assert!(js.contains(r#"const wanted = "Striker";"#));
        assert!(js.contains("textContent"));
    }
}
