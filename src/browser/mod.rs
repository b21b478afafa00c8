//! Browser session management and page interaction
//!
//! A thin layer over the Chrome DevTools Protocol (chromiumoxide): one
//! browser process, one page. Locators are resolved fresh against the live
//! DOM for every step.

pub mod actions;
mod locate;
mod session;

pub use locate::resolve;
pub use session::BrowserSession;
