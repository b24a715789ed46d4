//! Smooth scrolling for in-page anchor links.

/// What the page should do about an anchor click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorClick {
    /// Default navigation cancelled, smooth scroll requested to the target id.
    Scrolled(String),
    /// Default navigation cancelled, nothing on the page matched the fragment.
    NoTarget,
}

/// The click being handled. Lets the binder cancel the browser's jump to the anchor.
pub trait ClickEvent {
    fn prevent_default(&self);
}

/// Scroll access to the document, so click handling can run without a browser.
pub trait ScrollHost {
    /// Smoothly scrolls the element with `id` so its top lines up with the
    /// viewport top. Returns false when no such element exists.
    fn scroll_to_start(&self, id: &str) -> bool;
}

/// Id referenced by an in-page `href`, without the leading `#`.
pub fn fragment_target(href: &str) -> Option<&str> {
    match href.strip_prefix('#') {
        Some(id) if !id.is_empty() => Some(id),
        _ => None,
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SmoothScroll;

impl SmoothScroll {
    /// Cancels the default navigation of an in-page link, then scrolls to its
    /// target when one exists.
    pub fn handle_click(
        &self,
        href: &str,
        event: &impl ClickEvent,
        host: &impl ScrollHost,
    ) -> AnchorClick {
        event.prevent_default();
        let Some(id) = fragment_target(href) else {
            return AnchorClick::NoTarget;
        };
        if host.scroll_to_start(id) {
            log::debug!("smooth scrolling to #{}", id);
            AnchorClick::Scrolled(id.to_string())
        } else {
            AnchorClick::NoTarget
        }
    }
}
