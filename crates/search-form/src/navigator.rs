//! Hand-off of the finished search URL to the host router.

/// Client-side navigation target.
pub trait Navigator {
    /// Navigate to `url` (path plus optional query).
    fn push(&self, url: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn push(&self, url: &str) {
        self(url)
    }
}
