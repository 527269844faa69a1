//! Math typesetting hook

use futures_util::future::BoxFuture;

/// Re-renders math in freshly loaded content.
///
/// The returned future runs detached from the load that triggered it; the
/// loader neither awaits it nor sees its failures.
pub trait Typesetter: Send + Sync {
    fn typeset(&self, markup: String) -> BoxFuture<'static, ()>;
}
