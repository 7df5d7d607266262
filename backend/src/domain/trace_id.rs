//! Correlation identifier carried by every request and every error body.
//!
//! The identifier lives in a Tokio task-local for the duration of a request,
//! so services and the error envelope read it without it being passed around.
//! Task-locals do not follow `tokio::spawn` or `spawn_blocking`; wrap such
//! work in [`TraceId::scope`].

use std::future::Future;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use storefront::domain::TraceId;
///
/// async fn place_order() {
///     if let Some(id) = TraceId::current() {
///         tracing::info!(trace_id = %id, "placing order");
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(pub(crate) Uuid);

impl TraceId {
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Accept an identifier supplied by an upstream proxy or client.
    ///
    /// Surrounding whitespace is ignored. Anything that is not a UUID, and
    /// the nil UUID, is refused so the caller mints a fresh identifier.
    #[must_use]
    pub fn from_inbound(raw: &str) -> Option<Self> {
        let uuid = Uuid::parse_str(raw.trim()).ok()?;
        (!uuid.is_nil()).then_some(Self(uuid))
    }

    /// The identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
