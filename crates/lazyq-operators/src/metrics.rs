//! Tracing hooks for buffering stages.
//!
//! No subscriber is installed here; wire one up in the binary layer.

/// A buffering stage finished draining its upstream.
pub(crate) fn materialized(operator: &'static str, elements: usize) {
    tracing::trace!(operator, elements, "materialized upstream");
}

/// A buffering stage gave up because upstream failed or the budget ran out.
pub(crate) fn aborted(
    operator: &'static str,
    buffered: usize,
    error: &lazyq_core::error::SeqError,
) {
    tracing::debug!(operator, buffered, %error, "materialization aborted");
}
