/// Classification for retry policy.
///
/// | Class | Re-issue the fetch? | Eligible for cache fallback? |
/// |-------|---------------------|------------------------------|
/// | `Retry` | Yes, while the screen has retries left | Yes, once retries run out |
/// | `Never` | No | No |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryClass {
    /// Transient source failure. Re-issued immediately, without backoff.
    Retry,

    /// Terminal - retrying or falling back won't help.
    Never,
}
