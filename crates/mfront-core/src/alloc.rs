//! Abstract allocation-policy interfaces.
//!
//! The concrete allocator lives in `mfront-mem`. We keep only the traits here
//! so configuration and tests can name a policy without pulling in the
//! allocator itself.

/// Decides, per request, whether an allocation must be refused.
///
/// Selected when the allocator is constructed. Tests use it to drive
/// out-of-memory recovery paths deterministically without exhausting real
/// memory. `request` is the 1-based sequence number of the allocation request
/// on the allocator that owns the policy.
pub trait FaultPolicy: Send + Sync {
    fn should_fail(&self, request: u64) -> bool;

    /// Optional debug name for tracing.
    fn name(&self) -> &'static str {
        "fault-policy"
    }
}

/// Policy that never injects a failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverFail;

impl FaultPolicy for NeverFail {
    fn should_fail(&self, _request: u64) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "never-fail"
    }
}
