/// Handles an invariant violation that must be unreachable in correct
/// code: if it is ever reached the process terminates rather than risk
/// continuing with corrupted audit state. A plain `panic!` is not enough —
/// a caller could catch the unwind — so this logs and then aborts the
/// process directly.
pub fn fatal_invariant(what: &'static str) -> ! {
    tracing::error!(what, "fatal invariant violation, aborting process");
    std::process::abort()
}
