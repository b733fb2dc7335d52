use bitflags::bitflags;

bitflags! {
    /// Per-instance lifecycle state. Reset at every insertion, mutated by the
    /// controller as the pass progresses.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct LifecycleFlags: u8 {
        /// Disables the whole protocol while set. Derived from the `locked`
        /// attribute at insertion; cleared by `unlock()`.
        const LOCKED = 1 << 0;
        /// The spawn step ran without the hook signalling failure.
        const SPAWNED = 1 << 1;
        /// The build step ran without the hook signalling failure.
        const BUILT = 1 << 2;
        /// The render pass has finished scheduling (load may still be on the
        /// tick queue — see the controller docs).
        const RENDERED = 1 << 3;
    }
}
