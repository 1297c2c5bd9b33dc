/// What the frame loop should do after a failed swapchain acquire.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was reconfigured in place; the next frame should work.
    Reconfigured,
    /// Transient failure, drop this frame and carry on.
    SkipFrame,
    /// Unrecoverable (out of memory); shut the loop down.
    Fatal,
}
