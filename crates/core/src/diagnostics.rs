//! Post-hoc graphics error checks and user-facing failure reporting.

use crate::error::RenderError;
use crate::gpu::Gpu;
use crate::platform::Platform;

/// Queries the error flag once.
///
/// Returns `RenderError::GraphicsApi` carrying the code and `message` if the
/// flag was set. Does not alert; see [`report_gl_error`].
pub fn check_gl_error<G: Gpu + ?Sized>(
    gl: &G,
    message: Option<&str>,
) -> Result<(), RenderError> {
    match gl.get_error() {
        glow::NO_ERROR => Ok(()),
        code => Err(RenderError::GraphicsApi {
            code,
            context: message.map(str::to_string),
        }),
    }
}

/// Queries the error flag and alerts the user if it was set.
///
/// The error is still returned so the caller can decide whether to stop.
pub fn report_gl_error<P: Platform + ?Sized>(
    platform: &P,
    gl: &P::Gpu,
    message: Option<&str>,
) -> Result<(), RenderError> {
    check_gl_error(gl, message).inspect_err(|e| report_error(platform, e))
}

/// Logs `error` (at `error` level if it is fatal, `warn` otherwise) and
/// alerts it.
pub fn report_error<P: Platform + ?Sized>(platform: &P, error: &RenderError) {
    if error.is_fatal() {
        log::error!("{error}");
    } else {
        log::warn!("{}", error.to_string().replace('\n', ": "));
    }
    platform.alert(&error.to_string());
}
