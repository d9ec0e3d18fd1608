pub type Result<T> = core::result::Result<T, Error>;

/// All recoverable failures of the sequence allocation path.
///
/// Anything not listed here is a trust violation — a manager used before
/// initialization, or a controller returning a dead or backwards range —
/// and is asserted rather than returned: those states indicate corruption,
/// not a runtime condition the caller could handle.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The transport failed to complete the round-trip to the sequence
    /// controller. The code is the transport's own and passes through this
    /// layer unchanged; retry policy, if any, lives in the transport.
    #[error("transport error {code} reaching the sequence controller")]
    Transport {
        /// Transport-defined failure code.
        code: i32,
    },

    /// The controller replied, but the response carried no decodable range
    /// body. The failed call leaves the manager state untouched.
    #[error("invalid range returned by the sequence controller")]
    InvalidRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_render_their_cause() {
        let msg = Error::Transport { code: -110 }.to_string();
        assert!(msg.contains("-110"));
        assert_eq!(
            Error::InvalidRange.to_string(),
            "invalid range returned by the sequence controller"
        );
    }
}
