use crate::{Result, SeqRange};

/// Opcode selecting which tier of the sequence space a query allocates from.
///
/// These are the only two operations this allocator ever issues. The wire
/// values are part of the controller protocol contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqOp {
    /// Ask the controller to grant a new super-sequence.
    AllocSuper,
    /// Ask the controller to grant a new meta-sequence, drawn from a
    /// super-sequence it holds.
    AllocMeta,
}

impl SeqOp {
    /// The opcode's value in the request message.
    pub const fn as_u32(self) -> u32 {
        match self {
            SeqOp::AllocSuper => 0,
            SeqOp::AllocMeta => 1,
        }
    }
}

/// The transport collaborator carrying sequence queries to the controller.
///
/// Implementations own request construction, queuing, retries and byte-order
/// handling; this crate only selects the opcode and interprets the result.
/// The contract is synchronous-blocking: `query` returns once a response
/// arrived or the transport gave up.
///
/// Return values:
/// - `Ok(Some(range))` — the controller granted `range`;
/// - `Ok(None)` — a response arrived but carried no decodable range body
///   (mapped to [`Error::InvalidRange`](crate::Error::InvalidRange) by the
///   caller);
/// - `Err(e)` — the transport failed; the error propagates unchanged.
///
/// Implementations are not required to be internally synchronized: the
/// manager serializes all queries under its own lock, so at most one query
/// per manager is in flight at a time.
pub trait SeqRpc {
    /// Performs one blocking request/response round-trip for `op`.
    fn query(&self, op: SeqOp) -> Result<Option<SeqRange>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcodes_keep_their_wire_values() {
        assert_eq!(SeqOp::AllocSuper.as_u32(), 0);
        assert_eq!(SeqOp::AllocMeta.as_u32(), 1);
    }
}
