use crate::{Error, FID_INIT_OID, Fid, Result, SEQ_WIDTH, SeqOp, SeqRange, SeqRpc};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error};


/// Outcome of a successful [`SeqClient::alloc_fid`] call.
///
/// Both variants carry a freshly allocated, sane FID. The distinction is a
/// contract with the caller, not an error: `Restarted` means the manager
/// switched to a new sequence to produce this FID, and the caller must inform
/// the FID-location directory (FLD) that the new sequence is owned by this
/// manager's server before using the FID. Ignoring the signal leaves the FLD
/// stale, so callers must match on it rather than just extracting the FID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FidAllocStatus {
    /// The FID was drawn from the sequence already held by the manager.
    Ready {
        /// The allocated FID.
        fid: Fid,
    },
    /// The FID is the first of a newly drawn sequence; the caller must
    /// update the FLD for `fid.seq`.
    Restarted {
        /// The allocated FID, with `oid == FID_INIT_OID`.
        fid: Fid,
    },
}

impl FidAllocStatus {
    /// The allocated FID, whichever way it was produced.
    pub const fn fid(&self) -> Fid {
        match self {
            Self::Ready { fid } | Self::Restarted { fid } => *fid,
        }
    }

    /// True iff this allocation switched to a new sequence.
    pub const fn is_restarted(&self) -> bool {
        matches!(self, Self::Restarted { .. })
    }
}

/// Manager state guarded by the single allocation lock: the live
/// meta-sequence and the FID cursor drawn from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SeqState {
    range: SeqRange,
    fid: Fid,
}

/// Client-side sequence manager: hands out globally unique, monotonically
/// assigned FIDs, drawing meta-sequences from a remote sequence controller
/// on demand.
///
/// One manager maps 1:1 to one client-to-controller session. It owns one
/// live meta-sequence [`SeqRange`] and one [`Fid`] cursor within it; both
/// start zeroed, so the first allocation always goes remote. All public
/// operations serialize on a single internal lock, which is held across the
/// remote round-trip: at most one query per manager is ever in flight, so
/// two callers can never race into overlapping meta-sequences. Sequence
/// exhaustion is rare relative to per-FID allocation, so the serialization
/// costs little in practice.
///
/// # Example
///
/// ```
/// use seqfid::{SeqClient, SeqOp, SeqRange, SeqRpc};
/// use std::sync::{Arc, Mutex};
///
/// // A controller that grants fixed-size ranges from a counter.
/// struct Controller(Mutex<u64>);
/// impl SeqRpc for Controller {
///     fn query(&self, _op: SeqOp) -> seqfid::Result<Option<SeqRange>> {
///         let mut next = self.0.lock().unwrap();
///         let start = *next;
///         *next += 0x400;
///         Ok(Some(SeqRange::new(start, start + 0x400)))
///     }
/// }
///
/// let seq = SeqClient::new(Arc::new(Controller(Mutex::new(0x200))), 0);
/// let status = seq.alloc_fid()?;
/// assert!(status.is_restarted()); // first FID always draws a sequence
/// assert_eq!(status.fid().seq, 0x200);
/// assert!(!seq.alloc_fid()?.is_restarted());
/// # Ok::<(), seqfid::Error>(())
/// ```
pub struct SeqClient<T> {
    /// Shared handle to the controller connection. Held for the manager's
    /// lifetime; queries only, never mutated.
    exp: Arc<T>,
    /// Caller-supplied flags recorded at init.
    flags: u32,
    /// Per-sequence object-id width; the FID cursor switches sequences once
    /// `oid >= width`.
    width: u64,
    state: Mutex<SeqState>,
}

impl<T: SeqRpc> SeqClient<T> {
    /// Binds a new manager to a controller connection, with the default
    /// sequence width [`SEQ_WIDTH`].
    ///
    /// The range and FID cursor start zeroed; nothing goes remote until the
    /// first allocation.
    pub fn new(exp: Arc<T>, flags: u32) -> Self {
        Self::with_width(exp, flags, SEQ_WIDTH)
    }

    /// Like [`Self::new`], but with an explicit per-sequence width.
    ///
    /// With the `oid >= width` rollover policy, a width-`W` sequence yields
    /// oids `FID_INIT_OID..=W` before switching.
    ///
    /// # Panics
    /// Panics if `width` is zero (a sequence must hold at least one oid) or
    /// exceeds [`SEQ_WIDTH`], the largest width the `u32` oid cursor can
    /// honor without overflowing.
    pub fn with_width(exp: Arc<T>, flags: u32, width: u64) -> Self {
        assert!(width > 0, "sequence width must be non-zero");
        assert!(
            width <= SEQ_WIDTH,
            "sequence width {width:#x} exceeds the oid cursor"
        );
        debug!(flags, width, "client sequence manager initialized");
        Self {
            exp,
            flags,
            width,
            state: Mutex::new(SeqState {
                range: SeqRange::zeroed(),
                fid: Fid::zeroed(),
            }),
        }
    }

    /// Flags the manager was initialized with.
    pub const fn flags(&self) -> u32 {
        self.flags
    }

    /// Releases the manager and its reference to the controller connection.
    ///
    /// The connection itself is owned by the surrounding session and freed
    /// once all references are gone. Dropping the manager is equivalent.
    pub fn fini(self) {
        drop(self);
    }

    /// One blocking round-trip to the controller. Callers hold the manager
    /// lock, so at most one query per manager is outstanding.
    ///
    /// The controller is trusted never to grant a dead or backwards range;
    /// either is corruption and asserts rather than returns.
    fn query(&self, op: SeqOp) -> Result<SeqRange> {
        let range = match self.exp.query(op) {
            Ok(Some(range)) => range,
            Ok(None) => {
                error!(?op, "invalid range returned");
                return Err(Error::InvalidRange);
            }
            Err(e) => return Err(e),
        };
        assert!(range.is_sane(), "controller granted insane range {range}");
        assert!(
            !range.is_exhausted(),
            "controller granted exhausted range {range}"
        );
        Ok(range)
    }

    fn alloc_meta_locked(&self, st: &mut SeqState) -> Result<()> {
        let range = self.query(SeqOp::AllocMeta)?;
        st.range = range;
        debug!(%range, "allocated meta-sequence");
        Ok(())
    }

    /// Asks the controller for a new super-sequence and installs it as the
    /// current range. Never called implicitly; callers use this to seed or
    /// forcibly refresh the top-level range. The FID cursor is untouched.
    pub fn alloc_super(&self) -> Result<()> {
        let mut st = self.state.lock();
        let range = self.query(SeqOp::AllocSuper)?;
        st.range = range;
        debug!(%range, "allocated super-sequence");
        Ok(())
    }

    /// Asks the controller for a new meta-sequence and installs it as the
    /// current range. This is the refresh path [`Self::alloc_seq`] takes
    /// automatically on exhaustion.
    pub fn alloc_meta(&self) -> Result<()> {
        let mut st = self.state.lock();
        self.alloc_meta_locked(&mut st)
    }

    fn alloc_seq_locked(&self, st: &mut SeqState) -> Result<u64> {
        assert!(
            st.range.is_sane(),
            "sequence manager range is insane {}",
            st.range
        );

        // Draw from the current meta-sequence while it has free numbers;
        // refresh it remotely only once it runs dry. On a failed refresh
        // nothing is allocated and the range is left as it was.
        if st.range.space() == 0 {
            if let Err(e) = self.alloc_meta_locked(st) {
                error!(%e, "can't allocate new meta-sequence");
                return Err(e);
            }
        }

        let seqnr = st.range.start;
        st.range.start += 1;

        debug!(seqnr, "allocated sequence");
        Ok(seqnr)
    }

    /// Allocates the next sequence number, refreshing the meta-sequence from
    /// the controller when the current one is exhausted.
    ///
    /// Numbers returned by one manager are strictly increasing and never
    /// reused. A range with one number left yields exactly that number; the
    /// call after it triggers the refresh.
    pub fn alloc_seq(&self) -> Result<u64> {
        let mut st = self.state.lock();
        self.alloc_seq_locked(&mut st)
    }

    /// Allocates the next FID.
    ///
    /// If the manager holds no sequence yet, or the current sequence's oid
    /// space is used up, a fresh sequence number is drawn (possibly going
    /// remote) and the cursor restarts at [`FID_INIT_OID`]; the result is
    /// then [`FidAllocStatus::Restarted`] and the caller must update the
    /// FLD. Otherwise the cursor simply advances and the result is
    /// [`FidAllocStatus::Ready`]. On error the cursor is unchanged.
    pub fn alloc_fid(&self) -> Result<FidAllocStatus> {
        let mut st = self.state.lock();

        let status = if !st.fid.is_sane() || u64::from(st.fid.oid) >= self.width {
            let seqnr = match self.alloc_seq_locked(&mut st) {
                Ok(seqnr) => seqnr,
                Err(e) => {
                    error!(%e, "can't allocate new sequence");
                    return Err(e);
                }
            };
            st.fid = Fid::new(seqnr, FID_INIT_OID, 0);
            FidAllocStatus::Restarted { fid: st.fid }
        } else {
            st.fid.oid += 1;
            FidAllocStatus::Ready { fid: st.fid }
        };

        let fid = status.fid();
        assert!(fid.is_sane(), "allocated insane FID {fid}");
        debug!(%fid, restarted = status.is_restarted(), "allocated FID");
        Ok(status)
    }
}

impl<T> Drop for SeqClient<T> {
    fn drop(&mut self) {
        debug!("client sequence manager finalized");
    }
}
