use core::fmt;

/// Default per-sequence object-id width: how many object ordinals one
/// sequence may carry before the manager must switch to a fresh sequence.
///
/// The rollover policy is `oid >= width`, so a sequence of this width yields
/// oids `FID_INIT_OID..=SEQ_WIDTH` before switching. Managers may narrow the
/// width via [`SeqClient::with_width`](crate::SeqClient::with_width).
pub const SEQ_WIDTH: u64 = 0xffff_ffff;

/// First object ordinal handed out in a freshly drawn sequence. Lower values
/// are reserved by convention and never allocated.
pub const FID_INIT_OID: u32 = 1;

/// A file identifier: the `(sequence, object-id, version)` tuple uniquely
/// naming one filesystem object.
///
/// `seq` selects a coarse partition of the id space owned by exactly one
/// manager at a time, `oid` is the object ordinal within that sequence, and
/// `ver` is a version tag (always 0 as allocated here). A `Fid` is a plain
/// value: immutable once handed to a caller, copied freely, never reclaimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fid {
    /// Sequence number naming the owning sequence.
    pub seq: u64,
    /// Object ordinal within the sequence.
    pub oid: u32,
    /// Version tag.
    pub ver: u32,
}

impl Fid {
    /// Creates a FID from its components.
    pub const fn new(seq: u64, oid: u32, ver: u32) -> Self {
        Self { seq, oid, ver }
    }

    /// Returns the zeroed sentinel FID, used by a manager that has not yet
    /// drawn its first sequence. Never sane.
    pub const fn zeroed() -> Self {
        Self { seq: 0, oid: 0, ver: 0 }
    }

    /// A FID is sane iff it names a valid (non-zero) sequence.
    ///
    /// Sequence 0 never exists; it is the uninitialized sentinel. Whether
    /// `oid` still fits the owning sequence is a policy of the allocating
    /// manager (the width is per-manager), not of the value itself.
    pub const fn is_sane(&self) -> bool {
        self.seq != 0
    }
}

impl fmt::Display for Fid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:#x}:{:#x}:{:#x}]", self.seq, self.oid, self.ver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_fid_is_not_sane() {
        assert!(!Fid::zeroed().is_sane());
        assert_eq!(Fid::zeroed(), Fid::default());
    }

    #[test]
    fn any_nonzero_sequence_is_sane() {
        assert!(Fid::new(1, 0, 0).is_sane());
        assert!(Fid::new(u64::MAX, u32::MAX, 0).is_sane());
    }

    #[test]
    fn displays_all_three_components() {
        assert_eq!(Fid::new(0x200, 0x1, 0).to_string(), "[0x200:0x1:0x0]");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let fid = Fid::new(0x400, 7, 0);
        let json = serde_json::to_string(&fid).unwrap();
        assert_eq!(serde_json::from_str::<Fid>(&json).unwrap(), fid);

        let range = crate::SeqRange::new(0x400, 0x800);
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(serde_json::from_str::<crate::SeqRange>(&json).unwrap(), range);
    }
}
