//! Suppression of spurious timestamp-only bundle diffs
//!
//! The extraction tool refreshes `@@last_modified` on every run even when
//! no message changed, which leaves the working tree needlessly dirty.
//! When that is the only difference, the previous bytes win.

use crate::bundle::ArbBundle;
use flutterlane_core::error::Result;

/// Outcome of stabilizing a regenerated bundle against its prior version
#[derive(Debug, Clone, Copy)]
pub struct Stabilized<'a> {
    /// Bytes that should end up on disk
    pub bytes: &'a [u8],
    /// True when the prior bytes were restored (timestamp-only change)
    pub restored: bool,
}

/// Decide which bytes to persist after regeneration
///
/// With no prior version the new bytes always win. Otherwise both
/// versions are parsed and compared value-for-value with the reserved
/// timestamp key ignored; the comparison is structural, since
/// regeneration may reorder or reformat the file without changing
/// meaning.
pub fn stabilize<'a>(old: Option<&'a [u8]>, new: &'a [u8]) -> Result<Stabilized<'a>> {
    let Some(old) = old else {
        return Ok(Stabilized {
            bytes: new,
            restored: false,
        });
    };

    let previous = ArbBundle::from_slice(old)?;
    let regenerated = ArbBundle::from_slice(new)?;

    if previous.without_timestamp() == regenerated.without_timestamp() {
        Ok(Stabilized {
            bytes: old,
            restored: true,
        })
    } else {
        Ok(Stabilized {
            bytes: new,
            restored: false,
        })
    }
}
