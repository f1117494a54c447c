// bibtag/src/transport/traits.rs

use crate::constants::BLOCK_COUNT;
use crate::types::{Afi, RawBlock, Uid};
use crate::{Error, Result};

/// Transport trait abstracts reader I/O away from the poll loop.
///
/// Implementations own the connection to the physical reader and its wire
/// protocol. Every call is expected to carry its own timeout; the poll loop
/// never interrupts one. Connection-level failures should be reported as
/// `Error::Transport`/`Error::NotConnected`, while a single tag failing to
/// answer a block read should be reported as `Error::TagUnreadable` so only
/// that tag is dropped from the cycle.
pub trait Transport: Send {
    /// Inventory: UIDs of the tags currently in the field
    fn list_visible_uids(&mut self) -> Result<Vec<Uid>>;

    /// Read one data block (0..BLOCK_COUNT) of a tag
    fn read_block(&mut self, uid: &Uid, index: u8) -> Result<RawBlock>;

    /// Write one data block of a tag
    fn write_block(&mut self, uid: &Uid, index: u8, block: &RawBlock) -> Result<()>;

    /// Write the AFI byte of a tag
    fn write_afi(&mut self, uid: &Uid, afi: Afi) -> Result<()>;

    fn is_connected(&self) -> bool;

    fn connect(&mut self) -> Result<()>;

    fn disconnect(&mut self) -> Result<()>;

    /// Read every block the MID is stored in. The default implementation
    /// issues one `read_block` per block.
    fn read_blocks(&mut self, uid: &Uid) -> Result<[RawBlock; BLOCK_COUNT as usize]> {
        Ok([
            self.read_block(uid, 0)?,
            self.read_block(uid, 1)?,
            self.read_block(uid, 2)?,
            self.read_block(uid, 3)?,
        ])
    }
}

/// Reject block indexes outside the MID area.
pub fn check_block_index(index: u8) -> Result<()> {
    if index >= BLOCK_COUNT {
        return Err(Error::InvalidBlockIndex(index));
    }
    Ok(())
}
