// bibtag/src/tag/write.rs

use log::debug;

use crate::codec;
use crate::transport::Transport;
use crate::types::{Afi, Mid, Uid};
use crate::Result;

/// Write a new MID to a tag, block 0 first.
///
/// The MID is encoded before anything is sent, so an invalid MID never
/// reaches the transport. A failure part way leaves the earlier blocks
/// written; the next poll cycle reads back whatever the tag now holds.
pub fn write_mid(transport: &mut dyn Transport, uid: &Uid, mid: &Mid) -> Result<()> {
    let blocks = codec::encode_mid(mid)?;
    for (index, block) in (0u8..).zip(blocks.iter()) {
        debug!("writing block {} of {}: {}", index, uid, block);
        transport.write_block(uid, index, block)?;
    }
    Ok(())
}

/// Write the AFI byte of a tag.
pub fn write_afi(transport: &mut dyn Transport, uid: &Uid, afi: Afi) -> Result<()> {
    debug!("writing AFI {} to {}", afi, uid);
    transport.write_afi(uid, afi)
}
