// bibtag/src/tag/read.rs

use crate::codec;
use crate::tag::TagRecord;
use crate::transport::Transport;
use crate::types::Uid;
use crate::Result;

/// Read the MID blocks of one tag and build its record.
///
/// `Error::TagUnreadable` and `Error::Decode` concern this tag only; any
/// other error comes from the transport itself.
pub fn read_tag(transport: &mut dyn Transport, uid: &Uid) -> Result<TagRecord> {
    let blocks = transport.read_blocks(uid)?;
    let mid = codec::decode_mid(&blocks)?;
    TagRecord::new(uid.clone(), mid)
}
