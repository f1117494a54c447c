// bibtag/src/transport/mock.rs

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::codec;
use crate::constants::BLOCK_COUNT;
use crate::transport::traits::{Transport, check_block_index};
use crate::types::{Afi, Mid, RawBlock, Uid};
use crate::{Error, Result};

/// A single call made against a `MockTransport`, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Connect,
    Disconnect,
    ListUids,
    ReadBlock(Uid, u8),
    WriteBlock(Uid, u8, RawBlock),
    WriteAfi(Uid, Afi),
}

impl MockCall {
    pub fn is_write(&self) -> bool {
        matches!(self, MockCall::WriteBlock(..) | MockCall::WriteAfi(..))
    }
}

#[derive(Debug)]
struct MockTag {
    uid: Uid,
    blocks: [RawBlock; BLOCK_COUNT as usize],
    afi: Option<Afi>,
}

#[derive(Debug, Default)]
struct MockState {
    connected: bool,
    tags: Vec<MockTag>,
    calls: Vec<MockCall>,
    list_failures: usize,
    connect_failures: usize,
    unreadable: HashSet<(Uid, u8)>,
    failing_writes: HashSet<Uid>,
}

impl MockState {
    fn tag_mut(&mut self, uid: &Uid) -> Option<&mut MockTag> {
        self.tags.iter_mut().find(|t| &t.uid == uid)
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }
}

/// In-memory reader for tests. It simulates a field of tags, records every
/// call and applies writes to the stored tags so later reads observe them.
///
/// Clones share the same field: keep one clone in the test and hand the
/// other to the reader.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        // A panicking test thread must not hide the log from the others.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Place a tag carrying `mid` in the field.
    pub fn insert_tag(&self, uid: impl Into<Uid>, mid: &Mid) -> Result<()> {
        let blocks = codec::encode_mid(mid)?;
        self.insert_raw_tag(uid, blocks);
        Ok(())
    }

    /// Place a tag with arbitrary block content in the field, replacing any
    /// tag with the same UID.
    pub fn insert_raw_tag(&self, uid: impl Into<Uid>, blocks: [RawBlock; BLOCK_COUNT as usize]) {
        let uid = uid.into();
        let mut state = self.state();
        if let Some(tag) = state.tag_mut(&uid) {
            tag.blocks = blocks;
        } else {
            state.tags.push(MockTag {
                uid,
                blocks,
                afi: None,
            });
        }
    }

    /// Take a tag out of the field. Returns false if it wasn't there.
    pub fn remove_tag(&self, uid: impl Into<Uid>) -> bool {
        let uid = uid.into();
        let mut state = self.state();
        let before = state.tags.len();
        state.tags.retain(|t| t.uid != uid);
        state.tags.len() != before
    }

    /// Make the next `n` inventories fail with a transport error.
    pub fn set_list_failures(&self, n: usize) {
        self.state().list_failures = n;
    }

    /// Make the next `n` connection attempts fail.
    pub fn set_connect_failures(&self, n: usize) {
        self.state().connect_failures = n;
    }

    /// Make one block of a tag fail to read.
    pub fn set_unreadable_block(&self, uid: impl Into<Uid>, index: u8) {
        self.state().unreadable.insert((uid.into(), index));
    }

    /// Make every write addressed to `uid` fail.
    pub fn fail_writes_for(&self, uid: impl Into<Uid>) {
        self.state().failing_writes.insert(uid.into());
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn writes(&self) -> Vec<MockCall> {
        self.state()
            .calls
            .iter()
            .filter(|c| c.is_write())
            .cloned()
            .collect()
    }

    pub fn block_reads(&self) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| matches!(c, MockCall::ReadBlock(..)))
            .count()
    }

    pub fn afi_of(&self, uid: impl Into<Uid>) -> Option<Afi> {
        let uid = uid.into();
        self.state().tag_mut(&uid).and_then(|t| t.afi)
    }

    pub fn blocks_of(&self, uid: impl Into<Uid>) -> Option<[RawBlock; BLOCK_COUNT as usize]> {
        let uid = uid.into();
        self.state().tag_mut(&uid).map(|t| t.blocks.clone())
    }
}

impl Transport for MockTransport {
    fn list_visible_uids(&mut self) -> Result<Vec<Uid>> {
        let mut state = self.state();
        state.calls.push(MockCall::ListUids);
        state.ensure_connected()?;
        if state.list_failures > 0 {
            state.list_failures -= 1;
            return Err(Error::Transport("simulated inventory failure".to_string()));
        }
        Ok(state.tags.iter().map(|t| t.uid.clone()).collect())
    }

    fn read_block(&mut self, uid: &Uid, index: u8) -> Result<RawBlock> {
        let mut state = self.state();
        state.calls.push(MockCall::ReadBlock(uid.clone(), index));
        state.ensure_connected()?;
        check_block_index(index)?;
        let unreadable = Error::TagUnreadable {
            uid: uid.clone(),
            block: index,
        };
        if state.unreadable.contains(&(uid.clone(), index)) {
            return Err(unreadable);
        }
        // A tag that left the field after the inventory no longer answers.
        match state.tag_mut(uid) {
            Some(tag) => Ok(tag.blocks[index as usize].clone()),
            None => Err(unreadable),
        }
    }

    fn write_block(&mut self, uid: &Uid, index: u8, block: &RawBlock) -> Result<()> {
        let mut state = self.state();
        state
            .calls
            .push(MockCall::WriteBlock(uid.clone(), index, block.clone()));
        state.ensure_connected()?;
        check_block_index(index)?;
        if state.failing_writes.contains(uid) {
            return Err(Error::Transport("simulated write failure".to_string()));
        }
        let tag = state
            .tag_mut(uid)
            .ok_or_else(|| Error::NotFound(uid.clone()))?;
        tag.blocks[index as usize] = block.clone();
        Ok(())
    }

    fn write_afi(&mut self, uid: &Uid, afi: Afi) -> Result<()> {
        let mut state = self.state();
        state.calls.push(MockCall::WriteAfi(uid.clone(), afi));
        state.ensure_connected()?;
        if state.failing_writes.contains(uid) {
            return Err(Error::Transport("simulated write failure".to_string()));
        }
        let tag = state
            .tag_mut(uid)
            .ok_or_else(|| Error::NotFound(uid.clone()))?;
        tag.afi = Some(afi);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.state().connected
    }

    fn connect(&mut self) -> Result<()> {
        let mut state = self.state();
        state.calls.push(MockCall::Connect);
        if state.connect_failures > 0 {
            state.connect_failures -= 1;
            return Err(Error::Transport("simulated connect failure".to_string()));
        }
        state.connected = true;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<()> {
        let mut state = self.state();
        state.calls.push(MockCall::Disconnect);
        state.connected = false;
        Ok(())
    }
}
