//! Channel timeline: the programmes of one channel in start-time order.
//!
//! Entries live in a slot arena owned by the timeline and are chained into a
//! doubly-linked list through their `prev`/`next` handles. Only this module
//! writes those links, so insertion and removal always leave the chain
//! consistent:
//!
//! - inserting re-links the new entry between its neighbours
//! - removing re-links the neighbours around the removed entry
//! - a removed entry keeps no links, and its handle stops resolving

use crate::core::guide::{Showing, ShowingsIndex};
use crate::models::channel::{ChannelId, ChannelInfo};
use crate::models::programme::{Links, Programme, ProgrammeKey};
use crate::{Error, Result};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    programme: Option<Programme>,
}

/// Programmes of one channel, ordered by start time.
#[derive(Debug, Clone)]
pub struct ChannelTimeline {
    info: ChannelInfo,
    slots: Vec<Slot>,
    free: Vec<u32>,
    head: Option<ProgrammeKey>,
    tail: Option<ProgrammeKey>,
    len: usize,
}

impl ChannelTimeline {
    /// Create an empty timeline for a channel.
    pub fn new(info: ChannelInfo) -> Self {
        Self {
            info,
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub fn info(&self) -> &ChannelInfo {
        &self.info
    }

    pub(crate) fn set_info(&mut self, info: ChannelInfo) {
        debug_assert_eq!(info.id, self.info.id);
        self.info = info;
        self.invalidate_all();
    }

    pub fn id(&self) -> &ChannelId {
        &self.info.id
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Earliest programme.
    pub fn first(&self) -> Option<ProgrammeKey> {
        self.head
    }

    /// Latest programme.
    pub fn last(&self) -> Option<ProgrammeKey> {
        self.tail
    }

    pub fn get(&self, key: ProgrammeKey) -> Option<&Programme> {
        self.slots
            .get(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.programme.as_ref())
    }

    pub(crate) fn get_mut(&mut self, key: ProgrammeKey) -> Option<&mut Programme> {
        self.slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation)
            .and_then(|slot| slot.programme.as_mut())
    }

    pub fn prev(&self, key: ProgrammeKey) -> Option<ProgrammeKey> {
        self.get(key)?.prev()
    }

    pub fn next(&self, key: ProgrammeKey) -> Option<ProgrammeKey> {
        self.get(key)?.next()
    }

    /// Iterate programmes in start-time order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            timeline: self,
            cursor: self.head,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = ProgrammeKey> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Find the programme starting at `start`.
    pub fn find(&self, start: DateTime<Utc>) -> Option<ProgrammeKey> {
        self.iter()
            .find(|(_, programme)| programme.start() == start)
            .map(|(key, _)| key)
    }

    /// Programme on air at `time`.
    pub fn programme_at(&self, time: DateTime<Utc>) -> Option<ProgrammeKey> {
        self.iter()
            .take_while(|(_, programme)| programme.start() <= time)
            .filter(|(_, programme)| programme.is_on_air_at(time))
            .map(|(key, _)| key)
            .last()
    }

    /// Programmes whose `[start, stop)` interval intersects the given one.
    pub fn overlapping(&self, start: DateTime<Utc>, stop: DateTime<Utc>) -> Vec<ProgrammeKey> {
        debug_assert!(start < stop, "reversed query interval");
        self.iter()
            .take_while(|(_, programme)| programme.start() < stop)
            .filter(|(_, programme)| start < programme.stop())
            .map(|(key, _)| key)
            .collect()
    }

    /// Insert a programme, keeping start-time order.
    ///
    /// An existing entry with the same start time is replaced.
    pub fn insert(&mut self, programme: Programme) -> Result<ProgrammeKey> {
        if programme.channel() != self.id() {
            return Err(Error::ChannelMismatch {
                expected: self.id().to_string(),
                found: programme.channel().to_string(),
            });
        }

        if let Some(existing) = self.find(programme.start()) {
            tracing::warn!(
                "Replacing programme on {} at {}",
                self.id(),
                programme.start()
            );
            self.remove(existing);
        }

        // Feeds arrive mostly in order, so search backwards from the tail.
        let mut prev = self.tail;
        while let Some(key) = prev {
            match self.get(key) {
                Some(existing) if existing.start() > programme.start() => prev = existing.prev(),
                _ => break,
            }
        }
        let next = match prev {
            Some(key) => self.next(key),
            None => self.head,
        };

        let index_title = programme.index_title().to_string();
        let start = programme.start();
        let key = self.allocate(programme);

        if let Some(entry) = self.get_mut(key) {
            entry.set_links(Links { prev, next });
        }
        match prev {
            Some(p) => self.update_links(p, |links| links.next = Some(key)),
            None => self.head = Some(key),
        }
        match next {
            Some(n) => self.update_links(n, |links| links.prev = Some(key)),
            None => self.tail = Some(key),
        }
        self.len += 1;
        self.invalidate_title(&index_title);

        tracing::debug!("Inserted '{}' on {} at {}", index_title, self.id(), start);
        Ok(key)
    }

    /// Remove a programme, re-linking its neighbours.
    pub fn remove(&mut self, key: ProgrammeKey) -> Option<Programme> {
        let slot = self
            .slots
            .get_mut(key.index as usize)
            .filter(|slot| slot.generation == key.generation)?;
        let mut programme = slot.programme.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(key.index);

        let Links { prev, next } = programme.links();
        match prev {
            Some(p) => self.update_links(p, |links| links.next = next),
            None => self.head = next,
        }
        match next {
            Some(n) => self.update_links(n, |links| links.prev = prev),
            None => self.tail = prev,
        }
        programme.set_links(Links::default());
        self.len -= 1;
        self.invalidate_title(programme.index_title());

        tracing::debug!(
            "Removed '{}' from {} at {}",
            programme.title(),
            self.id(),
            programme.start()
        );
        Some(programme)
    }

    /// Remove every programme.
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.programme.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Drop programmes that finished at or before `cutoff`. Returns how many.
    pub fn evict_before(&mut self, cutoff: DateTime<Utc>) -> usize {
        let expired: Vec<ProgrammeKey> = self
            .iter()
            .filter(|(_, programme)| programme.stop() <= cutoff)
            .map(|(key, _)| key)
            .collect();

        for key in &expired {
            self.remove(*key);
        }

        if !expired.is_empty() {
            tracing::debug!("Evicted {} programmes from {}", expired.len(), self.id());
        }
        expired.len()
    }

    /// Edit a programme in place.
    ///
    /// Descriptions of every entry sharing the old or new title are invalidated,
    /// since their other-showings lists may change.
    pub fn modify<F, R>(&mut self, key: ProgrammeKey, f: F) -> Option<R>
    where
        F: FnOnce(&mut Programme) -> R,
    {
        let old_title = self.get(key)?.index_title().to_string();
        let programme = self.get_mut(key)?;
        let result = f(programme);
        let new_title = programme.index_title().to_string();

        if old_title != new_title {
            self.invalidate_title(&old_title);
            self.invalidate_title(&new_title);
        }
        Some(result)
    }

    /// Mark descriptions of every entry with this index title dirty.
    pub(crate) fn invalidate_title(&mut self, index_title: &str) {
        for slot in &mut self.slots {
            if let Some(programme) = slot.programme.as_mut() {
                if programme.index_title() == index_title {
                    programme.descriptions_mut().invalidate();
                }
            }
        }
    }

    pub(crate) fn invalidate_all(&mut self) {
        for slot in &mut self.slots {
            if let Some(programme) = slot.programme.as_mut() {
                programme.descriptions_mut().invalidate();
            }
        }
    }

    fn allocate(&mut self, programme: Programme) -> ProgrammeKey {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.programme = Some(programme);
            ProgrammeKey {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                programme: Some(programme),
            });
            ProgrammeKey {
                index: (self.slots.len() - 1) as u32,
                generation: 0,
            }
        }
    }

    fn update_links(&mut self, key: ProgrammeKey, f: impl FnOnce(&mut Links)) {
        if let Some(programme) = self.get_mut(key) {
            let mut links = programme.links();
            f(&mut links);
            programme.set_links(links);
        }
    }
}

impl ShowingsIndex for ChannelTimeline {
    fn showings(&self, index_title: &str) -> Vec<Showing> {
        self.iter()
            .filter(|(_, programme)| programme.index_title() == index_title)
            .map(|(_, programme)| Showing::new(&self.info, programme.start()))
            .collect()
    }
}

/// In-order iterator over a timeline.
#[derive(Debug)]
pub struct Iter<'a> {
    timeline: &'a ChannelTimeline,
    cursor: Option<ProgrammeKey>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (ProgrammeKey, &'a Programme);

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.cursor?;
        let programme = self.timeline.get(key)?;
        self.cursor = programme.next();
        Some((key, programme))
    }
}
