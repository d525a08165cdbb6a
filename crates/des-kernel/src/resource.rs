//! Capacity-limited resources with FIFO admission.
//!
//! A resource tracks which processes hold its slots rather than just a
//! counter, so a release by a process that never acquired is detected as an
//! over-release instead of silently freeing someone else's slot.
//!
//! When a slot is released while requests are queued, ownership passes
//! straight to the head of the queue: the in-use count never dips, so no
//! other requester can observe the slot as free in between.

use std::collections::VecDeque;

use des_core::{ProcessId, ResourceId};

use crate::{KernelError, KernelResult};

/// Outcome of an acquire request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Granted,
    Queued,
}

/// One capacity-limited facility.
#[derive(Clone, Debug)]
pub struct Resource {
    capacity: usize,
    holders:  Vec<ProcessId>,
    queue:    VecDeque<ProcessId>,
    grants:   u64,
}

impl Resource {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            holders: Vec::with_capacity(capacity),
            queue:   VecDeque::new(),
            grants:  0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn in_use(&self) -> usize {
        self.holders.len()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Total slots granted since the start of the run.
    pub fn grants(&self) -> u64 {
        self.grants
    }

    pub fn is_held_by(&self, process: ProcessId) -> bool {
        self.holders.contains(&process)
    }

    fn request(&mut self, process: ProcessId) -> Request {
        if self.holders.len() < self.capacity {
            self.holders.push(process);
            self.grants += 1;
            Request::Granted
        } else {
            self.queue.push_back(process);
            Request::Queued
        }
    }

    /// Release one slot held by `process`; returns the new holder if the
    /// slot was handed to a queued requester.
    fn release(&mut self, id: ResourceId, process: ProcessId) -> KernelResult<Option<ProcessId>> {
        let Some(pos) = self.holders.iter().position(|&p| p == process) else {
            return Err(KernelError::OverRelease { process, resource: id });
        };
        match self.queue.pop_front() {
            Some(next) => {
                self.holders[pos] = next;
                self.grants += 1;
                Ok(Some(next))
            }
            None => {
                self.holders.swap_remove(pos);
                Ok(None)
            }
        }
    }
}

/// All resources of a run, indexed by [`ResourceId`].
#[derive(Clone, Debug, Default)]
pub struct ResourceTable {
    resources: Vec<Resource>,
}

impl ResourceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource with `capacity` slots (must be ≥ 1).
    pub fn add(&mut self, capacity: usize) -> KernelResult<ResourceId> {
        if capacity == 0 {
            return Err(KernelError::InvalidCapacity);
        }
        let id = ResourceId(self.resources.len() as u32);
        self.resources.push(Resource::new(capacity));
        Ok(id)
    }

    pub fn get(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(id.index())
    }

    pub fn request(&mut self, id: ResourceId, process: ProcessId) -> KernelResult<Request> {
        let res = self.resources.get_mut(id.index()).ok_or(KernelError::UnknownResource(id))?;
        Ok(res.request(process))
    }

    pub fn release(&mut self, id: ResourceId, process: ProcessId) -> KernelResult<Option<ProcessId>> {
        let res = self.resources.get_mut(id.index()).ok_or(KernelError::UnknownResource(id))?;
        res.release(id, process)
    }

    /// Number of slots `process` holds across all resources.
    pub fn held_by(&self, process: ProcessId) -> usize {
        self.resources
            .iter()
            .map(|r| r.holders.iter().filter(|&&p| p == process).count())
            .sum()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
