//! 可选容量的 FIFO 队列
//!
//! 默认无界；有界时满队列的入队会挂起，直到有出队腾出空间。
//! `C` 是出队时传给被接纳入队者的上下文。

use std::collections::VecDeque;

use tracing::trace;

use super::{PopWaker, PushWaker};
use crate::sim::Simulator;

pub struct FifoQueue<T, C = ()> {
    name: &'static str,
    capacity: Option<usize>,
    items: VecDeque<T>,
    poppers: VecDeque<PopWaker<T>>,
    pushers: VecDeque<(T, PushWaker<C>)>,
}

impl<T, C> std::fmt::Debug for FifoQueue<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FifoQueue")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("len", &self.items.len())
            .field("poppers", &self.poppers.len())
            .field("pushers", &self.pushers.len())
            .finish()
    }
}

impl<T, C> FifoQueue<T, C> {
    /// `capacity` 为 `None` 表示无界。容量必须 > 0（由配置校验保证）。
    pub fn new(name: &'static str, capacity: Option<usize>) -> Self {
        Self {
            name,
            capacity,
            items: VecDeque::new(),
            poppers: VecDeque::new(),
            pushers: VecDeque::new(),
        }
    }

    pub fn unbounded(name: &'static str) -> Self {
        Self::new(name, None)
    }

    pub fn bounded(name: &'static str, capacity: usize) -> Self {
        Self::new(name, Some(capacity))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.items.len() >= cap)
    }

    /// 正在等待元素的出队者数量
    pub fn waiting_poppers(&self) -> usize {
        self.poppers.len()
    }

    /// 非阻塞出队。
    ///
    /// 若有界队列因此腾出空间，最早挂起的入队者的元素被接纳到队尾，
    /// 该入队者在此刻以 `ctx` 被唤醒。
    pub fn try_pop(&mut self, sim: &mut Simulator, ctx: &mut C) -> Option<T> {
        let item = self.items.pop_front()?;
        self.admit_waiting_pusher(sim, ctx);
        Some(item)
    }

    /// 非阻塞入队；队列满时原样返回元素。
    ///
    /// 有出队者在等待时，元素直接交给等待最久的那个（此时队列必为空）。
    pub fn try_push(&mut self, item: T, sim: &mut Simulator) -> Result<(), T> {
        if let Some(wake) = self.poppers.pop_front() {
            debug_assert!(self.items.is_empty());
            trace!(queue = self.name, "hand-off to waiting popper");
            wake(item, sim);
            return Ok(());
        }
        if self.is_full() {
            return Err(item);
        }
        self.items.push_back(item);
        Ok(())
    }

    /// 挂起出队者。只应在 `try_pop` 返回 `None` 之后调用。
    pub fn wait_pop(&mut self, wake: PopWaker<T>) {
        debug_assert!(self.items.is_empty());
        self.poppers.push_back(wake);
    }

    /// 挂起入队者及其元素。只应在 `try_push` 返回 `Err` 之后调用。
    pub fn wait_push(&mut self, item: T, wake: PushWaker<C>) {
        trace!(queue = self.name, len = self.items.len(), "push blocked");
        self.pushers.push_back((item, wake));
    }

    fn admit_waiting_pusher(&mut self, sim: &mut Simulator, ctx: &mut C) {
        if self.is_full() {
            return;
        }
        if let Some((item, wake)) = self.pushers.pop_front() {
            trace!(queue = self.name, waiting = self.pushers.len(), "admit blocked push");
            self.items.push_back(item);
            wake(sim, ctx);
        }
    }
}
