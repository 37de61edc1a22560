//! 队列抽象
//!
//! 进程之间只通过 FIFO 队列交换任务。队列提供：
//! - 非阻塞 `try_pop` / `try_push`
//! - 阻塞语义：`try_pop` 失败后用 `wait_pop` 挂起，`try_push` 失败后用 `wait_push` 挂起，
//!   条件满足时由队列回调唤醒进程（在当前时刻重新调度）。

use crate::sim::Simulator;

mod fifo;

pub use fifo::FifoQueue;

/// 挂起的出队者：拿到元素后被调用，负责把进程重新调度。
pub type PopWaker<T> = Box<dyn FnOnce(T, &mut Simulator) + Send>;

/// 挂起的入队者：元素被接纳进队列的那一刻被调用，并拿到出队方传入的上下文
/// （例如指标账本），入队记账与接纳发生在同一时刻。
pub type PushWaker<C> = Box<dyn FnOnce(&mut Simulator, &mut C) + Send>;
