//! 事件 trait
//!
//! 定义仿真事件接口。每个仿真进程（生成器、leader、follower、采样器）都是一个可恢复的状态机，
//! 通过实现 `Event` 被调度器唤醒。

use super::simulator::Simulator;
use super::world::World;

/// 事件：可被调度执行。使用 `self: Box<Self>` 以支持 move/所有权转移。
pub trait Event: Send + 'static {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World);
}
