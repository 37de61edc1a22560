use crate::queue::FifoQueue;
use crate::sim::{Event, SimTime, Simulator, World};
use std::any::Any;
use std::sync::{Arc, Mutex};

type Log = Arc<Mutex<Vec<String>>>;

fn log_of(log: &Log) -> Vec<String> {
    log.lock().expect("log lock").clone()
}

#[test]
fn fifo_preserves_order_and_try_pop_on_empty_returns_none() {
    let mut sim = Simulator::default();
    let mut q: FifoQueue<i32> = FifoQueue::unbounded("q");
    assert!(q.try_pop(&mut sim, &mut ()).is_none());

    for i in 0..5 {
        assert!(q.try_push(i, &mut sim).is_ok());
    }
    assert_eq!(q.len(), 5);
    assert!(!q.is_full());
    assert_eq!(q.capacity(), None);

    let drained: Vec<i32> = std::iter::from_fn(|| q.try_pop(&mut sim, &mut ())).collect();
    assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    assert!(q.is_empty());
}

#[test]
fn push_hands_item_to_longest_waiting_popper() {
    let mut sim = Simulator::default();
    let mut q: FifoQueue<u32> = FifoQueue::unbounded("q");
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    for name in ["a", "b"] {
        let log = Arc::clone(&log);
        q.wait_pop(Box::new(move |item: u32, _sim: &mut Simulator| {
            log.lock().expect("log lock").push(format!("{name}:{item}"));
        }));
    }
    assert_eq!(q.waiting_poppers(), 2);

    assert!(q.try_push(10, &mut sim).is_ok());
    assert!(q.try_push(11, &mut sim).is_ok());
    assert!(q.try_push(12, &mut sim).is_ok());

    assert_eq!(log_of(&log), vec!["a:10", "b:11"]);
    assert_eq!(q.waiting_poppers(), 0);
    // 没有等待者之后才真正进入队列
    assert_eq!(q.len(), 1);
    assert_eq!(q.try_pop(&mut sim, &mut ()), Some(12));
}

#[test]
fn bounded_queue_rejects_push_when_full() {
    let mut sim = Simulator::default();
    let mut q: FifoQueue<i32> = FifoQueue::bounded("q", 2);
    assert!(q.try_push(1, &mut sim).is_ok());
    assert!(q.try_push(2, &mut sim).is_ok());
    assert!(q.is_full());

    assert_eq!(q.try_push(3, &mut sim), Err(3));
    assert_eq!(q.len(), 2);
    assert_eq!(q.capacity(), Some(2));
}

#[test]
fn pop_admits_waiting_pusher_at_tail_and_wakes_it() {
    let mut sim = Simulator::default();
    let mut q: FifoQueue<i32, Vec<String>> = FifoQueue::bounded("q", 1);
    let mut admitted: Vec<String> = Vec::new();

    assert!(q.try_push(1, &mut sim).is_ok());
    for item in [2, 3] {
        let rejected = q.try_push(item, &mut sim).expect_err("queue is full");
        q.wait_push(
            rejected,
            Box::new(move |_sim: &mut Simulator, log: &mut Vec<String>| {
                log.push(format!("pushed:{item}"));
            }),
        );
    }
    assert!(admitted.is_empty());

    // 接纳发生在出队的同一调用里，并拿到出队方传入的上下文
    assert_eq!(q.try_pop(&mut sim, &mut admitted), Some(1));
    assert_eq!(admitted, vec!["pushed:2"]);
    assert_eq!(q.len(), 1);

    assert_eq!(q.try_pop(&mut sim, &mut admitted), Some(2));
    assert_eq!(admitted, vec!["pushed:2", "pushed:3"]);
    assert_eq!(q.try_pop(&mut sim, &mut admitted), Some(3));
    assert!(q.try_pop(&mut sim, &mut admitted).is_none());
    assert_eq!(admitted.len(), 2);
}

#[test]
fn push_while_pushers_wait_does_not_jump_the_line() {
    let mut sim = Simulator::default();
    let mut q: FifoQueue<i32> = FifoQueue::bounded("q", 1);
    assert!(q.try_push(1, &mut sim).is_ok());
    let rejected = q.try_push(2, &mut sim).expect_err("full");
    q.wait_push(rejected, Box::new(|_sim: &mut Simulator, _: &mut ()| {}));

    assert_eq!(q.try_push(3, &mut sim), Err(3));
    assert_eq!(q.try_pop(&mut sim, &mut ()), Some(1));
    assert_eq!(q.try_pop(&mut sim, &mut ()), Some(2));
}

#[derive(Default)]
struct NoWorld;

impl World for NoWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

struct Woken {
    item: u32,
    log: Log,
}

impl Event for Woken {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) {
        self.log
            .lock()
            .expect("log lock")
            .push(format!("woken:{}@{}", self.item, sim.now().0));
    }
}

struct Noop;

impl Event for Noop {
    fn execute(self: Box<Self>, _sim: &mut Simulator, _world: &mut dyn World) {}
}

#[test]
fn waker_reschedules_process_at_current_time() {
    let mut sim = Simulator::default();
    let mut world = NoWorld;
    let mut q: FifoQueue<u32> = FifoQueue::unbounded("q");
    let log: Log = Arc::new(Mutex::new(Vec::new()));

    let wake_log = Arc::clone(&log);
    q.wait_pop(Box::new(move |item: u32, sim: &mut Simulator| {
        sim.schedule(sim.now(), Woken { item, log: wake_log });
    }));

    sim.schedule(SimTime(40), Noop);
    assert!(sim.step(&mut world));
    assert!(q.try_push(9, &mut sim).is_ok());
    assert_eq!(sim.pending(), 1);
    assert!(sim.step(&mut world));
    assert!(!sim.step(&mut world));

    assert_eq!(log_of(&log), vec!["woken:9@40"]);
}
