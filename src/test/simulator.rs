use crate::sim::{Event, SimTime, Simulator, World};
use std::any::Any;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct DummyWorld {
    ticks: usize,
}

impl World for DummyWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, _sim: &mut Simulator) {
        self.ticks = self.ticks.saturating_add(1);
    }
}

struct Push {
    id: u32,
    log: Arc<Mutex<Vec<(u32, SimTime)>>>,
}

impl Event for Push {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) {
        let Push { id, log } = *self;
        log.lock().expect("log lock").push((id, sim.now()));
    }
}

/// 记录后延迟 `delay` 再调度下一个事件
struct PushThenDelay {
    id: u32,
    next_id: u32,
    delay: SimTime,
    log: Arc<Mutex<Vec<(u32, SimTime)>>>,
}

impl Event for PushThenDelay {
    fn execute(self: Box<Self>, sim: &mut Simulator, _world: &mut dyn World) {
        let PushThenDelay {
            id,
            next_id,
            delay,
            log,
        } = *self;
        log.lock().expect("log lock").push((id, sim.now()));
        sim.schedule_in(delay, Push { id: next_id, log });
    }
}

/// 逐个执行直到没有待恢复的事件
fn drain(sim: &mut Simulator, world: &mut DummyWorld) -> usize {
    let mut steps = 0;
    while sim.step(world) {
        steps += 1;
    }
    steps
}

fn ids(log: &Arc<Mutex<Vec<(u32, SimTime)>>>) -> Vec<u32> {
    log.lock().expect("log lock").iter().map(|(id, _)| *id).collect()
}

#[test]
fn scheduled_events_order_by_time_then_seq() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    for (id, at) in [(1, 10), (2, 5), (3, 10), (4, 0)] {
        sim.schedule(
            SimTime(at),
            Push {
                id,
                log: Arc::clone(&log),
            },
        );
    }

    let mut world = DummyWorld::default();
    drain(&mut sim, &mut world);

    assert_eq!(ids(&log), vec![4, 2, 1, 3]);
    assert_eq!(world.ticks, 4);
    assert_eq!(sim.now(), SimTime(10));
}

#[test]
fn zero_delay_reschedule_runs_after_already_queued_same_time_events() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(
        SimTime::ZERO,
        PushThenDelay {
            id: 1,
            next_id: 3,
            delay: SimTime::ZERO,
            log: Arc::clone(&log),
        },
    );
    sim.schedule(
        SimTime::ZERO,
        Push {
            id: 2,
            log: Arc::clone(&log),
        },
    );

    let mut world = DummyWorld::default();
    drain(&mut sim, &mut world);

    assert_eq!(ids(&log), vec![1, 2, 3]);
    assert_eq!(sim.now(), SimTime::ZERO);
}

#[test]
fn schedule_in_advances_relative_to_now() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    sim.schedule(
        SimTime(7),
        PushThenDelay {
            id: 1,
            next_id: 2,
            delay: SimTime(5),
            log: Arc::clone(&log),
        },
    );

    let mut world = DummyWorld::default();
    drain(&mut sim, &mut world);

    assert_eq!(
        *log.lock().expect("log lock"),
        vec![(1, SimTime(7)), (2, SimTime(12))]
    );
}

#[test]
fn step_runs_exactly_one_event() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    for (id, at) in [(1, 3), (2, 8)] {
        sim.schedule(
            SimTime(at),
            Push {
                id,
                log: Arc::clone(&log),
            },
        );
    }
    assert_eq!(sim.pending(), 2);

    let mut world = DummyWorld::default();
    assert!(sim.step(&mut world));
    assert_eq!(ids(&log), vec![1]);
    assert_eq!(sim.now(), SimTime(3));
    assert_eq!(sim.pending(), 1);

    assert!(sim.step(&mut world));
    assert!(!sim.step(&mut world));
    assert_eq!(sim.now(), SimTime(8));
    assert_eq!(world.ticks, 2);
}

#[test]
fn scheduling_in_the_past_is_clamped_to_now() {
    let log = Arc::new(Mutex::new(Vec::new()));

    let mut sim = Simulator::default();
    let mut world = DummyWorld::default();
    sim.schedule(
        SimTime(20),
        Push {
            id: 0,
            log: Arc::clone(&log),
        },
    );
    assert!(sim.step(&mut world));

    sim.schedule(
        SimTime(5),
        Push {
            id: 1,
            log: Arc::clone(&log),
        },
    );
    assert_eq!(drain(&mut sim, &mut world), 1);

    assert_eq!(
        *log.lock().expect("log lock"),
        vec![(0, SimTime(20)), (1, SimTime(20))]
    );
}
