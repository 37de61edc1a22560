//! 仿真编排
//!
//! 按配置搭建调度器、两个队列和三个分布，依次启动生成器、leader、follower 与两个采样器，
//! 然后逐步推进时钟，直到完成任务数达到目标或虚拟时间超过安全上限。

use tracing::{info, warn};

use crate::config::{DispatchMode, SimConfig};
use crate::dist::Distributions;
use crate::error::ConfigError;
use crate::model::{
    DepthSampler, DispatchWorld, Follower, FollowerId, Generator, Leader, LeaderId, RateSampler,
};
use crate::report::{PairedResult, SimResult};
use crate::sim::{SimTime, Simulator};

pub struct Simulation {
    mode: DispatchMode,
    config: SimConfig,
    sim: Simulator,
    world: DispatchWorld,
    ceiling: SimTime,
    aborted: bool,
}

impl Simulation {
    pub fn new(mode: DispatchMode, cfg: &SimConfig) -> Result<Self, ConfigError> {
        Self::with_distributions(mode, cfg, Distributions::from_config(mode, cfg))
    }

    /// 使用自定义分布（例如非常量的派发代价函数）搭建一次运行。
    pub fn with_distributions(
        mode: DispatchMode,
        cfg: &SimConfig,
        dists: Distributions,
    ) -> Result<Self, ConfigError> {
        cfg.validate()?;

        let follower_capacity = cfg.follower_count as f64 / cfg.task_duration_mean.max(1e-9);
        let leader_rate =
            (cfg.leader_count * cfg.batch_size) as f64 / cfg.dispatch_time(mode).max(1e-9);
        info!(
            %mode,
            follower_capacity,
            leader_rate,
            arrival_rate = cfg.arrival_rate,
            "capacity estimate (tasks/ns)"
        );

        let mut sim = Simulator::default();
        let world = DispatchWorld::new(cfg, dists);
        let interval = SimTime::from_nanos_f64(cfg.sample_interval);

        sim.schedule(SimTime::ZERO, Generator::new(cfg.task_count));
        for lid in 0..cfg.leader_count {
            sim.schedule(SimTime::ZERO, Leader::new(LeaderId(lid), cfg.batch_size));
        }
        for fid in 0..cfg.follower_count {
            sim.schedule(SimTime::ZERO, Follower::new(FollowerId(fid)));
        }
        sim.schedule(SimTime::ZERO, DepthSampler::new(interval));
        sim.schedule(SimTime::ZERO, RateSampler::new(interval));

        Ok(Self {
            mode,
            config: cfg.clone(),
            sim,
            world,
            ceiling: SimTime::from_nanos_f64(cfg.max_sim_time),
            aborted: false,
        })
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn now(&self) -> SimTime {
        self.sim.now()
    }

    pub fn world(&self) -> &DispatchWorld {
        &self.world
    }

    /// 是否因安全上限（或事件耗尽）而提前停止
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub fn is_complete(&self) -> bool {
        self.world.metrics.completed_tasks >= self.config.task_count
    }

    /// 推进时钟直到完成或中止。进程不会被通知退出，只是不再被驱动。
    #[tracing::instrument(skip(self), fields(mode = %self.mode, tasks = self.config.task_count))]
    pub fn run(&mut self) {
        let mut steps: u64 = 0;
        loop {
            if self.is_complete() {
                break;
            }
            if self.sim.now() > self.ceiling {
                warn!(
                    now_ns = self.sim.now().as_nanos_f64(),
                    completed = self.world.metrics.completed_tasks,
                    target = self.config.task_count,
                    "max sim time reached; aborting"
                );
                self.aborted = true;
                break;
            }
            if !self.sim.step(&mut self.world) {
                warn!(
                    completed = self.world.metrics.completed_tasks,
                    "no pending events before completion; aborting"
                );
                self.aborted = true;
                break;
            }
            steps += 1;
        }
        info!(
            steps,
            env_now_ns = self.sim.now().as_nanos_f64(),
            completed = self.world.metrics.completed_tasks,
            pending = self.sim.pending(),
            "run finished"
        );
    }

    pub fn result(&self) -> SimResult {
        SimResult::collect(
            self.mode,
            &self.config,
            self.sim.now(),
            self.aborted,
            &self.world.metrics,
        )
    }
}

/// 以给定档位运行一次并汇总。
pub fn run_sim(mode: DispatchMode, cfg: &SimConfig) -> Result<SimResult, ConfigError> {
    let mut s = Simulation::new(mode, cfg)?;
    s.run();
    Ok(s.result())
}

/// 默认入口：先软件、后硬件，各自独立播种。
pub fn run_pair(cfg: &SimConfig) -> Result<PairedResult, ConfigError> {
    Ok(PairedResult {
        software: run_sim(DispatchMode::Software, cfg)?,
        hardware: run_sim(DispatchMode::Hardware, cfg)?,
    })
}
