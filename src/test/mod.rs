mod dist;
mod queues;
mod simulator;
mod stats;
