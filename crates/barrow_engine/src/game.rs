//! The run loop state: world, scheduler, and the running flag.

use barrow_foundation::Result;
use barrow_storage::World;
use tracing::info;

use crate::config::EngineConfig;
use crate::scheduler::{Scheduler, StepOutcome};

/// One run of the simulation.
///
/// The outer loop calls [`Game::tick`] while [`Game::is_running`] holds,
/// feeding player commands through [`Game::inject`] whenever a tick reports
/// [`StepOutcome::AwaitingInput`].
#[derive(Clone, Debug)]
pub struct Game {
    world: World,
    scheduler: Scheduler,
    running: bool,
}

impl Game {
    /// Starts a run over `world`.
    #[must_use]
    pub fn new(world: World, config: EngineConfig) -> Self {
        Self {
            world,
            scheduler: Scheduler::new(config),
            running: true,
        }
    }

    /// The simulation state. Consistent between ticks.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The simulation state, mutably.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The scheduler.
    #[must_use]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// True until shutdown is requested or the player dies.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clears the running flag. The current turn, if any, is already complete.
    pub fn request_shutdown(&mut self) {
        if self.running {
            info!(cycle = self.scheduler.cycle(), "shutdown requested");
        }
        self.running = false;
    }

    /// Supplies a symbolic player command such as `"up"` or `"attack"`.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownCommand` fault if the command is not recognized.
    pub fn inject(&mut self, command: &str) -> Result<()> {
        self.scheduler.inject_str(command)
    }

    /// Advances one scheduler step, clearing the running flag on quit or
    /// game over. Does nothing once stopped.
    ///
    /// # Errors
    ///
    /// Propagates scheduler faults.
    pub fn tick(&mut self) -> Result<StepOutcome> {
        if !self.running {
            return Ok(if self.scheduler.is_over() {
                StepOutcome::GameOver
            } else {
                StepOutcome::Idle
            });
        }

        let outcome = self.scheduler.step(&mut self.world)?;
        if matches!(
            outcome,
            StepOutcome::GameOver | StepOutcome::ShutdownRequested { .. }
        ) {
            self.request_shutdown();
        }
        Ok(outcome)
    }

    /// Ticks until the player must act, the run stops, or `max_steps` steps
    /// have been taken. Returns the last outcome.
    ///
    /// # Errors
    ///
    /// Propagates scheduler faults.
    pub fn run_until_input(&mut self, max_steps: usize) -> Result<StepOutcome> {
        let mut outcome = StepOutcome::Idle;
        for _ in 0..max_steps {
            outcome = self.tick()?;
            if !self.running
                || matches!(
                    outcome,
                    StepOutcome::AwaitingInput { .. } | StepOutcome::Idle
                )
            {
                break;
            }
        }
        Ok(outcome)
    }
}
