//! Turn scheduling for Barrow.
//!
//! A pass visits every live actor (an entity with [`Input`] or [`Ai`]) once,
//! in creation order. Each step of the scheduler:
//! 1. Selects the next actor, running post-cycle systems when a pass ends
//! 2. Obtains a command, suspending if the player has not supplied one
//! 3. Resolves the command against the world
//!
//! The actor list is snapshotted when a pass begins. Entities created during
//! the pass wait for the next one; entities destroyed during it are skipped.

use barrow_foundation::{EntityId, Result};
use barrow_storage::{Ai, CurrentTurn, Input, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use crate::ai;
use crate::command::Command;
use crate::config::EngineConfig;
use crate::event::{EventLog, TurnEvent};
use crate::resolve::{Resolution, resolve_command};
use crate::systems;
use crate::visibility::{VisibilityEngine, refresh_visibility};

// =============================================================================
// Scheduler State
// =============================================================================

/// Where the scheduler is in its cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SchedulerState {
    /// Looking for the next actor.
    SelectingActor,
    /// Suspended until a command is injected for this actor.
    AwaitingInput(EntityId),
    /// Applying a command.
    ResolvingCommand(EntityId),
    /// Running decay, regeneration, and spawning.
    PostCycle,
    /// The player died. Terminal.
    GameOver,
}

/// What one call to [`Scheduler::step`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The player must supply a command. Nothing changed.
    AwaitingInput {
        /// Who is waiting.
        actor: EntityId,
    },
    /// An actor took its turn.
    Acted {
        /// Who acted.
        actor: EntityId,
        /// What it did.
        command: Command,
    },
    /// An actor asked to end the run.
    ShutdownRequested {
        /// Who asked.
        actor: EntityId,
    },
    /// No entity can act.
    Idle,
    /// The player is dead.
    GameOver,
}

// =============================================================================
// Scheduler
// =============================================================================

/// Drives turns one actor at a time.
#[derive(Clone, Debug)]
pub struct Scheduler {
    config: EngineConfig,
    vision: VisibilityEngine,
    rng: ChaCha8Rng,
    log: EventLog,
    state: SchedulerState,
    /// Actors of the current pass, in creation order
    pass: Vec<EntityId>,
    cursor: usize,
    pending: Option<Command>,
    cycle: u64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Scheduler {
    /// Creates a scheduler. The RNG is seeded from `config.seed`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            vision: VisibilityEngine::from_config(&config),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            log: EventLog::new(config.event_log_capacity),
            state: SchedulerState::SelectingActor,
            pass: Vec::new(),
            cursor: 0,
            pending: None,
            cycle: 0,
            config,
        }
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// The actor the scheduler is suspended on, if any.
    #[must_use]
    pub fn awaiting(&self) -> Option<EntityId> {
        match self.state {
            SchedulerState::AwaitingInput(actor) => Some(actor),
            _ => None,
        }
    }

    /// Number of completed passes.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Recent events.
    #[must_use]
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// The ray caster used for player view and AI sight.
    #[must_use]
    pub fn vision(&self) -> &VisibilityEngine {
        &self.vision
    }

    /// Returns true if is the game over.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state == SchedulerState::GameOver
    }

    // --- Input hooks ---

    /// True if a command is waiting to be consumed.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Supplies the next player command, replacing any unconsumed one.
    pub fn inject(&mut self, command: Command) {
        trace!(command = %command, "command injected");
        self.pending = Some(command);
    }

    /// Parses and supplies the next player command.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownCommand` fault if `command` is not recognized.
    pub fn inject_str(&mut self, command: &str) -> Result<()> {
        self.inject(command.parse()?);
        Ok(())
    }

    // --- Stepping ---

    /// Advances by at most one turn.
    ///
    /// Suspends with [`StepOutcome::AwaitingInput`] when the selected actor
    /// needs a command and none is pending; repeated calls return the same
    /// outcome without touching positions.
    ///
    /// # Errors
    ///
    /// Propagates faults from command resolution, AI, and post-cycle systems.
    pub fn step(&mut self, world: &mut World) -> Result<StepOutcome> {
        if self.is_over() {
            return Ok(StepOutcome::GameOver);
        }

        let Some(actor) = self.select_actor(world)? else {
            self.state = SchedulerState::SelectingActor;
            return Ok(StepOutcome::Idle);
        };
        mark_current(world, actor);

        let controlled = world.get::<Input>(actor).is_some_and(|input| input.needs_input);
        let command = if controlled {
            match self.pending.take() {
                Some(command) => command,
                None => return self.suspend(world, actor),
            }
        } else {
            ai::decide(world, actor, &self.vision, &self.config, &mut self.rng)?
        };

        self.state = SchedulerState::ResolvingCommand(actor);
        let resolution = resolve_command(world, actor, command, &self.config, &mut self.log)?;

        self.cursor += 1;
        world.remove::<CurrentTurn>(actor);
        if controlled && world.is_live(actor) {
            refresh_visibility(world, actor, &self.vision)?;
        }

        self.state = SchedulerState::SelectingActor;
        match resolution {
            Resolution::Continue => Ok(StepOutcome::Acted { actor, command }),
            Resolution::Quit => Ok(StepOutcome::ShutdownRequested { actor }),
            Resolution::PlayerDied => {
                info!(cycle = self.cycle, "player died");
                self.state = SchedulerState::GameOver;
                self.log.push(TurnEvent::GameOver);
                Ok(StepOutcome::GameOver)
            }
        }
    }

    fn suspend(&mut self, world: &mut World, actor: EntityId) -> Result<StepOutcome> {
        if self.state != SchedulerState::AwaitingInput(actor) {
            trace!(actor = %actor, "awaiting input");
            refresh_visibility(world, actor, &self.vision)?;
            self.state = SchedulerState::AwaitingInput(actor);
        }
        Ok(StepOutcome::AwaitingInput { actor })
    }

    /// Finds the next actor of the current pass, starting a new pass (after
    /// post-cycle work) when the current one is exhausted.
    fn select_actor(&mut self, world: &mut World) -> Result<Option<EntityId>> {
        for _ in 0..2 {
            while let Some(&id) = self.pass.get(self.cursor) {
                if world.is_live(id) && is_actor(world, id) {
                    return Ok(Some(id));
                }
                self.cursor += 1;
            }

            if !self.pass.is_empty() {
                self.post_cycle(world)?;
            }
            self.begin_pass(world);
            if self.pass.is_empty() {
                return Ok(None);
            }
        }
        Ok(None)
    }

    fn begin_pass(&mut self, world: &World) {
        self.pass = world
            .entities()
            .live()
            .iter()
            .copied()
            .filter(|&id| is_actor(world, id))
            .collect();
        self.cursor = 0;
        trace!(actors = self.pass.len(), "pass started");
    }

    fn post_cycle(&mut self, world: &mut World) -> Result<()> {
        self.state = SchedulerState::PostCycle;

        systems::tick_decay(world, &mut self.log);
        systems::regenerate(world);
        systems::spawn_population(world, &self.config, &mut self.rng, &mut self.log)?;

        self.cycle += 1;
        self.log.push(TurnEvent::CycleCompleted { cycle: self.cycle });
        debug!(cycle = self.cycle, "cycle complete");

        self.state = SchedulerState::SelectingActor;
        Ok(())
    }
}

fn is_actor(world: &World, id: EntityId) -> bool {
    world.has::<Input>(id) || world.has::<Ai>(id)
}

/// Moves the [`CurrentTurn`] marker onto `actor`.
fn mark_current(world: &mut World, actor: EntityId) {
    let holders: Vec<EntityId> = world
        .components()
        .current_turn
        .ids()
        .copied()
        .filter(|id| *id != actor)
        .collect();
    for id in holders {
        world.remove::<CurrentTurn>(id);
    }
    world.insert(actor, CurrentTurn);
}
