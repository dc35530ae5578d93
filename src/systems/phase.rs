//! Scenario phase systems.
//!
//! - [`observe_phase_signal`] – resolves a [`PhaseSignal`] against the
//!   [`PhaseController`], applies legal transitions, runs the enter step of
//!   the new phase and triggers a [`PhaseChangeEvent`]
//! - [`phase_controller_system`] – advances the multi-tick part of the
//!   current phase (overlay fades, scene loading, optional work timeout)
//!
//! # Phase flow
//!
//! ```text
//! Working ──AnomalyActivated──▶ Anomaly ──ApproachComplete──▶ Transitioning
//!    │                             │                               │
//!    └────────CleanupRequested─────┴───────────────────────────────┴──▶ Cleared
//! ```
//!
//! Entering a phase only issues requests to the collaborators that are
//! present; a missing collaborator skips its step. When the step that would
//! have ended the phase is missing (no viewpoint, no scene loader) the run
//! stays where it is.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use bevy_ecs::system::SystemParam;
use log::{debug, info, warn};

use crate::components::anomaly::AnomalyApproach;
use crate::components::conveyor::ConveyorBelt;
use crate::components::grab::Grabbable;
use crate::components::pose::Pose;
use crate::components::presence::Presence;
use crate::components::sortable::{Spawned, Transient};
use crate::events::cue::CueCmd;
use crate::events::phase::{PhaseChangeEvent, PhaseSignal};
use crate::resources::overlay::Overlays;
use crate::resources::phase::{Phase, PhaseController, PhaseStage};
use crate::resources::scene::{LoadStatus, SceneTransition};
use crate::resources::spawner::SpawnScheduler;
use crate::resources::viewpoint::Viewpoint;
use crate::resources::worldtime::WorldTime;

/// Bundled system parameters for entering and advancing phases.
#[derive(SystemParam)]
pub struct PhaseRunnerContext<'w, 's> {
    pub commands: Commands<'w, 's>,
    pub controller: ResMut<'w, PhaseController>,
    pub scheduler: Option<ResMut<'w, SpawnScheduler>>,
    pub overlays: Option<ResMut<'w, Overlays>>,
    pub scene: Option<ResMut<'w, SceneTransition>>,
    pub viewpoint: Option<Res<'w, Viewpoint>>,
    pub belts: Query<'w, 's, &'static mut ConveyorBelt>,
    pub anomalies: Query<
        'w,
        's,
        (
            Entity,
            &'static mut AnomalyApproach,
            &'static mut Pose,
            &'static mut Presence,
            &'static mut Grabbable,
        ),
    >,
    pub disposables:
        Query<'w, 's, (Entity, Has<Transient>), Or<(With<Spawned>, With<Transient>)>>,
    pub cues: MessageWriter<'w, CueCmd>,
    pub world_time: Res<'w, WorldTime>,
}

/// Observer applying phase signals.
///
/// Signals that are not legal in the current phase are logged and dropped.
pub fn observe_phase_signal(trigger: On<PhaseSignal>, mut ctx: PhaseRunnerContext) {
    let signal = *trigger.event();
    let Some(next) = ctx.controller.resolve(signal) else {
        debug!(
            "Ignoring {:?} in {:?} ({:?})",
            signal,
            ctx.controller.current(),
            ctx.controller.stage()
        );
        return;
    };
    let previous = ctx.controller.apply(next);
    info!("Phase {:?} -> {:?} on {:?}", previous, next, signal);
    match next {
        Phase::Working => enter_working(&mut ctx),
        Phase::Anomaly => enter_anomaly(&mut ctx),
        Phase::Transitioning => enter_transitioning(&mut ctx),
        Phase::Cleared => enter_cleared(&mut ctx),
    }
    ctx.commands.trigger(PhaseChangeEvent {
        previous,
        current: next,
    });
}

/// Advance the current phase by one tick.
pub fn phase_controller_system(mut ctx: PhaseRunnerContext) {
    let dt = ctx.world_time.delta;
    ctx.controller.advance(dt);
    match ctx.controller.stage() {
        PhaseStage::Working => {
            if let Some(limit) = ctx.controller.work_duration {
                if ctx.controller.time_in_phase() >= limit {
                    info!("Work duration of {:.1}s elapsed", limit);
                    ctx.commands.trigger(PhaseSignal::AnomalyActivated);
                }
            }
        }
        PhaseStage::GlitchFade => {
            let done = ctx.overlays.as_mut().is_none_or(|o| o.glitch.tick(dt));
            if done {
                reveal_and_approach(&mut ctx);
            }
        }
        PhaseStage::BlackoutFade => {
            let done = ctx.overlays.as_mut().is_none_or(|o| o.blackout.tick(dt));
            if done {
                request_next_scene(&mut ctx);
            }
        }
        PhaseStage::Loading => match ctx.scene.as_mut().map(|s| s.poll(dt)) {
            Some(LoadStatus::Done) => {
                info!("Scene '{}' loaded, handing off", ctx.controller.next_scene);
                ctx.controller.set_stage(PhaseStage::Handoff);
            }
            Some(_) => {}
            None => {
                warn!("Scene loader went away while loading");
                ctx.controller.set_stage(PhaseStage::Stalled);
            }
        },
        _ => {}
    }
}

fn set_belts(ctx: &mut PhaseRunnerContext, running: bool) {
    for mut belt in ctx.belts.iter_mut() {
        if running {
            belt.start();
        } else {
            belt.stop();
        }
    }
}

fn stop_spawning(ctx: &mut PhaseRunnerContext) {
    if let Some(scheduler) = ctx.scheduler.as_mut() {
        scheduler.stop();
    }
}

fn reset_anomalies(ctx: &mut PhaseRunnerContext) {
    for (_, mut approach, mut pose, mut presence, mut grab) in ctx.anomalies.iter_mut() {
        approach.reset(&mut pose, &mut presence, &mut grab);
    }
}

fn enter_working(ctx: &mut PhaseRunnerContext) {
    set_belts(ctx, true);
    if let Some(scheduler) = ctx.scheduler.as_mut() {
        scheduler.start();
    }
    reset_anomalies(ctx);
    if let Some(overlays) = ctx.overlays.as_mut() {
        overlays.hide_all();
    }
    ctx.controller.set_stage(PhaseStage::Working);
}

fn enter_anomaly(ctx: &mut PhaseRunnerContext) {
    stop_spawning(ctx);
    set_belts(ctx, false);
    for (entity, transient) in ctx.disposables.iter() {
        if transient {
            ctx.commands.entity(entity).try_despawn();
        }
    }
    let glitch_fade = ctx.controller.glitch_fade;
    if let Some(overlays) = ctx.overlays.as_mut() {
        overlays.glitch.begin_fade(1.0, glitch_fade);
        ctx.controller.set_stage(PhaseStage::GlitchFade);
        return;
    }
    reveal_and_approach(ctx);
}

fn reveal_and_approach(ctx: &mut PhaseRunnerContext) {
    ctx.controller.set_stage(PhaseStage::Approaching);
    let viewpoint = ctx.viewpoint.as_deref().copied();
    let mut started = 0;
    for (entity, mut approach, mut pose, mut presence, mut grab) in ctx.anomalies.iter_mut() {
        approach.reveal(&mut pose, &mut presence, &mut grab);
        ctx.cues.write(CueCmd::GlitchParticles { body: entity });
        if approach.begin_approach(*pose, viewpoint.as_ref()) {
            started += 1;
        }
    }
    if started == 0 {
        warn!("No anomaly approach could start; staying in the anomaly phase");
    } else {
        debug!("{} anomaly approach(es) started", started);
    }
}

fn enter_transitioning(ctx: &mut PhaseRunnerContext) {
    let blackout_fade = ctx.controller.blackout_fade;
    if let Some(overlays) = ctx.overlays.as_mut() {
        overlays.blackout.begin_fade(1.0, blackout_fade);
        ctx.controller.set_stage(PhaseStage::BlackoutFade);
        return;
    }
    request_next_scene(ctx);
}

fn request_next_scene(ctx: &mut PhaseRunnerContext) {
    let name = ctx.controller.next_scene.clone();
    match ctx.scene.as_mut() {
        Some(scene) => {
            scene.request(&name);
            ctx.controller.set_stage(PhaseStage::Loading);
        }
        None => {
            warn!("No scene loader registered; cannot load '{}'", name);
            ctx.controller.set_stage(PhaseStage::Stalled);
        }
    }
}

fn enter_cleared(ctx: &mut PhaseRunnerContext) {
    stop_spawning(ctx);
    set_belts(ctx, false);
    reset_anomalies(ctx);
    let mut removed = 0;
    for (entity, _) in ctx.disposables.iter() {
        ctx.commands.entity(entity).try_despawn();
        removed += 1;
    }
    info!("Cleanup removed {} bodies", removed);
    ctx.controller.set_stage(PhaseStage::Cleared);
}
