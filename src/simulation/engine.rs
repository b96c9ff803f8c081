/*!
 * Simulation Engine
 * The single discrete-event loop every policy runs through
 *
 * Each instant is processed in a fixed order: time cap, arrivals, I/O
 * completions, aging, then selection. Selection either dispatches onto an
 * idle CPU, preempts the running record, advances the running record by
 * one tick, or fast-forwards an idle CPU to the next event.
 */

use super::config::IoTiming;
use super::events::{accumulate_wait, apply_aging, apply_arrivals, apply_io_completions, next_event_time};
use super::io::IoModel;
use crate::core::types::{Pid, SimulationResult, Slot, Tick, TimeCap};
use crate::monitoring::{GanttLog, Occupant, RunCounters};
use crate::process::{ProcessState, ProcessTable};
use crate::scheduler::SelectionStrategy;
use tracing::{debug, trace, warn};

/// Loop parameters not owned by the strategy
#[derive(Debug, Clone, Copy)]
pub(crate) struct EngineSettings {
    pub time_cap: TimeCap,
    pub switch_cost: Tick,
    pub io_timing: IoTiming,
}

/// The record currently on the CPU and when its segment began
#[derive(Debug, Clone, Copy)]
struct OnCpu {
    slot: Slot,
    since: Tick,
}

pub(crate) struct Engine<'a> {
    table: ProcessTable,
    strategy: Box<dyn SelectionStrategy>,
    io: &'a mut dyn IoModel,
    settings: EngineSettings,
    gantt: GanttLog,
    now: Tick,
    running: Option<OnCpu>,
    last_process: Option<Pid>,
    next_aging_at: Option<Tick>,
    idle_time: Tick,
    context_switches: u64,
    preemptions: u64,
}

impl<'a> Engine<'a> {
    pub(crate) fn new(
        table: ProcessTable,
        strategy: Box<dyn SelectionStrategy>,
        io: &'a mut dyn IoModel,
        settings: EngineSettings,
    ) -> SimulationResult<Self> {
        // A few segments per record covers most runs
        let gantt = GanttLog::with_capacity(table.len().saturating_mul(4))?;
        let next_aging_at = strategy
            .aging()
            .filter(|aging| aging.interval > 0)
            .map(|aging| aging.interval);

        Ok(Self {
            table,
            strategy,
            io,
            settings,
            gantt,
            now: 0,
            running: None,
            last_process: None,
            next_aging_at,
            idle_time: 0,
            context_switches: 0,
            preemptions: 0,
        })
    }

    /// Drive the loop until every record terminates, nothing can happen any
    /// more, or the time cap is reached
    pub(crate) fn run(mut self) -> SimulationResult<(ProcessTable, GanttLog, RunCounters)> {
        self.strategy.prepare(&mut self.table);

        loop {
            if self.table.all_terminated() {
                break;
            }
            if self.settings.time_cap.reached(self.now) {
                self.cut_off()?;
                break;
            }

            self.poll_events()?;

            let candidate = self.strategy.select_next(&self.table, self.now);
            match (self.running, candidate) {
                (None, Some(slot)) => self.switch_to(slot)?,
                (None, None) => {
                    if !self.idle_until_next_event() {
                        break;
                    }
                }
                (Some(on_cpu), Some(slot)) if self.strategy.preempts(&self.table, on_cpu.slot, slot) => {
                    self.preempt(on_cpu)?;
                    self.switch_to(slot)?;
                }
                (Some(on_cpu), _) => self.tick(on_cpu)?,
            }
        }

        let counters = RunCounters {
            final_time: self.now,
            idle_time: self.idle_time,
            context_switches: self.context_switches,
            switch_cost: self.settings.switch_cost,
            preemptions: self.preemptions,
        };
        Ok((self.table, self.gantt, counters))
    }

    /// Arrivals, I/O completions and a due aging pass at the current instant
    fn poll_events(&mut self) -> SimulationResult<()> {
        apply_arrivals(&mut self.table, self.now)?;
        apply_io_completions(&mut self.table, self.now)?;

        if let (Some(due), Some(aging)) = (self.next_aging_at, self.strategy.aging()) {
            if self.now >= due {
                let promoted = apply_aging(&mut self.table, &aging);
                if promoted > 0 {
                    debug!(now = self.now, promoted, "aging pass");
                }
                self.next_aging_at = Some((self.now / aging.interval + 1) * aging.interval);
            }
        }
        Ok(())
    }

    /// Pay the switch cost if the CPU changes hands, then dispatch `slot`,
    /// or a record that arrived or aged into a strictly better position
    /// while switching. The previous occupant never wins that re-pick.
    fn switch_to(&mut self, mut slot: Slot) -> SimulationResult<()> {
        if let Some(prev) = self
            .last_process
            .filter(|&prev| prev != self.table.get(slot).pid)
        {
            self.context_switches += 1;
            let start = self.now;
            for _ in 0..self.settings.switch_cost {
                if self.settings.time_cap.reached(self.now) {
                    break;
                }
                accumulate_wait(&mut self.table, 1);
                self.now += 1;
                self.poll_events()?;
            }
            self.gantt.record(Occupant::ContextSwitch, start, self.now);

            if self.settings.time_cap.reached(self.now) {
                trace!(now = self.now, "time cap reached during context switch");
                return Ok(());
            }
            if let Some(best) = self.strategy.select_next(&self.table, self.now) {
                if self.table.get(best).pid != prev && self.strategy.preempts(&self.table, slot, best) {
                    slot = best;
                }
            }
        }

        let pid = self.table.get(slot).pid;
        let quantum = self.strategy.quantum_for(self.table.get(slot));
        self.table.get_mut(slot).dispatch(self.now, quantum)?;
        self.strategy.on_dispatch(slot, self.table.get(slot));
        self.running = Some(OnCpu {
            slot,
            since: self.now,
        });
        self.last_process = Some(pid);
        debug!(pid, now = self.now, ?quantum, "dispatched");
        Ok(())
    }

    /// Take the CPU away from the running record
    fn preempt(&mut self, on_cpu: OnCpu) -> SimulationResult<()> {
        self.close_segment(on_cpu);
        let now = self.now;
        let record = self.table.get_mut(on_cpu.slot);

        if record.has_pending_io() && self.io.block_on_preemption(record, now) {
            record.block_for_io(now)?;
            debug!(pid = record.pid, now, "preempted into io");
        } else {
            record.requeue()?;
            debug!(pid = record.pid, now, "preempted");
        }
        self.preemptions += 1;
        Ok(())
    }

    /// Advance the running record by one tick and settle what follows
    fn tick(&mut self, on_cpu: OnCpu) -> SimulationResult<()> {
        accumulate_wait(&mut self.table, 1);
        self.table.get_mut(on_cpu.slot).run_tick();
        self.now += 1;

        let now = self.now;
        let mid_burst = self.settings.io_timing == IoTiming::MidBurst;
        let record = self.table.get(on_cpu.slot);

        if record.remaining_time() == 0 {
            self.close_segment(on_cpu);
            let record = self.table.get_mut(on_cpu.slot);
            if record.has_pending_io() {
                record.block_for_io(now)?;
                debug!(pid = record.pid, now, "burst done, blocked on io");
            } else {
                record.terminate(now)?;
                debug!(pid = record.pid, now, "terminated");
            }
        } else if mid_burst && record.has_pending_io() && self.io.start_io_mid_burst(record, now) {
            self.close_segment(on_cpu);
            let record = self.table.get_mut(on_cpu.slot);
            record.block_for_io(now)?;
            debug!(pid = record.pid, now, remaining = record.remaining_time(), "mid-burst io");
        } else if record.quantum_expired() {
            self.close_segment(on_cpu);
            let record = self.table.get_mut(on_cpu.slot);
            record.requeue()?;
            trace!(pid = record.pid, now, "quantum expired");
        }
        Ok(())
    }

    /// Jump an idle CPU to the next arrival or I/O completion, clamped by
    /// the time cap. Returns false when no event will ever occur.
    fn idle_until_next_event(&mut self) -> bool {
        let Some(next) = next_event_time(&self.table, self.now) else {
            warn!(
                now = self.now,
                unfinished = self.table.len() - self.table.count_in(ProcessState::Terminated),
                "no runnable record and no pending event"
            );
            return false;
        };

        let target = self.settings.time_cap.clamp(next);
        self.gantt.record(Occupant::Idle, self.now, target);
        self.idle_time += target - self.now;
        trace!(from = self.now, to = target, "idle");
        self.now = target;
        true
    }

    /// Time cap reached: the running record goes back to READY
    fn cut_off(&mut self) -> SimulationResult<()> {
        if let Some(on_cpu) = self.running {
            self.close_segment(on_cpu);
            self.table.get_mut(on_cpu.slot).requeue()?;
        }
        debug!(now = self.now, "time cap reached");
        Ok(())
    }

    fn close_segment(&mut self, on_cpu: OnCpu) {
        let pid = self.table.get(on_cpu.slot).pid;
        self.gantt.record(Occupant::Process(pid), on_cpu.since, self.now);
        self.running = None;
    }
}
