use std::collections::VecDeque;

use serde::Serialize;
use web_time::{Duration, Instant};

use recall_core::{Instance, RenderError, RenderStats, Runtime};

/// Rolling render metrics for one runtime.
pub struct Hud {
    pub inspector_enabled: bool,
    render_count: u64,
    last_render: Option<Duration>,
    render_ms_smooth: f32,
    pub metrics: Option<Metrics>,
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

impl Hud {
    pub fn new() -> Self {
        Self {
            inspector_enabled: false,
            render_count: 0,
            last_render: None,
            render_ms_smooth: 0.0,
            metrics: None,
        }
    }

    pub fn toggle_inspector(&mut self) {
        self.inspector_enabled = !self.inspector_enabled;
    }

    pub fn record(&mut self, stats: &RenderStats, elapsed: Duration) {
        self.render_count += 1;
        self.last_render = Some(elapsed);

        let ms = elapsed.as_secs_f32() * 1000.0;
        // simple EMA
        let a = 0.2;
        self.render_ms_smooth = if self.render_count == 1 {
            ms
        } else {
            (1.0 - a) * self.render_ms_smooth + a * ms
        };

        self.metrics = Some(Metrics {
            effects_fired: stats.effects_fired,
            memos_computed: stats.memos_computed,
            state_slots: stats.slots.state,
            effect_slots: stats.slots.effect,
            memo_slots: stats.slots.memo,
        });
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    pub fn last_render(&self) -> Option<Duration> {
        self.last_render
    }

    /// One-line summary of the latest render.
    pub fn overlay(&self) -> String {
        let mut lines = vec![format!("render: {}", self.render_count)];
        if let Some(last) = self.last_render {
            lines.push(format!("last: {:.3} ms", last.as_secs_f32() * 1000.0));
        }
        lines.push(format!("avg: {:.3} ms", self.render_ms_smooth));
        if let Some(m) = &self.metrics {
            lines.push(format!(
                "fired: {} effects, {} memos",
                m.effects_fired, m.memos_computed
            ));
            lines.push(format!(
                "slots: {} state, {} effect, {} memo",
                m.state_slots, m.effect_slots, m.memo_slots
            ));
        }
        lines.join("  |  ")
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Metrics {
    pub effects_fired: usize,
    pub memos_computed: usize,
    pub state_slots: usize,
    pub effect_slots: usize,
    pub memo_slots: usize,
}

/// Wraps [`Runtime::render`], timing each pass and keeping a bounded history of
/// its [`RenderStats`].
pub struct Inspector {
    pub hud: Hud,
    history: VecDeque<RenderStats>,
    capacity: usize,
}

impl Default for Inspector {
    fn default() -> Self {
        Self::new()
    }
}

impl Inspector {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hud: Hud::new(),
            history: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn render<I, F>(&mut self, runtime: &mut Runtime, component: F) -> Result<I, RenderError>
    where
        I: Instance,
        F: FnOnce() -> I,
    {
        let start = Instant::now();
        let instance = runtime.render(component)?;
        let elapsed = start.elapsed();

        if let Some(stats) = runtime.last_stats() {
            self.hud.record(&stats, elapsed);
            if self.history.len() == self.capacity {
                self.history.pop_front();
            }
            self.history.push_back(stats);
            if self.hud.inspector_enabled {
                log::info!("[{}] {}", runtime.config().name, self.hud.overlay());
            }
        }
        Ok(instance)
    }

    pub fn history(&self) -> impl Iterator<Item = &RenderStats> {
        self.history.iter()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.history).unwrap_or("[]".into())
    }
}
