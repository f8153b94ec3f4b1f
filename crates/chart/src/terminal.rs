use dashmap::DashMap;
use finboard_core::chart::entity::{ChartConfig, ChartKind};
use finboard_core::chart::error::ChartError;
use finboard_core::chart::port::{ChartInstance, ChartRenderer};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// # Summary
/// Renders charts as text so the CLI can show them inline.
///
/// # Invariants
/// * Every live chart is registered under its id until it is destroyed.
/// * An empty canvas name is treated as a missing canvas.
#[derive(Default)]
pub struct TerminalRenderer {
    live: Arc<DashMap<u64, (String, ChartConfig)>>,
    next_id: AtomicU64,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of charts created and not yet destroyed.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Ids of the live charts drawn on `canvas`.
    pub fn live_on(&self, canvas: &str) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .live
            .iter()
            .filter(|entry| entry.value().0 == canvas)
            .map(|entry| *entry.key())
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Renders the live chart on `canvas`, if there is one.
    pub fn draw(&self, canvas: &str) -> Option<String> {
        let id = self.live_on(canvas).into_iter().last()?;
        self.live.get(&id).map(|entry| render_text(&entry.value().1))
    }
}

impl ChartRenderer for TerminalRenderer {
    fn create(
        &self,
        canvas: &str,
        config: ChartConfig,
    ) -> Result<Box<dyn ChartInstance>, ChartError> {
        if canvas.trim().is_empty() {
            return Err(ChartError::CanvasUnavailable(
                "canvas name is empty".to_string(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.live
            .insert(id, (canvas.to_string(), config.clone()));

        Ok(Box::new(TerminalChart {
            id,
            config,
            live: Arc::clone(&self.live),
        }))
    }
}

struct TerminalChart {
    id: u64,
    config: ChartConfig,
    live: Arc<DashMap<u64, (String, ChartConfig)>>,
}

impl ChartInstance for TerminalChart {
    fn id(&self) -> u64 {
        self.id
    }

    fn config(&self) -> &ChartConfig {
        &self.config
    }

    fn destroy(self: Box<Self>) {
        self.live.remove(&self.id);
    }
}

/// # Summary
/// Formats a chart as one text line per series.
///
/// # Logic
/// * Line charts become sparklines scaled to the series' own min and max.
/// * Bar charts list each label with its value.
pub fn render_text(config: &ChartConfig) -> String {
    let mut lines = Vec::with_capacity(config.data.series.len());
    for series in &config.data.series {
        let body = match config.kind {
            ChartKind::Line => sparkline(&series.values),
            ChartKind::Bar => series
                .points(&config.data.labels)
                .map(|(x, y)| format!("{x}={y:.2}"))
                .collect::<Vec<_>>()
                .join("  "),
        };
        lines.push(format!("{:<20} {} {}", series.label, series.color, body));
    }
    lines.join("\n")
}

/// Maps each finite value onto one of eight block characters; non-finite values become spaces.
pub fn sparkline(values: &[f64]) -> String {
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = max - min;

    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return ' ';
            }
            let ratio = if span > 0.0 { (v - min) / span } else { 0.5 };
            level_for(ratio)
        })
        .collect()
}

fn level_for(ratio: f64) -> char {
    let steps = [1u8, 2, 3, 4, 5, 6, 7, 8];
    steps
        .iter()
        .zip(SPARK_LEVELS.iter())
        .find(|(step, _)| ratio <= f64::from(**step) / 8.0)
        .map(|(_, c)| *c)
        .unwrap_or('█')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparkline_scales_between_min_and_max() {
        assert_eq!(sparkline(&[1.0, 2.0, 3.0]), "▁▄█");
        assert_eq!(sparkline(&[5.0, 5.0]), "▄▄");
        assert_eq!(sparkline(&[1.0, f64::NAN, 3.0]), "▁ █");
        assert_eq!(sparkline(&[]), "");
    }

    #[test]
    fn test_empty_canvas_is_unavailable() {
        let renderer = TerminalRenderer::new();
        let config = crate::series::placeholder_chart();
        assert!(matches!(
            renderer.create("  ", config),
            Err(ChartError::CanvasUnavailable(_))
        ));
        assert_eq!(renderer.live_count(), 0);
    }

    #[test]
    fn test_destroy_unregisters_chart() {
        let renderer = TerminalRenderer::new();
        let chart = renderer
            .create("price", crate::series::placeholder_chart())
            .unwrap();
        assert_eq!(renderer.live_on("price"), vec![chart.id()]);
        chart.destroy();
        assert_eq!(renderer.live_count(), 0);
        assert!(renderer.draw("price").is_none());
    }
}
