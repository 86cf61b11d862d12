//! Quantum state visualizer
//!
//! A grid of dark green and grey cells that flicker whenever the worker
//! asks for it. Looks busy, means nothing.

use eframe::egui;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const DEFAULT_GRID_SIZE: usize = 20;

/// Largest grid the window will draw
pub const MAX_GRID_SIZE: usize = 200;

/// Smallest size the grid is drawn at
pub const MIN_SIZE: f32 = 200.0;

const GREEN_CHANCE: f64 = 0.7;
const FLICKER_CHANCE: f64 = 0.2;

/// Random cell color, biased towards translucent dark greens
pub fn random_cell_color<R: Rng + ?Sized>(rng: &mut R) -> egui::Color32 {
    if rng.random_bool(GREEN_CHANCE) {
        egui::Color32::from_rgba_unmultiplied(
            0,
            rng.random_range(50..=150),
            0,
            rng.random_range(50..=150),
        )
    } else {
        egui::Color32::from_rgb(
            rng.random_range(0..=50),
            rng.random_range(0..=50),
            rng.random_range(0..=50),
        )
    }
}

pub struct QuantumGrid {
    size: usize,
    cells: Vec<egui::Color32>,
    rng: StdRng,
}

impl QuantumGrid {
    pub fn new(size: usize) -> Self {
        Self::with_rng(size, StdRng::from_os_rng())
    }

    /// Grid driven by a fixed seed
    pub fn seeded(size: usize, seed: u64) -> Self {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    fn with_rng(size: usize, mut rng: StdRng) -> Self {
        let size = size.clamp(1, MAX_GRID_SIZE);
        let cells = (0..size * size).map(|_| random_cell_color(&mut rng)).collect();
        Self { size, cells, rng }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<egui::Color32> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells.get(row * self.size + col).copied()
    }

    /// Recolor roughly a fifth of the cells for a "live" feel
    pub fn scramble(&mut self) {
        for cell in &mut self.cells {
            if self.rng.random_bool(FLICKER_CHANCE) {
                *cell = random_cell_color(&mut self.rng);
            }
        }
    }

    /// Paint the grid into all the space the layout offers
    pub fn show(&self, ui: &mut egui::Ui, height: f32) -> egui::Response {
        let desired = egui::vec2(
            ui.available_width().max(MIN_SIZE),
            height.max(MIN_SIZE),
        );
        let (response, painter) = ui.allocate_painter(desired, egui::Sense::hover());
        let rect = response.rect;

        let cell_w = rect.width() / self.size as f32;
        let cell_h = rect.height() / self.size as f32;

        for row in 0..self.size {
            for col in 0..self.size {
                let min = egui::pos2(
                    rect.left() + col as f32 * cell_w,
                    rect.top() + row as f32 * cell_h,
                );
                let cell_rect = egui::Rect::from_min_size(min, egui::vec2(cell_w, cell_h));
                painter.rect_filled(cell_rect, 0.0, self.cells[row * self.size + col]);
            }
        }

        response
    }
}

impl Default for QuantumGrid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE)
    }
}
