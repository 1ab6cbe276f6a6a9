//! Fixed-grid runner and result recording.

use crate::error::{KineticsError, KineticsResult};
use crate::integrator::{ForwardEuler, Integrator};
use crate::model::TransientModel;
use fd_core::series::grid_step;

/// Record of a stepped run: one state per grid point.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
}

impl<S> SimRecord<S> {
    /// Project every snapshot onto a scalar.
    pub fn map<F: Fn(&S) -> f64>(&self, f: F) -> Vec<f64> {
        self.x.iter().map(f).collect()
    }
}

/// Step `model` with forward Euler across a uniform `grid`.
///
/// The step is the grid's first interval. Sample `k` holds the state after
/// `k` steps, so sample 0 is the initial state.
pub fn run_on_grid<M: TransientModel>(
    model: &M,
    grid: &[f64],
) -> KineticsResult<SimRecord<M::State>> {
    let dt = grid_step(grid)?;
    if grid[0] != 0.0 {
        return Err(KineticsError::InvalidGrid {
            what: "time grid must start at t = 0",
        });
    }

    let integrator = ForwardEuler;
    let mut x = model.initial_state();
    let mut x_record = Vec::with_capacity(grid.len());
    x_record.push(x.clone());

    for &t in &grid[..grid.len() - 1] {
        x = integrator.step(model, t, &x, dt)?;
        x_record.push(x.clone());
    }

    Ok(SimRecord {
        t: grid.to_vec(),
        x: x_record,
    })
}
