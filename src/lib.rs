//! Field of procedurally generated flowers. Each stem is a Verlet rope and
//! each corolla sheds petals over time; a population manager recycles dead
//! flowers to keep the on-screen density steady.

pub mod config;
pub mod constants;
pub mod corolla;
pub mod flower;
pub mod force_field;
pub mod noise;
pub mod plotter;
pub mod rope;
pub mod simulation;
pub mod utils;

pub use config::SimulationConfig;
pub use corolla::{Corolla, Petal, PetalState};
pub use flower::Flower;
pub use force_field::ForceField;
pub use noise::Noise;
pub use plotter::{Color, Ellipse, Plotter, PlotterSvg, Polyline};
pub use rope::Rope;
pub use simulation::{FlowersManager, SimRng};
