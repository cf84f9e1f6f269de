use std::time::Instant;

use petalfall::config::SimulationConfig;
use petalfall::constants::{
    DEMO_FRAME_COUNT, DOMAIN_HEIGHT, DOMAIN_WIDTH, FIXED_TIMESTEP, POINTER_INFLUENCE_RADIUS,
};
use petalfall::force_field::ForceField;
use petalfall::plotter::{Plotter, PlotterSvg};
use petalfall::simulation::FlowersManager;

// Headless demo: run the field at a fixed timestep, then export one frame
// as SVG the same way a download trigger would.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = SimulationConfig::default();
    let mut manager = FlowersManager::new();

    let start = Instant::now();
    for frame in 0..DEMO_FRAME_COUNT {
        let force_field = ForceField::new(
            config.pointer_position,
            POINTER_INFLUENCE_RADIUS,
            config.flee_pointer,
        );

        manager.manage(DOMAIN_WIDTH, DOMAIN_HEIGHT, &config);
        manager.update(FIXED_TIMESTEP, &force_field, &config);

        if frame % 300 == 0 {
            log::info!("frame {}: {} flowers alive", frame, manager.flower_count());
        }
    }
    log::info!(
        "simulated {} frames in {:.2?}",
        DEMO_FRAME_COUNT,
        start.elapsed()
    );

    let mut plotter = PlotterSvg::new(DOMAIN_WIDTH, DOMAIN_HEIGHT);
    plotter.initialize(
        config.background_color,
        config.lines_color,
        config.petal_opacity,
    );
    manager.draw(&mut plotter, &config);
    plotter.finalize();

    let output_path = "flowers.svg";
    std::fs::write(output_path, plotter.svg())?;
    println!("Wrote snapshot to {}", output_path);

    Ok(())
}
