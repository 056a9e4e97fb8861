mod light_source;
mod simulation_desc;

pub use light_source::LightSource;
pub use simulation_desc::SimulationDesc;
