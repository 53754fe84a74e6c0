pub mod play;

use std::path::Path;

use rw_core::World;

/// Load a world directory, turning setup errors into a message for stderr.
fn load_world(dir: &Path) -> Result<World, String> {
    let world = rw_core::load_world(dir).map_err(|e| e.to_string())?;
    tracing::info!(
        dir = %dir.display(),
        things = world.thing_count(),
        relations = world.graph().len(),
        "world ready"
    );
    Ok(world)
}
