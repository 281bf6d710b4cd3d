use scene_physics::*;

/// Prints what a real simulation world would be fed each frame.
struct PrintingWorld;

impl WorldBinding for PrintingWorld {
    fn name(&self) -> &str {
        "printing"
    }

    fn start(&mut self, settings: &WorldSettings) {
        println!("world start: {settings:?}");
    }

    fn step(&mut self, settings: &WorldSettings, dt: f64) {
        println!(
            "world step dt={dt:.4} gravity={:?} (simulation units)",
            settings.world_gravity()
        );
    }

    fn stop(&mut self) {
        println!("world stop");
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let saved = SerializerElement::from_json(
        r#"{"behaviorsSharedData":{"PhysicsBehavior::PhysicsBehavior":{"gravityY":980,"scaleX":50,"scaleY":50}}}"#,
    )?;

    let mut host = BehaviorHost::default();
    let scene = host.load_scene("demo", &saved);
    let physics = BehaviorTypeId::physics();
    host.reference_behavior(scene, &physics)?;

    if let Some(data) = host.physics_data(scene) {
        println!(
            "a 200px crate is {} simulation units wide",
            data.to_world_units(200.0)
        );
    }

    host.start_world(scene, Box::new(PrintingWorld))?;
    host.step_scene(scene, 1.0 / 60.0)?;

    #[cfg(feature = "editor")]
    {
        let accepted = host.update_property(scene, &physics, "scale", "25");
        let rejected = host.update_property(scene, &physics, "scale", "-1");
        println!("edit scale=25 accepted: {accepted}, scale=-1 accepted: {rejected}");
        host.step_scene(scene, 1.0 / 60.0)?;
    }

    println!("{}", host.save_scene(scene)?.to_json_pretty()?);
    host.unload_scene(scene)?;
    Ok(())
}
