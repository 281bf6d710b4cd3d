use std::{any::Any, cell::RefCell, rc::Rc};

use scene_physics::{
    BehaviorCatalog, BehaviorHost, BehaviorSharedData, BehaviorTypeId, DVec2, HostError,
    ScenePhysicsData, SerializerElement, WorldBinding, WorldSettings,
};

thread_local! {
    static EVENTS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn record(event: impl Into<String>) {
    EVENTS.with(|events| events.borrow_mut().push(event.into()));
}

fn take_events() -> Vec<String> {
    EVENTS.with(|events| std::mem::take(&mut *events.borrow_mut()))
}

/// Shared data of a second behavior type that reports when it is destroyed.
#[derive(Debug, Clone, Default)]
struct ProbeSharedData {
    label: String,
}

impl Drop for ProbeSharedData {
    fn drop(&mut self) {
        record("probe dropped");
    }
}

impl BehaviorSharedData for ProbeSharedData {
    fn clone_box(&self) -> Box<dyn BehaviorSharedData> {
        Box::new(self.clone())
    }

    fn initialize_content(&self, content: &mut SerializerElement) {
        content.set_child_value("label", "");
    }

    fn unserialize_from(&mut self, content: &SerializerElement) {
        self.label = content
            .child("label")
            .and_then(SerializerElement::get_string)
            .unwrap_or_default()
            .to_owned();
    }

    fn serialize_to(&self, content: &mut SerializerElement) {
        content.set_child_value("label", self.label.as_str());
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn probe_type() -> BehaviorTypeId {
    BehaviorTypeId::new("Test::Probe")
}

fn probe_factory() -> Box<dyn BehaviorSharedData> {
    Box::new(ProbeSharedData::default())
}

fn host() -> BehaviorHost {
    let mut catalog = BehaviorCatalog::with_builtin();
    catalog.register(probe_type(), probe_factory);
    BehaviorHost::new(catalog)
}

/// World binding that records what it was given.
#[derive(Default)]
struct RecordingWorld {
    steps: Rc<RefCell<Vec<WorldSettings>>>,
}

impl WorldBinding for RecordingWorld {
    fn name(&self) -> &str {
        "recording"
    }

    fn start(&mut self, settings: &WorldSettings) {
        record(format!("world started scale={}", settings.world_scale));
    }

    fn step(&mut self, settings: &WorldSettings, _dt: f64) {
        self.steps.borrow_mut().push(*settings);
    }

    fn stop(&mut self) {
        record("world stopped");
    }
}

fn scene_json(json: &str) -> SerializerElement {
    SerializerElement::from_json(json).expect("parsable scene")
}

#[test]
fn one_configuration_per_scene_and_behavior_type() {
    let mut host = host();
    let scene = host.load_scene("level", &SerializerElement::new());
    let physics = BehaviorTypeId::physics();

    // Three objects carrying the behavior all reference the same record.
    for _ in 0..3 {
        host.reference_behavior(scene, &physics).expect("registered type");
    }
    host.reference_behavior(scene, &probe_type()).expect("registered type");

    let shared = host.scene(scene).expect("loaded").shared();
    assert_eq!(shared.len(), 2);
    let first = host.shared_data(scene, &physics).expect("referenced") as *const _;
    let again = host.reference_behavior(scene, &physics).expect("registered") as *const _;
    assert_eq!(first, again);
}

#[test]
fn scenes_do_not_share_configuration() {
    let mut host = host();
    let a = host.load_scene("a", &scene_json(
        r#"{"behaviorsSharedData":{"PhysicsBehavior::PhysicsBehavior":{"scale":10}}}"#,
    ));
    let b = host.load_scene("b", &SerializerElement::new());
    let physics = BehaviorTypeId::physics();
    host.reference_behavior(a, &physics).expect("registered");
    host.reference_behavior(b, &physics).expect("registered");

    assert_eq!(host.physics_data(a).map(ScenePhysicsData::world_scale), Some(10.0));
    assert_eq!(host.physics_data(b).map(ScenePhysicsData::world_scale), Some(100.0));
}

#[test]
fn shared_data_is_created_lazily_from_persisted_content() {
    let mut host = host();
    let scene = host.load_scene(
        "level",
        &scene_json(
            r#"{"behaviorsSharedData":{"PhysicsBehavior::PhysicsBehavior":{"gravityY":-2,"velocityIterations":4}}}"#,
        ),
    );
    assert!(host.physics_data(scene).is_none());

    host.reference_behavior(scene, &BehaviorTypeId::physics())
        .expect("registered");
    let data = host.physics_data(scene).expect("referenced");
    assert_eq!(data.gravity(), DVec2::new(0.0, -2.0));
    assert_eq!(data.velocity_iterations(), 4);
    assert_eq!(data.world_scale(), 100.0);
}

#[test]
fn unregistered_behavior_types_are_reported() {
    let mut host = BehaviorHost::default();
    let scene = host.load_scene("level", &SerializerElement::new());
    let missing = BehaviorTypeId::new("Platformer::Character");
    assert_eq!(
        host.reference_behavior(scene, &missing).err(),
        Some(HostError::UnknownBehaviorType(missing))
    );
}

#[test]
fn save_keeps_unreferenced_and_unknown_content() {
    let mut host = host();
    let scene = host.load_scene(
        "level",
        &scene_json(
            r#"{"behaviorsSharedData":{
                "PhysicsBehavior::PhysicsBehavior":{"scale":20,"futureKey":"x"},
                "Unknown::Behavior":{"speed":3},
                "Test::Probe":{"label":"kept"}
            }}"#,
        ),
    );
    host.reference_behavior(scene, &BehaviorTypeId::physics())
        .expect("registered");

    let saved = host.save_scene(scene).expect("loaded");
    let shared = saved.child("behaviorsSharedData").expect("shared node");
    let physics = shared
        .child("PhysicsBehavior::PhysicsBehavior")
        .expect("physics content");
    assert_eq!(physics.child("scale").and_then(SerializerElement::get_double), Some(20.0));
    assert_eq!(physics.child("futureKey").and_then(SerializerElement::get_string), Some("x"));
    assert_eq!(
        shared
            .child("Unknown::Behavior")
            .and_then(|node| node.child("speed"))
            .and_then(SerializerElement::get_int),
        Some(3)
    );
    assert_eq!(
        shared
            .child("Test::Probe")
            .and_then(|node| node.child("label"))
            .and_then(SerializerElement::get_string),
        Some("kept")
    );

    let reloaded = host.load_scene("reloaded", &saved);
    host.reference_behavior(reloaded, &BehaviorTypeId::physics())
        .expect("registered");
    assert_eq!(host.physics_data(reloaded), host.physics_data(scene));
}

#[test]
fn world_starts_from_a_snapshot_and_steps_with_current_values() {
    let mut host = host();
    let scene = host.load_scene(
        "level",
        &scene_json(r#"{"behaviorsSharedData":{"PhysicsBehavior::PhysicsBehavior":{"scale":50}}}"#),
    );
    take_events();

    let steps = Rc::new(RefCell::new(Vec::new()));
    let world = RecordingWorld {
        steps: Rc::clone(&steps),
    };
    host.start_world(scene, Box::new(world)).expect("loaded");
    assert_eq!(take_events(), ["world started scale=50"]);

    assert_eq!(host.step_scene(scene, 1.0 / 60.0), Ok(true));
    assert_eq!(steps.borrow()[0].world_scale, 50.0);
    assert_eq!(steps.borrow()[0].velocity_iterations, 8);

    assert_eq!(
        host.start_world(scene, Box::new(RecordingWorld::default())),
        Err(HostError::WorldAlreadyRunning(scene))
    );
    assert_eq!(host.stop_world(scene), Ok(true));
    assert_eq!(take_events(), ["world stopped"]);
    assert_eq!(host.step_scene(scene, 1.0 / 60.0), Ok(false));
}

#[test]
fn unload_stops_world_before_destroying_shared_data() {
    let mut host = host();
    let scene = host.load_scene("level", &SerializerElement::new());
    host.reference_behavior(scene, &probe_type()).expect("registered");
    host.start_world(scene, Box::new(RecordingWorld::default()))
        .expect("loaded");
    take_events();

    host.unload_scene(scene).expect("loaded");

    assert_eq!(take_events(), ["world stopped", "probe dropped"]);
}

#[test]
fn nothing_is_observable_after_unload() {
    let mut host = host();
    let scene = host.load_scene("level", &SerializerElement::new());
    let physics = BehaviorTypeId::physics();
    host.reference_behavior(scene, &physics).expect("registered");
    host.unload_scene(scene).expect("loaded");

    // A new scene may reuse the slot, but the stale handle must not reach it.
    let next = host.load_scene("next", &SerializerElement::new());
    host.reference_behavior(next, &physics).expect("registered");

    assert!(host.scene(scene).is_none());
    assert!(host.shared_data(scene, &physics).is_none());
    assert!(host.physics_data(scene).is_none());
    assert_eq!(
        host.reference_behavior(scene, &physics).err(),
        Some(HostError::UnknownScene(scene))
    );
    assert_eq!(host.step_scene(scene, 0.016), Err(HostError::UnknownScene(scene)));
    assert_eq!(host.save_scene(scene).err(), Some(HostError::UnknownScene(scene)));
    assert_eq!(host.unload_scene(scene), Err(HostError::UnknownScene(scene)));
    assert_eq!(host.scene_count(), 1);
}

#[cfg(feature = "editor")]
#[test]
fn load_edit_unload_cycle() {
    let mut host = host();
    let physics = BehaviorTypeId::physics();
    let scene = host.load_scene("level", &SerializerElement::new());

    let listing = host.properties(scene, &physics).expect("editable");
    assert_eq!(listing["scale"].value, "100");

    assert!(host.update_property(scene, &physics, "scale", "2.5"));
    assert!(!host.update_property(scene, &physics, "scale", "0"));
    assert!(!host.update_property(scene, &physics, "bogus", "1"));
    assert_eq!(host.scene(scene).expect("loaded").shared().len(), 1);

    let listing = host.properties(scene, &physics).expect("editable");
    assert_eq!(listing["scale"].value, "2.5");
    assert_eq!(host.physics_data(scene).map(ScenePhysicsData::world_scale), Some(2.5));

    host.unload_scene(scene).expect("loaded");
    assert!(!host.update_property(scene, &physics, "scale", "3"));
    assert!(host.properties(scene, &physics).is_none());
}

#[cfg(feature = "editor")]
#[test]
fn edits_reach_the_running_world_on_the_next_step() {
    let mut host = host();
    let physics = BehaviorTypeId::physics();
    let scene = host.load_scene("level", &SerializerElement::new());
    let steps = Rc::new(RefCell::new(Vec::new()));
    host.start_world(
        scene,
        Box::new(RecordingWorld {
            steps: Rc::clone(&steps),
        }),
    )
    .expect("loaded");

    host.step_scene(scene, 0.016).expect("loaded");
    assert!(host.update_property(scene, &physics, "gravityX", "1.5"));
    host.step_scene(scene, 0.016).expect("loaded");

    let steps = steps.borrow();
    assert_eq!(steps[0].gravity.x, 0.0);
    assert_eq!(steps[1].gravity.x, 1.5);
}

#[cfg(feature = "editor")]
#[test]
fn shared_data_without_editor_support_lists_nothing() {
    let mut host = host();
    let scene = host.load_scene("level", &SerializerElement::new());
    assert!(host.properties(scene, &probe_type()).is_none());
    assert!(!host.update_property(scene, &probe_type(), "label", "x"));
}

#[test]
fn duplicated_scenes_are_independent() {
    let mut host = host();
    let physics = BehaviorTypeId::physics();
    let original = host.load_scene(
        "level",
        &scene_json(r#"{"behaviorsSharedData":{"PhysicsBehavior::PhysicsBehavior":{"scale":40}}}"#),
    );
    host.reference_behavior(original, &physics).expect("registered");

    let copy = host.duplicate_scene(original, "level copy").expect("loaded");
    assert_eq!(host.scene(copy).map(|scene| scene.name()), Some("level copy"));
    assert_eq!(host.physics_data(copy), host.physics_data(original));

    #[cfg(feature = "editor")]
    {
        assert!(host.update_property(copy, &physics, "scale", "5"));
        assert_eq!(host.physics_data(original).map(ScenePhysicsData::world_scale), Some(40.0));
        assert_eq!(host.physics_data(copy).map(ScenePhysicsData::world_scale), Some(5.0));
    }

    host.unload_scene(copy).expect("loaded");
    assert_eq!(host.physics_data(original).map(ScenePhysicsData::world_scale), Some(40.0));
}

#[test]
fn save_keeps_persisted_order_and_other_scene_content() {
    let mut host = host();
    let scene = host.load_scene(
        "level",
        &scene_json(
            r#"{
                "objects":[{"name":"crate"}],
                "behaviorsSharedData":{
                    "Unknown::Behavior":{"speed":3},
                    "PhysicsBehavior::PhysicsBehavior":{"scale":20}
                },
                "layout":{"width":800}
            }"#,
        ),
    );
    host.reference_behavior(scene, &probe_type()).expect("registered");
    host.reference_behavior(scene, &BehaviorTypeId::physics())
        .expect("registered");

    let saved = host.save_scene(scene).expect("loaded");
    let names: Vec<_> = saved.child_names().collect();
    assert_eq!(names, ["objects", "behaviorsSharedData", "layout"]);
    assert!(saved.child("objects").is_some_and(SerializerElement::is_array));
    assert_eq!(
        saved
            .child("layout")
            .and_then(|node| node.child("width"))
            .and_then(SerializerElement::get_int),
        Some(800)
    );

    let shared: Vec<_> = saved
        .child("behaviorsSharedData")
        .expect("shared node")
        .child_names()
        .collect();
    assert_eq!(
        shared,
        ["Unknown::Behavior", "PhysicsBehavior::PhysicsBehavior", "Test::Probe"]
    );

    let copy = host.duplicate_scene(scene, "copy").expect("loaded");
    assert_eq!(host.save_scene(copy), Ok(saved));
}
