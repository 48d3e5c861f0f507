//! Picking demo application
//!
//! Builds a small scene (ground slab, a tower with an attached satellite,
//! scattered debris) and runs every query form against it: forward ray,
//! segment, screen pick, oriented sweep, and box overlap.

use rand::Rng;
use spatial_engine::prelude::*;

const DEBRIS_COUNT: usize = 12;
const SCATTER_RADIUS: f32 = 8.0;
const VIEWPORT_WIDTH: u32 = 1280;
const VIEWPORT_HEIGHT: u32 = 720;

pub struct PickingDemoApp {
    scene: SceneGraph,
    engine: IntersectionEngine,
    camera: TargetCamera,
    viewport: Viewport,
    player: NodeId,
    tower: NodeId,
}

impl PickingDemoApp {
    pub fn new() -> Result<Self, SceneError> {
        log::info!("Creating picking demo scene...");
        let mut scene = SceneGraph::new();

        // Ground slab: a flattened unit cube scaled out to a platform.
        let ground = scene.spawn_node("ground", Transform::from_position(Vec3::new(0.0, -0.2, 0.0)));
        let mut slab = Transform::identity();
        slab.scale = Vec3::new(20.0, 0.4, 20.0);
        scene.add_part(ground, "slab", PartKind::Mesh(MeshGeometry::unit_cube()), slab)?;

        // Tower with a satellite dish attached above it.
        let tower = scene.spawn_node("tower", Transform::from_position(Vec3::new(0.0, 1.0, 8.0)));
        scene.node_mut(tower).ok_or(SceneError::UnknownNode(tower))?.transform_mut().scale =
            Vec3::new(1.0, 2.0, 1.0);
        scene.add_part(tower, "shaft", PartKind::Mesh(MeshGeometry::unit_cube()), Transform::identity())?;

        let satellite =
            scene.spawn_node("satellite", Transform::from_position(Vec3::new(0.0, 2.5, 0.0)));
        scene.add_part(
            satellite,
            "dish",
            PartKind::Mesh(MeshGeometry::unit_cube()),
            Transform::identity(),
        )?;
        scene.attach_node(tower, satellite)?;

        // Debris field; every third piece goes on the editor layer so the
        // filtered queries have something to exclude.
        let mut rng = rand::thread_rng();
        for index in 0..DEBRIS_COUNT {
            let position = Vec3::new(
                rng.gen_range(-SCATTER_RADIUS..SCATTER_RADIUS),
                0.5,
                rng.gen_range(-SCATTER_RADIUS..SCATTER_RADIUS),
            );
            let node = scene.spawn_node(format!("debris_{index}"), Transform::from_position(position));
            let part = scene.add_part(
                node,
                "chunk",
                PartKind::Mesh(MeshGeometry::unit_cube()),
                Transform::identity(),
            )?;
            if index % 3 == 0 {
                if let Some(part) = scene.part_mut(part) {
                    part.set_layer(CollisionLayer::Editor);
                }
            }
        }

        let player = scene.spawn_node("player", Transform::from_position(Vec3::new(0.0, 1.0, 0.0)));

        let viewport = Viewport::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT);
        let mut camera =
            TargetCamera::perspective(Vec3::new(0.0, 6.0, -12.0), 60.0, viewport.aspect(), 0.1, 200.0);
        camera.set_target(Vec3::new(0.0, 1.0, 4.0));

        log::info!("Scene ready with {} nodes", scene.node_count());
        Ok(Self {
            scene,
            engine: IntersectionEngine::new(),
            camera,
            viewport,
            player,
            tower,
        })
    }

    pub fn run(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.forward_ray()?;
        self.segment_to_tower()?;
        self.screen_pick()?;
        self.oriented_sweep()?;
        self.box_overlap()?;
        Ok(())
    }

    fn node_name(&self, id: NodeId) -> &str {
        self.scene.node(id).map_or("<gone>", SceneNode::name)
    }

    fn describe(&self, label: &str, result: &HitResult) {
        match result.node {
            Some(node) => log::info!(
                "{label}: hit '{}' at distance {:.2}, position {:?}",
                self.node_name(node),
                result.distance,
                result.position
            ),
            None => log::info!("{label}: no hit within range"),
        }
        let touched: Vec<&str> = result.hit_nodes.iter().map(|id| self.node_name(*id)).collect();
        log::info!("{label}: passed through {:?}", touched);
    }

    fn forward_ray(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let origin = Vec3::new(0.0, 1.0, 0.0);
        let forward = self.scene.forward_vector(self.player)?;
        let query = RayQuery::new(origin, forward, 100.0)?
            .with_filter(QueryFilter::new().ignoring_node(self.player));
        let result = self.engine.cast_ray(&self.scene, &query)?;
        self.describe("forward ray", &result);
        Ok(())
    }

    fn segment_to_tower(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let start = Vec3::new(0.0, 1.0, 0.0);
        let end = Vec3::new(0.0, 1.0, 7.5);
        let result = self.engine.cast_segment(&self.scene, start, end, QueryFilter::new())?;
        self.describe("segment", &result);
        Ok(())
    }

    fn screen_pick(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let center_x = self.viewport.width as f32 / 2.0;
        let center_y = self.viewport.height as f32 / 2.0;
        let result = cast_screen_ray(
            &mut self.engine,
            &self.scene,
            &self.camera,
            self.viewport,
            center_x,
            center_y,
            QueryFilter::new(),
        )?;
        self.describe("screen pick", &result);
        Ok(())
    }

    fn oriented_sweep(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let start = Vec3::new(0.0, 1.0, 0.0);
        let end = Vec3::new(0.0, 1.0, 8.0);
        let result = self.engine.cast_oriented_box(
            &self.scene,
            start,
            end,
            Vec2::new(1.5, 1.5),
            QueryFilter::new(),
        )?;
        log::info!("oriented sweep: {} parts overlapped", result.hit_parts.len());
        if let Some(volume) = self.engine.last_cast_volume() {
            log::info!(
                "oriented sweep: volume center {:?}, extents {:?}",
                volume.center,
                volume.extents
            );
        }
        let names: Vec<&str> = result.hit_nodes.iter().map(|id| self.node_name(*id)).collect();
        log::info!("oriented sweep: touched {:?}", names);

        // Target check: was the tower in the sweep?
        if result.hit_nodes.contains(&self.tower) {
            log::info!("oriented sweep: tower is in the corridor");
        }
        Ok(())
    }

    fn box_overlap(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        let center = Vec3::new(0.0, 0.5, 0.0);
        let extents = Vec3::new(SCATTER_RADIUS, 2.0, SCATTER_RADIUS);

        let everything =
            self.engine.cast_box(&self.scene, center, extents, QueryFilter::new());
        log::info!("box overlap: {} parts in the field", everything.hit_parts.len());

        let gameplay_only = self.engine.cast_box(
            &self.scene,
            center,
            extents,
            QueryFilter::new().excluding_layer(CollisionLayer::Editor),
        );
        log::info!(
            "box overlap: {} parts after excluding the editor layer",
            gameplay_only.hit_parts.len()
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Starting picking demo");

    let mut app = PickingDemoApp::new()?;
    let result = app.run();

    match result {
        Ok(()) => {
            log::info!("Picking demo completed successfully");
            Ok(())
        }
        Err(e) => {
            log::error!("Picking demo failed: {:?}", e);
            Err(e)
        }
    }
}
