use std::f64::consts::PI;

use bevy::ecs::query::Has;
use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::render::camera::ScalingMode;
use bevy::render::view::screenshot::ScreenshotManager;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PrimaryWindow, WindowResolution};
use tracing::{error, info, warn};

use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;
use crate::simulation::viewport::Viewport;

/// Tags a mesh or label with its body slot in Scenario.system
#[derive(Component)]
struct BodyIndex(pub usize);

#[derive(Component)]
struct BodyLabel;

#[derive(Component)]
struct MainCamera;

/// Simulation plane -> world units
const SCALE: f32 = 500.0;
/// World units per point of marker radius
const MARKER_SCALE: f32 = 0.6;
const TRAIL_ALPHA: f32 = 0.2;
const LABEL_OFFSET: f32 = 8.0;
/// Frames to render before grabbing the still image
const SCREENSHOT_FRAME: u32 = 3;

/// Open a window that advances the scenario once per frame
pub fn run_live(scenario: Scenario) -> AppExit {
    info!(bodies = scenario.system.len(), "starting live 2D viewer");

    let mut app = viewer_app(scenario);
    app.add_systems(
        Update,
        (physics_step_system, sync_transforms_system, follow_camera_system, draw_trails_system).chain(),
    );
    app.run()
}

/// Open a window showing the scenario as it is, without stepping, and save
/// a screenshot if the output settings ask for one
pub fn run_still(scenario: Scenario) -> AppExit {
    info!(bodies = scenario.system.len(), t = scenario.system.t, "starting still 2D viewer");

    let mut app = viewer_app(scenario);
    app.add_systems(
        Update,
        (sync_transforms_system, follow_camera_system, draw_trails_system, save_snapshot_system).chain(),
    );
    app.run()
}

fn viewer_app(scenario: Scenario) -> App {
    let [w, h] = scenario.output.resolution;
    let face = rgb(scenario.display.face_colour);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .build()
            // main owns the tracing subscriber
            .disable::<LogPlugin>()
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "orbitsim".into(),
                    resolution: WindowResolution::new(w as f32, h as f32),
                    ..default()
                }),
                ..default()
            }),
    )
    .insert_resource(ClearColor(face))
    .insert_resource(scenario)
    .add_systems(Startup, setup_bodies_system);
    app
}

fn setup_bodies_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    let display = &scenario.display;

    // 2D camera fitted to the initial view
    let view = Viewport::for_system(&scenario.system, display.follow_object, display.zoom_level);
    let mut camera = Camera2dBundle::default();
    fit_camera(&mut camera.transform, &mut camera.projection, &view);
    commands.spawn((camera, MainCamera));

    for (i, body) in scenario.system.bodies().iter().enumerate() {
        let pos = to_world(body.x);

        if display.show_objects {
            let [r, g, b] = display.object_colour;
            commands.spawn((
                MaterialMesh2dBundle {
                    mesh: Mesh2dHandle(meshes.add(Circle::new(marker_radius(body.m)))),
                    material: materials.add(ColorMaterial::from(Color::srgba(r, g, b, body.brightness as f32))),
                    transform: Transform::from_xyz(pos.x, pos.y, 1.0),
                    ..Default::default()
                },
                BodyIndex(i),
            ));
        }

        if display.show_labels {
            commands.spawn((
                Text2dBundle {
                    text: Text::from_section(
                        format!("{:.4}", body.m),
                        TextStyle {
                            font_size: 14.0,
                            color: rgb(display.label_colour),
                            ..default()
                        },
                    ),
                    transform: Transform::from_xyz(pos.x + LABEL_OFFSET, pos.y + LABEL_OFFSET, 2.0),
                    ..default()
                },
                BodyIndex(i),
                BodyLabel,
            ));
        }
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>, mut halted: Local<bool>, mut exit: EventWriter<AppExit>) {
    if *halted {
        return;
    }

    if let Err(e) = scenario.step() {
        error!(error = %e, step = scenario.system.step, "integration failed, stopping");
        *halted = true;
        exit.send(AppExit::error());
    }
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform, Has<BodyLabel>)>) {
    for (BodyIndex(i), mut transform, is_label) in &mut query {
        if let Some(b) = scenario.system.bodies().get(*i) {
            let offset = if is_label { LABEL_OFFSET } else { 0.0 };
            let pos = to_world(b.x);
            transform.translation.x = pos.x + offset;
            transform.translation.y = pos.y + offset;
        }
    }
}

fn follow_camera_system(scenario: Res<Scenario>, mut query: Query<(&mut Transform, &mut OrthographicProjection), With<MainCamera>>) {
    let display = &scenario.display;
    if !display.follow_object {
        return;
    }

    let view = Viewport::for_system(&scenario.system, true, display.zoom_level);
    for (mut transform, mut projection) in &mut query {
        fit_camera(&mut transform, &mut projection, &view);
    }
}

fn draw_trails_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let display = &scenario.display;
    if !display.show_trails {
        return;
    }

    let [r, g, b] = display.trail_colour;
    let colour = Color::srgba(r, g, b, TRAIL_ALPHA);
    for body in scenario.system.bodies() {
        gizmos.linestrip_2d(body.trajectory().iter().map(|p| to_world(*p)), colour);
    }
}

fn save_snapshot_system(
    scenario: Res<Scenario>,
    window: Query<Entity, With<PrimaryWindow>>,
    mut screenshots: ResMut<ScreenshotManager>,
    mut frame: Local<u32>,
) {
    if !scenario.output.save_output {
        return;
    }

    *frame += 1;
    if *frame != SCREENSHOT_FRAME {
        return;
    }

    let Ok(window) = window.get_single() else {
        warn!("no primary window, still image skipped");
        return;
    };

    let path = &scenario.output.path;
    match screenshots.save_screenshot_to_disk(window, path) {
        Ok(()) => info!(path = %path, "still image requested"),
        Err(e) => error!(path = %path, error = ?e, "could not save still image"),
    }
}

// ========================================================================================
// helpers
// ========================================================================================

fn fit_camera(transform: &mut Transform, projection: &mut OrthographicProjection, view: &Viewport) {
    let c = to_world(view.centre());
    transform.translation.x = c.x;
    transform.translation.y = c.y;
    projection.scaling_mode = ScalingMode::AutoMin {
        min_width: view.width() as f32 * SCALE,
        min_height: view.height() as f32 * SCALE,
    };
}

fn to_world(p: NVec2) -> Vec2 {
    Vec2::new(p.x as f32 * SCALE, p.y as f32 * SCALE)
}

/// Marker area grows with mass: radius = sqrt(10 m / pi)
fn marker_radius(m: f64) -> f32 {
    ((10.0 * m / PI).sqrt() as f32 * MARKER_SCALE).max(1.0)
}

fn rgb([r, g, b]: [f32; 3]) -> Color {
    Color::srgb(r, g, b)
}
