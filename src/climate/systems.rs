use crate::climate::components::*;
use crate::climate::events::*;
use crate::climate::logic::{drag_earth_position, is_double_click, point_segment_distance, ray_sphere_hit};
use crate::climate::materials::{AtmosphereMaterial, CoronaMaterial, HeatGlowMaterial};
use crate::climate::resources::*;
use crate::core::camera::components::MainCamera;
use crate::helpers::mesh::{point_cloud_mesh, polyline_mesh, set_polyline_points};
use bevy::asset::LoadState;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use climatesim::rays::{RayAppearance, classify_ray, ray_points};
use climatesim::thresholds;
use climatesim::visual::VisualState;
use rand::Rng;

/// Matches the original frame-step rates at 60 fps.
const SUN_SPIN_RADIANS_PER_SEC: f32 = 0.03;
const EARTH_SPIN_RADIANS_PER_SEC: f32 = 0.3;

const DRAG_SCALE: f32 = 1.05;
const RAY_PICK_RADIUS_PX: f32 = 8.0;
const RAY_CALLOUT_SECONDS: f64 = 2.0;
const RAY_FLASH_SECONDS: f32 = 0.5;

pub fn setup_scene(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<SimConfig>,
    sim: Res<Simulation>,
    mut ray_rng: ResMut<RayRng>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut corona_materials: ResMut<Assets<CoronaMaterial>>,
    mut atmosphere_materials: ResMut<Assets<AtmosphereMaterial>>,
    mut glow_materials: ResMut<Assets<HeatGlowMaterial>>,
) {
    let scene = &config.0.scene;
    let sun_position = Vec3::from_array(scene.sun_position);
    let earth_position = Vec3::from_array(scene.earth_position);
    let visual = VisualState::derive(&sim.0);

    // Sun with its corona shell and the main light source
    let sun_mesh = meshes.add(Sphere::new(scene.sun_radius).mesh().uv(64, 64));
    let sun_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 1.0, 0.0),
        emissive: LinearRgba::rgb(1.0, 0.666, 0.0) * 1.2,
        unlit: true,
        ..default()
    });
    let corona_mesh = meshes.add(Sphere::new(scene.corona_radius).mesh().uv(32, 32));
    let corona_material = corona_materials.add(CoronaMaterial {
        params: Vec4::new(0.0, scene.corona_radius, 0.0, 0.0),
        ..default()
    });
    commands
        .spawn((
            Mesh3d(sun_mesh),
            MeshMaterial3d(sun_material),
            Transform::from_translation(sun_position),
            SunEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(corona_mesh),
                MeshMaterial3d(corona_material),
                Transform::default(),
                CoronaShell,
            ));
            parent.spawn((
                PointLight {
                    color: Color::srgb(1.0, 1.0, 0.666),
                    intensity: 10_000_000.0,
                    range: 400.0,
                    shadows_enabled: true,
                    ..default()
                },
                Transform::default(),
            ));
        });

    // Earth with atmosphere and heat-glow shells
    let earth_mesh = meshes.add(Sphere::new(scene.earth_radius).mesh().uv(64, 64));
    let earth_material = materials.add(StandardMaterial {
        base_color: color_from_vec(visual.earth_color),
        perceptual_roughness: 0.6,
        ..default()
    });
    let atmosphere_mesh = meshes.add(Sphere::new(scene.atmosphere_radius).mesh().uv(64, 64));
    let atmosphere_material = atmosphere_materials.add(AtmosphereMaterial {
        color_clean: linear_from_vec(visual.atmosphere_color),
        params: Vec4::new(visual.atmosphere_opacity, 0.0, 0.0, 0.0),
        ..default()
    });
    let glow_mesh = meshes.add(Sphere::new(scene.heat_glow_radius).mesh().uv(32, 32));
    let glow_material = glow_materials.add(HeatGlowMaterial {
        params: Vec4::new(visual.heat_glow_intensity, 0.0, 0.0, 0.0),
        ..default()
    });
    commands
        .spawn((
            Mesh3d(earth_mesh),
            MeshMaterial3d(earth_material),
            Transform::from_translation(earth_position),
            EarthEntity,
            EarthControls { spin_enabled: true },
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(atmosphere_mesh),
                MeshMaterial3d(atmosphere_material),
                Transform::default(),
                AtmosphereShell,
            ));
            parent.spawn((
                Mesh3d(glow_mesh),
                MeshMaterial3d(glow_material),
                Transform::default(),
                HeatGlowShell,
            ));
        });

    // The surface texture is optional; keep the solid color if it is
    // missing (resolved by poll_earth_texture)
    commands.insert_resource(EarthTexture {
        handle: asset_server.load("textures/earth8.jpg"),
        resolved: false,
    });

    // Infrared ray bundle between the two bodies
    for index in 0..config.0.rays.count {
        let points = ray_points(
            index,
            sun_position,
            earth_position,
            config.0.rays.segments,
            config.0.rays.arc_height,
            config.0.rays.wobble,
        );
        let appearance = classify_ray(sim.0.co2_ppm(), sim.0.heat_intensity(), &mut ray_rng.0);
        let mut material = StandardMaterial::default();
        apply_ray_appearance(&mut material, &appearance);
        commands.spawn((
            Mesh3d(meshes.add(polyline_mesh(&points))),
            MeshMaterial3d(materials.add(material)),
            Transform::default(),
            InfraredRay { index },
            RayState(appearance),
        ));
    }

    // Star field: a dense faint cloud plus a sparse brighter one
    let mut rng = rand::rng();
    let stars = random_star_positions(scene.star_count, scene.star_field_extent, &mut rng);
    commands.spawn((
        Mesh3d(meshes.add(point_cloud_mesh(&stars))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::default(),
        StarField,
    ));
    let big_stars =
        random_star_positions(scene.big_star_count, scene.big_star_field_extent, &mut rng);
    commands.spawn((
        Mesh3d(meshes.add(point_cloud_mesh(&big_stars))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 1.0, 0.666),
            unlit: true,
            ..default()
        })),
        Transform::default(),
        StarField,
    ));

    // Ambient fill so the night side never goes fully black, plus a cool
    // directional rim light
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.2, 0.2, 0.2),
        brightness: 500.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            color: Color::srgb(0.266, 0.4, 1.0),
            illuminance: 2_000.0,
            ..default()
        },
        Transform::from_xyz(-5.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    info!(
        "Scene spawned: {} rays, {} stars",
        config.0.rays.count,
        scene.star_count + scene.big_star_count
    );
}

/// Kick one derived-state pass so the scene matches the defaults before
/// the first input arrives.
pub fn initial_update(mut changed: MessageWriter<SimulationChanged>) {
    changed.write(SimulationChanged);
}

/// Swap the earth material over to the texture once it loads; a failed
/// load keeps the solid color and is only worth a log line.
pub fn poll_earth_texture(
    asset_server: Res<AssetServer>,
    texture: Option<ResMut<EarthTexture>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    earth_q: Query<&MeshMaterial3d<StandardMaterial>, With<EarthEntity>>,
) {
    let Some(mut texture) = texture else {
        return;
    };
    if texture.resolved {
        return;
    }
    match asset_server.load_state(&texture.handle) {
        LoadState::Loaded => {
            if let Ok(handle) = earth_q.single() {
                if let Some(material) = materials.get_mut(&handle.0) {
                    material.base_color_texture = Some(texture.handle.clone());
                }
            }
            texture.resolved = true;
        }
        LoadState::Failed(_) => {
            info!("Using fallback earth surface color");
            texture.resolved = true;
        }
        _ => {}
    }
}

/// Apply a validated fast-forward request.
pub fn handle_accelerate(
    mut requests: MessageReader<AccelerateTime>,
    mut sim: ResMut<Simulation>,
    mut changed: MessageWriter<SimulationChanged>,
) {
    for request in requests.read() {
        sim.0.accelerate(request.years);
        info!(
            "Accelerated {} years, {} total, {:.1}°C",
            request.years,
            sim.0.elapsed_years(),
            sim.0.temperature()
        );
        changed.write(SimulationChanged);
    }
}

/// The one place derived state reaches the scene: recompute the visual
/// parameters, re-sample ray trapping, and re-run threshold
/// classification whenever the simulation changed.
pub fn apply_simulation_update(
    mut changed: MessageReader<SimulationChanged>,
    sim: Res<Simulation>,
    mut ray_rng: ResMut<RayRng>,
    mut banners: ResMut<WarningBanners>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut atmosphere_materials: ResMut<Assets<AtmosphereMaterial>>,
    mut glow_materials: ResMut<Assets<HeatGlowMaterial>>,
    earth_q: Query<&MeshMaterial3d<StandardMaterial>, With<EarthEntity>>,
    atmosphere_q: Query<&MeshMaterial3d<AtmosphereMaterial>, With<AtmosphereShell>>,
    glow_q: Query<&MeshMaterial3d<HeatGlowMaterial>, With<HeatGlowShell>>,
    mut rays_q: Query<(&MeshMaterial3d<StandardMaterial>, &mut RayState), With<InfraredRay>>,
) {
    if changed.is_empty() {
        return;
    }
    changed.clear();

    let visual = VisualState::derive(&sim.0);

    if let Ok(handle) = earth_q.single() {
        if let Some(material) = materials.get_mut(&handle.0) {
            material.base_color = color_from_vec(visual.earth_color);
        }
    }
    if let Ok(handle) = atmosphere_q.single() {
        if let Some(material) = atmosphere_materials.get_mut(&handle.0) {
            material.color_clean = linear_from_vec(visual.atmosphere_color);
            material.params.x = visual.atmosphere_opacity;
        }
    }
    if let Ok(handle) = glow_q.single() {
        if let Some(material) = glow_materials.get_mut(&handle.0) {
            material.params.x = visual.heat_glow_intensity;
        }
    }

    for (handle, mut state) in rays_q.iter_mut() {
        let appearance = classify_ray(sim.0.co2_ppm(), sim.0.heat_intensity(), &mut ray_rng.0);
        if let Some(material) = materials.get_mut(&handle.0) {
            apply_ray_appearance(material, &appearance);
        }
        state.0 = appearance;
    }

    banners.apply(&thresholds::classify(sim.0.temperature()));
}

/// Rebuild the ray polylines whenever either anchor has moved.
pub fn update_ray_geometry(
    config: Res<SimConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    sun_q: Query<&Transform, With<SunEntity>>,
    earth_q: Query<&Transform, With<EarthEntity>>,
    rays_q: Query<(&InfraredRay, &Mesh3d)>,
    mut last_anchors: Local<Option<(Vec3, Vec3)>>,
) {
    let (Ok(sun_transform), Ok(earth_transform)) = (sun_q.single(), earth_q.single()) else {
        return;
    };
    let anchors = (sun_transform.translation, earth_transform.translation);
    if *last_anchors == Some(anchors) {
        return;
    }
    *last_anchors = Some(anchors);

    for (ray, mesh3d) in &rays_q {
        if let Some(mesh) = meshes.get_mut(&mesh3d.0) {
            let points = ray_points(
                ray.index,
                anchors.0,
                anchors.1,
                config.0.rays.segments,
                config.0.rays.arc_height,
                config.0.rays.wobble,
            );
            set_polyline_points(mesh, &points);
        }
    }
}

/// Per-frame motion: body spins and the shader clocks. The corona runs on
/// its own coarse repeating timer, independent of the simulation.
pub fn animate_scene(
    time: Res<Time>,
    pointer: Res<PointerState>,
    mut corona_clock: ResMut<CoronaClock>,
    mut sun_q: Query<&mut Transform, (With<SunEntity>, Without<EarthEntity>)>,
    mut earth_q: Query<(&mut Transform, &EarthControls), With<EarthEntity>>,
    corona_q: Query<&MeshMaterial3d<CoronaMaterial>, With<CoronaShell>>,
    atmosphere_q: Query<&MeshMaterial3d<AtmosphereMaterial>, With<AtmosphereShell>>,
    glow_q: Query<&MeshMaterial3d<HeatGlowMaterial>, With<HeatGlowShell>>,
    mut corona_materials: ResMut<Assets<CoronaMaterial>>,
    mut atmosphere_materials: ResMut<Assets<AtmosphereMaterial>>,
    mut glow_materials: ResMut<Assets<HeatGlowMaterial>>,
) {
    let dt = time.delta_secs();

    if let Ok(mut sun_transform) = sun_q.single_mut() {
        sun_transform.rotate_y(SUN_SPIN_RADIANS_PER_SEC * dt);
    }
    if let Ok((mut earth_transform, controls)) = earth_q.single_mut() {
        if controls.spin_enabled && !pointer.dragging_earth {
            earth_transform.rotate_y(EARTH_SPIN_RADIANS_PER_SEC * dt);
        }
    }

    corona_clock.timer.tick(time.delta());
    let ticks = corona_clock.timer.times_finished_this_tick();
    if ticks > 0 {
        corona_clock.phase += 0.05 * ticks as f32;
        if let Ok(handle) = corona_q.single() {
            if let Some(material) = corona_materials.get_mut(&handle.0) {
                material.params.x = corona_clock.phase;
            }
        }
    }

    let elapsed = time.elapsed_secs();
    if let Ok(handle) = atmosphere_q.single() {
        if let Some(material) = atmosphere_materials.get_mut(&handle.0) {
            material.params.y = elapsed;
        }
    }
    if let Ok(handle) = glow_q.single() {
        if let Some(material) = glow_materials.get_mut(&handle.0) {
            material.params.y = elapsed;
        }
    }
}

/// Drag the earth around the scene. A press on the earth grabs it (and
/// suspends the orbit camera); a double click anywhere toggles its spin.
pub fn earth_drag(
    mouse_input: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    config: Res<SimConfig>,
    mut pointer: ResMut<PointerState>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut earth_q: Query<(&mut Transform, &mut EarthControls), With<EarthEntity>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_q.single() else {
        return;
    };
    let Ok((mut earth_transform, mut controls)) = earth_q.single_mut() else {
        return;
    };

    if mouse_input.just_released(MouseButton::Left) && pointer.dragging_earth {
        pointer.dragging_earth = false;
        earth_transform.scale = Vec3::ONE;
        return;
    }

    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let is_over_ui = cursor.x > window.width() * 0.75;

    if mouse_input.just_pressed(MouseButton::Left) && !is_over_ui {
        let now = time.elapsed_secs_f64();
        if is_double_click(pointer.last_press_seconds, now) {
            controls.spin_enabled = !controls.spin_enabled;
        }
        pointer.last_press_seconds = now;

        if let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) {
            let hit = ray_sphere_hit(
                ray.origin,
                *ray.direction,
                earth_transform.translation,
                config.0.scene.earth_radius,
            );
            if hit.is_some() {
                pointer.dragging_earth = true;
                pointer.last_cursor = cursor;
                earth_transform.scale = Vec3::splat(DRAG_SCALE);
            }
        }
    } else if mouse_input.pressed(MouseButton::Left) && pointer.dragging_earth {
        let delta = cursor - pointer.last_cursor;
        if delta != Vec2::ZERO {
            earth_transform.translation = drag_earth_position(
                earth_transform.translation,
                delta,
                config.0.scene.earth_drag_bound_x,
                config.0.scene.earth_drag_bound_y,
            );
            pointer.last_cursor = cursor;
        }
    }
}

/// Click on a ray: flash it and show the callout for a moment.
pub fn ray_click(
    mouse_input: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    config: Res<SimConfig>,
    pointer: Res<PointerState>,
    mut callout: ResMut<RayCallout>,
    windows: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    sun_q: Query<&Transform, With<SunEntity>>,
    earth_q: Query<&Transform, With<EarthEntity>>,
    rays_q: Query<(Entity, &InfraredRay, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut commands: Commands,
) {
    if !mouse_input.just_pressed(MouseButton::Left) || pointer.dragging_earth {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    if cursor.x > window.width() * 0.75 {
        return;
    }
    let Ok((camera, camera_transform)) = camera_q.single() else {
        return;
    };
    let (Ok(sun_transform), Ok(earth_transform)) = (sun_q.single(), earth_q.single()) else {
        return;
    };

    let mut best: Option<(Entity, f32)> = None;
    for (entity, ray, _) in &rays_q {
        let points = ray_points(
            ray.index,
            sun_transform.translation,
            earth_transform.translation,
            config.0.rays.segments,
            config.0.rays.arc_height,
            config.0.rays.wobble,
        );
        let projected: Vec<Vec2> = points
            .iter()
            .filter_map(|p| camera.world_to_viewport(camera_transform, *p).ok())
            .collect();
        for pair in projected.windows(2) {
            let distance = point_segment_distance(cursor, pair[0], pair[1]);
            if distance < RAY_PICK_RADIUS_PX && best.is_none_or(|(_, d)| distance < d) {
                best = Some((entity, distance));
            }
        }
    }

    if let Some((entity, _)) = best {
        if let Ok((_, _, handle)) = rays_q.get(entity) {
            if let Some(material) = materials.get_mut(&handle.0) {
                material.base_color = Color::srgba(1.0, 1.0, 0.0, 1.0);
                material.emissive = LinearRgba::rgb(1.0, 1.0, 0.0);
            }
        }
        commands.entity(entity).insert(RayFlash {
            timer: Timer::from_seconds(RAY_FLASH_SECONDS, TimerMode::Once),
        });
        callout.position = cursor;
        callout.shown_until_seconds = time.elapsed_secs_f64() + RAY_CALLOUT_SECONDS;
    }
}

/// Restore a flashed ray to its classified appearance.
pub fn expire_ray_flashes(
    time: Res<Time>,
    mut commands: Commands,
    mut flashes: Query<(
        Entity,
        &mut RayFlash,
        &RayState,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (entity, mut flash, state, handle) in flashes.iter_mut() {
        flash.timer.tick(time.delta());
        if flash.timer.finished() {
            if let Some(material) = materials.get_mut(&handle.0) {
                apply_ray_appearance(material, &state.0);
            }
            commands.entity(entity).remove::<RayFlash>();
        }
    }
}

fn apply_ray_appearance(material: &mut StandardMaterial, appearance: &RayAppearance) {
    let color = appearance.color;
    // The escaped-ray opacity scales with heat intensity and can exceed
    // 1.0 in the raw model; the renderer wants it clamped
    material.base_color = Color::srgba(color.x, color.y, color.z, appearance.opacity.min(1.0));
    material.emissive = LinearRgba::rgb(color.x, color.y, color.z);
    material.unlit = true;
    material.alpha_mode = AlphaMode::Blend;
}

fn random_star_positions<R: Rng>(count: usize, extent: f32, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                (rng.random::<f32>() - 0.5) * extent,
                (rng.random::<f32>() - 0.5) * extent,
                (rng.random::<f32>() - 0.5) * extent,
            )
        })
        .collect()
}

fn color_from_vec(v: bevy::math::Vec3) -> Color {
    Color::srgb(v.x, v.y, v.z)
}

fn linear_from_vec(v: bevy::math::Vec3) -> LinearRgba {
    LinearRgba::new(v.x, v.y, v.z, 1.0)
}
