use bevy::asset::RenderAssetUsages;
use bevy::math::Vec3;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::Mesh;

/// Open polyline, one vertex per point.
pub fn polyline_mesh(points: &[Vec3]) -> Mesh {
    let positions: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 1.0, 0.0]; positions.len()];

    let mut mesh = Mesh::new(
        PrimitiveTopology::LineStrip,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh
}

/// Update an existing polyline in place, keeping its vertex count.
pub fn set_polyline_points(mesh: &mut Mesh, points: &[Vec3]) {
    let positions: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
}

/// Unconnected points, rendered as a point cloud.
pub fn point_cloud_mesh(points: &[Vec3]) -> Mesh {
    let positions: Vec<[f32; 3]> = points.iter().map(|p| p.to_array()).collect();
    let normals: Vec<[f32; 3]> = vec![[0.0, 1.0, 0.0]; positions.len()];

    let mut mesh = Mesh::new(
        PrimitiveTopology::PointList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh
}
