mod support;

use approx::assert_relative_eq;
use meshtri::GeometryError;
use meshtri::float_types::Real;
use meshtri::geometry::compute_barycentric;
use meshtri::mesh::{DrawMode, MeshInstance, VertexAttribute, attr_id};
use meshtri::sampling::{CumulativeAreaMap, scatter_points};
use meshtri::triangle::TriangleData;
use nalgebra::{Point3, Vector3, Vector4};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn samples_distribute_proportionally_to_area() {
    // Triangle areas 1 : 3, the larger one lives at x >= 10
    let mesh = support::unequal_triangle_pair();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let sample_count = 4000;
    let scattered = scatter_points(&mesh, sample_count, &mut rng).unwrap();
    let positions = scattered.attribute::<Point3<Real>>(attr_id::POSITION);
    assert_eq!(positions.len(), sample_count);

    let in_larger = positions.data().iter().filter(|p| p.x >= 5.0).count();
    let fraction = in_larger as Real / sample_count as Real;
    assert!(
        (fraction - 0.75).abs() < 0.03,
        "empirical fraction {} too far from 0.75",
        fraction
    );
}

#[test]
fn sampled_points_have_valid_barycentric_weights() {
    let mesh = support::unequal_triangle_pair();
    let reference_positions = mesh.attribute::<Point3<Real>>(attr_id::POSITION).clone();
    let triangles: Vec<TriangleData<Point3<Real>>> = mesh
        .triangles()
        .map(|t| t.vertex_data(&reference_positions))
        .collect();

    let mut rng = StdRng::seed_from_u64(7);
    let scattered = scatter_points(&mesh, 500, &mut rng).unwrap();
    for point in scattered.attribute::<Point3<Real>>(attr_id::POSITION).data() {
        let triangle = if point.x >= 5.0 { &triangles[1] } else { &triangles[0] };
        let coordinates = compute_barycentric(point, triangle);
        assert_relative_eq!(
            coordinates.x + coordinates.y + coordinates.z,
            1.0,
            epsilon = 1e-9
        );
        for weight in [coordinates.x, coordinates.y, coordinates.z] {
            assert!((-1e-9..=1.0 + 1e-9).contains(&weight), "weight {}", weight);
        }
    }
}

#[test]
fn scattering_is_deterministic_under_a_fixed_seed() {
    let mesh = support::unequal_triangle_pair();
    let first = scatter_points(&mesh, 64, &mut StdRng::seed_from_u64(99)).unwrap();
    let second = scatter_points(&mesh, 64, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(
        first.attribute::<Point3<Real>>(attr_id::POSITION).data(),
        second.attribute::<Point3<Real>>(attr_id::POSITION).data()
    );
}

#[test]
fn scattered_mesh_carries_every_reference_channel() {
    let mut mesh = support::unequal_triangle_pair();
    let count = mesh.vertex_count();
    mesh.add_attribute(VertexAttribute::new(
        attr_id::NORMAL,
        vec![Vector3::new(0.0, 0.0, 1.0); count],
    ));
    mesh.add_attribute(VertexAttribute::new(
        attr_id::uv(0),
        vec![Vector3::new(0.5, 0.5, 0.0); count],
    ));
    mesh.add_attribute(VertexAttribute::new(
        attr_id::color(0),
        vec![Vector4::new(1.0, 0.5, 0.25, 1.0); count],
    ));

    let mut rng = StdRng::seed_from_u64(3);
    let scattered = scatter_points(&mesh, 32, &mut rng).unwrap();

    assert_eq!(scattered.vertex_count(), 32);
    assert!(scattered.validate().is_ok());

    let shape = &scattered.shapes()[0];
    assert_eq!(shape.draw_mode(), DrawMode::Points);
    assert_eq!(shape.indices(), (0..32).collect::<Vec<u32>>().as_slice());

    // Interpolating constant channels reproduces the constants
    for normal in scattered
        .attribute::<Vector3<Real>>(attr_id::NORMAL)
        .data()
    {
        assert_relative_eq!(*normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-9);
    }
    for uv in scattered.attribute::<Vector3<Real>>(&attr_id::uv(0)).data() {
        assert_relative_eq!(*uv, Vector3::new(0.5, 0.5, 0.0), epsilon = 1e-9);
    }
    for color in scattered
        .attribute::<Vector4<Real>>(&attr_id::color(0))
        .data()
    {
        assert_relative_eq!(*color, Vector4::new(1.0, 0.5, 0.25, 1.0), epsilon = 1e-9);
    }
}

#[test]
fn degenerate_reference_meshes_cannot_be_sampled() {
    // Every triangle is collinear, so the total area is zero
    let mesh = support::shape_mesh(
        DrawMode::Triangles,
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        ],
        vec![0, 1, 2],
    );
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        scatter_points(&mesh, 10, &mut rng).unwrap_err(),
        GeometryError::ZeroArea
    );

    // No triangle shapes at all is the same failure
    let empty = support::mesh_with_positions(vec![Point3::new(0.0, 0.0, 0.0)]);
    assert_eq!(
        scatter_points(&empty, 10, &mut StdRng::seed_from_u64(1)).unwrap_err(),
        GeometryError::ZeroArea
    );
}

#[test]
fn missing_positions_are_a_hard_failure() {
    let mut mesh = MeshInstance::new();
    mesh.set_vertex_count(3);
    mesh.create_shape(DrawMode::Triangles).set_indices(vec![0, 1, 2]);
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        scatter_points(&mesh, 4, &mut rng).unwrap_err(),
        GeometryError::MissingAttribute(attr_id::POSITION.into())
    );
}

#[test]
fn boundary_draws_select_the_later_triangle() {
    // First triangle degenerate: its cumulative boundary equals 0.0, so a draw
    // of exactly 0.0 must skip it
    let mesh = support::shape_mesh(
        DrawMode::Triangles,
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ],
        vec![0, 1, 2, 3, 4, 5],
    );
    let positions = mesh.attribute::<Point3<Real>>(attr_id::POSITION);
    let map = CumulativeAreaMap::build(&mesh, positions).unwrap();
    assert_relative_eq!(map.total_area(), 0.5, epsilon = 1e-9);
    assert_eq!(map.select(0.0).triangle_index(), 1);
    // A draw just below the total still resolves to the last triangle
    assert_eq!(map.select(map.total_area() * 0.999).triangle_index(), 1);
}
