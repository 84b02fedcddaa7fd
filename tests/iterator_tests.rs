use meshtri::mesh::{DrawMode, MeshInstance, Shape};
use meshtri::triangle::ShapeTriangles;

fn triples(shape: &Shape) -> Vec<[u32; 3]> {
    shape.triangles().map(|t| t.indices()).collect()
}

#[test]
fn list_iterator_yields_disjoint_triples() {
    let shape = Shape::with_indices(DrawMode::Triangles, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(triples(&shape), vec![[0, 1, 2], [3, 4, 5]]);
}

#[test]
fn fan_iterator_shares_the_fan_start() {
    let shape = Shape::with_indices(DrawMode::TriangleFan, vec![0, 1, 2, 3, 4]);
    assert_eq!(triples(&shape), vec![[0, 1, 2], [0, 2, 3], [0, 3, 4]]);
}

#[test]
fn strip_iterator_slides_a_window() {
    let shape = Shape::with_indices(DrawMode::TriangleStrip, vec![0, 1, 2, 3, 4]);
    assert_eq!(triples(&shape), vec![[0, 1, 2], [1, 2, 3], [2, 3, 4]]);
}

#[test]
fn triangle_indices_count_up_per_shape() {
    let shape = Shape::with_indices(DrawMode::TriangleStrip, vec![7, 8, 9, 10]);
    let ordinals: Vec<usize> = shape.triangles().map(|t| t.triangle_index()).collect();
    assert_eq!(ordinals, vec![0, 1]);
}

#[test]
fn leftover_indices_are_ignored() {
    let shape = Shape::with_indices(DrawMode::Triangles, vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(triples(&shape).len(), 2);
}

#[test]
fn too_few_indices_yield_nothing() {
    for mode in [
        DrawMode::Triangles,
        DrawMode::TriangleFan,
        DrawMode::TriangleStrip,
    ] {
        let shape = Shape::with_indices(mode, vec![0, 1]);
        assert!(shape.triangles().next().is_none());
        let empty = Shape::new(mode);
        assert!(empty.triangles().next().is_none());
    }
}

#[test]
#[should_panic(expected = "cannot iterate triangles")]
fn non_triangle_shape_cannot_be_iterated() {
    let shape = Shape::with_indices(DrawMode::Lines, vec![0, 1, 2, 3]);
    let _ = ShapeTriangles::new(&shape);
}

#[test]
fn iterator_reports_exact_size() {
    let shape = Shape::with_indices(DrawMode::TriangleFan, vec![0, 1, 2, 3, 4]);
    let mut iterator = shape.triangles();
    assert_eq!(iterator.len(), 3);
    iterator.next();
    assert_eq!(iterator.len(), 2);
    iterator.by_ref().for_each(drop);
    assert_eq!(iterator.len(), 0);
}

#[test]
fn mesh_iterator_concatenates_and_skips_shapes() {
    let mut mesh = MeshInstance::new();
    mesh.set_vertex_count(6);
    mesh.create_shape(DrawMode::Lines).set_indices(vec![0, 1]);
    mesh.create_shape(DrawMode::Triangles)
        .set_indices(vec![0, 1, 2]);
    mesh.create_shape(DrawMode::Points).set_indices(vec![5]);
    mesh.create_shape(DrawMode::TriangleFan)
        .set_indices(vec![2, 3, 4, 5]);

    let triangles: Vec<(usize, [u32; 3])> = mesh
        .triangles()
        .map(|t| (t.shape_index(), t.indices()))
        .collect();
    assert_eq!(
        triangles,
        vec![(1, [0, 1, 2]), (3, [2, 3, 4]), (3, [2, 4, 5])]
    );
}

#[test]
fn mesh_without_triangle_shapes_is_immediately_done() {
    let mut mesh = MeshInstance::new();
    mesh.set_vertex_count(4);
    mesh.create_shape(DrawMode::LineStrip)
        .set_indices(vec![0, 1, 2, 3]);
    assert!(mesh.triangles().next().is_none());

    let empty = MeshInstance::new();
    assert!(empty.triangles().next().is_none());
}
