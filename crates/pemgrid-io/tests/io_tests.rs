//! Integration tests for pemgrid-io.

use std::fs;
use std::path::PathBuf;

use glam::DVec3;
use pemgrid_io::validator::fill_untagged_boundary;
use pemgrid_io::{import_mesh, save_json, validate_mesh, LengthUnit, MeshSummary};
use pemgrid_mesh::generators::{hyper_cube, subdivided_hyper_rectangle};
use pemgrid_mesh::Triangulation;
use pemgrid_types::{BoundaryId, MaterialId, PemgridError};

const TWO_QUADS: &str = "\
$MeshFormat
2.2 0 8
$EndMeshFormat
$PhysicalNames
2
1 7 \"left\"
2 3 \"gdl\"
$EndPhysicalNames
$Nodes
6
1 0 0 0
2 10 0 0
3 20 0 0
4 0 10 0
5 10 10 0
6 20 10 0
$EndNodes
$Elements
4
1 3 2 3 1 1 2 5 4
2 3 2 5 1 2 3 6 5
3 1 2 7 1 1 4
4 1 2 4 1 2 5
$EndElements
";

const ONE_HEX: &str = "\
$MeshFormat
2.2 0 8
$EndMeshFormat
$Nodes
8
1 0 0 0
2 1 0 0
3 1 1 0
4 0 1 0
5 0 0 1
6 1 0 1
7 1 1 1
8 0 1 1
$EndNodes
$Elements
2
1 5 2 9 1 1 2 3 4 5 6 7 8
2 3 2 5 1 1 2 3 4
$EndElements
";

fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ─── Unit Tests ───────────────────────────────────────────────

#[test]
fn unit_factors() {
    assert_eq!(LengthUnit::Cm.to_cm(), 1.0);
    assert_eq!(LengthUnit::M.to_cm(), 100.0);
    assert_eq!(LengthUnit::Mm.to_cm(), 0.1);
    assert_eq!(LengthUnit::Um.to_cm(), 1.0e-4);
    assert_eq!(LengthUnit::default(), LengthUnit::Cm);
}

#[test]
fn unit_parsing() {
    assert_eq!("MM".parse::<LengthUnit>().unwrap(), LengthUnit::Mm);
    assert_eq!("um".parse::<LengthUnit>().unwrap(), LengthUnit::Um);
    assert!("furlong".parse::<LengthUnit>().is_err());
}

// ─── Gmsh Import Tests ────────────────────────────────────────

#[test]
fn gmsh_import_scales_to_cm() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "two_quads.msh", TWO_QUADS);
    let tria = import_mesh(&path, LengthUnit::Mm).unwrap();
    let (lo, hi) = tria.bounding_box();
    assert_eq!(lo, DVec3::ZERO);
    assert!((hi - DVec3::new(2.0, 1.0, 0.0)).length() < 1e-12);
}

#[test]
fn gmsh_import_trusts_embedded_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "two_quads.msh", TWO_QUADS);
    let tria = import_mesh(&path, LengthUnit::Cm).unwrap();

    assert_eq!(tria.count_cells_with_material(MaterialId(3)), 1);
    assert_eq!(tria.count_cells_with_material(MaterialId(5)), 1);
    assert_eq!(
        tria.boundary_ids().into_iter().collect::<Vec<_>>(),
        vec![BoundaryId(0), BoundaryId(7)]
    );
    assert_eq!(
        tria.interface_ids().into_iter().collect::<Vec<_>>(),
        vec![BoundaryId(4)]
    );
    assert!(validate_mesh(&tria).is_ok());
}

#[test]
fn gmsh_import_hexahedron() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "cube.msh", ONE_HEX);
    let tria = import_mesh(&path, LengthUnit::Cm).unwrap();

    assert_eq!(tria.dim, 3);
    assert_eq!(tria.n_cells(), 1);
    assert_eq!(tria.cells[0].material_id, MaterialId(9));
    // z-low face is tagged in the file, the rest default to 0
    assert_eq!(tria.cells[0].face_ids[4], Some(BoundaryId(5)));
    for f in [0, 1, 2, 3, 5] {
        assert_eq!(tria.cells[0].face_ids[f], Some(BoundaryId(0)));
    }
    assert!(validate_mesh(&tria).is_ok());
}

#[test]
fn gmsh_import_rejects_unsupported_elements() {
    let dir = tempfile::tempdir().unwrap();
    let content = TWO_QUADS.replace("1 3 2 3 1 1 2 5 4", "1 2 2 3 1 1 2 5");
    let path = write_temp(&dir, "tri.msh", &content);
    let err = import_mesh(&path, LengthUnit::Cm).unwrap_err();
    assert!(matches!(err, PemgridError::ImportFailure { .. }));
}

#[test]
fn gmsh_import_rejects_truncated_file() {
    let dir = tempfile::tempdir().unwrap();
    let content: String = TWO_QUADS.lines().take(16).collect::<Vec<_>>().join("\n");
    let path = write_temp(&dir, "truncated.msh", &content);
    assert!(matches!(
        import_mesh(&path, LengthUnit::Cm),
        Err(PemgridError::ImportFailure { .. })
    ));
}

#[test]
fn gmsh_import_rejects_oversized_counts() {
    let dir = tempfile::tempdir().unwrap();
    let cases = [
        ("nodes.msh", TWO_QUADS.replace("$Nodes\n6\n", "$Nodes\n18446744073709551615\n")),
        ("elements.msh", TWO_QUADS.replace("$Elements\n4\n", "$Elements\n18446744073709551615\n")),
        ("tags.msh", TWO_QUADS.replace("1 3 2 3 1 1 2 5 4", "1 3 18446744073709551615 1")),
        ("kind.msh", TWO_QUADS.replace("1 3 2 3 1 1 2 5 4", "1 4294967299 2 3 1 1 2 5 4")),
    ];
    for (name, content) in cases {
        let path = write_temp(&dir, name, &content);
        assert!(
            matches!(
                import_mesh(&path, LengthUnit::Cm),
                Err(PemgridError::ImportFailure { .. })
            ),
            "{name}"
        );
    }
}

// ─── Import Dispatch Tests ────────────────────────────────────

#[test]
fn missing_file_is_import_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.msh");
    let err = import_mesh(&path, LengthUnit::Cm).unwrap_err();
    match err {
        PemgridError::ImportFailure { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_extension_is_import_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "mesh.vtk", "# vtk DataFile Version 3.0");
    assert!(matches!(
        import_mesh(&path, LengthUnit::Cm),
        Err(PemgridError::ImportFailure { .. })
    ));
}

#[test]
fn malformed_json_is_import_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp(&dir, "mesh.json", "{\"dim\": 2, \"vertices\": ");
    assert!(matches!(
        import_mesh(&path, LengthUnit::Cm),
        Err(PemgridError::ImportFailure { .. })
    ));
}

#[test]
fn json_import_keeps_tags_and_scales() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cube.json");
    let mut tria = hyper_cube(2, 0.0, 1.0).unwrap();
    tria.set_all_material_ids(MaterialId(4));
    tria.cells[0].face_ids[0] = Some(BoundaryId(2));
    save_json(&tria, &path).unwrap();

    let back = import_mesh(&path, LengthUnit::M).unwrap();
    assert_eq!(back.cells[0].material_id, MaterialId(4));
    assert_eq!(back.cells[0].face_ids[0], Some(BoundaryId(2)));
    assert_eq!(back.cells[0].face_ids[1], Some(BoundaryId(0)));
    assert_eq!(back.bounding_box().1, DVec3::new(100.0, 100.0, 0.0));
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn empty_mesh_fails_validation() {
    assert!(validate_mesh(&Triangulation::new(2)).is_err());
}

#[test]
fn untagged_boundary_fails_validation() {
    let mut tria = hyper_cube(3, 0.0, 1.0).unwrap();
    assert!(validate_mesh(&tria).is_err());
    assert_eq!(fill_untagged_boundary(&mut tria, BoundaryId(0)), 6);
    assert!(validate_mesh(&tria).is_ok());
    assert_eq!(fill_untagged_boundary(&mut tria, BoundaryId(0)), 0);
}

#[test]
fn summary_counts() {
    let mut tria = subdivided_hyper_rectangle(2, &[2, 1], DVec3::ZERO, DVec3::new(2.0, 1.0, 0.0))
        .unwrap();
    tria.cells[0].material_id = MaterialId(2);
    tria.cells[1].material_id = MaterialId(3);
    tria.cells[0].face_ids[1] = Some(BoundaryId(9));
    tria.cells[1].face_ids[0] = Some(BoundaryId(9));
    fill_untagged_boundary(&mut tria, BoundaryId(1));

    let summary = MeshSummary::of(&tria);
    assert_eq!(summary.n_cells, 2);
    assert_eq!(summary.materials[&MaterialId(2)], 1);
    assert_eq!(summary.boundary_faces[&BoundaryId(1)], 6);
    assert_eq!(summary.interface_faces[&BoundaryId(9)], 1);
    assert_eq!(summary.untagged_boundary_faces, 0);
    assert!(summary.to_string().contains("2D mesh: 2 cells"));
}
