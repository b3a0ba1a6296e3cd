//! Integration tests for pemgrid-geometry.

use std::collections::BTreeSet;
use std::path::PathBuf;

use pemgrid_geometry::{
    global, names, GenerationState, Geometry, GeometryRegistry, GridConfig, GridGenerator,
    LayerConfig, LayerParams, LayerStack, StackKind,
};
use pemgrid_io::{save_json, validate_mesh};
use pemgrid_mesh::generators::hyper_cube;
use pemgrid_mesh::{Topology, Triangulation};
use pemgrid_types::constants::MAX_INITIAL_REFINEMENTS;
use pemgrid_types::{BoundaryId, MaterialId, PemgridError};

fn materials(ids: &[u16]) -> BTreeSet<MaterialId> {
    ids.iter().map(|&i| MaterialId(i)).collect()
}

fn boundaries(ids: &[u16]) -> BTreeSet<BoundaryId> {
    ids.iter().map(|&i| BoundaryId(i)).collect()
}

fn generate(name: &str, config: &GridConfig, dim: usize) -> Triangulation {
    let mut generator = global().create(name).unwrap();
    generator.configure(config).unwrap();
    let mut tria = Triangulation::new(dim);
    generator.generate_grid(&mut tria).unwrap();
    tria
}

/// Writes a tagged one-cell mesh to a temporary JSON file.
fn external_fixture(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("fixture.json");
    let mut tria = hyper_cube(2, 0.0, 1.0).unwrap();
    tria.set_all_material_ids(MaterialId(3));
    tria.tag_boundary_faces(|_, _| Some(BoundaryId(6)));
    save_json(&tria, &path).unwrap();
    path
}

// ─── Registry Tests ───────────────────────────────────────────

#[test]
fn builtins_are_registered() {
    let registry = global();
    for name in [
        names::HYPER_CUBE,
        names::GRID_TEST,
        names::GRID_EXTERNAL,
        names::CATHODE_MPL,
        names::PEMFC_MPL,
        names::AGGLOMERATE,
    ] {
        assert!(registry.contains(name), "{name} missing");
    }
    assert_eq!(registry.len(), 6);
}

#[test]
fn unknown_name_lists_known_kinds() {
    let err = global().create("DoesNotExist").unwrap_err();
    match &err {
        PemgridError::UnknownGeometryKind { requested, known } => {
            assert_eq!(requested, "DoesNotExist");
            assert!(known.iter().any(|k| k == "PemfcMPL"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("HyperCube"));
}

#[test]
fn names_are_case_sensitive() {
    assert!(global().create("hypercube").is_err());
}

#[test]
fn duplicate_registration_is_rejected() {
    let mut registry = GeometryRegistry::with_builtins();
    let err = registry
        .register(names::HYPER_CUBE, GridGenerator::new("x", Geometry::GridTest))
        .unwrap_err();
    assert!(matches!(err, PemgridError::DuplicateRegistration(_)));
    // the original prototype survives
    let generator = registry.create(names::HYPER_CUBE).unwrap();
    assert_eq!(generator.geometry(), &Geometry::HyperCube);
}

#[test]
fn custom_kind_can_be_registered() {
    let mut registry = GeometryRegistry::with_builtins();
    let layers = LayerConfig {
        cathode_mpl: LayerParams::omitted(),
        ..Default::default()
    };
    registry
        .register("CathodeNoMPL", GridGenerator::new("", Geometry::CathodeMpl(layers)))
        .unwrap();

    let mut generator = registry.create("CathodeNoMPL").unwrap();
    assert_eq!(generator.name(), "CathodeNoMPL");
    let mut tria = Triangulation::new(2);
    generator.generate_grid(&mut tria).unwrap();
    assert!(!tria.material_ids().contains(&MaterialId(3)));
}

#[test]
fn create_returns_independent_instances() {
    let mut a = global().create(names::HYPER_CUBE).unwrap();
    let b = global().create(names::HYPER_CUBE).unwrap();
    a.generate_grid(&mut Triangulation::new(2)).unwrap();
    assert_eq!(a.state(), GenerationState::Generated);
    assert_eq!(b.state(), GenerationState::Unconstructed);
}

// ─── Generator Lifecycle Tests ────────────────────────────────

#[test]
fn every_registered_name_generates() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GridConfig::default();
    config.external.path = Some(external_fixture(&dir));

    for name in global().names() {
        let tria = generate(name, &config, 2);
        assert!(tria.n_cells() > 0, "{name} produced no cells");
        validate_mesh(&tria).unwrap_or_else(|e| panic!("{name}: {e}"));
    }
}

#[test]
fn second_generate_is_rejected() {
    let mut generator = global().create(names::PEMFC_MPL).unwrap();
    let mut first = Triangulation::new(2);
    generator.generate_grid(&mut first).unwrap();
    let snapshot = first.clone();

    let mut second = Triangulation::new(2);
    let err = generator.generate_grid(&mut second).unwrap_err();
    assert!(matches!(err, PemgridError::AlreadyGenerated(ref n) if n == "PemfcMPL"));
    assert!(second.is_empty());
    assert_eq!(first, snapshot);
}

#[test]
fn non_empty_mesh_is_rejected() {
    let mut generator = global().create(names::HYPER_CUBE).unwrap();
    let mut tria = hyper_cube(2, 0.0, 2.0).unwrap();
    let before = tria.clone();
    assert!(matches!(
        generator.generate_grid(&mut tria),
        Err(PemgridError::MeshNotEmpty)
    ));
    assert_eq!(tria, before);
    // the failed call does not consume the instance
    assert_eq!(generator.state(), GenerationState::Unconstructed);
}

#[test]
fn configure_after_generation_is_rejected() {
    let mut generator = global().create(names::HYPER_CUBE).unwrap();
    generator.generate_grid(&mut Triangulation::new(2)).unwrap();
    assert!(matches!(
        generator.configure(&GridConfig::default()),
        Err(PemgridError::AlreadyGenerated(_))
    ));
}

#[test]
fn invalid_layers_rejected_before_construction() {
    let mut generator = global().create(names::CATHODE_MPL).unwrap();
    let before = generator.clone();
    let mut config = GridConfig::default();
    config.layers.cathode_gdl = LayerParams::new(-0.01, 4);
    assert!(matches!(
        generator.configure(&config),
        Err(PemgridError::InvalidLayerParameters(_))
    ));
    assert_eq!(generator, before);

    config.layers.cathode_gdl = LayerParams::new(0.02, 0);
    assert!(generator.configure(&config).is_err());
}

#[test]
fn excessive_refinement_is_rejected() {
    let mut generator = global().create(names::HYPER_CUBE).unwrap();
    let config = GridConfig {
        initial_refinements: MAX_INITIAL_REFINEMENTS + 1,
        ..Default::default()
    };
    assert!(matches!(
        config.validate_common(),
        Err(PemgridError::InvalidLayerParameters(_))
    ));
    assert!(matches!(
        generator.configure(&config),
        Err(PemgridError::InvalidLayerParameters(_))
    ));
    assert!(generator.set_initial_refinements(30).is_err());
    assert_eq!(generator.initial_refinements(), 0);

    generator.set_initial_refinements(MAX_INITIAL_REFINEMENTS).unwrap();
    assert_eq!(generator.initial_refinements(), MAX_INITIAL_REFINEMENTS);
}

#[test]
fn reset_material_ids_needs_agglomerate() {
    let generator = global().create(names::HYPER_CUBE).unwrap();
    let mut tria = hyper_cube(2, 0.0, 1.0).unwrap();
    assert!(generator.reset_material_ids(&mut tria).is_err());
}

// ─── Unit-Cube Geometry Tests ─────────────────────────────────

#[test]
fn hyper_cube_tags() {
    for dim in [2, 3] {
        let tria = generate(names::HYPER_CUBE, &GridConfig::default(), dim);
        assert_eq!(tria.n_cells(), 1);
        assert_eq!(tria.material_ids(), materials(&[1]));
        assert_eq!(tria.boundary_ids(), boundaries(&[0]));
    }
}

#[test]
fn hyper_cube_refined() {
    let config = GridConfig {
        initial_refinements: 2,
        ..Default::default()
    };
    let tria = generate(names::HYPER_CUBE, &config, 2);
    assert_eq!(tria.n_cells(), 16);
    assert_eq!(tria.count_cells_with_material(MaterialId(1)), 16);
    assert_eq!(tria.boundary_ids(), boundaries(&[0]));
}

#[test]
fn grid_test_tags_every_face() {
    let tria = generate(names::GRID_TEST, &GridConfig::default(), 2);
    assert_eq!(tria.cells[0].face_ids, (1..=4).map(|i| Some(BoundaryId(i))).collect::<Vec<_>>());
    let tria = generate(names::GRID_TEST, &GridConfig::default(), 3);
    assert_eq!(tria.boundary_ids(), boundaries(&[1, 2, 3, 4, 5, 6]));
}

// ─── Layered Stack Tests ──────────────────────────────────────

#[test]
fn full_cell_defaults() {
    let tria = generate(names::PEMFC_MPL, &GridConfig::default(), 2);
    assert_eq!(tria.n_cells(), 16 * 6);
    assert_eq!(tria.material_ids(), materials(&[2, 3, 4, 5, 6, 7, 8]));
    assert_eq!(tria.count_cells_with_material(MaterialId(2)), 4 * 6);
    assert_eq!(tria.count_cells_with_material(MaterialId(4)), 6);
    assert_eq!(tria.boundary_ids(), boundaries(&[0, 1, 2, 7, 8]));
    assert_eq!(tria.interface_ids(), boundaries(&[4, 5, 9, 10, 11, 12]));

    let (lo, hi) = tria.bounding_box();
    assert!(lo.abs().max_element() < 1e-15);
    assert!((hi.x - 0.066).abs() < 1e-12);
    assert!((hi.y - 0.2).abs() < 1e-12);
}

#[test]
fn cathode_defaults() {
    let tria = generate(names::CATHODE_MPL, &GridConfig::default(), 2);
    assert_eq!(tria.n_cells(), 10 * 6);
    assert_eq!(tria.material_ids(), materials(&[2, 3, 4, 5]));
    assert_eq!(tria.boundary_ids(), boundaries(&[0, 1, 2, 5]));
    assert_eq!(tria.interface_ids(), boundaries(&[4, 9, 10]));
}

#[test]
fn cathode_without_mpl_retags_interface() {
    let mut config = GridConfig::default();
    config.layers.cathode_mpl = LayerParams::omitted();
    let tria = generate(names::CATHODE_MPL, &config, 2);
    assert!(!tria.material_ids().contains(&MaterialId(3)));
    assert_eq!(tria.interface_ids(), boundaries(&[4, 10]));
    assert!(validate_mesh(&tria).is_ok());
}

#[test]
fn plate_and_channel_split_the_outer_faces() {
    let tria = generate(names::PEMFC_MPL, &GridConfig::default(), 2);
    let topo = Topology::build(&tria);
    let count = |id: u16| {
        topo.boundary_faces()
            .into_iter()
            .filter(|&(c, f)| tria.cell(c).face_ids[f] == Some(BoundaryId(id)))
            .count()
    };
    // 6 cells tall, rib and channel 0.1 cm each
    assert_eq!(count(1), 3);
    assert_eq!(count(2), 3);
    assert_eq!(count(7), 3);
    assert_eq!(count(8), 3);
    // top and bottom of 16 columns
    assert_eq!(count(0), 32);

    for (c, f) in topo.boundary_faces() {
        if tria.cell(c).face_ids[f] == Some(BoundaryId(1)) {
            assert!(tria.face_center(c, f).y < 0.1);
        }
    }
}

/// Layer config with the given slots (cathode GDL = 0 ... anode GDL = 6)
/// set to zero thickness.
fn layers_without(slots: &[usize]) -> LayerConfig {
    let mut layers = LayerConfig::default();
    for &slot in slots {
        let params = match slot {
            0 => &mut layers.cathode_gdl,
            1 => &mut layers.cathode_mpl,
            2 => &mut layers.cathode_cl,
            3 => &mut layers.membrane,
            4 => &mut layers.anode_cl,
            5 => &mut layers.anode_mpl,
            6 => &mut layers.anode_gdl,
            _ => unreachable!("no layer slot {slot}"),
        };
        *params = LayerParams::omitted();
    }
    layers
}

#[test]
fn omitted_layers_take_the_downstream_interface_id() {
    // (omitted slots, interfaces left to right, outer boundary ids)
    let cases: &[(&[usize], &[u16], &[u16])] = &[
        (&[], &[9, 10, 4, 5, 11, 12], &[0, 1, 2, 7, 8]),
        (&[0], &[10, 4, 5, 11, 12], &[0, 1, 2, 7, 8]),
        (&[1], &[10, 4, 5, 11, 12], &[0, 1, 2, 7, 8]),
        (&[2], &[9, 4, 5, 11, 12], &[0, 1, 2, 7, 8]),
        (&[3], &[9, 10, 5, 11, 12], &[0, 1, 2, 7, 8]),
        (&[4], &[9, 10, 4, 11, 12], &[0, 1, 2, 7, 8]),
        (&[5], &[9, 10, 4, 5, 12], &[0, 1, 2, 7, 8]),
        (&[6], &[9, 10, 4, 5, 11], &[0, 1, 2, 7, 8]),
        (&[1, 5], &[10, 4, 5, 12], &[0, 1, 2, 7, 8]),
        (&[1, 2, 5], &[4, 5, 12], &[0, 1, 2, 7, 8]),
        (&[0, 1, 2], &[5, 11, 12], &[0, 1, 2, 7, 8]),
        (&[0, 1, 2, 3, 4, 5], &[], &[0, 1, 2, 7, 8]),
    ];

    for &(omitted, interfaces, outer) in cases {
        let layers = layers_without(omitted);
        let stack = LayerStack::new(StackKind::FullCell, &layers).unwrap();
        let ordered: Vec<BoundaryId> = interfaces.iter().map(|&i| BoundaryId(i)).collect();
        assert_eq!(stack.interface_ids(), ordered, "omitted {omitted:?}");

        let config = GridConfig {
            layers,
            ..Default::default()
        };
        let tria = generate(names::PEMFC_MPL, &config, 2);
        assert_eq!(tria.interface_ids(), boundaries(interfaces), "omitted {omitted:?}");
        assert_eq!(tria.boundary_ids(), boundaries(outer), "omitted {omitted:?}");

        let expected_materials: Vec<u16> = (0..7u16)
            .filter(|slot| !omitted.contains(&(*slot as usize)))
            .map(|slot| slot + 2)
            .collect();
        assert_eq!(tria.material_ids(), materials(&expected_materials), "omitted {omitted:?}");
    }
}

#[test]
fn cathode_stack_omissions() {
    let cases: &[(&[usize], &[u16], &[u16])] = &[
        (&[0], &[10, 4], &[0, 1, 2, 5]),
        (&[1], &[10, 4], &[0, 1, 2, 5]),
        (&[3], &[9, 10], &[0, 1, 2, 4]),
        (&[0, 1, 2], &[], &[0, 1, 2, 5]),
    ];
    for &(omitted, interfaces, outer) in cases {
        let config = GridConfig {
            layers: layers_without(omitted),
            ..Default::default()
        };
        let tria = generate(names::CATHODE_MPL, &config, 2);
        assert_eq!(tria.interface_ids(), boundaries(interfaces), "omitted {omitted:?}");
        assert_eq!(tria.boundary_ids(), boundaries(outer), "omitted {omitted:?}");
    }
}

#[test]
fn plate_split_moves_onto_the_first_present_layer() {
    let config = GridConfig {
        layers: layers_without(&[0]),
        ..Default::default()
    };
    let tria = generate(names::PEMFC_MPL, &config, 2);
    let topo = Topology::build(&tria);
    let mut plate_faces = 0;
    for (c, f) in topo.boundary_faces() {
        let id = tria.cell(c).face_ids[f];
        if id == Some(BoundaryId(1)) || id == Some(BoundaryId(2)) {
            assert_eq!(tria.cell(c).material_id, MaterialId(3));
            assert!(tria.face_center(c, f).x.abs() < 1e-15);
            plate_faces += 1;
        }
    }
    assert_eq!(plate_faces, 6);
}

#[test]
fn every_layer_omission_combination_is_consistent() {
    let defaults = LayerConfig::default();
    for mask in 0u32..(1 << 7) {
        let mut layers = defaults.clone();
        let slots = [
            &mut layers.cathode_gdl,
            &mut layers.cathode_mpl,
            &mut layers.cathode_cl,
            &mut layers.membrane,
            &mut layers.anode_cl,
            &mut layers.anode_mpl,
            &mut layers.anode_gdl,
        ];
        for (i, slot) in slots.into_iter().enumerate() {
            if mask & (1 << i) != 0 {
                *slot = LayerParams::omitted();
            }
        }

        let mut generator = global().create(names::PEMFC_MPL).unwrap();
        let config = GridConfig {
            layers: layers.clone(),
            ..Default::default()
        };
        if mask == (1 << 7) - 1 {
            assert!(matches!(
                generator.configure(&config),
                Err(PemgridError::InvalidLayerParameters(_))
            ));
            continue;
        }
        generator.configure(&config).unwrap();
        let mut tria = Triangulation::new(2);
        generator.generate_grid(&mut tria).unwrap();

        let stack = LayerStack::new(StackKind::FullCell, &layers).unwrap();
        let expected_materials: BTreeSet<MaterialId> = stack.materials().into_iter().collect();
        let expected_interfaces: BTreeSet<BoundaryId> = stack.interface_ids().into_iter().collect();
        assert_eq!(tria.material_ids(), expected_materials, "mask {mask:07b}");
        assert_eq!(tria.interface_ids(), expected_interfaces, "mask {mask:07b}");
        assert_eq!(tria.n_cells(), stack.cells_across() * 6, "mask {mask:07b}");
        assert!(validate_mesh(&tria).is_ok(), "mask {mask:07b}");
        assert!(tria.boundary_ids().is_subset(&boundaries(&[0, 1, 2, 7, 8])));
    }
}

#[test]
fn refinement_preserves_stack_tags() {
    let coarse = generate(names::PEMFC_MPL, &GridConfig::default(), 2);
    let config = GridConfig {
        initial_refinements: 1,
        ..Default::default()
    };
    let fine = generate(names::PEMFC_MPL, &config, 2);
    assert_eq!(fine.n_cells(), 4 * coarse.n_cells());
    assert_eq!(fine.material_ids(), coarse.material_ids());
    assert_eq!(fine.boundary_ids(), coarse.boundary_ids());
    assert_eq!(fine.interface_ids(), coarse.interface_ids());
    assert!(validate_mesh(&fine).is_ok());
}

#[test]
fn three_dimensional_stack() {
    let mut config = GridConfig::default();
    config.layers.cells_deep = 2;
    let tria = generate(names::PEMFC_MPL, &config, 3);
    assert_eq!(tria.dim, 3);
    assert_eq!(tria.n_cells(), 16 * 6 * 2);
    assert_eq!(tria.boundary_ids(), boundaries(&[0, 1, 2, 7, 8]));
    assert_eq!(tria.interface_ids(), boundaries(&[4, 5, 9, 10, 11, 12]));
    assert!(validate_mesh(&tria).is_ok());
    assert!((tria.bounding_box().1.z - 0.1).abs() < 1e-12);
}

// ─── Agglomerate Tests ────────────────────────────────────────

#[test]
fn agglomerate_regions() {
    let tria = generate(names::AGGLOMERATE, &GridConfig::default(), 2);
    assert_eq!(tria.material_ids(), materials(&[1, 2]));
    assert_eq!(tria.boundary_ids(), boundaries(&[1]));
    assert!(tria.interface_ids().is_empty());
    assert!(validate_mesh(&tria).is_ok());
}

#[test]
fn agglomerate_reset_is_idempotent() {
    let config = GridConfig {
        initial_refinements: 2,
        ..Default::default()
    };
    let mut generator = global().create(names::AGGLOMERATE).unwrap();
    generator.configure(&config).unwrap();
    let mut tria = Triangulation::new(2);
    generator.generate_grid(&mut tria).unwrap();
    let constructed = tria.clone();

    generator.reset_material_ids(&mut tria).unwrap();
    assert_eq!(tria, constructed);
    generator.reset_material_ids(&mut tria).unwrap();
    assert_eq!(tria, constructed);

    tria.set_all_material_ids(MaterialId(9));
    generator.reset_material_ids(&mut tria).unwrap();
    assert_eq!(tria, constructed);
}

#[test]
fn agglomerate_rejects_3d() {
    let mut generator = global().create(names::AGGLOMERATE).unwrap();
    let mut tria = Triangulation::new(3);
    let err = generator.generate_grid(&mut tria).unwrap_err();
    assert!(matches!(err, PemgridError::UnsupportedDimension { dim: 3, .. }));
    assert!(tria.is_empty());
    assert_eq!(generator.state(), GenerationState::Unconstructed);
}

// ─── External Import Tests ────────────────────────────────────

#[test]
fn external_keeps_embedded_ids() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GridConfig::default();
    config.external.path = Some(external_fixture(&dir));
    let tria = generate(names::GRID_EXTERNAL, &config, 2);
    assert_eq!(tria.material_ids(), materials(&[3]));
    assert_eq!(tria.boundary_ids(), boundaries(&[6]));
}

#[test]
fn external_prototype_needs_a_path() {
    let mut generator = global().create(names::GRID_EXTERNAL).unwrap();
    let mut tria = Triangulation::new(2);
    assert!(matches!(
        generator.generate_grid(&mut tria),
        Err(PemgridError::ImportFailure { .. })
    ));
    assert!(tria.is_empty());
}

#[test]
fn external_missing_file_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GridConfig::default();
    config.external.path = Some(dir.path().join("missing.msh"));
    let mut generator = global().create(names::GRID_EXTERNAL).unwrap();
    generator.configure(&config).unwrap();
    let mut tria = Triangulation::new(2);
    assert!(matches!(
        generator.generate_grid(&mut tria),
        Err(PemgridError::ImportFailure { .. })
    ));
    assert!(tria.is_empty());
}

#[test]
fn external_dimension_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = GridConfig::default();
    config.external.path = Some(external_fixture(&dir));
    let mut generator = global().create(names::GRID_EXTERNAL).unwrap();
    generator.configure(&config).unwrap();
    assert!(generator.generate_grid(&mut Triangulation::new(3)).is_err());
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn config_defaults() {
    let config = GridConfig::default();
    assert_eq!(config.dimension, 2);
    assert_eq!(config.initial_refinements, 0);
    assert_eq!(config.layers.cathode_gdl, LayerParams::new(0.02, 4));
    assert!((config.layers.height() - 0.2).abs() < 1e-15);
}

#[test]
fn config_from_toml() {
    let config = GridConfig::from_toml_str(
        r#"
        geometry = "CathodeMPL"
        initial_refinements = 1

        [layers]
        cathode_mpl = { thickness = 0.0, cells = 0 }
        cells_tall = 4

        [agglomerate]
        core_cells = 2
        "#,
    )
    .unwrap();
    assert_eq!(config.geometry, "CathodeMPL");
    assert_eq!(config.initial_refinements, 1);
    assert!(config.layers.cathode_mpl.is_omitted());
    assert_eq!(config.layers.cells_tall, 4);
    assert_eq!(config.layers.membrane.cells, 4);
    assert_eq!(config.agglomerate.core_cells, 2);
}

#[test]
fn config_load_and_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.toml");
    let mut config = GridConfig::default();
    config.geometry = names::AGGLOMERATE.to_string();
    config.agglomerate.film_cells = 3;
    std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
    assert_eq!(GridConfig::load(&path).unwrap(), config);
}

#[test]
fn malformed_toml_is_invalid_config() {
    assert!(matches!(
        GridConfig::from_toml_str("dimension = \"three\""),
        Err(PemgridError::InvalidConfig(_))
    ));
}

// ─── Concurrency Tests ────────────────────────────────────────

#[test]
fn independent_instances_generate_concurrently() {
    let kinds = [
        names::HYPER_CUBE,
        names::GRID_TEST,
        names::CATHODE_MPL,
        names::PEMFC_MPL,
        names::AGGLOMERATE,
    ];
    let sequential: Vec<Triangulation> = kinds
        .iter()
        .map(|name| generate(name, &GridConfig::default(), 2))
        .collect();

    let parallel: Vec<Triangulation> = std::thread::scope(|s| {
        let handles: Vec<_> = kinds
            .iter()
            .map(|name| s.spawn(move || generate(name, &GridConfig::default(), 2)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(parallel, sequential);
}
