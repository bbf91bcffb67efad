//! End-to-end boundary update scenarios.

use std::io::Write;

use noh_boundary::{
    BoundaryError, BoundaryOutcome, HydroMethod, RunConfig,
    compute::{Face, Field, MeshPatch, NohBoundary, Side},
    schema::{BoundaryConfig, ConfigError, PatchGeometry},
};

const SENTINEL: f64 = -1.0e30;

fn fresh_patch(geometry: PatchGeometry) -> MeshPatch {
    let mut patch = MeshPatch::new(geometry, 0).unwrap();
    patch.fill(SENTINEL);
    patch
}

/// Physical center of cell `(i, j, k)`.
fn cell_center(g: &PatchGeometry, cell: [usize; 3]) -> [f64; 3] {
    std::array::from_fn(|axis| {
        if axis >= g.rank {
            return 0.0;
        }
        g.left_edge[axis] + (cell[axis] as f64 - g.start_index[axis] as f64 + 0.5) * g.cell_width[axis]
    })
}

fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

fn for_each_cell(g: &PatchGeometry, mut f: impl FnMut([usize; 3])) {
    for k in 0..g.dimension[2] {
        for j in 0..g.dimension[1] {
            for i in 0..g.dimension[0] {
                f([i, j, k]);
            }
        }
    }
}

fn written(patch: &MeshPatch, cell: [usize; 3]) -> bool {
    patch.get(Field::Density, cell[0], cell[1], cell[2]) != Some(SENTINEL)
}

#[test]
fn test_quadrant_2d_corner_untouched() {
    let geometry = PatchGeometry::uniform_2d(8, 8, 3);
    let mut patch = fresh_patch(geometry.clone());
    let boundary = NohBoundary::new(BoundaryConfig {
        time: 0.1,
        ..Default::default()
    })
    .unwrap();

    boundary.apply(&mut patch).unwrap();

    // Low-corner ghost cell is never part of a sweep in a quadrant run.
    assert!(!written(&patch, [0, 0, 0]));

    let start = geometry.start_index;
    let end = geometry.end_index;
    for_each_cell(&geometry, |cell| {
        let [i, j, _] = cell;
        let in_low_ghosts = i < start[0] || j < start[1];
        let in_high_ghosts = i > end[0] || j > end[1];
        assert_eq!(
            written(&patch, cell),
            !in_low_ghosts && in_high_ghosts,
            "cell ({}, {})",
            i,
            j
        );
    });
}

#[test]
fn test_quadrant_radius_measured_from_low_corner() {
    let geometry = PatchGeometry::uniform_2d(8, 8, 3);
    let mut patch = fresh_patch(geometry.clone());
    let time = 0.1;
    NohBoundary::new(BoundaryConfig {
        time,
        ..Default::default()
    })
    .unwrap()
    .apply(&mut patch)
    .unwrap();

    let corner = geometry.domain_left_edge;
    for_each_cell(&geometry, |cell| {
        if !written(&patch, cell) {
            return;
        }
        let r = distance(cell_center(&geometry, cell), corner);
        let d = patch.get(Field::Density, cell[0], cell[1], cell[2]).unwrap();
        assert!((d - (1.0 + time / r)).abs() < 1e-10, "cell {:?}", cell);
    });
}

#[test]
fn test_full_box_3d_at_time_zero() {
    let geometry = PatchGeometry::uniform_3d(16, 16, 16, 3);
    let mut patch = fresh_patch(geometry.clone());
    let boundary = NohBoundary::new(BoundaryConfig {
        time: 0.0,
        full_box: true,
        ..Default::default()
    })
    .unwrap();

    let outcome = boundary.apply(&mut patch).unwrap();
    let report = outcome.report().unwrap();
    assert_eq!(report.faces.len(), 6);

    let total = geometry.cell_count();
    let active = 16 * 16 * 16;
    assert_eq!(report.cells, total - active);

    for_each_cell(&geometry, |[i, j, k]| {
        if !written(&patch, [i, j, k]) {
            return;
        }
        assert_eq!(patch.get(Field::Density, i, j, k), Some(1.0));
        let speed: f64 = [Field::VelocityX, Field::VelocityY, Field::VelocityZ]
            .iter()
            .map(|f| patch.get(*f, i, j, k).unwrap().powi(2))
            .sum::<f64>()
            .sqrt();
        assert!((speed - 1.0).abs() < 1e-12);
    });
}

#[test]
fn test_full_box_radius_measured_from_midpoint() {
    let geometry = PatchGeometry::uniform_2d(12, 12, 2);
    let mut patch = fresh_patch(geometry.clone());
    let time = 0.25;
    NohBoundary::new(BoundaryConfig {
        time,
        full_box: true,
        ..Default::default()
    })
    .unwrap()
    .apply(&mut patch)
    .unwrap();

    let mid = [0.5, 0.5, 0.0];
    let mut count = 0;
    for_each_cell(&geometry, |cell| {
        if !written(&patch, cell) {
            return;
        }
        count += 1;
        let r = distance(cell_center(&geometry, cell), mid);
        let d = patch.get(Field::Density, cell[0], cell[1], cell[2]).unwrap();
        assert!((d - (1.0 + time / r)).abs() < 1e-10, "cell {:?}", cell);
    });
    assert_eq!(count, 16 * 16 - 12 * 12);
}

#[test]
fn test_full_box_offset_tile_measures_from_midpoint() {
    // Upper-right quarter of a 16x16 domain: only the high faces are external.
    let geometry = PatchGeometry::tile(
        2,
        [16, 16, 1],
        [8, 8, 0],
        [8, 8, 1],
        2,
        [0.0; 3],
        [1.0; 3],
    );
    let mut patch = fresh_patch(geometry.clone());
    let time = 0.3;
    let outcome = NohBoundary::new(BoundaryConfig {
        time,
        full_box: true,
        ..Default::default()
    })
    .unwrap()
    .apply(&mut patch)
    .unwrap();

    let report = outcome.report().unwrap();
    assert_eq!(report.faces.len(), 2);
    // x-high spans every j, y-high skips the shared corner already swept.
    assert_eq!(report.cells_on(Face::new(0, Side::High)), 2 * 12);
    assert_eq!(report.cells_on(Face::new(1, Side::High)), 2 * 12 - 4);
    assert_eq!(report.cells, 44);
    assert_eq!(report.cells_on(Face::new(0, Side::Low)), 0);
    assert_eq!(report.cells_on(Face::new(1, Side::Low)), 0);

    let mid = [0.5, 0.5, 0.0];
    let mut count = 0;
    for_each_cell(&geometry, |cell| {
        if !written(&patch, cell) {
            return;
        }
        count += 1;
        let r = distance(cell_center(&geometry, cell), mid);
        let d = patch.get(Field::Density, cell[0], cell[1], cell[2]).unwrap();
        assert!((d - (1.0 + time / r)).abs() < 1e-10, "cell {:?}", cell);
    });
    assert_eq!(count, 44);
}

#[test]
fn test_octant_3d_written_set() {
    let geometry = PatchGeometry::uniform_3d(8, 8, 8, 2);
    let mut patch = fresh_patch(geometry.clone());
    NohBoundary::new(BoundaryConfig {
        time: 0.2,
        ..Default::default()
    })
    .unwrap()
    .apply(&mut patch)
    .unwrap();

    let start = geometry.start_index;
    let end = geometry.end_index;
    for_each_cell(&geometry, |cell| {
        let low_ghost = (0..3).any(|a| cell[a] < start[a]);
        let high_ghost = (0..3).any(|a| cell[a] > end[a]);
        assert_eq!(
            written(&patch, cell),
            !low_ghost && high_ghost,
            "cell {:?}",
            cell
        );
    });
}

#[test]
fn test_odd_full_box_leaves_patch_untouched() {
    let geometry = PatchGeometry::uniform(3, [16, 15, 16], 3, [0.0; 3], [1.0; 3]);
    let mut patch = fresh_patch(geometry.clone());
    let before = patch.clone();

    let err = NohBoundary::new(BoundaryConfig {
        full_box: true,
        time: 0.3,
        ..Default::default()
    })
    .unwrap()
    .apply(&mut patch)
    .unwrap_err();

    assert!(matches!(
        err,
        BoundaryError::OddFullBoxDimension {
            axis: 1,
            dimension: 21
        }
    ));
    assert!(err.to_string().contains("even"));
    for field in [Field::Density, Field::Energy, Field::VelocityX, Field::VelocityZ] {
        assert_eq!(patch.field(field), before.field(field));
    }
}

#[test]
fn test_energy_by_hydro_method() {
    for (method, expected) in [
        (HydroMethod::Zeus, 1.0e-6 / 0.4),
        (HydroMethod::PpmDirectEuler, 1.0e-6 / 0.4 + 0.5),
        (HydroMethod::PpmLagrangeRemap, 1.0e-6 / 0.4 + 0.5),
    ] {
        let geometry = PatchGeometry::uniform_3d(8, 8, 8, 2);
        let mut patch = fresh_patch(geometry.clone());
        NohBoundary::new(BoundaryConfig {
            time: 0.2,
            gamma: 1.4,
            hydro_method: method,
            ..Default::default()
        })
        .unwrap()
        .apply(&mut patch)
        .unwrap();

        for_each_cell(&geometry, |[i, j, k]| {
            if written(&patch, [i, j, k]) {
                let e = patch.get(Field::Energy, i, j, k).unwrap();
                assert!((e - expected).abs() < 1e-14, "{:?}", method);
            }
        });
    }
}

#[test]
fn test_right_edge_tile_in_quadrant_run() {
    // Tile covering the upper half in x of a 16x16 domain, bottom half in y.
    let geometry = PatchGeometry::tile(
        2,
        [16, 16, 1],
        [8, 0, 0],
        [8, 8, 1],
        3,
        [0.0; 3],
        [1.0; 3],
    );
    let mut patch = fresh_patch(geometry.clone());
    let time = 0.15;
    let outcome = NohBoundary::new(BoundaryConfig {
        time,
        ..Default::default()
    })
    .unwrap()
    .apply(&mut patch)
    .unwrap();

    let report = outcome.report().unwrap();
    assert_eq!(report.faces.len(), 1);
    // i beyond the active zone, j from the active start (low y is the domain face).
    assert_eq!(report.cells_on(Face::new(0, Side::High)), 3 * 11);
    assert_eq!(report.cells_on(Face::new(1, Side::High)), 0);

    for_each_cell(&geometry, |cell| {
        if !written(&patch, cell) {
            return;
        }
        let r = distance(cell_center(&geometry, cell), [0.0; 3]);
        let d = patch.get(Field::Density, cell[0], cell[1], cell[2]).unwrap();
        assert!((d - (1.0 + time / r)).abs() < 1e-10, "cell {:?}", cell);
    });
}

#[test]
fn test_repeated_update_is_idempotent() {
    let geometry = PatchGeometry::uniform_3d(8, 6, 4, 2);
    let mut patch = fresh_patch(geometry);
    let boundary = NohBoundary::new(BoundaryConfig {
        time: 0.4,
        full_box: true,
        ..Default::default()
    })
    .unwrap();

    let first = boundary.apply(&mut patch).unwrap();
    let snapshot = patch.clone();
    let second = boundary.apply(&mut patch).unwrap();

    assert_eq!(first, second);
    for field in [
        Field::Density,
        Field::Energy,
        Field::VelocityX,
        Field::VelocityY,
        Field::VelocityZ,
    ] {
        assert_eq!(patch.field(field), snapshot.field(field));
    }
}

#[test]
fn test_not_owner_and_no_fields() {
    let geometry = PatchGeometry::uniform_2d(8, 8, 3);
    let boundary = NohBoundary::new(BoundaryConfig {
        process: 2,
        ..Default::default()
    })
    .unwrap();

    let mut foreign = fresh_patch(geometry.clone());
    assert_eq!(boundary.apply(&mut foreign).unwrap(), BoundaryOutcome::NotOwner);

    let mut empty = MeshPatch::without_fields(geometry, 2).unwrap();
    assert_eq!(boundary.apply(&mut empty).unwrap(), BoundaryOutcome::NoFields);
}

#[test]
fn test_run_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let run = RunConfig {
        geometry: PatchGeometry::uniform_2d(16, 16, 3),
        boundary: BoundaryConfig {
            time: 0.5,
            hydro_method: HydroMethod::Zeus,
            ..Default::default()
        },
        owner: 0,
    };
    write!(file, "{}", serde_json::to_string(&run).unwrap()).unwrap();

    let loaded = RunConfig::load(file.path()).unwrap();
    assert_eq!(loaded.geometry, run.geometry);
    assert_eq!(loaded.boundary.hydro_method, HydroMethod::Zeus);
    assert_eq!(loaded.boundary.time, 0.5);
}

#[test]
fn test_run_config_rejects_bad_geometry() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let mut geometry = PatchGeometry::uniform_2d(16, 16, 3);
    geometry.cell_width[0] = 0.0;
    let run = RunConfig {
        geometry,
        boundary: BoundaryConfig::default(),
        owner: 0,
    };
    write!(file, "{}", serde_json::to_string(&run).unwrap()).unwrap();

    assert!(matches!(
        RunConfig::load(file.path()),
        Err(ConfigError::InvalidCellWidth { axis: 0, .. })
    ));
}

#[test]
fn test_run_config_missing_file() {
    assert!(matches!(
        RunConfig::load("/nonexistent/noh-run.json"),
        Err(ConfigError::Io(_))
    ));
}
