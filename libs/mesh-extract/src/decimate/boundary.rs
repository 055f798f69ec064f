//! Boundary surfaces of volume meshes.
//!
//! A boundary face is a cell face referenced by exactly one cell. Output
//! surfaces keep only the points they reference.

use mesh_dataset::{Cell, CellKind, Dataset, LoadResult, StructuredGrid, Topology};
use std::collections::HashMap;

/// A surface cell over source point ids, with the source cell it came from.
struct Face {
    cell: Cell,
    owner: Option<usize>,
}

/// Outer faces of a structured grid as quads, wound outward.
///
/// A grid that is flat along exactly one axis yields its single sheet of
/// quads. Grids flat along two or more axes have no surface.
pub fn structured_boundary(grid: &StructuredGrid, source: &Dataset) -> LoadResult<Dataset> {
    let dims = grid.dims();
    let cell_dims = grid.cell_dims();
    let flat: Vec<usize> = (0..3).filter(|&a| dims[a] == 1).collect();
    let mut faces = Vec::new();

    match flat.as_slice() {
        [] => {
            for axis in 0..3 {
                let (b, c) = ((axis + 1) % 3, (axis + 2) % 3);
                for (layer, outward) in [(0, false), (dims[axis] - 1, true)] {
                    let cell_layer = if outward { cell_dims[axis] - 1 } else { 0 };
                    for v in 0..cell_dims[c] {
                        for u in 0..cell_dims[b] {
                            let corner = |du: usize, dv: usize| {
                                let mut ijk = [0usize; 3];
                                ijk[axis] = layer;
                                ijk[b] = u + du;
                                ijk[c] = v + dv;
                                grid.point_index(ijk[0], ijk[1], ijk[2]) as u32
                            };
                            let mut quad =
                                vec![corner(0, 0), corner(1, 0), corner(1, 1), corner(0, 1)];
                            if !outward {
                                quad.reverse();
                            }
                            let mut owner = [0usize; 3];
                            owner[axis] = cell_layer;
                            owner[b] = u;
                            owner[c] = v;
                            let owner =
                                owner[0] + cell_dims[0] * (owner[1] + cell_dims[1] * owner[2]);
                            faces.push(Face {
                                cell: Cell::polygon(quad),
                                owner: Some(owner),
                            });
                        }
                    }
                }
            }
        }
        [axis] => {
            let (b, c) = ((axis + 1) % 3, (axis + 2) % 3);
            for v in 0..cell_dims[c] {
                for u in 0..cell_dims[b] {
                    let corner = |du: usize, dv: usize| {
                        let mut ijk = [0usize; 3];
                        ijk[b] = u + du;
                        ijk[c] = v + dv;
                        grid.point_index(ijk[0], ijk[1], ijk[2]) as u32
                    };
                    let quad = vec![corner(0, 0), corner(1, 0), corner(1, 1), corner(0, 1)];
                    faces.push(Face {
                        cell: Cell::polygon(quad),
                        owner: None,
                    });
                }
            }
        }
        _ => {}
    }

    compact(source, faces)
}

/// Boundary faces of the volume cells of an unstructured dataset.
///
/// Surface cells pass through unchanged. Faces are emitted in the order
/// their owning cells appear; a face keeps the winding of its owner.
pub fn boundary_faces(source: &Dataset) -> LoadResult<Dataset> {
    let Topology::Unstructured(cells) = source.topology() else {
        return compact(source, Vec::new());
    };

    let mut counts: HashMap<[u32; 4], u32> = HashMap::new();
    let mut candidates: Vec<([u32; 4], Face)> = Vec::new();
    let mut faces = Vec::new();

    for (index, cell) in cells.iter().enumerate() {
        if cell.kind.is_surface() {
            faces.push(Face {
                cell: cell.clone(),
                owner: Some(index),
            });
            continue;
        }
        for local in cell.kind.faces() {
            let ids: Vec<u32> = local.iter().map(|&l| cell.indices[l]).collect();
            let key = face_key(&ids);
            *counts.entry(key).or_insert(0) += 1;
            let kind = if ids.len() == 3 {
                CellKind::Triangle
            } else {
                CellKind::Polygon
            };
            candidates.push((
                key,
                Face {
                    cell: Cell::new(kind, ids),
                    owner: Some(index),
                },
            ));
        }
    }

    faces.extend(
        candidates
            .into_iter()
            .filter(|(key, _)| counts.get(key) == Some(&1))
            .map(|(_, face)| face),
    );
    log::debug!(
        "Extracted {} boundary faces from {} cells",
        faces.len(),
        cells.len()
    );
    compact(source, faces)
}

/// Sorted point ids padded with `u32::MAX`.
fn face_key(ids: &[u32]) -> [u32; 4] {
    let mut key = [u32::MAX; 4];
    key[..ids.len()].copy_from_slice(ids);
    key.sort_unstable();
    key
}

/// Builds a surface dataset keeping only referenced points. Cell arrays are
/// copied when every face has an owner.
fn compact(source: &Dataset, faces: Vec<Face>) -> LoadResult<Dataset> {
    let mut remap = vec![u32::MAX; source.point_count()];
    let mut kept: Vec<usize> = Vec::new();
    let mut owners = Vec::with_capacity(faces.len());
    let mut cells = Vec::with_capacity(faces.len());

    for face in faces {
        let indices = face
            .cell
            .indices
            .iter()
            .map(|&p| {
                let slot = &mut remap[p as usize];
                if *slot == u32::MAX {
                    *slot = kept.len() as u32;
                    kept.push(p as usize);
                }
                *slot
            })
            .collect();
        cells.push(Cell::new(face.cell.kind, indices));
        owners.push(face.owner);
    }

    let positions = kept.iter().map(|&p| source.point(p)).collect();
    let mut dataset = Dataset::new(positions, Topology::Unstructured(cells))?;

    for (name, values) in source.point_data() {
        let remapped = kept.iter().map(|&p| values[p]).collect();
        dataset = dataset.with_point_array(name.clone(), remapped)?;
    }
    if let Some(owners) = owners.into_iter().collect::<Option<Vec<usize>>>() {
        for (name, values) in source.cell_data() {
            let inherited = owners.iter().map(|&c| values[c]).collect();
            dataset = dataset.with_cell_array(name.clone(), inherited)?;
        }
    }
    Ok(dataset)
}
