//! File-level reskinning (.skn + .obj -> .skn)

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use mjskin_common::{SkinSummary, decode_skin, encode_skin};

use crate::mesh::{AxisConvention, ObjOptions, load_obj};
use crate::reskin::assemble_with_report;

/// Options for [`reskin_files`]
#[derive(Debug, Clone, Default)]
pub struct ReskinOptions {
    /// Axis convention of the OBJ exporter
    pub axes: AxisConvention,
    /// Only take faces from this OBJ object or group
    pub object: Option<String>,
}

impl ReskinOptions {
    pub fn obj_options(&self) -> ObjOptions {
        ObjOptions {
            axes: self.axes,
            object: self.object.clone(),
        }
    }
}

/// Reskin `skin` onto the mesh in `mesh` and write the result to `output`.
///
/// Nothing is written unless every step succeeds. A failed write removes
/// any partial output.
pub fn reskin_files(
    skin: &Path,
    mesh: &Path,
    output: &Path,
    options: &ReskinOptions,
) -> Result<SkinSummary> {
    let data = fs::read(skin).with_context(|| format!("Failed to read skin: {:?}", skin))?;
    let source = decode_skin(&data).with_context(|| format!("Failed to decode skin: {:?}", skin))?;
    tracing::info!("Source skin: {}", source.summary());

    let target = load_obj(mesh, &options.obj_options())
        .with_context(|| format!("Failed to load mesh: {:?}", mesh))?;
    tracing::info!(
        "Target mesh: {} vertices, {} triangles",
        target.vertex_count(),
        target.faces.len()
    );
    if let (Some(from), Some(to)) = (source.geometry.bounds(), target.bounds()) {
        tracing::debug!("Bounds: source {:?}, target {:?}", from, to);
    }

    let (skin_out, report) = assemble_with_report(&source, target)
        .with_context(|| format!("Failed to reskin {:?} onto {:?}", skin, mesh))?;

    if report.unweighted_vertices > 0 {
        tracing::warn!(
            "{} of {} target vertices matched a source vertex with no bone weights",
            report.unweighted_vertices,
            report.nearest.len()
        );
    }
    tracing::debug!("Largest vertex match distance: {:.6}", report.max_distance);

    skin_out.validate().context("Reskinned skin is invalid")?;
    let bytes = encode_skin(&skin_out).context("Failed to encode skin")?;

    if let Err(err) = fs::write(output, &bytes) {
        // Don't leave a truncated file behind
        let _ = fs::remove_file(output);
        return Err(err).with_context(|| format!("Failed to write skin: {:?}", output));
    }

    let summary = skin_out.summary();
    tracing::info!("Wrote {:?}: {}", output, summary);
    Ok(summary)
}
