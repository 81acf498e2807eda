use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{MeshError, MeshResult};
use crate::mesh::Mesh;

/// Write `mesh` as a Gmsh MSH 2.2 ASCII file.
///
/// The mesh is first written to a `.tmp` sibling and renamed into place on
/// success, so an aborted conversion never leaves a truncated file that
/// still looks like a valid mesh.
pub fn write_msh(path: impl AsRef<Path>, mesh: &Mesh) -> MeshResult<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("msh.tmp");
    {
        let mut w = BufWriter::new(File::create(&tmp_path)?);
        write_sections(&mut w, mesh)?;
        w.flush()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

fn write_sections(w: &mut impl Write, mesh: &Mesh) -> MeshResult<()> {
    writeln!(w, "$MeshFormat")?;
    writeln!(w, "2.2 0 8")?;
    writeln!(w, "$EndMeshFormat")?;

    writeln!(w, "$PhysicalNames")?;
    writeln!(w, "{}", mesh.groups.len())?;
    for grp in &mesh.groups {
        writeln!(w, "{} {} \"{}\"", grp.dim, grp.id, grp.name)?;
    }
    writeln!(w, "$EndPhysicalNames")?;

    writeln!(w, "$Nodes")?;
    writeln!(w, "{}", mesh.nodes.len())?;
    for node in &mesh.nodes {
        writeln!(w, "{} {:.13e} {:.13e} {:.13e}", node.id, node.x, node.y, node.z)?;
    }
    writeln!(w, "$EndNodes")?;

    writeln!(w, "$Elements")?;
    writeln!(w, "{}", mesh.elements.len())?;
    for el in &mesh.elements {
        write!(w, "{} {} 2 {} -1", el.id, el.kind.type_code(), el.group)?;
        for node in &el.nodes {
            write!(w, " {node}")?;
        }
        writeln!(w)?;
    }
    writeln!(w, "$EndElements")?;
    Ok(())
}

/// Node and element counts declared by a written MSH file.
///
/// Reads just the `$Nodes` and `$Elements` count lines, enough to check a
/// written file against the in-memory mesh.
pub fn read_msh_counts(path: impl AsRef<Path>) -> MeshResult<(usize, usize)> {
    let rdr = BufReader::new(File::open(path.as_ref())?);
    let mut nodes = None;
    let mut elements = None;
    let mut lines = rdr.lines();
    while let Some(line) = lines.next() {
        let line = line?;
        let target = match line.trim() {
            "$Nodes" => &mut nodes,
            "$Elements" => &mut elements,
            _ => continue,
        };
        let count_line = lines
            .next()
            .ok_or_else(|| MeshError::invalid_content("section count line missing"))??;
        *target = Some(count_line.trim().parse::<usize>()?);
    }
    match (nodes, elements) {
        (Some(n), Some(e)) => Ok((n, e)),
        _ => Err(MeshError::invalid_content(
            "missing $Nodes or $Elements section",
        )),
    }
}
