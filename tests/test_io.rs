use std::fs;

use byteorder::{LittleEndian, WriteBytesExt};
use p3d2gmsh::{
    assemble, read_msh_counts, read_plot3d_ascii, read_plot3d_binary, write_msh, BinaryFormat,
    Block, BoundaryRecord, Endian, FloatPrecision, MeshError,
};

/// Coordinate encoding that makes the (i, j, k) position recoverable.
fn coord(i: usize, j: usize, k: usize) -> f64 {
    (100 * i + 10 * j + k) as f64
}

/// ASCII grid payload for one block, k varying fastest, then j, then i.
fn ascii_payload(imax: usize, jmax: usize, kmax: usize) -> Vec<f64> {
    let mut vals = Vec::new();
    for i in 0..imax {
        for j in 0..jmax {
            for k in 0..kmax {
                vals.push(coord(i, j, k));
            }
        }
    }
    vals
}

fn sample_block() -> Block {
    let vals = ascii_payload(2, 3, 2);
    Block::new(
        2,
        3,
        2,
        vals.clone(),
        vals.iter().map(|v| v + 0.5).collect(),
        vals.iter().map(|v| -v).collect(),
    )
}

#[test]
fn ascii_reader_follows_k_fastest_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("case.xyz");

    let vals = ascii_payload(2, 3, 2);
    let mut body = String::from("1\n2 3 2\n");
    // irregular line breaks: the payload is one whitespace-delimited stream
    for (n, chunk) in vals.iter().collect::<Vec<_>>().chunks(5).enumerate() {
        let line: Vec<String> = chunk.iter().map(|v| format!("{v}")).collect();
        body.push_str(&line.join(if n % 2 == 0 { " " } else { "  " }));
        body.push('\n');
    }
    for scale in [2.0, 3.0] {
        for v in &vals {
            body.push_str(&format!("{} ", v * scale));
        }
        body.push('\n');
    }
    fs::write(&path, body).unwrap();

    let blocks = read_plot3d_ascii(&path).unwrap();
    assert_eq!(blocks.len(), 1);
    let block = &blocks[0];
    assert_eq!(block.dims(), (2, 3, 2));
    for i in 0..2 {
        for j in 0..3 {
            for k in 0..2 {
                let (x, y, z) = block.xyz(i, j, k);
                assert_eq!(x, coord(i, j, k));
                assert_eq!(y, 2.0 * coord(i, j, k));
                assert_eq!(z, 3.0 * coord(i, j, k));
            }
        }
    }
}

#[test]
fn ascii_reader_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    match read_plot3d_ascii(dir.path().join("absent.xyz")) {
        Err(MeshError::MissingFile { .. }) => {}
        other => panic!("expected MissingFile, got {other:?}"),
    }
}

#[test]
fn ascii_reader_rejects_truncated_payload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.xyz");
    fs::write(&path, "1\n2 2 2\n1.0 2.0 3.0\n").unwrap();
    match read_plot3d_ascii(&path) {
        Err(MeshError::InvalidContent { .. }) => {}
        other => panic!("expected InvalidContent, got {other:?}"),
    }
}

#[test]
fn raw_binary_reader_matches_ascii() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("case.xyzb");
    let block = sample_block();

    let mut buf = Vec::new();
    buf.write_u32::<LittleEndian>(1).unwrap();
    buf.write_u32::<LittleEndian>(block.imax as u32).unwrap();
    buf.write_u32::<LittleEndian>(block.jmax as u32).unwrap();
    buf.write_u32::<LittleEndian>(block.kmax as u32).unwrap();
    for var in [&block.x, &block.y, &block.z] {
        for &v in var.iter() {
            buf.write_f64::<LittleEndian>(v).unwrap();
        }
    }
    fs::write(&path, &buf).unwrap();

    let blocks = read_plot3d_binary(
        &path,
        BinaryFormat::Raw,
        FloatPrecision::F64,
        Endian::Little,
    )
    .unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].x, block.x);
    assert_eq!(blocks[0].y, block.y);
    assert_eq!(blocks[0].z, block.z);
}

#[test]
fn fortran_binary_reader_matches_ascii() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("case.xyzb");
    let block = sample_block();

    fn record(buf: &mut Vec<u8>, payload: &[u8]) {
        buf.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
        buf.extend_from_slice(payload);
        buf.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
    }

    let mut buf = Vec::new();
    record(&mut buf, &1u32.to_le_bytes());
    let mut dims = Vec::new();
    dims.write_u32::<LittleEndian>(block.imax as u32).unwrap();
    dims.write_u32::<LittleEndian>(block.jmax as u32).unwrap();
    dims.write_u32::<LittleEndian>(block.kmax as u32).unwrap();
    record(&mut buf, &dims);
    for var in [&block.x, &block.y, &block.z] {
        let mut payload = Vec::new();
        for &v in var.iter() {
            payload.write_f64::<LittleEndian>(v).unwrap();
        }
        record(&mut buf, &payload);
    }
    fs::write(&path, &buf).unwrap();

    let blocks = read_plot3d_binary(
        &path,
        BinaryFormat::Fortran,
        FloatPrecision::F64,
        Endian::Little,
    )
    .unwrap();
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].dims(), block.dims());
    assert_eq!(blocks[0].x, block.x);
}

#[test]
fn written_mesh_round_trips_counts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.msh");

    let blocks = [sample_block()];
    let records = [BoundaryRecord {
        label: "wall".to_string(),
        block: 1,
        face: 1,
        range1: (1, 2),
        range2: (1, 3),
    }];
    let mesh = assemble(&blocks, &records).unwrap();
    write_msh(&path, &mesh).unwrap();

    let (nodes, elements) = read_msh_counts(&path).unwrap();
    assert_eq!(nodes, mesh.nodes.len());
    assert_eq!(elements, mesh.elements.len());
}

#[test]
fn written_mesh_has_expected_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.msh");

    let mesh = assemble(&[sample_block()], &[]).unwrap();
    write_msh(&path, &mesh).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "$MeshFormat");
    assert_eq!(lines[1], "2.2 0 8");
    assert_eq!(lines[2], "$EndMeshFormat");
    assert_eq!(lines[3], "$PhysicalNames");
    assert_eq!(lines[4], "1");
    assert_eq!(lines[5], "3 1 \"mesh\"");
    assert_eq!(lines[6], "$EndPhysicalNames");
    assert_eq!(lines[7], "$Nodes");
    assert_eq!(lines[8], "12");

    // node line: id plus three 13-digit scientific coordinates
    let first_node: Vec<&str> = lines[9].split_whitespace().collect();
    assert_eq!(first_node[0], "1");
    assert_eq!(first_node.len(), 4);
    for token in &first_node[1..] {
        let mantissa = token.split('e').next().unwrap();
        let digits = mantissa.split('.').nth(1).unwrap();
        assert_eq!(digits.len(), 13, "coordinate {token}");
        token.parse::<f64>().unwrap();
    }

    // first element line: id, hexahedron type code, two tags, 8 nodes
    let el_start = lines.iter().position(|l| *l == "$Elements").unwrap();
    let first_el: Vec<&str> = lines[el_start + 2].split_whitespace().collect();
    assert_eq!(first_el[..5].to_vec(), ["1", "5", "2", "1", "-1"]);
    assert_eq!(first_el.len(), 13);

    // no leftover temporary file
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn failed_conversion_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let grid_path = dir.path().join("case.xyz");

    // single first-axis plane: assembly fails before anything is written
    let mut body = String::from("1\n1 2 2\n");
    for _ in 0..3 {
        for v in ascii_payload(1, 2, 2) {
            body.push_str(&format!("{v} "));
        }
        body.push('\n');
    }
    fs::write(&grid_path, body).unwrap();

    let blocks = read_plot3d_ascii(&grid_path).unwrap();
    assert!(assemble(&blocks, &[]).is_err());
    assert!(!dir.path().join("case.msh").exists());
}
