/// Diagnostic tool: reads AC3D files, prints what the reader found, writes
/// them back and checks that the re-read scene is structurally equal.
///
/// Usage:
///     cargo run --bin diag_roundtrip -- <file.ac>
///     cargo run --bin diag_roundtrip -- models/   (checks every .ac in dir)

use ac3drust::io::ac::{parse, AcReader, AcWriter};
use ac3drust::{SceneGraph, SceneNode};
use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        bail!("Usage: diag_roundtrip <file.ac or directory>");
    }

    let path = PathBuf::from(&args[1]);
    let mut files = Vec::new();
    if path.is_dir() {
        for entry in fs::read_dir(&path).with_context(|| format!("reading {}", path.display()))? {
            let p = entry?.path();
            if p.extension().map(|e| e == "ac").unwrap_or(false) {
                files.push(p);
            }
        }
        files.sort();
    } else {
        files.push(path);
    }

    let mut success = 0;
    let mut failed = 0;
    for file in &files {
        match diagnose(file) {
            Ok(true) => success += 1,
            Ok(false) => failed += 1,
            Err(e) => {
                println!("FAILED {}: {:#}", file.display(), e);
                failed += 1;
            }
        }
    }

    println!();
    println!("Results: {} round-tripped, {} failed out of {} total", success, failed, files.len());
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn diagnose(path: &Path) -> Result<bool> {
    println!("== {}", path.display());

    let scene = AcReader::from_file(path)
        .with_context(|| format!("opening {}", path.display()))?
        .read()
        .context("reading")?;

    print_summary(&scene);

    let bytes = AcWriter::new(&scene).write_to_vec().context("writing back")?;
    let reread = parse(&bytes).context("re-reading written output")?;

    if reread == scene {
        println!("   round trip: equal ({} bytes written)", bytes.len());
        Ok(true)
    } else {
        println!("   round trip: DIFFERENT");
        Ok(false)
    }
}

fn print_summary(scene: &SceneGraph) {
    println!(
        "   {}  {} material(s), {} node(s){}",
        scene.version,
        scene.materials.len(),
        scene.node_count(),
        if scene.repaired { ", repaired" } else { "" }
    );
    for (i, material) in scene.materials.iter().enumerate() {
        println!("   MATERIAL {:>3} {:?} rgb {}", i, material.name, material.diffuse);
    }
    scene.root.walk(&mut |node: &SceneNode, depth| {
        let geometry = node
            .polygon_data()
            .map(|p| format!(" ({} vertices, {} surfaces)", p.vertices.len(), p.surfaces.len()))
            .unwrap_or_default();
        println!(
            "   {}{} {:?}{}",
            "  ".repeat(depth),
            node.kind.keyword(),
            node.display_name(),
            geometry
        );
    });
    for notification in &scene.notifications {
        println!("   {}", notification);
    }
}
