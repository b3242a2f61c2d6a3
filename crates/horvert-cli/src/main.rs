use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use horvert::{Graph, Planarity};

#[derive(Parser)]
#[command(name = "horvert")]
#[command(about = "Planarity testing and visibility-representation drawing")]
struct Args {
    /// Algorithm: p (planarity), d (planar drawing), a (all)
    command: char,

    /// Input graph: a line with the vertex count, then one "u v" pair per
    /// line, zero based. Blank lines and lines starting with '#' are
    /// ignored.
    input: PathBuf,
}

fn read_graph(path: &Path) -> Result<Graph> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'));

    let n: usize = lines
        .next()
        .context("missing vertex count line")?
        .parse()
        .context("bad vertex count")?;
    let mut g = Graph::new(n);
    for line in lines {
        let mut it = line.split_whitespace();
        let (u, v) = (it.next(), it.next());
        let (Some(u), Some(v), None) = (u, v, it.next()) else {
            bail!("bad edge line: {line:?}");
        };
        let u: usize = u.parse().with_context(|| format!("bad vertex in {line:?}"))?;
        let v: usize = v.parse().with_context(|| format!("bad vertex in {line:?}"))?;
        g.add_edge(u, v)
            .with_context(|| format!("cannot add edge {u} {v}"))?;
    }
    Ok(g)
}

fn run_planarity(g: &Graph) -> Result<Planarity> {
    let mut scratch = g.clone();
    scratch.detach_drawing();
    let verdict = scratch.embed()?;
    match verdict {
        Planarity::Planar => println!("planar"),
        Planarity::NonPlanar => println!("not planar"),
    }
    Ok(verdict)
}

fn run_drawing(g: &mut Graph) -> Result<()> {
    g.attach_drawing()?;
    match g.embed()? {
        Planarity::Planar => {
            print!("{}", g.render_drawing()?);
            print!("{}", g.write_drawing_coords()?);
        }
        Planarity::NonPlanar => println!("not planar; nothing to draw"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut g = read_graph(&args.input)?;

    match args.command {
        'p' => {
            run_planarity(&g)?;
        }
        'd' => {
            run_drawing(&mut g)?;
        }
        'a' => {
            if run_planarity(&g)? == Planarity::Planar {
                run_drawing(&mut g)?;
            }
        }
        c @ ('o' | '2' | '3' | '4' | 'c') => {
            bail!("algorithm '{c}' belongs to the analysis extensions and is not built into this tool");
        }
        c => bail!("unknown algorithm '{c}' (expected p, d, or a)"),
    }
    Ok(())
}
