//! Knitmesh CLI - connectivity and topology reports for generated meshes.
//!
//! Usage: knitmesh <COMMAND> [OPTIONS]
//!
//! Run `knitmesh --help` for available commands. Set `RUST_LOG=debug` for
//! extraction and seam details.

use clap::{Args, Parser, Subcommand, ValueEnum};

use knitmesh::algo::{analyze, build_graph};
use knitmesh::editor::{EditorOptions, SeamEditor};
use knitmesh::mesh::{shapes, TriMesh, VertexId};

#[derive(Parser)]
#[command(name = "knitmesh")]
#[command(author, version, about = "Mesh connectivity and topology CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute Betti numbers of a generated shape
    Betti {
        #[command(flatten)]
        shape: ShapeArgs,
    },

    /// Extract the connectivity graph of a generated shape
    Graph {
        #[command(flatten)]
        shape: ShapeArgs,

        /// Squared-distance cutoff (default: plane diagonal filter for planes, none otherwise)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Stitch two curves on a plane
    Seam {
        /// Plane cells along x
        #[arg(long, default_value = "10")]
        width: usize,

        /// Plane cells along y
        #[arg(long, default_value = "10")]
        height: usize,

        /// Start of the first curve
        src1: usize,
        /// End of the first curve
        dst1: usize,
        /// Start of the second curve
        src2: usize,
        /// End of the second curve
        dst2: usize,
    },
}

#[derive(Args)]
struct ShapeArgs {
    /// Shape to generate
    #[arg(value_enum)]
    shape: Shape,

    /// Cells along the first direction (segments for torus and cylinder)
    #[arg(long, visible_alias = "nu", default_value = "10")]
    width: usize,

    /// Cells along the second direction (rings or stacks)
    #[arg(long, visible_alias = "nv", default_value = "10")]
    height: usize,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Shape {
    /// Flat grid of unit cells
    Plane,
    /// Closed tetrahedron
    Tetrahedron,
    /// Closed torus
    Torus,
    /// Open-ended cylinder
    Cylinder,
}

impl ShapeArgs {
    fn generate(&self) -> knitmesh::error::Result<TriMesh> {
        match self.shape {
            Shape::Plane => shapes::plane(self.width, self.height),
            Shape::Tetrahedron => Ok(shapes::tetrahedron()),
            Shape::Torus => shapes::torus(2.0, 0.5, self.width, self.height),
            Shape::Cylinder => shapes::cylinder(1.0, 2.0, self.width, self.height),
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Betti { shape } => cmd_betti(&shape)?,
        Commands::Graph { shape, threshold } => cmd_graph(&shape, threshold)?,
        Commands::Seam {
            width,
            height,
            src1,
            dst1,
            src2,
            dst2,
        } => cmd_seam(width, height, [src1, dst1, src2, dst2])?,
    }

    Ok(())
}

fn cmd_betti(shape: &ShapeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = shape.generate()?;
    let report = analyze(mesh.positions(), mesh.faces())?;

    println!("Vertices: {}", report.vertices);
    println!("Edges: {}", report.edges);
    println!("Faces: {}", report.faces);
    println!("Boundary edges: {}", report.boundary_edges);
    if report.non_manifold_edges > 0 {
        println!(
            "Non-manifold edges: {} ({} unordered)",
            report.non_manifold_edges, report.unordered_edges
        );
    }
    println!("Euler characteristic: {}", report.betti.euler_characteristic());
    println!("Betti numbers: {}", report.betti);

    Ok(())
}

fn cmd_graph(shape: &ShapeArgs, threshold: Option<f64>) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = shape.generate()?;
    let threshold = threshold.unwrap_or(match shape.shape {
        Shape::Plane => shapes::PLANE_THRESHOLD,
        _ => f64::INFINITY,
    });
    let graph = build_graph(mesh.positions(), mesh.faces(), threshold);

    println!("Vertices: {}", graph.num_vertices());
    println!("Edges: {}", graph.num_edges());
    println!("Rejected by threshold: {}", graph.rejected_edges());

    if graph.num_edges() > 0 {
        let (min, max, sum) = graph.edges().fold(
            (f64::INFINITY, 0.0_f64, 0.0),
            |(min, max, sum), (_, _, record)| {
                (min.min(record.rest_length), max.max(record.rest_length), sum + record.rest_length)
            },
        );
        let avg = sum / graph.num_edges() as f64;
        println!("Rest length: min={:.6}, max={:.6}, avg={:.6}", min, max, avg);
    }

    let max_degree = mesh.vertex_ids().map(|v| graph.degree(v)).max().unwrap_or(0);
    println!("Max degree: {}", max_degree);

    Ok(())
}

fn cmd_seam(width: usize, height: usize, handles: [usize; 4]) -> Result<(), Box<dyn std::error::Error>> {
    let mesh = shapes::plane(width, height)?;
    let num_vertices = mesh.num_vertices();
    let options = EditorOptions::default().with_threshold(shapes::PLANE_THRESHOLD);
    let mut editor = SeamEditor::new(mesh, options)?;

    for h in handles {
        if h >= num_vertices {
            return Err(format!("vertex {} out of range (mesh has {} vertices)", h, num_vertices).into());
        }
        editor.select(VertexId::new(h));
    }

    let seam = editor.add_seam_from_selection()?;
    println!("Path 1: {:?}", seam.path1());
    println!("Path 2: {:?}", seam.path2());
    println!("Stitched pairs: {}", seam.len());
    println!("Bridging triangles: {}", editor.seam_triangles().len());

    Ok(())
}
