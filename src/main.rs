use std::process;
use std::time::Instant;

use anyhow::{anyhow, bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use roadgraph::algorithms::analysis::{DegreeProfile, GraphStats, MstSavings};
use roadgraph::algorithms::mst::MstResult;
use roadgraph::config::{GraphFile, GraphKind};
use roadgraph::types::{DirectedWeightedGraph, Graph};
use roadgraph::util::random_connected_graph;

#[derive(Parser, Debug, Serialize)]
#[command(author, version, about)]
struct Args {
    /// Path of the YAML graph description.
    #[arg(short, long, default_value_t = String::from("data/brazil_roads.yaml"))]
    dataset: String,

    /// The task to be performed: kruskal, prim, compare, bfs, dfs,
    /// dfs-iterative, components, path, cycle, stats or bellman-ford.
    #[arg(short, long, default_value_t = String::from("compare"))]
    task: String,

    /// Source vertex label.
    #[arg(short, long)]
    source: Option<String>,

    /// Destination vertex label.
    #[arg(short = 'e', long)]
    destination: Option<String>,

    /// Use a random connected graph with this many vertices instead of a file.
    #[arg(short, long)]
    random: Option<usize>,

    /// Seed of the random graph.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress logging.
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let args: Args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else if !args.quiet {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    if args.task == "bellman-ford" {
        let graph = load_directed(args)?;
        let start = Instant::now();
        bellman_ford(&graph, args)?;
        println!("Bellman-Ford Elapsed Time: {:?} us", start.elapsed().as_micros());
        return Ok(());
    }

    let graph = load_undirected(args)?;
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        task = %args.task,
        "running task"
    );

    let start = Instant::now();
    match args.task.as_str() {
        "kruskal" => {
            let mst = graph.kruskal()?;
            print_tree("Kruskal", &graph, &mst);
        }
        "prim" => {
            let mst = graph.prim(args.source.as_deref())?;
            print_tree("Prim", &graph, &mst);
        }
        "compare" => {
            let kruskal = graph.kruskal()?;
            let prim = graph.prim(args.source.as_deref())?;
            print_tree("Kruskal", &graph, &kruskal);
            print_tree("Prim", &graph, &prim);
            if kruskal.same_weight_as(&prim) {
                println!("Both trees weigh {:.2}", kruskal.total_weight);
            } else {
                bail!(
                    "spanning tree weights differ: kruskal {} vs prim {}",
                    kruskal.total_weight,
                    prim.total_weight
                );
            }
        }
        "bfs" => {
            let (origin, destination) = endpoints(args)?;
            let result = graph.shortest_path(origin, destination)?;
            println!("Path: {}", result.path.join(" -> "));
            println!("Distance: {} edges", result.distance);
        }
        "dfs" | "dfs-iterative" => {
            let origin = source_or_first(args, &graph)?;
            let order = if args.task == "dfs" {
                graph.depth_first(origin)?
            } else {
                graph.depth_first_iterative(origin)?
            };
            println!("Visit order: {}", order.join(" -> "));
        }
        "components" => {
            let components = graph.components();
            println!("{} connected component(s)", components.len());
            for (i, component) in components.iter().enumerate() {
                println!("  {}: {}", i + 1, component.join(", "));
            }
        }
        "path" => {
            let (origin, destination) = endpoints(args)?;
            let path = graph.find_path(origin, destination)?;
            println!("Path: {} ({} edges)", path.join(" -> "), path.len() - 1);
        }
        "cycle" => {
            if graph.has_cycle() {
                println!("The graph contains a cycle");
            } else {
                println!("The graph is acyclic");
            }
        }
        "stats" => {
            let stats = GraphStats::collect(&graph);
            println!("Vertices: {}", stats.vertex_count);
            println!("Edges: {}", stats.edge_count);
            println!("Total weight: {:.2}", stats.total_weight);
            println!("Average degree: {:.2}", stats.average_degree);
            if let Some((vertex, degree)) = &stats.busiest_vertex {
                println!("Busiest vertex: {} ({} neighbors)", vertex, degree);
            }
            println!("Components: {}", stats.component_count);
            println!("Has cycle: {}", stats.has_cycle);
        }
        other => bail!("task {} not supported", other),
    }
    println!("{} Elapsed Time: {:?} us", args.task, start.elapsed().as_micros());
    Ok(())
}

fn load_undirected(args: &Args) -> anyhow::Result<Graph> {
    if let Some(vertex_count) = args.random {
        info!(vertex_count, seed = args.seed, "generating random graph");
        return Ok(random_connected_graph(vertex_count, vertex_count, 100, args.seed)?);
    }
    let file = GraphFile::load(&args.dataset)
        .with_context(|| format!("loading {}", args.dataset))?;
    if file.kind != GraphKind::Undirected {
        bail!("task {} needs an undirected graph", args.task);
    }
    Ok(file.to_graph()?)
}

fn load_directed(args: &Args) -> anyhow::Result<DirectedWeightedGraph> {
    if args.random.is_some() {
        bail!("bellman-ford needs a directed graph file");
    }
    let file = GraphFile::load(&args.dataset)
        .with_context(|| format!("loading {}", args.dataset))?;
    let graph = file.to_directed()?;
    let degrees = DegreeProfile::of(&graph);
    info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        average_out_degree = degrees.average_degree,
        hub = ?degrees.busiest_vertex.map(|(index, _)| graph.display_name(index)),
        "directed graph ready"
    );
    Ok(graph)
}

fn endpoints(args: &Args) -> anyhow::Result<(&str, &str)> {
    let origin = args.source.as_deref().ok_or_else(|| anyhow!("--source is required"))?;
    let destination = args
        .destination
        .as_deref()
        .ok_or_else(|| anyhow!("--destination is required"))?;
    Ok((origin, destination))
}

fn source_or_first<'a>(args: &'a Args, graph: &'a Graph) -> anyhow::Result<&'a str> {
    match args.source.as_deref() {
        Some(source) => Ok(source),
        None => graph
            .vertices()
            .first()
            .map(String::as_str)
            .ok_or_else(|| anyhow!("graph has no vertices")),
    }
}

fn print_tree(algorithm: &str, graph: &Graph, mst: &MstResult<String>) {
    println!("{} spanning tree ({} edges):", algorithm, mst.edge_count());
    for edge in &mst.edges {
        println!("  {} - {}: {}", edge.source, edge.target, edge.weight);
    }
    let savings = MstSavings::compute(graph, mst);
    println!(
        "Total: {:.2} of {:.2}, saving {:.2} ({:.1}%)",
        savings.tree_weight, savings.network_weight, savings.saved, savings.saved_percent
    );
}

fn resolve_directed(graph: &DirectedWeightedGraph, label: &str) -> anyhow::Result<usize> {
    match graph.index_of(label) {
        Some(index) => Ok(index),
        None => label
            .parse::<usize>()
            .map_err(|_| anyhow!("unknown vertex: {}", label)),
    }
}

fn bellman_ford(graph: &DirectedWeightedGraph, args: &Args) -> anyhow::Result<()> {
    let origin = match args.source.as_deref() {
        Some(label) => resolve_directed(graph, label)?,
        None => 0,
    };
    let result = graph.bellman_ford(origin)?;
    println!("{} after {} pass(es)", result.message(), result.passes);
    let result = result.into_result()?;

    match args.destination.as_deref() {
        Some(label) => {
            let target = resolve_directed(graph, label)?;
            let path = result.path_to(target)?;
            let names: Vec<String> = path.iter().map(|&v| graph.display_name(v)).collect();
            println!("Path: {}", names.join(" -> "));
            println!("Distance: {}", result.distances[target]);
        }
        None => {
            for (index, distance) in result.distances.iter().enumerate() {
                if distance.is_finite() {
                    println!("  {}: {}", graph.display_name(index), distance);
                } else {
                    println!("  {}: unreachable", graph.display_name(index));
                }
            }
        }
    }
    Ok(())
}
