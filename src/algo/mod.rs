//! Connectivity and topology algorithms.
//!
//! This module contains the engine behind seam stitching:
//!
//! - **Disjoint sets**: union-find over arbitrary keys
//! - **Connectivity**: filtered vertex-adjacency graph with rest lengths
//! - **Seams**: hop-shortest paths and equal-length path matching
//! - **Topology**: Betti numbers from edge/face incidence
//!
//! Every algorithm reads a mesh snapshot (`positions` + `faces`). The graph
//! and the Betti numbers are independent: neither needs the other to exist.

pub mod connectivity;
pub mod disjoint_set;
pub mod seam;
pub mod topology;

pub use connectivity::{build_graph, ConnectivityGraph, EdgeRecord, GraphOptions, SeamLink};
pub use disjoint_set::DisjointSet;
pub use seam::{bfs, bfs_shortest_path, match_seams, BfsOptions, HopResult, SeamMatch};
pub use topology::{analyze, compute_betti, BettiNumbers, TopologyAnalysis};
