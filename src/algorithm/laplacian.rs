use super::node_positions;
use crate::backend::*;
use crate::sparse::CsrMatrix;
use crate::Result;

/// Edge attribute holding weights for Laplacians. Edges without it weigh 1.
pub const WEIGHT: &str = "weight";

/// Laplacian matrices over any backend.
///
/// Rows and columns follow the canonical node order of the backend:
/// slot order for label-addressed graphs, ascending IDs for compact-indexed ones.
pub trait Laplacian
where
    Self: Backend,
{
    /// $L = D - A$, where $D$ holds weighted degrees and $A$ edge weights.
    fn laplacian_matrix(&self) -> Result<CsrMatrix> {
        let (lap, _) = laplacian_with_degrees(self)?;
        Ok(lap)
    }

    /// $D^{-1/2} L D^{-1/2}$.
    ///
    /// Rows and columns of nodes whose weighted degree is not positive are all zero.
    fn normalized_laplacian_matrix(&self) -> Result<CsrMatrix> {
        let (lap, degrees) = laplacian_with_degrees(self)?;
        let scale: Vec<f64> = degrees
            .iter()
            .map(|d| if *d > 0.0 { d.sqrt().recip() } else { 0.0 })
            .collect();
        Ok(lap.scaled_symmetric(&scale))
    }
}

impl<B: Backend> Laplacian for B {}

fn laplacian_with_degrees<B: Backend>(graph: &B) -> Result<(CsrMatrix, Vec<f64>)> {
    let n = graph.node_count();
    let positions = node_positions(graph);
    let mut degrees = vec![0.0; n];
    let mut triplets = Vec::with_capacity(n + 2 * graph.edge_count());
    for e in graph.edges() {
        let w = numeric_attr(&e.id, e.data, WEIGHT)?;
        if let (Some(&i), Some(&j)) = (positions.get(&e.u), positions.get(&e.v)) {
            degrees[i] += w;
            degrees[j] += w;
            triplets.push((i, j, -w));
            triplets.push((j, i, -w));
        }
    }
    for (i, d) in degrees.iter().enumerate() {
        triplets.push((i, i, *d));
    }
    Ok((CsrMatrix::from_triplets(n, n, triplets), degrees))
}
